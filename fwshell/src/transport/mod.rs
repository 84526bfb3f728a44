//! SSH transport layer wrapping russh.
//!
//! Connects, authenticates and opens the single interactive shell a
//! [`Session`](crate::Session) drives. Everything above this layer only sees
//! the shell as a byte stream.

pub mod config;
mod ssh;

pub use config::{AuthMethod, HostKeyVerification, SshConfig};
pub use ssh::SshTransport;
