//! # fwshell
//!
//! Async shell automaton for Check Point and CrossBeam firewall appliances.
//!
//! fwshell logs into an appliance over SSH, works out which shell it landed
//! in from the prompt and the banners printed on the way, and then runs
//! commands one turn at a time, returning exactly the text between the
//! command echo and the next prompt.
//!
//! ## Features
//!
//! - Async SSH connections via russh
//! - Platform detection: GAiA CLISH, expert shell, SecurePlatform cpshell,
//!   IPSO, CrossBeam CPM and APM
//! - Deadline-bounded reads with true cancellation
//! - Echo suppression and exact output boundaries
//! - `expert` / `unix su` escalation and CrossBeam VAP hops
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use fwshell::SessionBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fwshell::Error> {
//!     let mut session = SessionBuilder::new("192.0.2.10")
//!         .username("admin")
//!         .password("secret")
//!         .build()?;
//!
//!     let platform = session.connect().await?;
//!     println!("{} at {:?}", platform, session.prompt());
//!
//!     let result = session.run("show version", Duration::from_secs(5)).await?;
//!     println!("{}", result.output);
//!
//!     session.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod platform;
pub mod transport;

// Re-export main types for convenience
pub use driver::{CommandResult, EscalationState, Session, SessionBuilder, SessionState, Timeouts};
pub use error::{Error, Result};
pub use platform::{CommandKind, Platform, PlatformDefinition, PlatformRegistry};
pub use transport::{AuthMethod, HostKeyVerification, SshConfig};
