//! Error types for fwshell.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for fwshell operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel read/write errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Session-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Platform table errors
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

impl Error {
    /// True when no matching output arrived before the deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Channel(ChannelError::Timeout(_)) | Error::Transport(TransportError::Timeout(_))
        )
    }

    /// True for failures of the underlying byte stream. The session must be
    /// torn down after one of these.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Channel(ChannelError::Closed | ChannelError::Io(_))
        )
    }
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Server key is not in known_hosts and verification is strict
    #[error("Host key for {host}:{port} is unknown")]
    HostKeyUnknown { host: String, port: u16 },

    /// Server key differs from the one recorded in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Connecting timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Channel layer errors (reads, writes, pattern waits).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// No expected signature appeared before the deadline
    #[error("Pattern not found within {0:?}")]
    Timeout(Duration),

    /// Remote side closed the channel
    #[error("Channel closed")]
    Closed,

    /// Read or write on the channel failed
    #[error("Channel I/O error: {0}")]
    Io(#[from] io::Error),

    /// Output exceeded the per-operation buffer bound
    #[error("Output exceeded {0} bytes without a match")]
    BufferFull(usize),
}

/// Session layer errors (classification, escalation, state).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Session not connected
    #[error("Session not connected - call connect() first")]
    NotConnected,

    /// Session already connected
    #[error("Session already connected")]
    AlreadyConnected,

    /// A prompt was seen but no platform matches it
    #[error("Failed to detect platform from prompt '{prompt}'")]
    PlatformDetection { prompt: String },

    /// Timed out after answering a password challenge
    #[error("Password for '{command}' was not accepted")]
    PasswordRejected { command: String },

    /// Operation not available on the detected platform
    #[error("Operation '{operation}' is not supported on platform '{platform}'")]
    UnknownPlatform { operation: String, platform: String },

    /// enter_privileged() called while already escalated
    #[error("Session is already escalated")]
    AlreadyEscalated,

    /// exit_privileged() called without a prior escalation
    #[error("Session is not escalated")]
    NotEscalated,

    /// Leaving the privileged shell did not bring back a prompt
    #[error("Failed to leave privileged shell: {source}")]
    EscalationExit {
        #[source]
        source: Box<crate::error::Error>,
    },

    /// A previous operation failed and the session has not been resynchronized
    #[error("Session is desynchronized - call resync() or disconnect()")]
    Desynchronized,

    /// Invalid configuration in the session builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Platform table errors.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// A definition for this platform is already registered
    #[error("Platform '{name}' already registered")]
    AlreadyRegistered { name: String },

    /// No definition is registered for the platform
    #[error("No definition registered for platform '{name}'")]
    UnknownPlatform { name: String },

    /// A writer panicked while holding the global registry
    #[error("Platform registry lock poisoned")]
    RegistryPoisoned,
}

/// Result type alias using fwshell's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classification() {
        let err: Error = ChannelError::Timeout(Duration::from_secs(5)).into();
        assert!(err.is_timeout());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_classification() {
        let err: Error = ChannelError::Closed.into();
        assert!(err.is_transport());
        assert!(!err.is_timeout());

        let err: Error = DriverError::AlreadyEscalated.into();
        assert!(!err.is_transport());
    }

    #[test]
    fn test_escalation_exit_keeps_cause() {
        let cause: Error = ChannelError::Timeout(Duration::from_secs(5)).into();
        let err = DriverError::EscalationExit {
            source: Box::new(cause),
        };
        assert!(err.to_string().contains("Pattern not found"));
    }
}
