//! Builder for creating sessions.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::session::{Endpoint, Session, Timeouts};
use crate::channel::{DEFAULT_CAPACITY, PtyConfig, ShellIo};
use crate::error::{DriverError, Result};
use crate::transport::config::{
    AuthMethod, DEFAULT_TERMINAL_HEIGHT, DEFAULT_TERMINAL_TYPE, DEFAULT_TERMINAL_WIDTH,
    HostKeyVerification, SshConfig,
};

/// Builder for constructing sessions.
///
/// # Example
///
/// ```rust,no_run
/// use fwshell::SessionBuilder;
///
/// # async fn example() -> Result<(), fwshell::Error> {
/// let mut session = SessionBuilder::new("192.0.2.10")
///     .username("admin")
///     .password("secret")
///     .build()?;
/// session.connect().await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionBuilder {
    host: String,
    port: u16,
    username: Option<String>,
    auth: Option<AuthMethod>,
    escalation_password: Option<SecretString>,
    connect_timeout: Duration,
    timeouts: Timeouts,
    terminal_width: u32,
    terminal_height: u32,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    capacity: usize,
    verbosity: u8,
}

impl SessionBuilder {
    /// Create a new session builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: None,
            auth: None,
            escalation_password: None,
            connect_timeout: Duration::from_secs(10),
            timeouts: Timeouts::default(),
            terminal_width: DEFAULT_TERMINAL_WIDTH,
            terminal_height: DEFAULT_TERMINAL_HEIGHT,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
            capacity: DEFAULT_CAPACITY,
            verbosity: 0,
        }
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set password authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.auth = Some(AuthMethod::Password(SecretString::from(password.into())));
        self
    }

    /// Set private key authentication.
    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.auth = Some(AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: None,
        });
        self
    }

    /// Set private key authentication with passphrase.
    pub fn private_key_with_passphrase(
        mut self,
        key_path: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.auth = Some(AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: Some(SecretString::from(passphrase.into())),
        });
        self
    }

    /// Password for `expert` or `unix su`.
    pub fn escalation_password(mut self, password: impl Into<String>) -> Self {
        self.escalation_password = Some(SecretString::from(password.into()));
        self
    }

    /// Bound on TCP connect and key exchange.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Bound on the first prompt, on resync and on leaving a shell.
    pub fn handshake_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.handshake = timeout;
        self
    }

    /// Bound on the `rsh` hop into a VAP member.
    pub fn vap_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.vap = timeout;
        self
    }

    /// Set terminal dimensions.
    pub fn terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Set the host key verification mode.
    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    /// Use a custom known_hosts file.
    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Upper bound on the bytes one operation may buffer.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// 0 logs turns at debug level, 2 and above also trace every chunk.
    pub fn verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    fn pty_config(&self) -> PtyConfig {
        PtyConfig {
            capacity: self.capacity,
            trace_data: self.verbosity > 0,
            ..PtyConfig::default()
        }
    }

    /// Build an SSH-backed session. Call [`Session::connect`] to open it.
    pub fn build(self) -> Result<Session> {
        let username = self.username.clone().ok_or_else(|| DriverError::InvalidConfig {
            message: "username is required".to_string(),
        })?;
        let pty_config = self.pty_config();

        let auth = self.auth.ok_or_else(|| DriverError::InvalidConfig {
            message: "a password or private key is required".to_string(),
        })?;

        let ssh_config = SshConfig {
            host: self.host,
            port: self.port,
            username,
            auth,
            timeout: self.connect_timeout,
            terminal_type: DEFAULT_TERMINAL_TYPE.to_string(),
            terminal_width: self.terminal_width,
            terminal_height: self.terminal_height,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        };

        Ok(Session::new(
            Endpoint::Ssh(ssh_config),
            pty_config,
            self.escalation_password,
            self.timeouts,
        ))
    }

    /// Build a session over an already open shell stream, bypassing SSH.
    pub fn build_with_channel(self, io: impl ShellIo + 'static) -> Session {
        let pty_config = self.pty_config();
        Session::new(
            Endpoint::Stream(Some(Box::new(io))),
            pty_config,
            self.escalation_password,
            self.timeouts,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::SessionState;
    use crate::error::Error;

    #[test]
    fn test_username_required() {
        let err = SessionBuilder::new("192.0.2.10")
            .password("pw")
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::Driver(DriverError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_auth_required() {
        let err = SessionBuilder::new("192.0.2.10")
            .username("admin")
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::Driver(DriverError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_build_starts_disconnected() {
        let session = SessionBuilder::new("192.0.2.10")
            .username("admin")
            .password("pw")
            .vap_timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(!session.is_open());
        assert_eq!(session.timeouts().vap, Duration::from_secs(30));
    }

    #[test]
    fn test_verbosity_enables_tracing() {
        let builder = SessionBuilder::new("h").verbosity(1);
        assert!(builder.pty_config().trace_data);
        assert!(!SessionBuilder::new("h").pty_config().trace_data);
    }
}
