//! The session automaton.
//!
//! A [`Session`] owns one interactive shell and drives it one turn at a
//! time: write a line, then [`read_until`](PtyChannel::read_until) an
//! expectation matches or the deadline passes. Every public operation takes
//! `&mut self`, so two turns can never overlap on the same channel.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use secrecy::SecretString;

use super::privilege::EscalationState;
use super::response::CommandResult;
use crate::channel::{
    EchoThenPrompt, Expectation, HintAndPrompt, HintFlags, PromptMatch, PtyChannel, PtyConfig,
    ShellIo,
};
use crate::error::{DriverError, Error, Result};
use crate::platform::{CommandKind, Platform, PlatformDefinition, PlatformRegistry};
use crate::transport::{SshConfig, SshTransport};

/// Default bound on the handshake and on every resynchronization.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound on the `rsh` hop into a VAP member.
pub const DEFAULT_VAP_TIMEOUT: Duration =
    Duration::from_secs(crate::platform::vendors::crossbeam::VAP_CONNECT_TIMEOUT_SECS);

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No shell is open.
    Disconnected,
    /// Shell open, waiting for the first prompt.
    Handshaking,
    /// Canonical prompt known; commands may be run.
    Ready,
    /// A privilege escalation dialogue is in flight.
    Escalating,
    /// A turn failed or was abandoned. Only [`Session::resync`] and
    /// [`Session::disconnect`] are accepted.
    Error,
}

/// Session-level timeouts. Command timeouts come from the caller or the
/// platform table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Handshake, resync and the wait after leaving a shell.
    pub handshake: Duration,
    /// VAP hop.
    pub vap: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            handshake: DEFAULT_HANDSHAKE_TIMEOUT,
            vap: DEFAULT_VAP_TIMEOUT,
        }
    }
}

/// Where the shell comes from.
pub(super) enum Endpoint {
    /// Connect with russh and open a PTY shell.
    Ssh(SshConfig),
    /// A shell stream supplied by the caller. Usable once.
    Stream(Option<Box<dyn ShellIo>>),
}

/// An interactive session with one firewall appliance.
///
/// # Example
///
/// ```rust,no_run
/// use fwshell::{CommandKind, SessionBuilder};
///
/// # async fn example() -> Result<(), fwshell::Error> {
/// let mut session = SessionBuilder::new("192.0.2.10")
///     .username("admin")
///     .password("secret")
///     .escalation_password("expert-secret")
///     .build()?;
///
/// let platform = session.connect().await?;
/// println!("platform: {}", platform);
///
/// let version = session.run_platform_command(CommandKind::FirewallVersion).await?;
/// println!("{}", version.output);
///
/// session.disconnect().await?;
/// # Ok(())
/// # }
/// ```
pub struct Session {
    pub(super) endpoint: Endpoint,
    pub(super) transport: Option<SshTransport>,
    pub(super) channel: Option<PtyChannel>,
    pub(super) pty_config: PtyConfig,
    pub(super) escalation_password: Option<SecretString>,
    pub(super) timeouts: Timeouts,

    pub(super) state: SessionState,
    pub(super) platform: Platform,
    pub(super) definition: Option<PlatformDefinition>,
    pub(super) prompt: String,
    pub(super) base_prompt: String,
    pub(super) hints: HintFlags,
    pub(super) escalation: EscalationState,
    pub(super) vap: Option<String>,
}

impl Session {
    pub(super) fn new(
        endpoint: Endpoint,
        pty_config: PtyConfig,
        escalation_password: Option<SecretString>,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            endpoint,
            transport: None,
            channel: None,
            pty_config,
            escalation_password,
            timeouts,
            state: SessionState::Disconnected,
            platform: Platform::Unclassified,
            definition: None,
            prompt: String::new(),
            base_prompt: String::new(),
            hints: HintFlags::default(),
            escalation: EscalationState::NotEscalated,
            vap: None,
        }
    }

    /// Open the shell, wait for the first prompt and classify the platform.
    ///
    /// Terminal-type queries are answered with `vt220` and banners are
    /// recorded as hints along the way.
    pub async fn connect(&mut self) -> Result<Platform> {
        if self.state != SessionState::Disconnected {
            return Err(DriverError::AlreadyConnected.into());
        }

        let channel = match &mut self.endpoint {
            Endpoint::Ssh(config) => {
                let transport = SshTransport::connect(config).await?;
                let stream = transport.open_shell().await?;
                self.transport = Some(transport);
                PtyChannel::new(stream, self.pty_config.clone())
            }
            Endpoint::Stream(slot) => {
                let io = slot.take().ok_or_else(|| DriverError::InvalidConfig {
                    message: "the supplied shell stream was already used".to_string(),
                })?;
                PtyChannel::new(io, self.pty_config.clone())
            }
        };
        self.channel = Some(channel);
        self.state = SessionState::Handshaking;

        let mut expect = HintAndPrompt::new(HintFlags::default());
        let matched = turn(
            &mut self.channel,
            &mut self.state,
            SessionState::Handshaking,
            None,
            &mut expect,
            self.timeouts.handshake,
        )
        .await?;
        self.hints = expect.flags();

        if matched.prompt.is_empty() {
            self.state = SessionState::Error;
            return Err(DriverError::PlatformDetection {
                prompt: matched.prompt,
            }
            .into());
        }

        let platform = match Platform::from_prompt(matched.class, &self.hints) {
            Ok(platform) => platform,
            Err(e) => {
                self.state = SessionState::Error;
                return Err(e);
            }
        };

        self.definition = match PlatformRegistry::lookup(platform) {
            Ok(definition) => Some(definition),
            Err(e) => {
                warn!("no command table for {}: {}", platform, e);
                None
            }
        };
        self.platform = platform;
        self.base_prompt = matched.prompt.clone();
        self.prompt = matched.prompt;
        self.state = SessionState::Ready;

        info!("connected: platform {}, prompt {:?}", platform, self.prompt);
        Ok(platform)
    }

    /// Run one command and capture its output.
    ///
    /// The output is everything the shell printed after echoing the command
    /// and strictly before the first occurrence of the canonical prompt.
    pub async fn run(&mut self, command: &str, timeout: Duration) -> Result<CommandResult> {
        self.ensure_ready()?;
        if self.prompt.is_empty() {
            return Err(DriverError::Desynchronized.into());
        }

        debug!("run {:?} (timeout {:?})", command, timeout);
        let start = Instant::now();
        let mut expect = EchoThenPrompt::new(command, &self.prompt);
        let raw = turn(
            &mut self.channel,
            &mut self.state,
            SessionState::Error,
            Some(command),
            &mut expect,
            timeout,
        )
        .await?;

        let end = raw.iter().rposition(|b| *b != 0).map_or(0, |pos| pos + 1);
        let output = String::from_utf8_lossy(&raw[..end]).into_owned();
        let mut result = CommandResult::new(command, output, self.prompt.clone(), start.elapsed());

        if let Some(message) = self
            .definition
            .as_ref()
            .and_then(|def| def.detect_failure(&result.output))
        {
            debug!("{:?} reported failure: {}", command, message);
            result = result.with_failure(message);
        }

        Ok(result)
    }

    /// Run a command from the platform table with its table timeout.
    ///
    /// Commands that need the privileged shell are bracketed by
    /// [`enter_privileged`](Self::enter_privileged) and
    /// [`exit_privileged`](Self::exit_privileged) unless the session is
    /// already escalated.
    pub async fn run_platform_command(&mut self, kind: CommandKind) -> Result<CommandResult> {
        self.ensure_ready()?;
        let spec = self
            .definition
            .as_ref()
            .and_then(|def| def.command(kind))
            .cloned()
            .ok_or_else(|| self.unsupported(kind.name()))?;

        let bracket = spec.privileged && self.escalation != EscalationState::Escalated;
        if bracket {
            self.enter_privileged().await?;
        }

        let result = self.run(&spec.command, spec.timeout).await?;

        if bracket {
            self.exit_privileged().await?;
        }
        Ok(result)
    }

    /// Send an empty line and wait for any prompt.
    ///
    /// Brings a session in [`SessionState::Error`] back to `Ready` once the
    /// shell answers, refreshing the canonical prompt.
    pub async fn resync(&mut self, timeout: Duration) -> Result<()> {
        if self.channel.is_none() || self.state == SessionState::Disconnected {
            return Err(DriverError::NotConnected.into());
        }

        let matched = self.wait_for_prompt(Some(""), timeout).await?;
        if self.escalation == EscalationState::Escalating {
            self.escalation = if matched.prompt == self.base_prompt {
                EscalationState::NotEscalated
            } else {
                EscalationState::Escalated
            };
        }
        self.prompt = matched.prompt;
        self.state = SessionState::Ready;
        debug!("resynchronized at {:?}", self.prompt);
        Ok(())
    }

    /// Send `exit` to the login shell and close the session.
    pub async fn logout(&mut self) -> Result<()> {
        if let Some(channel) = self.channel.as_mut() {
            if let Err(e) = channel.send("exit").await {
                debug!("exit not delivered: {}", e);
            }
        }
        self.disconnect().await
    }

    /// Close the channel and the transport, and forget everything learned
    /// about the remote shell.
    pub async fn disconnect(&mut self) -> Result<()> {
        if let Some(mut channel) = self.channel.take() {
            if let Err(e) = channel.close().await {
                debug!("channel shutdown failed: {}", e);
            }
        }

        self.state = SessionState::Disconnected;
        self.platform = Platform::Unclassified;
        self.definition = None;
        self.prompt.clear();
        self.base_prompt.clear();
        self.hints = HintFlags::default();
        self.escalation = EscalationState::NotEscalated;
        self.vap = None;

        if let Some(transport) = self.transport.take() {
            transport.close().await?;
        }
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Platform detected by [`connect`](Self::connect).
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Command table for the detected platform.
    pub fn definition(&self) -> Option<&PlatformDefinition> {
        self.definition.as_ref()
    }

    /// Canonical prompt: the prompt the next command is expected to end with.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Hints recorded during the handshake.
    pub fn hints(&self) -> HintFlags {
        self.hints
    }

    /// Session-level timeouts.
    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Whether a shell is open.
    pub fn is_open(&self) -> bool {
        self.channel.is_some() && self.state != SessionState::Disconnected
    }

    pub(super) fn ensure_ready(&self) -> Result<()> {
        match self.state {
            SessionState::Ready => Ok(()),
            SessionState::Disconnected => Err(DriverError::NotConnected.into()),
            _ => Err(DriverError::Desynchronized.into()),
        }
    }

    pub(super) fn unsupported(&self, operation: &str) -> Error {
        DriverError::UnknownPlatform {
            operation: operation.to_string(),
            platform: self.platform.to_string(),
        }
        .into()
    }

    /// Optionally send `line`, then wait for any prompt, honouring hints.
    pub(super) async fn wait_for_prompt(
        &mut self,
        line: Option<&str>,
        timeout: Duration,
    ) -> Result<PromptMatch> {
        let mut expect = HintAndPrompt::new(self.hints);
        let matched = turn(
            &mut self.channel,
            &mut self.state,
            SessionState::Error,
            line,
            &mut expect,
            timeout,
        )
        .await?;
        self.hints = expect.flags();
        Ok(matched)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.transport.is_some() {
            warn!("session dropped without disconnect()");
        }
    }
}

/// One request/response turn.
///
/// `state` holds `during` while the turn is in flight and becomes `Ready`
/// only if an expectation matches. A failed turn, or one whose future is
/// dropped, leaves the session out of `Ready`.
pub(super) async fn turn<E: Expectation>(
    channel: &mut Option<PtyChannel>,
    state: &mut SessionState,
    during: SessionState,
    line: Option<&str>,
    expect: &mut E,
    timeout: Duration,
) -> Result<E::Output> {
    let channel = channel.as_mut().ok_or(DriverError::NotConnected)?;
    *state = during;

    let outcome = async {
        if let Some(line) = line {
            channel.send(line).await?;
        }
        channel.read_until(expect, timeout).await
    }
    .await;

    match outcome {
        Ok(output) => {
            *state = SessionState::Ready;
            Ok(output)
        }
        Err(e) => {
            warn!("turn failed: {}", e);
            *state = SessionState::Error;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::io::{Builder, Mock};

    use super::*;
    use crate::driver::SessionBuilder;
    use crate::error::ChannelError;

    fn session(mock: Mock) -> Session {
        SessionBuilder::new("test")
            .escalation_password("pw")
            .build_with_channel(mock)
    }

    async fn connected(mock: Mock) -> Session {
        let mut session = session(mock);
        session.connect().await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_connect_gaia_clish() {
        let mock = Builder::new()
            .read(b"This system is for authorized use only.\r\n")
            .read(b"gw-01> ")
            .build();
        let mut session = session(mock);

        let platform = session.connect().await.unwrap();
        assert_eq!(platform, Platform::GaiaClish);
        assert_eq!(session.prompt(), "gw-01> ");
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.definition().is_some());
    }

    #[tokio::test]
    async fn test_terminal_type_answered_once() {
        let mock = Builder::new()
            .read(b"Terminal type? ")
            .write(b"vt220\n")
            .read(b"\r\n[Expert@gw-01:0]# ")
            .build();
        let mut session = session(mock);

        assert_eq!(session.connect().await.unwrap(), Platform::ExpertShell);
        assert_eq!(session.prompt(), "[Expert@gw-01:0]# ");
    }

    #[tokio::test]
    async fn test_connect_splat_cpshell() {
        let mock = Builder::new()
            .read(b"Type ? for list of commands\r\n\r\n")
            .read(b"[fw-02]# ")
            .build();
        let mut session = session(mock);

        assert_eq!(session.connect().await.unwrap(), Platform::SplatCpShell);
        assert!(session.hints().splat);
        assert!(session.hints().splat_cpshell);
    }

    #[tokio::test]
    async fn test_connect_ipso() {
        let mock = Builder::new()
            .read(b"IPSO (fw-a) #1: Tue Jan  1 00:00:00 UTC 2008\r\n")
            .read(b"fw-a[admin]# ")
            .build();
        let mut session = session(mock);

        assert_eq!(session.connect().await.unwrap(), Platform::Ipso);
        assert_eq!(session.prompt(), "fw-a[admin]# ");
    }

    #[tokio::test]
    async fn test_connect_crossbeam() {
        let mock = Builder::new()
            .read(b"Active Alarms Summary\r\n  none\r\n\r\ncbs-1# ")
            .build();
        let mut cpm = session(mock);
        assert_eq!(cpm.connect().await.unwrap(), Platform::CrossbeamCpm);
        assert!(cpm.hints().xbm);

        let mock = Builder::new().read(b"[admin@fw_1] ~$ ").build();
        let mut apm = session(mock);
        assert_eq!(apm.connect().await.unwrap(), Platform::CrossbeamApm);
    }

    #[tokio::test]
    async fn test_prompt_followed_by_newline() {
        let mock = Builder::new()
            .read(b"Welcome\r\ngw-01> \r\n")
            .write(b"show uptime\n")
            .read(b"show uptime\r\nup 3 days\r\ngw-01> ")
            .build();
        let mut session = session(mock);

        assert_eq!(session.connect().await.unwrap(), Platform::GaiaClish);
        assert_eq!(session.prompt(), "gw-01> ");

        let result = session
            .run("show uptime", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(result.output, "up 3 days\r\n");
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn test_connect_twice() {
        let mut session = connected(Builder::new().read(b"gw-01> ").build()).await;
        let err = session.connect().await.unwrap_err();
        assert!(matches!(err, Error::Driver(DriverError::AlreadyConnected)));
    }

    #[tokio::test]
    async fn test_handshake_eof() {
        let mock = Builder::new().read(b"Last login: Mon").build();
        let mut session = session(mock);

        let err = session.connect().await.unwrap_err();
        assert!(matches!(err, Error::Channel(ChannelError::Closed)));
        assert!(err.is_transport());
        assert_eq!(session.state(), SessionState::Error);
        assert_eq!(session.platform(), Platform::Unclassified);
    }

    #[tokio::test]
    async fn test_run_round_trip() {
        let mock = Builder::new()
            .read(b"host> ")
            .write(b"cmd\n")
            .read(b"cmd\n")
            .read(b"OUTPUT-LINE\n")
            .read(b"host> ")
            .build();
        let mut session = connected(mock).await;

        let result = session.run("cmd", Duration::from_secs(5)).await.unwrap();
        assert_eq!(result.output, "OUTPUT-LINE\n");
        assert_eq!(result.command, "cmd");
        assert_eq!(result.prompt, "host> ");
        assert!(result.is_success());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn test_run_strips_pty_echo() {
        let mock = Builder::new()
            .read(b"[Expert@gw-01:0]# ")
            .write(b"fw ver 2>&1\n")
            .read(b"fw ver 2>&1\r\nThis is Check Point VPN-1(TM) & FireWall-1(R) R65\r\n")
            .read(b"[Expert@gw-01:0]# ")
            .build();
        let mut session = connected(mock).await;

        let result = session
            .run("fw ver 2>&1", Duration::from_secs(20))
            .await
            .unwrap();
        assert_eq!(
            result.output,
            "This is Check Point VPN-1(TM) & FireWall-1(R) R65\r\n"
        );
    }

    #[tokio::test]
    async fn test_run_trims_nul_padding() {
        let mock = Builder::new()
            .read(b"gw-01> ")
            .write(b"show uptime\n")
            .read(b"show uptime\r\nup 3 days\r\n\0\0gw-01> ")
            .build();
        let mut session = connected(mock).await;

        let result = session
            .run("show uptime", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(result.output, "up 3 days\r\n");
    }

    #[tokio::test]
    async fn test_run_reports_platform_failure() {
        let mock = Builder::new()
            .read(b"gw-01> ")
            .write(b"show configuration\n")
            .read(b"show configuration\r\nCLINFR0519  Running commands is not allowed\r\ngw-01> ")
            .build();
        let mut session = connected(mock).await;

        let result = session
            .run("show configuration", Duration::from_secs(5))
            .await
            .unwrap();
        assert!(!result.is_success());
        assert_eq!(
            result.failure_message.as_deref(),
            Some("Running commands is not allowed")
        );
    }

    #[tokio::test]
    async fn test_run_without_echo() {
        let mock = Builder::new()
            .read(b"[Expert@gw-01:0]# ")
            .write(b"fw ver\n")
            .read(b"This is Check Point VPN-1(TM) & FireWall-1(R) R65\r\n")
            .read(b"[Expert@gw-01:0]# ")
            .build();
        let mut session = connected(mock).await;

        let result = session.run("fw ver", Duration::from_secs(20)).await.unwrap();
        assert_eq!(
            result.output,
            "This is Check Point VPN-1(TM) & FireWall-1(R) R65\r\n"
        );
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn test_buffer_full_fails_turn() {
        let mock = Builder::new()
            .read(b"gw-01> ")
            .write(b"show log\n")
            .read(b"show log\r\n")
            .read(b"0123456789012345678901234567890123456789\r\n")
            .build();
        let mut session = SessionBuilder::new("test")
            .buffer_capacity(32)
            .build_with_channel(mock);
        session.connect().await.unwrap();

        let err = session
            .run("show log", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Channel(ChannelError::BufferFull(32))));
        assert_eq!(session.state(), SessionState::Error);
    }

    #[tokio::test]
    async fn test_run_before_connect() {
        let mut session = session(Builder::new().build());
        let err = session
            .run("uname -r", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Driver(DriverError::NotConnected)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_then_resync() {
        let mock = Builder::new()
            .read(b"gw-01> ")
            .write(b"cphaprob stat\n")
            .read(b"cphaprob stat\r\nCluster Mode:   High Availability\r\n")
            .wait(Duration::from_secs(10))
            .write(b"\n")
            .read(b"\r\ngw-01> ")
            .build();
        let mut session = connected(mock).await;

        let start = tokio::time::Instant::now();
        let err = session
            .run("cphaprob stat", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(start.elapsed() >= Duration::from_secs(5));
        assert_eq!(session.state(), SessionState::Error);

        let err = session
            .run("uname -r", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Driver(DriverError::Desynchronized)));

        session.resync(Duration::from_secs(30)).await.unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.prompt(), "gw-01> ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_handshake_timeout() {
        let mock = Builder::new()
            .read(b"Welcome\r\n")
            .wait(Duration::from_secs(3600))
            .build();
        let mut session = session(mock);

        let err = session.connect().await.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(session.state(), SessionState::Error);
    }

    #[tokio::test]
    async fn test_run_platform_command_brackets_escalation() {
        let mock = Builder::new()
            .read(b"gw-01> ")
            .write(b"expert\n")
            .read(b"expert\r\nEnter expert password:")
            .write(b"pw\n")
            .read(b"\r\nWarning! All configurations should be done through clish\r\n")
            .read(b"[Expert@gw-01:0]# ")
            .write(b"fw ver 2>&1\n")
            .read(b"fw ver 2>&1\r\nThis is Check Point's software version R80.40 - Build 294\r\n")
            .read(b"[Expert@gw-01:0]# ")
            .write(b"exit\n")
            .read(b"exit\r\ngw-01> ")
            .build();
        let mut session = connected(mock).await;

        let result = session
            .run_platform_command(CommandKind::FirewallVersion)
            .await
            .unwrap();
        assert_eq!(
            result.output,
            "This is Check Point's software version R80.40 - Build 294\r\n"
        );
        assert_eq!(result.prompt, "[Expert@gw-01:0]# ");
        assert!(!session.is_escalated());
        assert_eq!(session.prompt(), "gw-01> ");
    }

    #[tokio::test]
    async fn test_run_platform_command_in_expert_shell() {
        let mock = Builder::new()
            .read(b"[Expert@gw-01:0]# ")
            .write(b"uname -r 2>&1\n")
            .read(b"uname -r 2>&1\r\n3.10.0-957.21.3cpx86_64\r\n[Expert@gw-01:0]# ")
            .build();
        let mut session = connected(mock).await;

        let result = session
            .run_platform_command(CommandKind::OsRelease)
            .await
            .unwrap();
        assert_eq!(result.output, "3.10.0-957.21.3cpx86_64\r\n");
    }

    #[tokio::test]
    async fn test_unsupported_command_does_no_io() {
        let mock = Builder::new()
            .read(b"IPSO (fw-a) #1\r\nfw-a[admin]# ")
            .build();
        let mut session = connected(mock).await;
        assert_eq!(session.platform(), Platform::Ipso);

        let err = session
            .run_platform_command(CommandKind::VapGroups)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Driver(DriverError::UnknownPlatform { .. })
        ));
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn test_logout() {
        let mock = Builder::new().read(b"gw-01> ").write(b"exit\n").build();
        let mut session = connected(mock).await;

        session.logout().await.unwrap();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(session.platform(), Platform::Unclassified);
        assert!(session.prompt().is_empty());
        assert!(!session.is_open());
    }

    #[test]
    fn test_default_timeouts() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.handshake, Duration::from_secs(5));
        assert_eq!(timeouts.vap, Duration::from_secs(20));
    }
}
