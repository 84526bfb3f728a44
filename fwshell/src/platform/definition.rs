//! Per-platform dispatch table entry.

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Platform;

/// Commands the external response parsers ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Kernel release (`uname -r`)
    OsRelease,
    /// Firewall software version (`fw ver`)
    FirewallVersion,
    /// Check Point release file
    ReleaseInfo,
    /// ClusterXL / VRRP state (`cphaprob stat`)
    ClusterStatus,
    /// Logical interface addresses
    Interfaces,
    /// Routing table
    Routes,
    /// CrossBeam `show version`
    ShowVersion,
    /// CrossBeam VAP group listing
    VapGroups,
}

impl CommandKind {
    /// Stable name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::OsRelease => "os_release",
            CommandKind::FirewallVersion => "firewall_version",
            CommandKind::ReleaseInfo => "release_info",
            CommandKind::ClusterStatus => "cluster_status",
            CommandKind::Interfaces => "interfaces",
            CommandKind::Routes => "routes",
            CommandKind::ShowVersion => "show_version",
            CommandKind::VapGroups => "vap_groups",
        }
    }
}

/// A command string with its default timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command line sent to the device.
    pub command: String,

    /// Default timeout.
    pub timeout: Duration,

    /// Whether the command must run in the privileged shell.
    pub privileged: bool,
}

/// How to enter the privileged shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationSpec {
    /// Command that starts the escalation dialogue.
    pub command: String,

    /// Timeout for the whole dialogue.
    pub timeout: Duration,
}

/// Platform definition containing all platform-specific text.
#[derive(Debug, Clone)]
pub struct PlatformDefinition {
    /// Platform this entry describes.
    pub platform: Platform,

    /// Escalation into the privileged shell, if the platform has one.
    pub escalation: Option<EscalationSpec>,

    /// Command table, in definition order.
    pub commands: IndexMap<CommandKind, CommandSpec>,

    /// Output fragments that mark a command as failed.
    pub failed_when_contains: Vec<String>,
}

impl PlatformDefinition {
    /// Create an empty definition.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            escalation: None,
            commands: IndexMap::new(),
            failed_when_contains: vec![],
        }
    }

    /// Set the escalation command and its timeout in seconds.
    pub fn with_escalation(mut self, command: impl Into<String>, timeout_secs: u64) -> Self {
        self.escalation = Some(EscalationSpec {
            command: command.into(),
            timeout: Duration::from_secs(timeout_secs),
        });
        self
    }

    /// Add a command runnable at the current privilege level.
    pub fn with_command(
        mut self,
        kind: CommandKind,
        command: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        self.commands.insert(
            kind,
            CommandSpec {
                command: command.into(),
                timeout: Duration::from_secs(timeout_secs),
                privileged: false,
            },
        );
        self
    }

    /// Add a command that needs the privileged shell.
    pub fn with_privileged_command(
        mut self,
        kind: CommandKind,
        command: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        self.commands.insert(
            kind,
            CommandSpec {
                command: command.into(),
                timeout: Duration::from_secs(timeout_secs),
                privileged: true,
            },
        );
        self
    }

    /// Add a failure pattern.
    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failed_when_contains.push(pattern.into());
        self
    }

    /// Look up a command.
    pub fn command(&self, kind: CommandKind) -> Option<&CommandSpec> {
        self.commands.get(&kind)
    }

    /// First failure pattern contained in `output`.
    pub fn detect_failure(&self, output: &str) -> Option<&str> {
        self.failed_when_contains
            .iter()
            .find(|pattern| output.contains(pattern.as_str()))
            .map(String::as_str)
    }
}
