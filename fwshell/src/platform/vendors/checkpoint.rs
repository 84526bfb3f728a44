//! Check Point platform definitions.
//!
//! GAiA CLISH and SecurePlatform cpshell are restricted shells: every
//! query runs in the expert (bash) shell, entered with `expert` and the
//! expert password. A session that lands directly in expert mode runs the
//! same commands without escalating. IPSO has its own BSD userland.
//!
//! # Prompt Examples
//!
//! ```text
//! gw-01>                      # GAiA CLISH
//! [Expert@gw-01:0]#           # expert shell
//! [fw-02]#                    # SPLAT after the cpshell banner
//! fw-a[admin]#                # IPSO after the IPSO banner
//! ```

use crate::platform::{CommandKind, Platform, PlatformDefinition};

/// Message CLISH prints when a role may not run a command.
pub const NOT_ALLOWED: &str = "Running commands is not allowed";

/// Commands shared by every shell that reaches a Check Point Linux userland.
fn linux_commands(def: PlatformDefinition, privileged: bool) -> PlatformDefinition {
    let table = [
        (CommandKind::OsRelease, "uname -r 2>&1", 5),
        (CommandKind::FirewallVersion, "fw ver 2>&1", 20),
        (CommandKind::ReleaseInfo, "cat /etc/cp-release 2>&1", 20),
        (CommandKind::ClusterStatus, "cphaprob stat 2>&1", 10),
        (CommandKind::Interfaces, "ip -o -f inet addr 2>&1", 10),
        (CommandKind::Routes, "ip -o -f inet route 2>&1", 10),
    ];

    table.into_iter().fold(def, |def, (kind, command, secs)| {
        if privileged {
            def.with_privileged_command(kind, command, secs)
        } else {
            def.with_command(kind, command, secs)
        }
    })
}

/// GAiA CLISH: commands run through `expert`.
pub fn gaia_clish() -> PlatformDefinition {
    let def = PlatformDefinition::new(Platform::GaiaClish)
        .with_escalation("expert", 5)
        .with_failure_pattern(NOT_ALLOWED);
    linux_commands(def, true)
}

/// SecurePlatform cpshell: commands run through `expert`.
pub fn splat_cpshell() -> PlatformDefinition {
    let def = PlatformDefinition::new(Platform::SplatCpShell)
        .with_escalation("expert", 5)
        .with_failure_pattern(NOT_ALLOWED);
    linux_commands(def, true)
}

/// Expert shell: already privileged.
pub fn expert_shell() -> PlatformDefinition {
    let def = PlatformDefinition::new(Platform::ExpertShell).with_failure_pattern(NOT_ALLOWED);
    linux_commands(def, false)
}

/// Nokia IPSO: BSD tools, no escalation.
pub fn ipso() -> PlatformDefinition {
    PlatformDefinition::new(Platform::Ipso)
        .with_command(CommandKind::OsRelease, "uname -r", 5)
        .with_command(CommandKind::FirewallVersion, "fw ver", 20)
        .with_command(CommandKind::ClusterStatus, "cphaprob stat", 10)
        .with_command(CommandKind::Interfaces, "ifconfig -a", 10)
        .with_command(
            CommandKind::Routes,
            "netstat -rn|grep ' CU '|grep -v '::'",
            10,
        )
        .with_failure_pattern(NOT_ALLOWED)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_gaia_runs_through_expert() {
        let def = gaia_clish();
        assert_eq!(def.escalation.as_ref().unwrap().command, "expert");
        assert!(def.commands.values().all(|spec| spec.privileged));

        let fw = def.command(CommandKind::FirewallVersion).unwrap();
        assert_eq!(fw.command, "fw ver 2>&1");
        assert_eq!(fw.timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_expert_needs_no_escalation() {
        let def = expert_shell();
        assert!(def.escalation.is_none());
        assert!(def.commands.values().all(|spec| !spec.privileged));
        assert_eq!(
            def.command(CommandKind::ClusterStatus).unwrap().command,
            "cphaprob stat 2>&1"
        );
    }

    #[test]
    fn test_splat_matches_gaia_commands() {
        let gaia = gaia_clish();
        let splat = splat_cpshell();
        assert_eq!(gaia.commands, splat.commands);
        assert_eq!(splat.platform, Platform::SplatCpShell);
    }

    #[test]
    fn test_ipso_table() {
        let def = ipso();
        assert!(def.escalation.is_none());
        assert_eq!(def.command(CommandKind::Interfaces).unwrap().command, "ifconfig -a");
        assert!(def.command(CommandKind::ReleaseInfo).is_none());
        assert!(def.command(CommandKind::VapGroups).is_none());
    }
}
