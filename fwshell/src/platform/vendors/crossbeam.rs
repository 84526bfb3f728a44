//! CrossBeam X-series platform definitions.
//!
//! The CPM (control processor) speaks XOS CLI with a `host# ` prompt. Its
//! Linux side is reached with `unix su` and the root password; from there
//! each VAP member is a `rsh` hop away and shows an APM prompt.
//!
//! ```text
//! cbs-1#                      # XOS CLI on the CPM
//! [root@cbs-1 admin]#         # CPM Linux after `unix su`
//! [admin@fw_1] ~$             # APM on a VAP member
//! ```
//!
//! An APM session is treated like the CPM it belongs to.

use crate::platform::{CommandKind, Platform, PlatformDefinition};

/// Timeout for the `rsh` hop into a VAP member.
pub const VAP_CONNECT_TIMEOUT_SECS: u64 = 20;

fn xos(platform: Platform) -> PlatformDefinition {
    PlatformDefinition::new(platform)
        .with_escalation("unix su", 5)
        .with_command(CommandKind::ShowVersion, "show version", 5)
        .with_command(CommandKind::VapGroups, "show vap-group", 5)
}

/// CrossBeam CPM.
pub fn cpm() -> PlatformDefinition {
    xos(Platform::CrossbeamCpm)
}

/// CrossBeam APM.
pub fn apm() -> PlatformDefinition {
    xos(Platform::CrossbeamApm)
}
