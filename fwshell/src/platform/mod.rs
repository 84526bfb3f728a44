//! Platform classification and per-platform command tables.
//!
//! A session is classified once, from the prompt class seen at the end of
//! the handshake plus the hints recorded on the way. Everything that differs
//! between platforms afterwards (command strings, escalation sequence,
//! failure strings) lives in a [`PlatformDefinition`] looked up by
//! [`Platform`], so the session itself never branches on the platform.

mod definition;
mod registry;
pub mod vendors;

pub use definition::{CommandKind, CommandSpec, EscalationSpec, PlatformDefinition};
pub use registry::PlatformRegistry;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::channel::{HintFlags, PromptClass};
use crate::error::{DriverError, Result};

/// Command-line dialect of the remote appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Check Point GAiA, CLISH shell
    GaiaClish,
    /// Check Point expert (bash) shell
    ExpertShell,
    /// SecurePlatform cpshell
    #[serde(rename = "splat_cpshell")]
    SplatCpShell,
    /// Nokia IPSO
    Ipso,
    /// CrossBeam control processor module
    CrossbeamCpm,
    /// CrossBeam application processor module
    CrossbeamApm,
    /// Not classified yet
    Unclassified,
}

impl Platform {
    /// Classify from a 1-based prompt index and the recorded hint flags.
    ///
    /// | index | condition                    | platform       |
    /// |-------|------------------------------|----------------|
    /// | 1     |                              | `GaiaClish`    |
    /// | 2     | `splat` and `splat_cpshell`  | `SplatCpShell` |
    /// | 2     | otherwise                    | `ExpertShell`  |
    /// | 3     |                              | `CrossbeamCpm` |
    /// | 4     |                              | `Ipso`         |
    /// | 5     |                              | `CrossbeamApm` |
    ///
    /// Any other index is a detection failure.
    pub fn classify(prompt_index: usize, hints: &HintFlags) -> Result<Platform> {
        let platform = match prompt_index {
            1 => Platform::GaiaClish,
            2 if hints.splat && hints.splat_cpshell => Platform::SplatCpShell,
            2 => Platform::ExpertShell,
            3 => Platform::CrossbeamCpm,
            4 => Platform::Ipso,
            5 => Platform::CrossbeamApm,
            other => {
                return Err(DriverError::PlatformDetection {
                    prompt: format!("<prompt class #{other}>"),
                }
                .into());
            }
        };
        Ok(platform)
    }

    /// Classify from a recognized prompt class.
    pub fn from_prompt(class: PromptClass, hints: &HintFlags) -> Result<Platform> {
        Self::classify(class.index(), hints)
    }

    /// Stable name used in logs and the registry.
    pub fn name(self) -> &'static str {
        match self {
            Platform::GaiaClish => "gaia_clish",
            Platform::ExpertShell => "expert_shell",
            Platform::SplatCpShell => "splat_cpshell",
            Platform::Ipso => "ipso",
            Platform::CrossbeamCpm => "crossbeam_cpm",
            Platform::CrossbeamApm => "crossbeam_apm",
            Platform::Unclassified => "unclassified",
        }
    }

    /// CPM and APM are both CrossBeam (XBM) platforms.
    pub fn is_crossbeam(self) -> bool {
        matches!(self, Platform::CrossbeamCpm | Platform::CrossbeamApm)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
