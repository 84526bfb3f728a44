//! CrossBeam VAP members.
//!
//! A CPM reaches the firewall instances on its application modules with
//! `rsh <group>_<member>` from its Linux shell. The member answers with an
//! APM prompt; leaving takes one `exit` for the member and one for the
//! Linux shell.

use log::info;

use super::session::{Session, SessionState, turn};
use crate::channel::{PromptClass, PromptSet};
use crate::error::{DriverError, Result};
use crate::platform::Platform;

/// The remote host name of a VAP member.
pub fn vap_host(group: &str, member: u32) -> String {
    format!("{}_{}", group, member)
}

impl Session {
    /// Enter VAP `member` of `group`. Escalates to the CPM's Linux shell
    /// first if needed.
    pub async fn connect_vap(&mut self, group: &str, member: u32) -> Result<()> {
        self.ensure_ready()?;
        if self.platform != Platform::CrossbeamCpm {
            return Err(self.unsupported("connect_vap"));
        }
        if self.vap.is_some() {
            return Err(DriverError::AlreadyEscalated.into());
        }

        if !self.is_escalated() {
            self.enter_privileged().await?;
        }

        let host = vap_host(group, member);
        let command = format!("rsh {} 2>&1", host);
        let mut expect = PromptSet::new(&[PromptClass::Apm]);
        let matched = turn(
            &mut self.channel,
            &mut self.state,
            SessionState::Escalating,
            Some(command.as_str()),
            &mut expect,
            self.timeouts.vap,
        )
        .await?;

        info!("entered VAP {}, prompt {:?}", host, matched.prompt);
        self.prompt = matched.prompt;
        self.vap = Some(host);
        Ok(())
    }

    /// Leave the current VAP member and the CPM's Linux shell.
    pub async fn disconnect_vap(&mut self) -> Result<()> {
        self.ensure_ready()?;
        if self.vap.is_none() {
            return Err(DriverError::NotEscalated.into());
        }

        let matched = self
            .wait_for_prompt(Some("exit"), self.timeouts.handshake)
            .await?;
        self.prompt = matched.prompt;
        self.vap = None;

        self.exit_privileged().await
    }

    /// VAP member currently entered, as `<group>_<member>`.
    pub fn vap(&self) -> Option<&str> {
        self.vap.as_deref()
    }
}
