//! Privilege escalation.
//!
//! Check Point restricted shells reach bash with `expert`, CrossBeam CPMs
//! reach Linux with `unix su`. Both run the same two-step dialogue: send the
//! entry command, answer the password challenge, wait for the new prompt.

use std::time::Duration;

use log::{debug, info};
use secrecy::SecretString;

use super::session::{Session, SessionState, turn};
use crate::channel::{PromptClass, PromptSet};
use crate::error::{DriverError, Result};

/// Prompts that may end an escalation dialogue.
const ESCALATION_PROMPTS: [PromptClass; 2] = [PromptClass::Clish, PromptClass::Expert];

/// Where the session stands with respect to the privileged shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscalationState {
    /// In the login shell.
    #[default]
    NotEscalated,
    /// Dialogue started but not finished; resolved by `resync()`.
    Escalating,
    /// In the privileged shell.
    Escalated,
}

impl Session {
    /// Run an escalation dialogue with an explicit entry command and password.
    ///
    /// The password is sent once per challenge and never logged. The prompt
    /// that ends the dialogue becomes the canonical prompt.
    pub async fn escalate(
        &mut self,
        entry: &str,
        password: &SecretString,
        timeout: Duration,
    ) -> Result<()> {
        self.ensure_ready()?;
        if self.escalation == EscalationState::Escalated {
            return Err(DriverError::AlreadyEscalated.into());
        }

        let expect = PromptSet::new(&ESCALATION_PROMPTS).with_password(password);
        self.escalate_with(entry, expect, timeout).await
    }

    /// Enter the privileged shell using the platform's escalation command
    /// and the configured escalation password.
    pub async fn enter_privileged(&mut self) -> Result<()> {
        self.ensure_ready()?;
        if self.escalation == EscalationState::Escalated {
            return Err(DriverError::AlreadyEscalated.into());
        }

        let spec = self
            .definition
            .as_ref()
            .and_then(|def| def.escalation.clone())
            .ok_or_else(|| self.unsupported("enter_privileged"))?;

        let password = self
            .escalation_password
            .as_ref()
            .ok_or_else(|| DriverError::InvalidConfig {
                message: "escalation password not configured".to_string(),
            })?;
        let expect = PromptSet::new(&ESCALATION_PROMPTS).with_password(password);

        self.escalate_with(&spec.command, expect, spec.timeout).await
    }

    /// Leave the privileged shell with `exit` and wait for the login prompt.
    pub async fn exit_privileged(&mut self) -> Result<()> {
        self.ensure_ready()?;
        if self.escalation != EscalationState::Escalated {
            return Err(DriverError::NotEscalated.into());
        }

        match self
            .wait_for_prompt(Some("exit"), self.timeouts.handshake)
            .await
        {
            Ok(matched) => {
                debug!("left privileged shell, prompt {:?}", matched.prompt);
                self.prompt = matched.prompt;
                self.escalation = EscalationState::NotEscalated;
                Ok(())
            }
            Err(e) => Err(DriverError::EscalationExit {
                source: Box::new(e),
            }
            .into()),
        }
    }

    /// Escalation progress.
    pub fn escalation(&self) -> EscalationState {
        self.escalation
    }

    /// Whether the session is in the privileged shell.
    pub fn is_escalated(&self) -> bool {
        self.escalation == EscalationState::Escalated
    }

    async fn escalate_with(
        &mut self,
        entry: &str,
        mut expect: PromptSet<'_>,
        timeout: Duration,
    ) -> Result<()> {
        let previous = self.prompt.clone();
        self.escalation = EscalationState::Escalating;

        let outcome = turn(
            &mut self.channel,
            &mut self.state,
            SessionState::Escalating,
            Some(entry),
            &mut expect,
            timeout,
        )
        .await;

        match outcome {
            // The shell refused and printed the login prompt again
            Ok(matched) if matched.prompt == previous => {
                self.escalation = EscalationState::NotEscalated;
                Err(DriverError::PasswordRejected {
                    command: entry.to_string(),
                }
                .into())
            }
            Ok(matched) => {
                info!("escalated with {:?}, prompt {:?}", entry, matched.prompt);
                self.prompt = matched.prompt;
                self.escalation = EscalationState::Escalated;
                Ok(())
            }
            Err(e) if e.is_timeout() && expect.challenges_answered() > 0 => {
                Err(DriverError::PasswordRejected {
                    command: entry.to_string(),
                }
                .into())
            }
            Err(e) => Err(e),
        }
    }
}
