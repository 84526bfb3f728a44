//! Session layer: the automaton driving one appliance shell.
//!
//! [`Session`] owns the channel and the state learned about the remote
//! shell (platform, canonical prompt, escalation). Privilege escalation and
//! the CrossBeam VAP hop are further operations on the same type.

mod builder;
mod privilege;
mod response;
mod session;
mod vap;

pub use builder::SessionBuilder;
pub use privilege::EscalationState;
pub use response::CommandResult;
pub use session::{
    DEFAULT_HANDSHAKE_TIMEOUT, DEFAULT_VAP_TIMEOUT, Session, SessionState, Timeouts,
};
pub use vap::vap_host;
