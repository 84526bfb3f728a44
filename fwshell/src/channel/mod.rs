//! Channel layer for reading and writing the interactive shell.
//!
//! This module holds the signature registry, the bounded per-operation
//! buffer, echo suppression and the deadline-bounded reader.

mod buffer;
mod echo;
pub mod expect;
mod patterns;
mod pty;

pub use buffer::{DEFAULT_CAPACITY, PatternBuffer};
pub use echo::{EchoFilter, EchoState};
pub use expect::{EchoThenPrompt, HintAndPrompt, PromptMatch, PromptSet, TERMINAL_TYPE_REPLY};
pub use patterns::{Hint, HintFlags, PatternRegistry, PromptClass, Signature};
pub use pty::{Expectation, PtyChannel, PtyConfig, ShellIo, Verdict};
