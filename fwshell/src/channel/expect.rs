//! The three waits the session automaton performs.
//!
//! - [`HintAndPrompt`]: handshake and resynchronization. Hints are recorded
//!   or answered without ending the wait.
//! - [`PromptSet`]: escalation. A password challenge is answered, a prompt
//!   from the allowed set ends the wait.
//! - [`EchoThenPrompt`]: command execution. The echo is suppressed, then
//!   output is captured up to the canonical prompt.

use secrecy::{ExposeSecret, SecretString};

use super::buffer::PatternBuffer;
use super::echo::EchoFilter;
use super::patterns::{Hint, HintFlags, PatternRegistry, PromptClass};
use super::pty::{Expectation, Verdict};
use crate::error::Result;

/// Reply sent to a terminal-type query.
pub const TERMINAL_TYPE_REPLY: &[u8] = b"vt220\n";

/// A matched prompt and the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMatch {
    /// Prompt class, refined by hint flags where applicable.
    pub class: PromptClass,

    /// The line holding the last prompt match, up to the end of the match.
    pub prompt: String,
}

impl PromptMatch {
    fn from_buffer(class: PromptClass, end: usize, buffer: &PatternBuffer) -> Self {
        Self {
            class,
            prompt: buffer.line_ending_at(end),
        }
    }
}

/// Wait for any canonical prompt while honouring hints.
#[derive(Debug, Default)]
pub struct HintAndPrompt {
    flags: HintFlags,
    terminal_replies: usize,
}

impl HintAndPrompt {
    /// Start from previously recorded flags.
    pub fn new(flags: HintFlags) -> Self {
        Self {
            flags,
            terminal_replies: 0,
        }
    }

    /// Flags recorded so far, including those passed to `new`.
    pub fn flags(&self) -> HintFlags {
        self.flags
    }

    /// How many terminal-type queries were answered.
    pub fn terminal_replies(&self) -> usize {
        self.terminal_replies
    }
}

impl Expectation for HintAndPrompt {
    type Output = PromptMatch;

    fn evaluate(&mut self, buffer: &PatternBuffer) -> Verdict<PromptMatch> {
        let registry = PatternRegistry::global();
        let data = buffer.as_slice();

        // Flags first: a banner may arrive in the same chunk as the prompt
        let mut reset = false;
        let mut reply = false;
        for hint in registry.hints(data) {
            self.flags.record(hint);
            reset |= hint.resets_buffer();
            reply |= hint == Hint::TerminalType;
        }

        if let Some((raw, end)) = registry.locate_prompt(data, &PromptClass::ALL) {
            let class = self.flags.refine(raw);
            return Verdict::Matched(PromptMatch::from_buffer(class, end, buffer));
        }

        if reply {
            self.terminal_replies += 1;
            Verdict::Respond {
                data: TERMINAL_TYPE_REPLY.to_vec(),
                hidden: false,
            }
        } else if reset {
            Verdict::Discard
        } else {
            Verdict::Pending
        }
    }
}

/// Wait for one of a set of prompts, answering password challenges.
#[derive(Debug)]
pub struct PromptSet<'a> {
    allowed: &'a [PromptClass],
    response: Option<Vec<u8>>,
    challenges_answered: usize,
}

impl<'a> PromptSet<'a> {
    /// Wait for any prompt in `allowed`.
    pub fn new(allowed: &'a [PromptClass]) -> Self {
        Self {
            allowed,
            response: None,
            challenges_answered: 0,
        }
    }

    /// Answer password challenges with `password`.
    pub fn with_password(mut self, password: &SecretString) -> Self {
        let secret = password.expose_secret();
        let mut response = Vec::with_capacity(secret.len() + 1);
        response.extend_from_slice(secret.as_bytes());
        response.push(b'\n');
        self.response = Some(response);
        self
    }

    /// How many password challenges were answered.
    pub fn challenges_answered(&self) -> usize {
        self.challenges_answered
    }
}

impl Expectation for PromptSet<'_> {
    type Output = PromptMatch;

    fn evaluate(&mut self, buffer: &PatternBuffer) -> Verdict<PromptMatch> {
        let registry = PatternRegistry::global();
        let data = buffer.as_slice();

        if let Some((class, end)) = registry.locate_prompt(data, self.allowed) {
            return Verdict::Matched(PromptMatch::from_buffer(class, end, buffer));
        }

        if let Some(response) = &self.response {
            if registry.is_password_challenge(data) {
                self.challenges_answered += 1;
                return Verdict::Respond {
                    data: response.clone(),
                    hidden: true,
                };
            }
        }

        Verdict::Pending
    }
}

/// Suppress the command echo, then capture up to the canonical prompt.
#[derive(Debug)]
pub struct EchoThenPrompt<'a> {
    echo: EchoFilter,
    prompt: &'a [u8],
}

impl<'a> EchoThenPrompt<'a> {
    /// Expect the echo of `command`, then `prompt`.
    pub fn new(command: &str, prompt: &'a str) -> Self {
        Self {
            echo: EchoFilter::new(command),
            prompt: prompt.as_bytes(),
        }
    }

    /// Echo suppression progress.
    pub fn echo(&self) -> &EchoFilter {
        &self.echo
    }
}

impl Expectation for EchoThenPrompt<'_> {
    type Output = Vec<u8>;

    fn absorb(&mut self, chunk: &[u8], buffer: &mut PatternBuffer) -> Result<()> {
        let output = self.echo.feed(chunk);
        buffer.extend(&output)?;
        Ok(())
    }

    fn evaluate(&mut self, buffer: &PatternBuffer) -> Verdict<Vec<u8>> {
        if !self.echo.is_finished() {
            return Verdict::Pending;
        }
        match buffer.before(self.prompt) {
            Some(output) => Verdict::Matched(output.to_vec()),
            None => Verdict::Pending,
        }
    }
}
