//! Command echo suppression.
//!
//! The shell echoes every command line back before its output. Incoming
//! bytes are compared one at a time against the expected echo (the command
//! plus its trailing newline); once the whole echo is consumed, everything
//! after it is command output.
//!
//! Carriage returns and NUL padding inside the echo are skipped, since a PTY
//! turns `\n` into `\r\n`. Any other unexpected byte ends suppression early:
//! every byte consumed so far, skipped ones included, is handed back as
//! output together with the rest of the chunk, so nothing the device sent is
//! dropped.

use std::borrow::Cow;

use log::warn;

/// Byte-wise echo matcher for one command.
#[derive(Debug, Clone)]
pub struct EchoFilter {
    expected: Vec<u8>,
    matched: usize,
    consumed: Vec<u8>,
    state: EchoState,
}

/// Progress of echo suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoState {
    /// Still consuming the echo.
    Consuming,
    /// The full echo was consumed.
    Complete,
    /// An unexpected byte ended suppression before the echo completed.
    Diverged,
}

impl EchoFilter {
    /// Expect the echo of `command` followed by a newline.
    pub fn new(command: &str) -> Self {
        let mut expected = Vec::with_capacity(command.len() + 1);
        expected.extend_from_slice(command.as_bytes());
        expected.push(b'\n');
        Self {
            expected,
            matched: 0,
            consumed: Vec::new(),
            state: EchoState::Consuming,
        }
    }

    /// Current suppression state.
    pub fn state(&self) -> EchoState {
        self.state
    }

    /// Whether suppression has finished, either way.
    pub fn is_finished(&self) -> bool {
        self.state != EchoState::Consuming
    }

    /// Feed a chunk and return the part of it that is command output.
    pub fn feed<'a>(&mut self, chunk: &'a [u8]) -> Cow<'a, [u8]> {
        if self.is_finished() {
            return Cow::Borrowed(chunk);
        }

        for (i, &byte) in chunk.iter().enumerate() {
            if byte == self.expected[self.matched] {
                self.matched += 1;
                if self.matched == self.expected.len() {
                    self.state = EchoState::Complete;
                    self.consumed.clear();
                    return Cow::Borrowed(&chunk[i + 1..]);
                }
                self.consumed.push(byte);
            } else if byte == b'\r' || byte == 0 {
                self.consumed.push(byte);
            } else {
                warn!(
                    "echo diverged after {} of {} bytes (got {:#04x}); capturing from here",
                    self.matched,
                    self.expected.len(),
                    byte
                );
                self.state = EchoState::Diverged;
                let mut output = std::mem::take(&mut self.consumed);
                output.extend_from_slice(&chunk[i..]);
                return Cow::Owned(output);
            }
        }

        Cow::Borrowed(&[])
    }
}
