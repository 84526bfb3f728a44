//! Result of a completed command turn.

use std::time::Duration;

/// Output of [`Session::run`](crate::Session::run).
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The command line that was sent, without the newline.
    pub command: String,

    /// Everything between the echo and the prompt, untouched apart from
    /// trailing NUL padding.
    pub output: String,

    /// The prompt that ended the turn.
    pub prompt: String,

    /// Time from sending the command to seeing the prompt.
    pub elapsed: Duration,

    /// Platform failure string found in the output, if any.
    pub failure_message: Option<String>,
}

impl CommandResult {
    /// Create a result with no failure attached.
    pub fn new(
        command: impl Into<String>,
        output: impl Into<String>,
        prompt: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            output: output.into(),
            prompt: prompt.into(),
            elapsed,
            failure_message: None,
        }
    }

    /// Attach a failure message.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure_message = Some(message.into());
        self
    }

    /// True unless the output carried a platform failure string.
    pub fn is_success(&self) -> bool {
        self.failure_message.is_none()
    }

    /// Output lines with `\r` stripped.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.output.lines().map(|line| line.trim_end_matches('\r'))
    }

    /// Check if the output contains a substring.
    pub fn contains(&self, pattern: &str) -> bool {
        self.output.contains(pattern)
    }
}

impl std::fmt::Display for CommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output)
    }
}
