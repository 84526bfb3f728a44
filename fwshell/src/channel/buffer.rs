//! Bounded per-operation output buffer.
//!
//! Every read operation starts with a fresh `PatternBuffer`. Signatures are
//! searched over the whole buffer after each chunk, so the buffer is capped
//! (1 MiB by default) instead of tail-searched.

use std::borrow::Cow;

use bytes::BytesMut;
use memchr::memmem;

use crate::error::ChannelError;

/// Default upper bound on bytes accumulated by one operation.
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Buffer for accumulating output of a single operation.
#[derive(Debug)]
pub struct PatternBuffer {
    buffer: BytesMut,
    capacity: usize,
}

impl PatternBuffer {
    /// Create an empty buffer that refuses to grow past `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Append a chunk of output.
    pub fn extend(&mut self, data: &[u8]) -> Result<(), ChannelError> {
        if self.buffer.len() + data.len() > self.capacity {
            return Err(ChannelError::BufferFull(self.capacity));
        }
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Get a reference to the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the buffer contents as a string (lossy UTF-8 conversion).
    pub fn as_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    /// The line ending at offset `end`: text from the previous newline (or
    /// the start of the buffer) up to `end`, with NUL padding trimmed.
    pub fn line_ending_at(&self, end: usize) -> String {
        let end = end.min(self.buffer.len());
        let start = memchr::memrchr(b'\n', &self.buffer[..end]).map_or(0, |pos| pos + 1);
        let line = String::from_utf8_lossy(&self.buffer[start..end]);
        line.trim_matches('\0').to_string()
    }

    /// Bytes strictly before the first occurrence of `needle`, if present.
    pub fn before(&self, needle: &[u8]) -> Option<&[u8]> {
        memmem::find(&self.buffer, needle).map(|pos| &self.buffer[..pos])
    }

    /// Take ownership of the buffer contents and reset.
    pub fn take(&mut self) -> Vec<u8> {
        self.buffer.split().to_vec()
    }

    /// Get the current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Get the capacity bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extend() {
        let mut buffer = PatternBuffer::new(100);
        buffer.extend(b"Hello, world!").unwrap();
        assert_eq!(buffer.as_slice(), b"Hello, world!");
    }

    #[test]
    fn test_capacity_bound() {
        let mut buffer = PatternBuffer::new(8);
        buffer.extend(b"12345678").unwrap();
        let err = buffer.extend(b"9").unwrap_err();
        assert!(matches!(err, ChannelError::BufferFull(8)));
        // Rejected chunk is not partially appended
        assert_eq!(buffer.len(), 8);
    }

    #[test]
    fn test_line_ending_at() {
        let mut buffer = PatternBuffer::default();
        buffer.extend(b"Welcome\r\nLast login\r\ngw-01> ").unwrap();
        assert_eq!(buffer.line_ending_at(buffer.len()), "gw-01> ");
    }

    #[test]
    fn test_line_ending_at_ignores_trailing_newline() {
        let mut buffer = PatternBuffer::default();
        buffer.extend(b"Welcome\r\ngw-01> \r\n").unwrap();
        assert_eq!(buffer.line_ending_at(16), "gw-01> ");
    }

    #[test]
    fn test_line_ending_at_without_newline() {
        let mut buffer = PatternBuffer::default();
        buffer.extend(b"\0gw[admin]# \0\0").unwrap();
        assert_eq!(buffer.line_ending_at(buffer.len()), "gw[admin]# ");
    }

    #[test]
    fn test_before_first_occurrence() {
        let mut buffer = PatternBuffer::default();
        buffer.extend(b"line host> more host> ").unwrap();
        assert_eq!(buffer.before(b"host> "), Some(&b"line "[..]));
        assert_eq!(buffer.before(b"other> "), None);
    }

    #[test]
    fn test_take_clears_buffer() {
        let mut buffer = PatternBuffer::new(100);
        buffer.extend(b"test data").unwrap();
        assert_eq!(buffer.take(), b"test data");
        assert!(buffer.is_empty());
    }
}
