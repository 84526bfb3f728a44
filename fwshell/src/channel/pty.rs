//! Interactive shell channel with deadline-bounded reads.

use std::time::Duration;

use log::{debug, trace};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::buffer::{DEFAULT_CAPACITY, PatternBuffer};
use crate::error::{ChannelError, Result};

/// Byte stream of an open interactive shell.
///
/// Implemented for anything that is `AsyncRead + AsyncWrite`, such as a
/// russh `ChannelStream` or an in-memory duplex used in tests.
pub trait ShellIo: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> ShellIo for T {}

/// What an [`Expectation`] wants done after looking at the buffer.
#[derive(Debug)]
pub enum Verdict<T> {
    /// Nothing recognized yet, keep reading.
    Pending,
    /// Throw away what was read so far and keep reading.
    Discard,
    /// Throw away what was read so far, send `data`, keep reading.
    Respond {
        data: Vec<u8>,
        /// Keep `data` out of the logs (passwords).
        hidden: bool,
    },
    /// The wait is over.
    Matched(T),
}

/// Predicate driven by [`PtyChannel::read_until`].
pub trait Expectation {
    /// Value produced on a match.
    type Output;

    /// Add a freshly read chunk to the buffer.
    fn absorb(&mut self, chunk: &[u8], buffer: &mut PatternBuffer) -> Result<()> {
        buffer.extend(chunk)?;
        Ok(())
    }

    /// Inspect the whole buffer accumulated so far.
    fn evaluate(&mut self, buffer: &PatternBuffer) -> Verdict<Self::Output>;
}

/// Configuration for PTY channel behavior.
#[derive(Debug, Clone)]
pub struct PtyConfig {
    /// Upper bound on bytes a single operation may accumulate.
    pub capacity: usize,

    /// Size of each read from the transport.
    pub read_size: usize,

    /// Trace buffer contents after every chunk.
    pub trace_data: bool,
}

impl Default for PtyConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            read_size: 4096,
            trace_data: false,
        }
    }
}

/// Interactive shell channel.
///
/// All reads go through [`read_until`](Self::read_until), which owns a fresh
/// buffer for the duration of one call. Taking `&mut self` keeps at most one
/// read outstanding and prevents interleaved writes.
pub struct PtyChannel {
    io: Box<dyn ShellIo>,
    config: PtyConfig,
}

impl PtyChannel {
    /// Wrap an open shell stream.
    pub fn new(io: impl ShellIo + 'static, config: PtyConfig) -> Self {
        Self {
            io: Box::new(io),
            config,
        }
    }

    /// Wrap an open shell stream with default configuration.
    pub fn with_defaults(io: impl ShellIo + 'static) -> Self {
        Self::new(io, PtyConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &PtyConfig {
        &self.config
    }

    /// Send a line (a newline is appended).
    pub async fn send(&mut self, line: &str) -> Result<()> {
        let mut data = Vec::with_capacity(line.len() + 1);
        data.extend_from_slice(line.as_bytes());
        data.push(b'\n');
        self.write_raw(&data, false).await
    }

    /// Write bytes as-is and flush.
    pub async fn write_raw(&mut self, data: &[u8], hidden: bool) -> Result<()> {
        if hidden {
            debug!("send: <{} hidden bytes>", data.len());
        } else {
            debug!("send: {:?}", String::from_utf8_lossy(data));
        }
        self.io.write_all(data).await.map_err(ChannelError::Io)?;
        self.io.flush().await.map_err(ChannelError::Io)?;
        Ok(())
    }

    /// Read until `expect` matches, the channel fails, or `timeout` elapses.
    ///
    /// On timeout the pending read is dropped, so nothing from this call can
    /// touch a later operation's buffer.
    pub async fn read_until<E: Expectation>(
        &mut self,
        expect: &mut E,
        timeout: Duration,
    ) -> Result<E::Output> {
        match tokio::time::timeout(timeout, self.read_loop(expect)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                debug!("read_until: no match within {:?}", timeout);
                Err(ChannelError::Timeout(timeout).into())
            }
        }
    }

    async fn read_loop<E: Expectation>(&mut self, expect: &mut E) -> Result<E::Output> {
        let mut buffer = PatternBuffer::new(self.config.capacity);
        let mut chunk = vec![0u8; self.config.read_size];

        loop {
            let n = self.io.read(&mut chunk).await.map_err(ChannelError::Io)?;
            if n == 0 {
                return Err(ChannelError::Closed.into());
            }

            expect.absorb(&chunk[..n], &mut buffer)?;

            if self.config.trace_data {
                trace!("read {} bytes, buffer: {:?}", n, buffer.as_str_lossy());
            }

            match expect.evaluate(&buffer) {
                Verdict::Pending => {}
                Verdict::Discard => buffer.clear(),
                Verdict::Respond { data, hidden } => {
                    buffer.clear();
                    self.write_raw(&data, hidden).await?;
                }
                Verdict::Matched(output) => return Ok(output),
            }
        }
    }

    /// Shut down the write side of the stream.
    pub async fn close(&mut self) -> Result<()> {
        self.io.shutdown().await.map_err(ChannelError::Io)?;
        Ok(())
    }
}
