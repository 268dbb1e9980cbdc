//! Growable byte accumulators for `input_buffer` and `session_log`.
//!
//! Both buffers are append-only between clearings, so a `BytesMut` clears by
//! resetting its length rather than reallocating, mirroring the tail-search
//! buffer this crate's state machine is descended from. Only `session_log`
//! (diagnostic, surfaced to the caller) is given a byte cap; `input_buffer`
//! is load-bearing for prompt detection — it is cleared whenever a prompt
//! boundary is found, but a single operation's output can exceed any fixed
//! cap before that prompt arrives, and silently dropping bytes off the front
//! or back would mean the terminating prompt itself is lost and the driver
//! never advances again. It is therefore constructed with `unbounded()`.
//! `BytesMut` is free to grow past its initial capacity, so "uncapped" costs
//! nothing unless a device genuinely emits an unbounded operation body.

use bytes::BytesMut;

/// Default cap on `session_log` before it is truncated with a marker. The
/// session log is diagnostic only; an unbounded device transcript (e.g. a
/// runaway `commit check` loop echoing megabytes of interface state) must
/// not be allowed to grow the process's memory without limit.
pub const DEFAULT_SESSION_LOG_CAP: usize = 1 << 20;

const TRUNCATION_MARKER: &[u8] = b"\n...[session_log truncated]...\n";

#[derive(Debug)]
pub struct SessionBuffer {
    buf: BytesMut,
    cap: Option<usize>,
    truncated: bool,
}

impl SessionBuffer {
    /// A buffer that truncates with a marker once it would grow past `cap`.
    /// Use for diagnostic accumulators like `session_log`.
    pub fn capped(cap: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(4096),
            cap: Some(cap),
            truncated: false,
        }
    }

    /// A buffer with no byte limit. Use for accumulators that are
    /// load-bearing for correctness (prompt detection) rather than purely
    /// diagnostic, where silently dropping bytes would break the contract.
    pub fn unbounded() -> Self {
        Self {
            buf: BytesMut::with_capacity(4096),
            cap: None,
            truncated: false,
        }
    }

    pub fn extend(&mut self, data: &[u8]) {
        if let Some(cap) = self.cap {
            if self.buf.len() + data.len() > cap {
                if !self.truncated {
                    self.buf.extend_from_slice(TRUNCATION_MARKER);
                    self.truncated = true;
                }
                return;
            }
        }
        self.buf.extend_from_slice(data);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn as_str_lossy(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.truncated = false;
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Split off the first `at` bytes, leaving the remainder buffered.
    pub fn split_to(&mut self, at: usize) -> BytesMut {
        self.buf.split_to(at)
    }
}
