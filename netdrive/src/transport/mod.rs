//! The transport collaborator contract and the concrete SSH implementation.

pub mod config;
pub mod ssh;

/// Minimal seam the driver needs from whatever moves bytes to and from the
/// device: a synchronous, non-blocking `send`, with inbound bytes delivered
/// out-of-band via `Driver::handle_data`. Kept deliberately small (a single
/// method) so a test harness can drive `handle_data` directly with no
/// concurrency at all.
pub trait Transport: Send {
    /// Enqueue `bytes` for delivery. Returns `false` iff the send could not
    /// be queued (e.g. the write side of the transport is already gone).
    fn send(&mut self, bytes: &[u8]) -> bool;
}

/// Records every `send()`ed buffer instead of doing any I/O. The transport
/// used throughout the driver-level test suite.
#[derive(Debug, Default)]
pub struct CaptureTransport {
    pub sent: Vec<Vec<u8>>,
}

impl CaptureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_as_strings(&self) -> Vec<String> {
        self.sent
            .iter()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .collect()
    }
}

impl Transport for CaptureTransport {
    fn send(&mut self, bytes: &[u8]) -> bool {
        self.sent.push(bytes.to_vec());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_transport_records_sends_in_order() {
        let mut t = CaptureTransport::new();
        assert!(t.send(b"configure\n"));
        assert!(t.send(b"commit\n"));
        assert_eq!(t.sent_as_strings(), vec!["configure\n", "commit\n"]);
    }
}
