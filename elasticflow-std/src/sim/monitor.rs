//! Handshake contract checker.

use crate::*;

/// Watches one valid-ready channel.
///
/// In strict mode, an offer that did not transfer must be repeated with the same data in the next step. Violations are
/// debug assertions.
#[derive(Debug, Clone)]
pub struct Monitor<V: Signal + PartialEq> {
    name: &'static str,
    strict: bool,
    pending: Option<V>,
    transfers: usize,
}

impl<V: Signal + PartialEq> Monitor<V> {
    /// Creates a strict monitor.
    pub fn new(name: &'static str) -> Self { Self { name, strict: true, pending: None, transfers: 0 } }

    /// Creates a monitor that only counts transfers, for channels whose offers may be withdrawn.
    pub fn relaxed(name: &'static str) -> Self { Self { strict: false, ..Self::new(name) } }

    /// Number of transfers seen.
    pub fn transfers(&self) -> usize { self.transfers }

    /// Checks one step.
    pub fn observe(&mut self, fwd: &Valid<V>, bwd: &Ready) {
        if let (true, Some(pending)) = (self.strict, &self.pending) {
            debug_assert!(fwd.valid, "`{}` withdrew a pending offer", self.name);
            debug_assert!(fwd.inner == *pending, "`{}` changed the data of a pending offer", self.name);
        }

        self.pending = if fwd.fire(bwd) {
            self.transfers += 1;
            tracing::trace!(channel = self.name, transfers = self.transfers, "transfer");
            None
        } else if fwd.valid {
            Some(fwd.inner.clone())
        } else {
            None
        };
    }
}
