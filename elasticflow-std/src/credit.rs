//! Credit-based flow control.
//!
//! The ingress admits an item whenever the credit counter is nonzero. Accepted items travel through `pipe_depth`
//! plain delay stages into a FIFO; every item leaving the FIFO returns its credit through another `pipe_depth` stages.
//! No ready signal crosses the delay stages.

use crate::*;

/// Minimum FIFO depth for a credit buffer with `pipe_depth` delay stages.
///
/// A credit consumed at the end of step `t` returns at the end of step `t + 2 * pipe_depth + 1` at the earliest, so
/// sustaining one transfer per step needs that many credits plus one.
pub const fn min_depth(pipe_depth: usize) -> usize { 2 * pipe_depth + 2 }

/// Credit buffer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditConfig {
    /// Number of delay stages between the ingress and the FIFO.
    pub pipe_depth: usize,
    /// FIFO depth, also the number of credits. Raised to [`min_depth`] if lower.
    pub depth: usize,
}

impl Default for CreditConfig {
    fn default() -> Self { Self { pipe_depth: 1, depth: min_depth(1) } }
}

/// Persisted state of a credit buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreditState<V> {
    /// Available credits.
    pub credits: usize,
    /// Whether the last step clamped the counter.
    pub saturated: bool,
    /// Items on their way to the FIFO.
    pub forward: DelayState<V>,
    /// Credits on their way back.
    pub credit_return: DelayState<()>,
    /// FIFO contents.
    pub fifo: FifoState<V>,
}

/// Credit-accounted buffer.
#[derive(Debug, Clone)]
pub struct CreditBuffer<V: Signal> {
    forward: Delay<V>,
    credit_return: Delay<()>,
    fifo: Fifo<V>,
    credits: usize,
    saturated: bool,
}

impl<V: Signal> CreditBuffer<V> {
    /// Creates an empty credit buffer holding all its credits.
    pub fn new(config: CreditConfig) -> Result<Self, ConfigError> {
        let depth = min_depth(config.pipe_depth);
        let depth = if config.depth < depth {
            tracing::debug!(pipe_depth = config.pipe_depth, requested = config.depth, depth, "raised credit depth");
            depth
        } else {
            config.depth
        };

        Ok(Self {
            forward: Delay::new(config.pipe_depth),
            credit_return: Delay::new(config.pipe_depth),
            fifo: Fifo::with_capacity(depth)?,
            credits: depth,
            saturated: false,
        })
    }

    /// Number of delay stages.
    pub fn pipe_depth(&self) -> usize { self.forward.depth() }

    /// FIFO depth, which is also the credit limit.
    pub fn depth(&self) -> usize { self.fifo.capacity() }

    /// Available credits.
    pub fn credits(&self) -> usize { self.credits }

    /// Returns true if the last step returned a credit beyond the limit.
    pub fn credit_saturated(&self) -> bool { self.saturated }

    /// Number of items in the FIFO.
    pub fn len(&self) -> usize { self.fifo.len() }

    /// Number of items on their way to the FIFO.
    pub fn in_flight(&self) -> usize { self.forward.in_flight() }

    /// Number of credits on their way back.
    pub fn credits_in_flight(&self) -> usize { self.credit_return.in_flight() }

    /// Returns true if no item is in the FIFO or on its way there.
    pub fn is_empty(&self) -> bool { self.fifo.is_empty() && self.in_flight() == 0 }

    /// Snapshot of the persisted state.
    pub fn state(&self) -> CreditState<V> {
        CreditState {
            credits: self.credits,
            saturated: self.saturated,
            forward: self.forward.state(),
            credit_return: self.credit_return.state(),
            fifo: self.fifo.state(),
        }
    }

    /// Restores a snapshot taken from a buffer with the same configuration. A rejected snapshot leaves the buffer
    /// unchanged.
    pub fn restore(&mut self, state: CreditState<V>) -> Result<(), ConfigError> {
        if state.credits > self.depth() {
            return Err(ConfigError::InconsistentState { unit: "credit_buffer", reason: "credits exceed depth" });
        }
        let mut next = self.clone();
        next.credits = state.credits;
        next.saturated = state.saturated;
        next.forward.restore(state.forward)?;
        next.credit_return.restore(state.credit_return)?;
        next.fifo.restore(state.fifo)?;
        *self = next;
        Ok(())
    }

    fn ingress(&self) -> Ready { Ready::new(self.credits != 0) }
}

impl<V: Signal> Module for CreditBuffer<V> {
    type I = VrChannel<V>;
    type O = VrChannel<V>;

    fn eval(&self, _i_fwd: &Valid<V>, _o_bwd: &Ready) -> (Valid<V>, Ready) {
        (self.fifo.egress_fwd().into_inner(), self.ingress())
    }

    fn commit(&mut self, i_fwd: &Valid<V>, o_bwd: &Ready) {
        let accept = i_fwd.fire(&self.ingress());
        let drain = self.fifo.egress_fwd().get().fire(o_bwd);

        let admitted = Valid::new(accept, i_fwd.inner.clone());
        let drained = Valid::new(drain, ());
        let (arriving, ()) = self.forward.eval(&admitted, &());
        let (returned, ()) = self.credit_return.eval(&drained, &());

        if arriving.valid && self.fifo.is_full() {
            tracing::warn!(item = ?arriving.inner, "credit buffer dropped an item arriving at a full fifo");
        }
        self.fifo.commit(&arriving, o_bwd);
        self.forward.commit(&admitted, &());
        self.credit_return.commit(&drained, &());

        let credits = self.credits + usize::from(returned.valid) - usize::from(accept);
        self.saturated = credits > self.depth();
        if self.saturated {
            tracing::trace!(depth = self.depth(), "credit counter saturated");
        }
        self.credits = credits.min(self.depth());
    }

    /// Forward stages keep shifting; the FIFO and the counter are reset.
    fn clear(&mut self) {
        tracing::trace!(in_flight = self.forward.in_flight(), "credit buffer clear");
        self.forward.clear();
        self.credit_return.clear();
        self.fifo.clear();
        self.credits = self.depth();
        self.saturated = false;
    }
}

impl<V: Signal> Committed for CreditBuffer<V> {}

impl<V: Signal> RegisteredEgress for CreditBuffer<V> {
    fn egress_fwd(&self) -> Registered<Valid<V>> { self.fifo.egress_fwd() }
}

impl<V: Signal> RegisteredIngress for CreditBuffer<V> {
    fn ingress_bwd(&self) -> Registered<Ready> { Registered::from_state(self, Self::ingress) }
}
