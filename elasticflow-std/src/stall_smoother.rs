//! Stall smoother.
//!
//! A FIFO whose egress stays closed until enough items have accumulated to ride out a bounded ingress stall.

use crate::*;

/// Stall smoother configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StallSmootherConfig {
    /// FIFO depth.
    pub depth: usize,
    /// Occupancy, or steps since the trigger, after which the egress opens. The longest absorbable stall.
    pub threshold: usize,
}

impl Default for StallSmootherConfig {
    fn default() -> Self { Self { depth: 4, threshold: 3 } }
}

impl StallSmootherConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroCapacity { unit: "stall_smoother" });
        }
        if !(1..=self.depth).contains(&self.threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                unit: "stall_smoother",
                threshold: self.threshold,
                depth: self.depth,
            });
        }
        Ok(())
    }
}

/// Controller mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmootherMode {
    /// Egress closed, accumulating items.
    #[default]
    Buffering,
    /// Egress open until the FIFO runs empty.
    Sending,
}

/// Persisted state of a stall smoother.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StallSmootherState<V> {
    /// Controller mode.
    pub mode: SmootherMode,
    /// Steps since the trigger was first seen while buffering.
    pub elapsed: Option<usize>,
    /// FIFO contents.
    pub fifo: FifoState<V>,
}

/// Stall smoother.
///
/// The second ingress channel is the trigger: once it has been seen at least `threshold` steps ago, the egress opens
/// even if the FIFO has not reached the threshold.
#[derive(Debug, Clone)]
pub struct StallSmoother<V: Signal> {
    fifo: Fifo<V>,
    threshold: usize,
    mode: SmootherMode,
    elapsed: Option<usize>,
}

impl<V: Signal> StallSmoother<V> {
    /// Creates an empty stall smoother in buffering mode.
    pub fn new(config: StallSmootherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            fifo: Fifo::with_capacity(config.depth)?,
            threshold: config.threshold,
            mode: SmootherMode::Buffering,
            elapsed: None,
        })
    }

    /// Controller mode.
    pub fn mode(&self) -> SmootherMode { self.mode }

    /// Occupancy at which the egress opens.
    pub fn threshold(&self) -> usize { self.threshold }

    /// FIFO depth.
    pub fn capacity(&self) -> usize { self.fifo.capacity() }

    /// Number of buffered items.
    pub fn len(&self) -> usize { self.fifo.len() }

    /// Returns true if no item is buffered.
    pub fn is_empty(&self) -> bool { self.fifo.is_empty() }

    /// Returns true if the FIFO is full.
    pub fn is_full(&self) -> bool { self.fifo.is_full() }

    /// Snapshot of the persisted state.
    pub fn state(&self) -> StallSmootherState<V> {
        StallSmootherState { mode: self.mode, elapsed: self.elapsed, fifo: self.fifo.state() }
    }

    /// Restores a snapshot taken from a smoother with the same configuration.
    pub fn restore(&mut self, state: StallSmootherState<V>) -> Result<(), ConfigError> {
        self.fifo.restore(state.fifo)?;
        self.mode = state.mode;
        self.elapsed = state.elapsed;
        Ok(())
    }

    fn sending(&self) -> bool { self.mode == SmootherMode::Sending }

    fn egress(&self) -> Valid<V> {
        let head = self.fifo.egress_fwd().into_inner();
        let valid = head.valid && self.sending();
        head.set_valid(valid)
    }

    fn ingress(&self) -> (Ready, ()) { (self.fifo.ingress_bwd().into_inner(), ()) }
}

impl<V: Signal> Module for StallSmoother<V> {
    type I = (VrChannel<V>, UniChannel<bool>);
    type O = VrChannel<V>;

    fn eval(&self, _i_fwd: &(Valid<V>, bool), _o_bwd: &Ready) -> (Valid<V>, (Ready, ())) {
        (self.egress(), self.ingress())
    }

    fn commit(&mut self, (data, trigger): &(Valid<V>, bool), o_bwd: &Ready) {
        let gated = Ready::new(o_bwd.ready && self.sending());
        self.fifo.commit(data, &gated);
        let count_next = self.fifo.len();

        let elapsed_next = match (self.mode, self.elapsed) {
            (SmootherMode::Sending, _) => None,
            (SmootherMode::Buffering, Some(elapsed)) => Some(elapsed + 1),
            (SmootherMode::Buffering, None) => trigger.then_some(1),
        };
        let opened = count_next >= self.threshold || elapsed_next.map_or(false, |elapsed| elapsed >= self.threshold);
        let mode_next = select! {
            self.sending() && count_next == 0 => SmootherMode::Buffering,
            self.sending() || opened => SmootherMode::Sending,
            default => SmootherMode::Buffering,
        };
        self.elapsed = elapsed_next;

        if mode_next != self.mode {
            tracing::debug!(from = ?self.mode, to = ?mode_next, count = count_next, "stall smoother mode");
            self.elapsed = None;
        }
        self.mode = mode_next;
    }

    fn clear(&mut self) {
        tracing::trace!("stall smoother clear");
        self.fifo.clear();
        self.mode = SmootherMode::Buffering;
        self.elapsed = None;
    }
}

impl<V: Signal> Committed for StallSmoother<V> {}

impl<V: Signal> RegisteredEgress for StallSmoother<V> {
    fn egress_fwd(&self) -> Registered<Valid<V>> { Registered::from_state(self, Self::egress) }
}

impl<V: Signal> RegisteredIngress for StallSmoother<V> {
    fn ingress_bwd(&self) -> Registered<(Ready, ())> { Registered::from_state(self, Self::ingress) }
}
