//! N-slot circular buffer.
//!
//! Items live in a fixed [`Memory`] addressed by independent read and write pointers. `ready` is `!full` and
//! `valid` is `!empty`, both read from the committed occupancy, so the buffer has registered outputs on both sides.

mod tracker;

pub use tracker::Tracker;

use crate::*;

/// FIFO configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoConfig {
    /// Number of slots.
    pub capacity: usize,
}

impl Default for FifoConfig {
    fn default() -> Self { Self { capacity: 2 } }
}

/// Persisted state of a FIFO.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FifoState<V> {
    /// Backing array.
    pub mem: Vec<V>,
    /// Occupancy.
    pub count: usize,
    /// Read pointer.
    pub read: usize,
    /// Write pointer.
    pub write: usize,
}

/// FIFO with `capacity` slots.
///
/// With `CIRCULAR`, the ingress is always ready: inserting into a full buffer drops the oldest item in the same step.
#[derive(Debug, Clone)]
pub struct Fifo<V: Signal, const CIRCULAR: bool = false> {
    mem: Memory<V>,
    tracker: Tracker,
}

/// FIFO that overwrites its oldest item when full.
pub type CircularFifo<V> = Fifo<V, true>;

impl<V: Signal, const CIRCULAR: bool> Fifo<V, CIRCULAR> {
    /// Creates an empty FIFO.
    pub fn new(config: FifoConfig) -> Result<Self, ConfigError> {
        if config.capacity == 0 {
            return Err(ConfigError::ZeroCapacity { unit: "fifo" });
        }
        Ok(Self { mem: Memory::new(config.capacity), tracker: Tracker::new(config.capacity) })
    }

    /// Creates an empty FIFO with `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> { Self::new(FifoConfig { capacity }) }

    /// Number of slots.
    pub fn capacity(&self) -> usize { self.tracker.capacity() }

    /// Occupancy.
    pub fn len(&self) -> usize { self.tracker.count() }

    /// Returns true if no item is buffered.
    pub fn is_empty(&self) -> bool { self.tracker.is_empty() }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool { self.tracker.is_full() }

    /// Pointer state.
    pub fn tracker(&self) -> &Tracker { &self.tracker }

    /// Buffered items, oldest first.
    pub fn items(&self) -> impl Iterator<Item = &V> + '_ {
        (0..self.len()).map(move |i| self.mem.read((self.tracker.read() + i) % self.capacity()))
    }

    /// Snapshot of the persisted state.
    pub fn state(&self) -> FifoState<V> {
        FifoState {
            mem: self.mem.to_vec(),
            count: self.tracker.count(),
            read: self.tracker.read(),
            write: self.tracker.write(),
        }
    }

    /// Restores a snapshot taken from a FIFO of the same capacity. A rejected snapshot leaves the FIFO unchanged.
    pub fn restore(&mut self, state: FifoState<V>) -> Result<(), ConfigError> {
        let tracker = Tracker::from_parts(self.capacity(), state.count, state.read, state.write)?;
        self.mem.load(state.mem)?;
        self.tracker = tracker;
        Ok(())
    }

    fn egress(&self) -> Valid<V> { Valid::new(!self.tracker.is_empty(), self.mem.read(self.tracker.read()).clone()) }

    fn ingress(&self) -> Ready { Ready::new(CIRCULAR || !self.tracker.is_full()) }
}

impl<V: Signal, const CIRCULAR: bool> Module for Fifo<V, CIRCULAR> {
    type I = VrChannel<V>;
    type O = VrChannel<V>;

    fn eval(&self, _i_fwd: &Valid<V>, _o_bwd: &Ready) -> (Valid<V>, Ready) { (self.egress(), self.ingress()) }

    fn commit(&mut self, i_fwd: &Valid<V>, o_bwd: &Ready) {
        let insert = i_fwd.fire(&self.ingress());
        let remove = self.egress().fire(o_bwd);
        let overwrite = CIRCULAR && insert && !remove && self.tracker.is_full();

        let (transition, tracker_next) = self.tracker.next(insert, remove || overwrite);
        if insert {
            self.mem.write(self.tracker.write(), i_fwd.inner.clone());
        }
        if overwrite {
            tracing::trace!(capacity = self.capacity(), "fifo overwrote oldest item");
        }
        if transition != Transition::Idle {
            tracing::trace!(?transition, count = tracker_next.count(), "fifo");
        }
        self.tracker = tracker_next;
    }

    fn clear(&mut self) {
        tracing::trace!("fifo clear");
        self.tracker = Tracker::new(self.capacity());
    }
}

impl<V: Signal, const CIRCULAR: bool> Committed for Fifo<V, CIRCULAR> {}

impl<V: Signal, const CIRCULAR: bool> RegisteredEgress for Fifo<V, CIRCULAR> {
    fn egress_fwd(&self) -> Registered<Valid<V>> { Registered::from_state(self, Self::egress) }
}

impl<V: Signal, const CIRCULAR: bool> RegisteredIngress for Fifo<V, CIRCULAR> {
    fn ingress_bwd(&self) -> Registered<Ready> { Registered::from_state(self, Self::ingress) }
}
