//! Plain delay stages.

use std::collections::VecDeque;

use crate::*;

/// Persisted state of a delay line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayState<V> {
    /// Stage contents, the stage driving the egress first.
    pub stages: Vec<Valid<V>>,
}

/// Line of `depth` delay stages without backpressure.
///
/// A value entering in step `t` leaves in step `t + depth`. With `depth == 0` the line is a wire, so the egress is
/// registered only for nonzero depths.
#[derive(Debug, Clone)]
pub struct Delay<V: Signal> {
    stages: VecDeque<Valid<V>>,
}

impl<V: Signal> Delay<V> {
    /// Creates a line of `depth` empty stages.
    pub fn new(depth: usize) -> Self { Self { stages: (0..depth).map(|_| Valid::invalid()).collect() } }

    /// Number of stages.
    pub fn depth(&self) -> usize { self.stages.len() }

    /// Number of valid values in flight.
    pub fn in_flight(&self) -> usize { self.stages.iter().filter(|stage| stage.valid).count() }

    /// Snapshot of the stages.
    pub fn state(&self) -> DelayState<V> { DelayState { stages: self.stages.iter().cloned().collect() } }

    /// Restores a snapshot taken from a line of the same depth.
    pub fn restore(&mut self, state: DelayState<V>) -> Result<(), ConfigError> {
        if state.stages.len() != self.depth() {
            return Err(ConfigError::InconsistentState { unit: "delay", reason: "stage count mismatch" });
        }
        self.stages = state.stages.into();
        Ok(())
    }
}

impl<V: Signal> Module for Delay<V> {
    type I = UniChannel<Valid<V>>;
    type O = UniChannel<Valid<V>>;

    fn eval(&self, i_fwd: &Valid<V>, _o_bwd: &()) -> (Valid<V>, ()) {
        (self.stages.front().unwrap_or(i_fwd).clone(), ())
    }

    fn commit(&mut self, i_fwd: &Valid<V>, _o_bwd: &()) {
        if self.stages.pop_front().is_some() {
            self.stages.push_back(i_fwd.clone());
        }
    }

    /// Stages have no reset: the clear shifts an invalid value in.
    fn clear(&mut self) { self.commit(&Valid::invalid(), &()) }
}
