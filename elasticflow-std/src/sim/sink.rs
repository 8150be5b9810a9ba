//! Consumer.

use std::fmt;

use super::Pattern;
use crate::*;

/// Collects items, ready in the steps its pattern allows.
pub struct Sink<V: Signal> {
    pattern: Pattern,
    received: Vec<V>,
    step: usize,
}

impl<V: Signal> Sink<V> {
    /// Creates an always-ready sink.
    pub fn new() -> Self { Self { pattern: Box::new(|_| true), received: Vec::new(), step: 0 } }

    /// Replaces the ready pattern.
    #[must_use]
    pub fn with_pattern<F: Fn(usize) -> bool + 'static>(self, pattern: F) -> Self {
        Self { pattern: Box::new(pattern), ..self }
    }

    /// Items received so far.
    pub fn received(&self) -> &[V] { &self.received }

    /// Takes the received items.
    pub fn into_received(self) -> Vec<V> { self.received }

    /// Current-step backward value.
    pub fn bwd(&self) -> Ready { Ready::new((self.pattern)(self.step)) }

    /// Commits the step given the sender's forward value.
    pub fn update(&mut self, fwd: &Valid<V>) {
        if fwd.fire(&self.bwd()) {
            self.received.push(fwd.inner.clone());
        }
        self.step += 1;
    }
}

impl<V: Signal> Default for Sink<V> {
    fn default() -> Self { Self::new() }
}

impl<V: Signal> fmt::Debug for Sink<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("received", &self.received).field("step", &self.step).finish()
    }
}
