//! Producer.

use std::collections::VecDeque;
use std::fmt;

use crate::*;

/// Pattern over the step index.
pub type Pattern = Box<dyn Fn(usize) -> bool>;

/// Offers queued items in order.
///
/// The pattern decides in which steps a new offer may start. Once an item is offered it is held until it transfers.
pub struct Source<V: Signal> {
    items: VecDeque<V>,
    pattern: Pattern,
    holding: bool,
    step: usize,
    sent: usize,
}

impl<V: Signal> Source<V> {
    /// Creates a source that offers whenever it has an item.
    pub fn new<I: IntoIterator<Item = V>>(items: I) -> Self {
        Self { items: items.into_iter().collect(), pattern: Box::new(|_| true), holding: false, step: 0, sent: 0 }
    }

    /// Replaces the offer pattern.
    #[must_use]
    pub fn with_pattern<F: Fn(usize) -> bool + 'static>(self, pattern: F) -> Self {
        Self { pattern: Box::new(pattern), ..self }
    }

    /// Queues more items.
    pub fn extend<I: IntoIterator<Item = V>>(&mut self, items: I) { self.items.extend(items) }

    /// Number of items not yet transferred.
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns true if every item has transferred.
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Number of items transferred.
    pub fn sent(&self) -> usize { self.sent }

    /// Current-step forward value.
    pub fn fwd(&self) -> Valid<V> {
        match self.items.front() {
            Some(item) if self.holding || (self.pattern)(self.step) => Valid::valid(item.clone()),
            _ => Valid::invalid(),
        }
    }

    /// Commits the step given the receiver's ready.
    pub fn update(&mut self, bwd: &Ready) {
        let fwd = self.fwd();
        if fwd.fire(bwd) {
            let _ = self.items.pop_front();
            self.sent += 1;
            self.holding = false;
        } else {
            self.holding = fwd.valid;
        }
        self.step += 1;
    }
}

impl<V: Signal> fmt::Debug for Source<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("items", &self.items)
            .field("holding", &self.holding)
            .field("step", &self.step)
            .field("sent", &self.sent)
            .finish()
    }
}
