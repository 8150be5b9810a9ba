//! Utilities for valid-ready channels.

use crate::*;

channel! {
    /// Valid-ready channel.
    ///
    /// A transfer happens in a step exactly when both `valid` and `ready` hold. The producer must not compute
    /// `valid` from the same step's `ready`, nor the consumer `ready` from the same step's `valid`, unless the other
    /// side is registered.
    VrChannel<V: Signal>,
    Valid<V>,
    Ready
}

/// Valid/ready channel's forward value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Valid<V> {
    /// Inner data
    pub inner: V,

    /// Valid bit
    pub valid: bool,
}

/// Ready signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ready {
    /// Ready bit
    pub ready: bool,
}

impl<V> Valid<V> {
    /// Creates a new value.
    pub fn new(valid: bool, inner: V) -> Self { Self { inner, valid } }

    /// Creates a valid value.
    pub fn valid(inner: V) -> Self { Self::new(true, inner) }

    /// Maps the inner value.
    pub fn map_inner<W, F: FnOnce(V) -> W>(self, f: F) -> Valid<W> { Valid { inner: f(self.inner), valid: self.valid } }

    /// Overrides the valid bit.
    #[must_use]
    pub fn set_valid(self, valid: bool) -> Self { Self { valid, ..self } }

    /// Returns true if this value transfers against `bwd`. (fire signal: valid & ready)
    pub fn fire(&self, bwd: &Ready) -> bool { self.valid && bwd.ready }

    /// Returns the inner value if valid.
    pub fn into_option(self) -> Option<V> { self.valid.then_some(self.inner) }
}

impl<V: Default> Valid<V> {
    /// Creates an invalid value carrying the don't-care data.
    pub fn invalid() -> Self { Self::new(false, V::default()) }
}

impl Ready {
    /// Creates a new value.
    pub fn new(ready: bool) -> Self { Self { ready } }
}

impl<V: Default> From<Option<V>> for Valid<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(inner) => Self::valid(inner),
            None => Self::invalid(),
        }
    }
}
