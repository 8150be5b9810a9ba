//! Interface selector for routing combinators.

use crate::*;

/// Selects which of `N` interfaces takes part in a step.
///
/// The default selects nothing. Selecting nothing, or a binary index outside `0..N`, disconnects every routed
/// interface for that step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selector<const N: usize> {
    /// Binary index.
    Binary(usize),
    /// One-hot (or, under the fallback policy, many-hot) bit vector.
    OneHot(Array<bool, N>),
}

impl<const N: usize> Selector<N> {
    /// Selects nothing.
    pub fn none() -> Self { Self::OneHot(Array::default()) }

    /// Decodes into a bit vector. An out-of-range binary index decodes to all-zero.
    pub fn one_hot(&self) -> Array<bool, N> {
        match self {
            Self::Binary(index) => Array::from_fn(|i| i == *index),
            Self::OneHot(bits) => bits.clone(),
        }
    }

    /// Returns true if no interface is selected.
    pub fn is_disconnected(&self) -> bool { !self.one_hot().any() }

    /// Returns true if at most one interface is selected.
    pub fn is_exclusive(&self) -> bool { self.one_hot().count_ones() <= 1 }
}

impl<const N: usize> Default for Selector<N> {
    fn default() -> Self { Self::none() }
}

impl<const N: usize> From<usize> for Selector<N> {
    fn from(index: usize) -> Self { Self::Binary(index) }
}

impl<const N: usize> From<[bool; N]> for Selector<N> {
    fn from(bits: [bool; N]) -> Self { Self::OneHot(Array(bits)) }
}
