//! Signal.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// Value carried on an interface or held in a register.
///
/// `Default` stands for the don't-care value presented while a channel is not valid.
pub trait Signal: 'static + Clone + fmt::Debug + Default {}

impl<T: 'static + Clone + fmt::Debug + Default> Signal for T {}

/// Fixed-length array signal.
///
/// Unlike `[V; N]`, it is a [`Signal`] for every `N`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Array<V, const N: usize>(pub [V; N]);

impl<V, const N: usize> Array<V, N> {
    /// Creates an array whose `i`-th element is `f(i)`.
    pub fn from_fn<F: FnMut(usize) -> V>(f: F) -> Self { Self(std::array::from_fn(f)) }

    /// Maps every element.
    pub fn map<W, F: FnMut(V) -> W>(self, f: F) -> Array<W, N> { Array(self.0.map(f)) }

    /// Returns the underlying array.
    pub fn into_inner(self) -> [V; N] { self.0 }
}

impl<V: Clone, const N: usize> Array<V, N> {
    /// Repeats `value` `N` times.
    pub fn repeat(value: V) -> Self { Self::from_fn(|_| value.clone()) }
}

impl<const N: usize> Array<bool, N> {
    /// Returns true if all bits are set. Vacuously true for `N == 0`.
    pub fn all(&self) -> bool { self.0.iter().all(|b| *b) }

    /// Returns true if any bit is set.
    pub fn any(&self) -> bool { self.0.iter().any(|b| *b) }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize { self.0.iter().filter(|b| **b).count() }
}

impl<V: Default, const N: usize> Default for Array<V, N> {
    fn default() -> Self { Self::from_fn(|_| V::default()) }
}

impl<V: fmt::Debug, const N: usize> fmt::Debug for Array<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_list().entries(self.0.iter()).finish() }
}

impl<V, const N: usize> Deref for Array<V, N> {
    type Target = [V; N];

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl<V, const N: usize> DerefMut for Array<V, N> {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl<V, const N: usize> From<[V; N]> for Array<V, N> {
    fn from(inner: [V; N]) -> Self { Self(inner) }
}

impl<V, const N: usize> IntoIterator for Array<V, N> {
    type IntoIter = std::array::IntoIter<V, N>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a, V, const N: usize> IntoIterator for &'a Array<V, N> {
    type IntoIter = std::slice::Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

#[cfg(feature = "serde")]
impl<V: serde::Serialize, const N: usize> serde::Serialize for Array<V, N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, V: serde::Deserialize<'de>, const N: usize> serde::Deserialize<'de> for Array<V, N> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<V>::deserialize(deserializer)?;
        let len = elements.len();
        <[V; N]>::try_from(elements)
            .map(Self)
            .map_err(|_| serde::de::Error::invalid_length(len, &"an array of the declared length"))
    }
}
