//! Utilities.

use arrayvec::ArrayVec;

use crate::Array;

/// Collects exactly `N` elements into an [`Array`].
///
/// # Panics
///
/// Panics if the iterator does not yield exactly `N` elements.
pub fn collect_array<V, const N: usize, I: IntoIterator<Item = V>>(iter: I) -> Array<V, N> {
    let mut elements = ArrayVec::<V, N>::new();
    for element in iter {
        assert!(!elements.is_full(), "iterator yielded more than {} elements", N);
        elements.push(element);
    }
    match elements.into_inner() {
        Ok(inner) => Array(inner),
        Err(elements) => panic!("iterator yielded {} elements instead of {}", elements.len(), N),
    }
}

/// Priority selection over conditions, first match wins.
///
/// ```ignore
/// let next = select! {
///     load => Transition::Load,
///     flush => Transition::Flush,
///     default => Transition::Idle,
/// };
/// ```
#[macro_export]
macro_rules! select {
    (
        default => $a:expr,
    ) => {
        $a
    };
    (
        $a:expr => $b:expr,
        $($c:tt)*
    ) => {
        if $a { $b } else { $crate::select!($($c)*) }
    }
}
