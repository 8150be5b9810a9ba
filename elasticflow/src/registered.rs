//! Registered values.

/// Holder of committed state: a register bank, or a module made only of registers and memories.
///
/// Channel values never implement it. By the orphan rule, no crate other than the one defining a value type can make
/// that type `Committed`, so a forward or backward value computed in the current step cannot be passed to
/// [`Registered::from_state`].
pub trait Committed {}

/// Value that depends on committed state only.
///
/// The only way to build one is [`Registered::from_state`]. It takes a [`Committed`] holder and a plain function
/// pointer, which cannot capture any value computed in the current step. Handing a `Registered` across an interface
/// therefore proves that no valid/ready path runs through the producer in the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registered<T>(T);

impl<T> Registered<T> {
    /// Projects `state` through `f`.
    pub fn from_state<S: Committed + ?Sized>(state: &S, f: fn(&S) -> T) -> Self { Self(f(state)) }

    /// Returns a reference to the value.
    pub fn get(&self) -> &T { &self.0 }

    /// Returns the value.
    pub fn into_inner(self) -> T { self.0 }

    /// Maps the value. The mapping is again a plain function pointer.
    pub fn map<U>(self, f: fn(T) -> U) -> Registered<U> { Registered(f(self.0)) }

    /// Pairs two registered values.
    pub fn zip<U>(self, other: Registered<U>) -> Registered<(T, U)> { Registered((self.0, other.0)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counter {
        count: u8,
    }

    impl Committed for Counter {}

    #[test]
    fn projects_committed_state() {
        let counter = Counter { count: 3 };
        let registered = Registered::from_state(&counter, |counter| counter.count * 2);
        assert_eq!(registered.map(u16::from).into_inner(), 6);
    }
}
