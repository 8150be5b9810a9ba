//! Branch (demux).

use std::marker::PhantomData;

use crate::*;

/// Branch configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BranchConfig {
    /// Unselected egress channels carry a copy of the data instead of the default value.
    pub broadcast: bool,
}

/// Steers one channel to the egress channels picked by a selector.
///
/// Unselected channels are not valid. The ingress ready is the OR of the selected channels' readies, so with no channel
/// selected nothing transfers. Selecting more than one channel offers the item to all of them; it transfers as soon as
/// one is ready, and the caller must keep selectors exclusive if that matters.
#[derive(Debug, Clone)]
pub struct Branch<V: Signal, const N: usize> {
    config: BranchConfig,
    _marker: PhantomData<V>,
}

impl<V: Signal, const N: usize> Branch<V, N> {
    /// Creates a branch.
    pub fn new(config: BranchConfig) -> Self { Self { config, _marker: PhantomData } }

    /// Configuration.
    pub fn config(&self) -> BranchConfig { self.config }
}

impl<V: Signal, const N: usize> Default for Branch<V, N> {
    fn default() -> Self { Self::new(BranchConfig::default()) }
}

impl<V: Signal, const N: usize> Module for Branch<V, N> {
    type I = (UniChannel<Selector<N>>, VrChannel<V>);
    type O = [VrChannel<V>; N];

    fn eval(
        &self, (select, i_fwd): &(Selector<N>, Valid<V>), o_bwd: &Array<Ready, N>,
    ) -> (Array<Valid<V>, N>, ((), Ready)) {
        let select = select.one_hot();
        let o_fwd = Array::from_fn(|i| {
            let inner = if select[i] || self.config.broadcast { i_fwd.inner.clone() } else { V::default() };
            Valid::new(i_fwd.valid && select[i], inner)
        });
        let i_bwd = Ready::new(select.iter().zip(o_bwd.iter()).any(|(sel, bwd)| *sel && bwd.ready));
        (o_fwd, ((), i_bwd))
    }

    fn commit(&mut self, _i_fwd: &(Selector<N>, Valid<V>), _o_bwd: &Array<Ready, N>) {}

    fn clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readies<const N: usize>(bits: [bool; N]) -> Array<Ready, N> { Array(bits).map(Ready::new) }

    #[test]
    fn routes_to_selected() {
        let branch = Branch::<u8, 3>::default();
        let (o, ((), i)) = branch.eval(&(Selector::from(1), Valid::valid(7)), &readies([true, false, true]));
        assert_eq!(o.into_inner(), [Valid::new(false, 0), Valid::valid(7), Valid::new(false, 0)]);
        assert!(!i.ready);

        let (_, ((), i)) = branch.eval(&(Selector::from(2), Valid::valid(7)), &readies([true, false, true]));
        assert!(i.ready);
    }

    #[test]
    fn broadcast_copies_data() {
        let branch = Branch::<u8, 2>::new(BranchConfig { broadcast: true });
        let (o, _) = branch.eval(&(Selector::from(0), Valid::valid(7)), &readies([true, true]));
        assert_eq!(o.into_inner(), [Valid::valid(7), Valid::new(false, 7)]);
    }

    #[test]
    fn disconnected_selector_blocks() {
        let branch = Branch::<u8, 2>::default();
        for select in [Selector::none(), Selector::Binary(2)] {
            let (o, ((), i)) = branch.eval(&(select, Valid::valid(7)), &readies([true, true]));
            assert!(o.iter().all(|fwd| !fwd.valid));
            assert!(!i.ready);
        }
    }

    #[test]
    fn many_hot_ors_readies() {
        let branch = Branch::<u8, 3>::default();
        let (o, ((), i)) = branch.eval(&(Selector::from([true, false, true]), Valid::valid(7)), &readies([false; 3]));
        assert_eq!(o.map(|fwd| fwd.valid).into_inner(), [true, false, true]);
        assert!(!i.ready);
        let (_, ((), i)) =
            branch.eval(&(Selector::from([true, false, true]), Valid::valid(7)), &readies([false, false, true]));
        assert!(i.ready);
    }
}
