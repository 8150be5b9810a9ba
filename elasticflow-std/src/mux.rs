//! Merge (mux).

use std::marker::PhantomData;
use std::ops::BitOr;

use itertools::Itertools;

use crate::*;

/// Assembles one channel from the ingress channels picked by a selector.
///
/// Unselected ingress channels see `ready == false`. With more than one channel selected, the egress is valid if any
/// of them is, and carries the bitwise OR of their data.
#[derive(Debug, Clone)]
pub struct Merge<V: Signal, const N: usize> {
    _marker: PhantomData<V>,
}

impl<V: Signal, const N: usize> Merge<V, N> {
    /// Creates a merge.
    pub fn new() -> Self { Self { _marker: PhantomData } }
}

impl<V: Signal, const N: usize> Default for Merge<V, N> {
    fn default() -> Self { Self::new() }
}

impl<V: Signal + BitOr<Output = V>, const N: usize> Module for Merge<V, N> {
    type I = (UniChannel<Selector<N>>, [VrChannel<V>; N]);
    type O = VrChannel<V>;

    fn eval(
        &self, (select, i_fwd): &(Selector<N>, Array<Valid<V>, N>), o_bwd: &Ready,
    ) -> (Valid<V>, ((), Array<Ready, N>)) {
        let select = select.one_hot();
        let selected = || i_fwd.iter().zip(select.iter()).filter(|(_, sel)| **sel).map(|(fwd, _)| fwd);

        let valid = selected().any(|fwd| fwd.valid);
        let inner = selected().map(|fwd| fwd.inner.clone()).tree_fold1(|l, r| l | r).unwrap_or_default();
        let i_bwd = select.map(|sel| Ready::new(sel && o_bwd.ready));

        (Valid::new(valid, inner), ((), i_bwd))
    }

    fn commit(&mut self, _i_fwd: &(Selector<N>, Array<Valid<V>, N>), _o_bwd: &Ready) {}

    fn clear(&mut self) {}
}
