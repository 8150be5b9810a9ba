//! Join combinator.

use crate::*;

/// Combines `N` channels into one carrying their items in channel order.
///
/// Each ingress passes through a skid buffer, so neither side of the join sees a same-step path through it. The egress
/// is valid once every buffer holds an item; one egress transfer drains all buffers.
#[derive(Debug, Clone)]
pub struct Join<V: Signal, const N: usize> {
    buffers: Array<SkidBuffer<V>, N>,
}

impl<V: Signal, const N: usize> Join<V, N> {
    /// Creates a join with empty buffers.
    pub fn new() -> Self { Self { buffers: Array::default() } }

    /// Per-ingress buffers.
    pub fn buffers(&self) -> &Array<SkidBuffer<V>, N> { &self.buffers }

    fn egress(&self) -> Valid<Array<V, N>> {
        let heads = Array::from_fn(|i| self.buffers[i].egress_fwd().into_inner());
        Valid::new(heads.iter().all(|head| head.valid), heads.map(|head| head.inner))
    }

    fn ingress(&self) -> Array<Ready, N> {
        collect_array(self.buffers.iter().map(|buffer| buffer.ingress_bwd().into_inner()))
    }
}

impl<V: Signal, const N: usize> Default for Join<V, N> {
    fn default() -> Self { Self::new() }
}

impl<V: Signal, const N: usize> Module for Join<V, N> {
    type I = [VrChannel<V>; N];
    type O = VrChannel<Array<V, N>>;

    fn eval(&self, _i_fwd: &Array<Valid<V>, N>, _o_bwd: &Ready) -> (Valid<Array<V, N>>, Array<Ready, N>) {
        (self.egress(), self.ingress())
    }

    fn commit(&mut self, i_fwd: &Array<Valid<V>, N>, o_bwd: &Ready) {
        let drain = Ready::new(self.egress().fire(o_bwd));
        for (buffer, fwd) in self.buffers.iter_mut().zip(i_fwd.iter()) {
            buffer.commit(fwd, &drain);
        }
    }

    fn clear(&mut self) { self.buffers.iter_mut().for_each(Module::clear) }
}

impl<V: Signal, const N: usize> Committed for Join<V, N> {}

impl<V: Signal, const N: usize> RegisteredEgress for Join<V, N> {
    fn egress_fwd(&self) -> Registered<Valid<Array<V, N>>> { Registered::from_state(self, Self::egress) }
}

impl<V: Signal, const N: usize> RegisteredIngress for Join<V, N> {
    fn ingress_bwd(&self) -> Registered<Array<Ready, N>> { Registered::from_state(self, Self::ingress) }
}
