//! Fork combinators.
//!
//! Each variant replicates one ingress item to `N` egress channels and differs in how a slow egress affects the
//! others.

use crate::*;

/// Lazy fork's logic. (ready: all egress ready)
fn lazy_logic<V: Signal, const N: usize>(
    i_fwd: &Valid<V>, o_bwd: &Array<Ready, N>, state: &(),
) -> (Array<Valid<V>, N>, Ready, ()) {
    let all_ready = o_bwd.iter().all(|bwd| bwd.ready);
    let o_fwd = Array::repeat(i_fwd.clone().set_valid(i_fwd.valid && all_ready));
    (o_fwd, Ready::new(all_ready), *state)
}

/// Fork that offers the item to every egress only when all of them are ready.
///
/// There is no storage: the ingress ready is the AND of the egress readies and each egress valid depends on them, so a
/// lazy fork must sit between registered interfaces.
#[derive(Debug, Clone)]
pub struct LazyFork<V: Signal, const N: usize> {
    inner: Fsm<VrChannel<V>, [VrChannel<V>; N], ()>,
}

impl<V: Signal, const N: usize> LazyFork<V, N> {
    /// Creates a lazy fork.
    pub fn new() -> Self { Self { inner: Fsm::new("fork_lazy", (), lazy_logic::<V, N>) } }
}

impl<V: Signal, const N: usize> Default for LazyFork<V, N> {
    fn default() -> Self { Self::new() }
}

impl<V: Signal, const N: usize> Module for LazyFork<V, N> {
    type I = VrChannel<V>;
    type O = [VrChannel<V>; N];

    fn eval(&self, i_fwd: &Valid<V>, o_bwd: &Array<Ready, N>) -> (Array<Valid<V>, N>, Ready) {
        self.inner.eval(i_fwd, o_bwd)
    }

    fn commit(&mut self, i_fwd: &Valid<V>, o_bwd: &Array<Ready, N>) { self.inner.commit(i_fwd, o_bwd) }

    fn clear(&mut self) { self.inner.clear() }
}

/// Eager fork's logic.
///
/// An egress whose delivered bit is set no longer offers the item. The ingress completes once every egress has
/// transferred since the item arrived, which clears the bits.
pub fn eager_logic<V: Signal, const N: usize>(
    i_fwd: &Valid<V>, o_bwd: &Array<Ready, N>, delivered: &Array<bool, N>,
) -> (Array<Valid<V>, N>, Ready, Array<bool, N>) {
    let o_fwd = Array::from_fn(|i| i_fwd.clone().set_valid(i_fwd.valid && !delivered[i]));
    let i_bwd = Ready::new(delivered.iter().zip(o_bwd.iter()).all(|(done, bwd)| *done || bwd.ready));

    let delivered_next = if i_fwd.fire(&i_bwd) {
        Array::default()
    } else {
        Array::from_fn(|i| delivered[i] || o_fwd[i].fire(&o_bwd[i]))
    };

    (o_fwd, i_bwd, delivered_next)
}

/// Fork that lets every egress take the item at its own pace.
#[derive(Debug, Clone)]
pub struct EagerFork<V: Signal, const N: usize> {
    inner: Fsm<VrChannel<V>, [VrChannel<V>; N], Array<bool, N>>,
}

impl<V: Signal, const N: usize> EagerFork<V, N> {
    /// Creates an eager fork with no egress served.
    pub fn new() -> Self { Self { inner: Fsm::new("fork_eager", Array::default(), eager_logic::<V, N>) } }

    /// Egress channels that already took the current item.
    pub fn delivered(&self) -> &Array<bool, N> { self.inner.state() }

    /// Replaces the delivered bits.
    pub fn restore(&mut self, delivered: Array<bool, N>) { self.inner.restore(delivered) }
}

impl<V: Signal, const N: usize> Default for EagerFork<V, N> {
    fn default() -> Self { Self::new() }
}

impl<V: Signal, const N: usize> Module for EagerFork<V, N> {
    type I = VrChannel<V>;
    type O = [VrChannel<V>; N];

    fn eval(&self, i_fwd: &Valid<V>, o_bwd: &Array<Ready, N>) -> (Array<Valid<V>, N>, Ready) {
        self.inner.eval(i_fwd, o_bwd)
    }

    fn commit(&mut self, i_fwd: &Valid<V>, o_bwd: &Array<Ready, N>) { self.inner.commit(i_fwd, o_bwd) }

    fn clear(&mut self) { self.inner.clear() }
}

/// Fork that loads a skid buffer per egress, all in the same step.
///
/// The ingress waits until every buffer has room, so one stalled egress eventually blocks the others. The egresses are
/// not kept in lock-step: an egress may run ahead of a stalled sibling by at most the skid buffer depth.
#[derive(Debug, Clone)]
pub struct BlockingFork<V: Signal, const N: usize> {
    buffers: Array<SkidBuffer<V>, N>,
}

impl<V: Signal, const N: usize> BlockingFork<V, N> {
    /// Creates a blocking fork with empty buffers.
    pub fn new() -> Self { Self { buffers: Array::default() } }

    /// Per-egress buffers.
    pub fn buffers(&self) -> &Array<SkidBuffer<V>, N> { &self.buffers }

    fn ingress(&self) -> Ready { Ready::new(self.buffers.iter().all(|buffer| buffer.ingress_bwd().get().ready)) }

    fn egress(&self) -> Array<Valid<V>, N> {
        collect_array(self.buffers.iter().map(|buffer| buffer.egress_fwd().into_inner()))
    }
}

impl<V: Signal, const N: usize> Default for BlockingFork<V, N> {
    fn default() -> Self { Self::new() }
}

impl<V: Signal, const N: usize> Module for BlockingFork<V, N> {
    type I = VrChannel<V>;
    type O = [VrChannel<V>; N];

    fn eval(&self, _i_fwd: &Valid<V>, _o_bwd: &Array<Ready, N>) -> (Array<Valid<V>, N>, Ready) {
        (self.egress(), self.ingress())
    }

    fn commit(&mut self, i_fwd: &Valid<V>, o_bwd: &Array<Ready, N>) {
        let load = i_fwd.clone().set_valid(i_fwd.fire(&self.ingress()));
        for (buffer, bwd) in self.buffers.iter_mut().zip(o_bwd.iter()) {
            buffer.commit(&load, bwd);
        }
    }

    fn clear(&mut self) { self.buffers.iter_mut().for_each(Module::clear) }
}

impl<V: Signal, const N: usize> Committed for BlockingFork<V, N> {}

impl<V: Signal, const N: usize> RegisteredEgress for BlockingFork<V, N> {
    fn egress_fwd(&self) -> Registered<Array<Valid<V>, N>> { Registered::from_state(self, Self::egress) }
}

impl<V: Signal, const N: usize> RegisteredIngress for BlockingFork<V, N> {
    fn ingress_bwd(&self) -> Registered<Ready> { Registered::from_state(self, Self::ingress) }
}
