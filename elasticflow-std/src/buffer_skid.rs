//! Skid buffer for valid-ready channels.
//!
//! Two slots decouple the ingress and egress handshakes: the primary slot drives the egress, and the secondary
//! (skid) slot catches the item that arrives while the primary one is still draining. Both `ready` and `valid` are
//! functions of the committed state, so no combinational path crosses the buffer.

use crate::*;

/// Occupancy tag of a skid buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkidTag {
    /// No slot occupied.
    #[default]
    Empty,
    /// Primary slot occupied.
    Busy,
    /// Both slots occupied.
    Full,
}

impl SkidTag {
    fn count(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Busy => 1,
            Self::Full => 2,
        }
    }

    fn from_count(count: usize) -> Self {
        match count {
            0 => Self::Empty,
            1 => Self::Busy,
            _ => Self::Full,
        }
    }
}

/// Skid buffer's state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkidState<V> {
    /// Occupancy tag.
    pub tag: SkidTag,
    /// Directly connected to module output.
    pub output: V,
    /// Temp register of skid buffer.
    pub buffer: V,
}

fn egress<V: Signal>(state: &SkidState<V>) -> Valid<V> { Valid::new(state.tag != SkidTag::Empty, state.output.clone()) }

fn ingress<V: Signal>(state: &SkidState<V>) -> Ready { Ready::new(state.tag != SkidTag::Full) }

/// Skid buffer's logic.
pub fn skid_logic<V: Signal>(
    i_fwd: &Valid<V>, o_bwd: &Ready, state: &SkidState<V>,
) -> (Valid<V>, Ready, SkidState<V>) {
    let o_fwd = egress(state);
    let i_bwd = ingress(state);

    let insert = i_fwd.fire(&i_bwd);
    let remove = o_fwd.fire(o_bwd);
    let transition = Transition::classify(state.tag.count(), 2, insert, remove);

    let mut state_next = state.clone();
    match transition {
        Transition::Load | Transition::Flow => state_next.output = i_fwd.inner.clone(),
        Transition::Fill => state_next.buffer = i_fwd.inner.clone(),
        Transition::Flush => state_next.output = state.buffer.clone(),
        Transition::Unload | Transition::Idle => {}
    }
    state_next.tag = SkidTag::from_count(transition.apply(state.tag.count()));

    (o_fwd, i_bwd, state_next)
}

/// Two-slot skid buffer.
#[derive(Debug, Clone)]
pub struct SkidBuffer<V: Signal> {
    inner: Fsm<VrChannel<V>, VrChannel<V>, SkidState<V>>,
}

impl<V: Signal> SkidBuffer<V> {
    /// Creates an empty skid buffer.
    pub fn new() -> Self { Self { inner: Fsm::new("buffer_skid", SkidState::default(), skid_logic::<V>) } }

    /// Committed state.
    pub fn state(&self) -> &SkidState<V> { self.inner.state() }

    /// Replaces the committed state.
    pub fn restore(&mut self, state: SkidState<V>) { self.inner.restore(state) }

    /// Number of buffered items.
    pub fn len(&self) -> usize { self.state().tag.count() }

    /// Returns true if no item is buffered.
    pub fn is_empty(&self) -> bool { self.state().tag == SkidTag::Empty }
}

impl<V: Signal> Default for SkidBuffer<V> {
    fn default() -> Self { Self::new() }
}

impl<V: Signal> Module for SkidBuffer<V> {
    type I = VrChannel<V>;
    type O = VrChannel<V>;

    fn eval(&self, i_fwd: &Valid<V>, o_bwd: &Ready) -> (Valid<V>, Ready) { self.inner.eval(i_fwd, o_bwd) }

    fn commit(&mut self, i_fwd: &Valid<V>, o_bwd: &Ready) { self.inner.commit(i_fwd, o_bwd) }

    fn clear(&mut self) { self.inner.clear() }

    fn step(&mut self, i_fwd: &Valid<V>, o_bwd: &Ready) -> (Valid<V>, Ready) { self.inner.step(i_fwd, o_bwd) }
}

impl<V: Signal> Committed for SkidState<V> {}

impl<V: Signal> RegisteredEgress for SkidBuffer<V> {
    fn egress_fwd(&self) -> Registered<Valid<V>> { Registered::from_state(self.state(), egress::<V>) }
}

impl<V: Signal> RegisteredIngress for SkidBuffer<V> {
    fn ingress_bwd(&self) -> Registered<Ready> { Registered::from_state(self.state(), ingress::<V>) }
}
