//! Finite state machine (Mealy machine).

use std::fmt;

use crate::*;

/// Pure logic of an FSM.
///
/// Takes the ingress forward value, the egress backward value, and the committed state; returns the egress forward
/// value, the ingress backward value, and the next state.
pub type Logic<I, O, S> = fn(&Fwd<I>, &Bwd<O>, &S) -> (Fwd<O>, Bwd<I>, S);

/// Finite state machine (Mealy machine).
///
/// The state is an explicit value and the logic a plain function, so the logic can be called on any state without
/// touching the machine.
pub struct Fsm<I: Interface, O: Interface, S: Signal> {
    /// Module name.
    module_name: &'static str,
    /// FSM function.
    logic: Logic<I, O, S>,
    /// Initial value of registers in the FSM.
    init: S,
    /// Committed value of registers in the FSM.
    state: S,
}

impl<I: Interface, O: Interface, S: Signal> Fsm<I, O, S> {
    /// Creates a new FSM.
    pub fn new(module_name: &'static str, init: S, logic: Logic<I, O, S>) -> Self {
        Self { module_name, logic, state: init.clone(), init }
    }

    /// Module name.
    pub fn module_name(&self) -> &'static str { self.module_name }

    /// The logic function.
    pub fn logic(&self) -> Logic<I, O, S> { self.logic }

    /// Power-on state.
    pub fn init(&self) -> &S { &self.init }

    /// Committed state.
    pub fn state(&self) -> &S { &self.state }

    /// Replaces the committed state, e.g. from a checkpoint.
    pub fn restore(&mut self, state: S) { self.state = state; }
}

impl<I: Interface, O: Interface, S: Signal> Clone for Fsm<I, O, S> {
    fn clone(&self) -> Self {
        Self { module_name: self.module_name, logic: self.logic, init: self.init.clone(), state: self.state.clone() }
    }
}

impl<I: Interface, O: Interface, S: Signal> fmt::Debug for Fsm<I, O, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm").field("module_name", &self.module_name).field("state", &self.state).finish()
    }
}

impl<I: Interface, O: Interface, S: Signal> Module for Fsm<I, O, S> {
    type I = I;
    type O = O;

    fn eval(&self, i_fwd: &Fwd<I>, o_bwd: &Bwd<O>) -> (Fwd<O>, Bwd<I>) {
        let (o_fwd, i_bwd, _) = (self.logic)(i_fwd, o_bwd, &self.state);
        (o_fwd, i_bwd)
    }

    fn commit(&mut self, i_fwd: &Fwd<I>, o_bwd: &Bwd<O>) {
        let (_, _, state_next) = (self.logic)(i_fwd, o_bwd, &self.state);
        self.state = state_next;
    }

    fn clear(&mut self) {
        tracing::trace!(module = self.module_name, "clear");
        self.state = self.init.clone();
    }

    fn step(&mut self, i_fwd: &Fwd<I>, o_bwd: &Bwd<O>) -> (Fwd<O>, Bwd<I>) {
        let (o_fwd, i_bwd, state_next) = (self.logic)(i_fwd, o_bwd, &self.state);
        self.state = state_next;
        (o_fwd, i_bwd)
    }
}
