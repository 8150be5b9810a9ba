//! Module.

use std::fmt;

use crate::*;

/// Synchronous unit with one ingress and one egress interface.
///
/// A step is split in two halves. [`Module::eval`] computes the current-step egress forward and ingress backward
/// values from committed state and current-step inputs, without mutating anything. [`Module::commit`] then advances
/// the state at the step boundary. Both halves must see the same inputs.
pub trait Module: fmt::Debug {
    /// Ingress interface.
    type I: Interface;

    /// Egress interface.
    type O: Interface;

    /// Computes the current-step outputs.
    fn eval(&self, i_fwd: &Fwd<Self::I>, o_bwd: &Bwd<Self::O>) -> (Fwd<Self::O>, Bwd<Self::I>);

    /// Commits the next state.
    fn commit(&mut self, i_fwd: &Fwd<Self::I>, o_bwd: &Bwd<Self::O>);

    /// Commits a step with the synchronous clear asserted.
    ///
    /// Transfers that already happened are not undone.
    fn clear(&mut self);

    /// Evaluates and commits one step.
    fn step(&mut self, i_fwd: &Fwd<Self::I>, o_bwd: &Bwd<Self::O>) -> (Fwd<Self::O>, Bwd<Self::I>) {
        let outputs = self.eval(i_fwd, o_bwd);
        self.commit(i_fwd, o_bwd);
        outputs
    }

    /// Chains `self` as input to `next`.
    fn then<M: Module<I = Self::O>>(self, next: M) -> Chain<Self, M>
    where Self: RegisteredEgress + Sized {
        Chain::new(self, next)
    }
}

/// Module whose egress forward value depends on committed state only.
pub trait RegisteredEgress: Module {
    /// Current-step egress forward value.
    fn egress_fwd(&self) -> Registered<Fwd<Self::O>>;
}

/// Module whose ingress backward value depends on committed state only.
pub trait RegisteredIngress: Module {
    /// Current-step ingress backward value.
    fn ingress_bwd(&self) -> Registered<Bwd<Self::I>>;
}
