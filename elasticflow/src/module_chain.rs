//! Series composition.

use crate::*;

/// Two modules in series: the egress of `front` feeds the ingress of `back`.
///
/// `front` must have a registered egress. Evaluation then needs no fixed point: `front`'s forward value is known
/// before `back` runs, and `back`'s backward value is known before `front` runs.
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    front: A,
    back: B,
}

impl<A, B> Chain<A, B> {
    /// Creates a chain.
    pub fn new(front: A, back: B) -> Self { Self { front, back } }

    /// Upstream module.
    pub fn front(&self) -> &A { &self.front }

    /// Downstream module.
    pub fn back(&self) -> &B { &self.back }

    /// Splits the chain.
    pub fn into_inner(self) -> (A, B) { (self.front, self.back) }
}

impl<A: RegisteredEgress, B: Module<I = A::O>> Module for Chain<A, B> {
    type I = A::I;
    type O = B::O;

    fn eval(&self, i_fwd: &Fwd<A::I>, o_bwd: &Bwd<B::O>) -> (Fwd<B::O>, Bwd<A::I>) {
        let m_fwd = self.front.egress_fwd().into_inner();
        let (o_fwd, m_bwd) = self.back.eval(&m_fwd, o_bwd);
        let (_, i_bwd) = self.front.eval(i_fwd, &m_bwd);
        (o_fwd, i_bwd)
    }

    fn commit(&mut self, i_fwd: &Fwd<A::I>, o_bwd: &Bwd<B::O>) {
        let m_fwd = self.front.egress_fwd().into_inner();
        let (_, m_bwd) = self.back.eval(&m_fwd, o_bwd);
        self.front.commit(i_fwd, &m_bwd);
        self.back.commit(&m_fwd, o_bwd);
    }

    fn clear(&mut self) {
        self.front.clear();
        self.back.clear();
    }
}

impl<A: RegisteredEgress, B: RegisteredEgress<I = A::O>> RegisteredEgress for Chain<A, B> {
    fn egress_fwd(&self) -> Registered<Fwd<B::O>> { self.back.egress_fwd() }
}

impl<A: RegisteredEgress + RegisteredIngress, B: Module<I = A::O>> RegisteredIngress for Chain<A, B> {
    fn ingress_bwd(&self) -> Registered<Bwd<A::I>> { self.front.ingress_bwd() }
}
