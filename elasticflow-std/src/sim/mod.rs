//! Step-driven testbench for valid-ready units.
//!
//! A [`Sim`] connects a [`Source`] and a [`Sink`] to a module with one valid-ready channel on each side. Every step the
//! source and the sink present values computed from their committed state, the module is evaluated and committed, and
//! both ends then record what transferred. A [`Monitor`] on each channel checks the handshake contract, and the
//! transfers the source and the sink recorded must match the monitors' counts.

mod monitor;
mod sink;
mod source;

pub use monitor::Monitor;
pub use sink::Sink;
pub use source::{Pattern, Source};

use crate::*;

/// Testbench around `module`.
#[derive(Debug)]
pub struct Sim<V: Signal + PartialEq, W: Signal + PartialEq, M: Module<I = VrChannel<V>, O = VrChannel<W>>> {
    module: M,
    source: Source<V>,
    sink: Sink<W>,
    ingress: Monitor<V>,
    egress: Monitor<W>,
    step: usize,
}

impl<V, W, M> Sim<V, W, M>
where
    V: Signal + PartialEq,
    W: Signal + PartialEq,
    M: Module<I = VrChannel<V>, O = VrChannel<W>>,
{
    /// Creates a testbench with strict monitors on both channels.
    pub fn new(module: M, source: Source<V>, sink: Sink<W>) -> Self {
        Self { module, source, sink, ingress: Monitor::new("ingress"), egress: Monitor::new("egress"), step: 0 }
    }

    /// Replaces the egress monitor with one that only counts transfers, for modules that may replace a pending offer.
    #[must_use]
    pub fn with_relaxed_egress(self) -> Self { Self { egress: Monitor::relaxed("egress"), ..self } }

    /// Module under test.
    pub fn module(&self) -> &M { &self.module }

    /// Producer.
    pub fn source(&self) -> &Source<V> { &self.source }

    /// Mutable producer, e.g. to queue more items.
    pub fn source_mut(&mut self) -> &mut Source<V> { &mut self.source }

    /// Consumer.
    pub fn sink(&self) -> &Sink<W> { &self.sink }

    /// Ingress monitor.
    pub fn ingress(&self) -> &Monitor<V> { &self.ingress }

    /// Egress monitor.
    pub fn egress(&self) -> &Monitor<W> { &self.egress }

    /// Steps run so far, clears included.
    pub fn steps(&self) -> usize { self.step }

    /// Items received by the sink.
    pub fn received(&self) -> &[W] { self.sink.received() }

    /// Runs one step and returns the values on both channels.
    pub fn step(&mut self) -> (Valid<V>, Ready, Valid<W>, Ready) {
        let i_fwd = self.source.fwd();
        let o_bwd = self.sink.bwd();
        let (o_fwd, i_bwd) = self.module.step(&i_fwd, &o_bwd);

        self.ingress.observe(&i_fwd, &i_bwd);
        self.egress.observe(&o_fwd, &o_bwd);
        self.source.update(&i_bwd);
        self.sink.update(&o_fwd);
        self.step += 1;

        debug_assert_eq!(self.source.sent(), self.ingress.transfers(), "source and ingress monitor disagree");
        debug_assert_eq!(self.sink.received().len(), self.egress.transfers(), "sink and egress monitor disagree");

        (i_fwd, i_bwd, o_fwd, o_bwd)
    }

    /// Runs `steps` steps.
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            let _ = self.step();
        }
    }

    /// Runs until every sourced item reached the sink, for at most `max_steps` steps. Returns the number of steps run,
    /// or `None` if the limit was hit.
    pub fn run_until_drained(&mut self, max_steps: usize) -> Option<usize> {
        let start = self.step;
        while !self.is_drained() {
            if self.step - start == max_steps {
                tracing::debug!(max_steps, pending = self.source.len(), "testbench did not drain");
                return None;
            }
            let _ = self.step();
        }
        Some(self.step - start)
    }

    /// Asserts the module's clear for one step. The source and the sink keep their state.
    pub fn clear(&mut self) {
        self.module.clear();
        self.step += 1;
    }

    fn is_drained(&self) -> bool { self.source.is_empty() && self.egress.transfers() == self.ingress.transfers() }
}
