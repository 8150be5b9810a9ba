//! Conservation, order and no-loss properties of the buffers under random stalls.

use elasticflow::*;
use elasticflow_std::credit::min_depth;
use elasticflow_std::sim::{Monitor, Sim, Sink, Source};
use elasticflow_std::*;
use proptest::prelude::*;
use rstest::rstest;
use static_assertions::{assert_impl_all, assert_not_impl_any};

assert_impl_all!(SkidBuffer<u8>: RegisteredEgress, RegisteredIngress);
assert_impl_all!(Fifo<u8>: RegisteredEgress, RegisteredIngress);
assert_impl_all!(CircularFifo<u8>: RegisteredEgress, RegisteredIngress);
assert_impl_all!(CreditBuffer<u8>: RegisteredEgress, RegisteredIngress);
assert_impl_all!(StallSmoother<u8>: RegisteredEgress, RegisteredIngress);
assert_not_impl_any!(Delay<u8>: RegisteredEgress);
assert_impl_all!(Fifo<u8>: Committed);
assert_impl_all!(CreditBuffer<u8>: Committed);
assert_not_impl_any!(Valid<u8>: Committed);
assert_not_impl_any!(Ready: Committed);
assert_not_impl_any!(Selector<2>: Committed);
assert_not_impl_any!(FifoState<u8>: Committed);

/// Repeating pattern with at least one set step.
fn pattern() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..12).prop_map(|mut steps| {
        steps.push(true);
        steps
    })
}

fn source(items: &[u32], offer: Vec<bool>) -> Source<u32> {
    Source::new(items.iter().copied()).with_pattern(move |step| offer[step % offer.len()])
}

fn sink(accept: Vec<bool>) -> Sink<u32> { Sink::new().with_pattern(move |step| accept[step % accept.len()]) }

proptest! {
    #[test]
    fn skid_buffer_conserves_items(
        items in prop::collection::vec(any::<u32>(), 0..64), offer in pattern(), accept in pattern(),
    ) {
        let mut sim = Sim::new(SkidBuffer::new(), source(&items, offer), sink(accept));
        while sim.run_until_drained(1).is_none() {
            prop_assert_eq!(sim.ingress().transfers() - sim.egress().transfers(), sim.module().len());
            prop_assert!(sim.steps() < 10_000);
        }
        prop_assert_eq!(sim.received(), items.as_slice());
    }

    #[test]
    fn fifo_preserves_order(
        capacity in 1usize..8, items in prop::collection::vec(any::<u32>(), 0..64), offer in pattern(),
        accept in pattern(),
    ) {
        let mut sim = Sim::new(Fifo::<u32>::with_capacity(capacity).unwrap(), source(&items, offer), sink(accept));
        while sim.run_until_drained(1).is_none() {
            let len = sim.module().len();
            prop_assert_eq!(sim.ingress().transfers() - sim.egress().transfers(), len);
            prop_assert!(len <= capacity);
            prop_assert!(sim.steps() < 10_000);
        }
        prop_assert_eq!(sim.received(), items.as_slice());
    }

    #[test]
    fn credit_buffer_never_loses_items(
        pipe_depth in 0usize..4, slack in 0usize..3, items in prop::collection::vec(any::<u32>(), 0..64),
        offer in pattern(), accept in pattern(),
    ) {
        let config = CreditConfig { pipe_depth, depth: min_depth(pipe_depth) + slack };
        let mut sim = Sim::new(CreditBuffer::new(config).unwrap(), source(&items, offer), sink(accept));
        prop_assert!(sim.run_until_drained(10_000).is_some());
        prop_assert_eq!(sim.received(), items.as_slice());

        // Returning credits need `pipe_depth` more steps.
        sim.run(pipe_depth + 1);
        prop_assert_eq!(sim.module().credits(), sim.module().depth());
        prop_assert!(!sim.module().credit_saturated());
    }

    #[test]
    fn credit_buffer_conserves_credits(
        pipe_depth in 0usize..4, slack in 0usize..3, items in prop::collection::vec(any::<u32>(), 0..64),
        offer in pattern(), accept in pattern(),
    ) {
        let config = CreditConfig { pipe_depth, depth: min_depth(pipe_depth) + slack };
        let mut sim = Sim::new(CreditBuffer::new(config).unwrap(), source(&items, offer), sink(accept));
        while sim.run_until_drained(1).is_none() {
            let buf = sim.module();
            prop_assert_eq!(sim.ingress().transfers() - sim.egress().transfers(), buf.in_flight() + buf.len());
            prop_assert_eq!(buf.credits() + buf.in_flight() + buf.len() + buf.credits_in_flight(), buf.depth());
            prop_assert!(!buf.credit_saturated());
            prop_assert!(sim.steps() < 10_000);
        }
        prop_assert_eq!(sim.received(), items.as_slice());
    }

    #[test]
    fn circular_fifo_keeps_newest_items(
        capacity in 1usize..6, len in 0u32..64, offer in pattern(), accept in pattern(),
    ) {
        let items = (0..len).collect::<Vec<_>>();
        let fifo = CircularFifo::<u32>::with_capacity(capacity).unwrap();
        let mut sim = Sim::new(fifo, source(&items, offer), sink(accept)).with_relaxed_egress();
        while !(sim.source().is_empty() && sim.module().is_empty()) {
            let _ = sim.step();
            let sent = sim.source().sent();
            let next_unreceived = sim.received().last().map_or(0, |last| *last as usize + 1);
            let expected = &items[sent - capacity.min(sent - next_unreceived)..sent];
            prop_assert_eq!(sim.module().items().copied().collect::<Vec<_>>(), expected);
            prop_assert!(sim.steps() < 10_000);
        }
        prop_assert!(sim.received().windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(sim.received().last(), items.last());
    }

    #[test]
    fn stall_smoother_preserves_order(
        depth in 1usize..6, threshold in 1usize..6, items in prop::collection::vec(any::<u32>(), 0..64),
        offer in pattern(), accept in pattern(), trigger in prop::collection::vec(any::<bool>(), 1..12),
    ) {
        let threshold = threshold.min(depth);
        let mut smoother = StallSmoother::new(StallSmootherConfig { depth, threshold }).unwrap();
        let mut source = source(&items, offer);
        let mut sink = sink(accept);
        let mut ingress = Monitor::new("ingress");
        let mut egress = Monitor::new("egress");

        let mut step = 0;
        while !(source.is_empty() && smoother.is_empty()) {
            // An idle source raises the trigger so a short tail still leaves.
            let triggered = trigger[step % trigger.len()] || source.is_empty();
            let buffering = smoother.mode() == SmootherMode::Buffering;
            let i_fwd = source.fwd();
            let o_bwd = sink.bwd();
            let (o_fwd, (i_bwd, ())) = smoother.step(&(i_fwd.clone(), triggered), &o_bwd);
            prop_assert!(!(buffering && o_fwd.valid));

            ingress.observe(&i_fwd, &i_bwd);
            egress.observe(&o_fwd, &o_bwd);
            source.update(&i_bwd);
            sink.update(&o_fwd);
            step += 1;

            prop_assert_eq!(ingress.transfers() - egress.transfers(), smoother.len());
            prop_assert!(smoother.len() <= depth);
            prop_assert!(step < 10_000);
        }
        prop_assert_eq!(sink.received(), items.as_slice());
    }

    #[test]
    fn chained_buffers_preserve_order(
        items in prop::collection::vec(any::<u32>(), 0..64), offer in pattern(), accept in pattern(),
    ) {
        let module = SkidBuffer::new()
            .then(CreditBuffer::new(CreditConfig::default()).unwrap())
            .then(Fifo::<u32>::with_capacity(3).unwrap());
        let mut sim = Sim::new(module, source(&items, offer), sink(accept));
        prop_assert!(sim.run_until_drained(10_000).is_some());
        prop_assert_eq!(sim.received(), items.as_slice());
    }
}

#[rstest]
fn skid_buffer_backpressure(#[values(0, 1, 2, 5)] stall: usize) {
    let items = (0..10).collect::<Vec<u32>>();
    let mut sim = Sim::new(
        SkidBuffer::new(),
        Source::new(items.iter().copied()),
        Sink::new().with_pattern(move |step| step >= stall),
    );
    sim.run(stall);
    assert_eq!(sim.ingress().transfers(), stall.min(2));
    assert!(sim.run_until_drained(100).is_some());
    assert_eq!(sim.received(), items.as_slice());
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(7)]
fn fifo_capacity_boundary(#[case] capacity: usize) {
    let fifo = Fifo::<u32>::with_capacity(capacity).unwrap();
    let mut sim = Sim::new(fifo, Source::new(0..20), Sink::new().with_pattern(|_| false));
    sim.run(capacity);
    assert!(sim.module().is_full());
    let (fwd, bwd, _, _) = sim.step();
    assert!(fwd.valid);
    assert!(!bwd.ready);
    assert_eq!(sim.ingress().transfers(), capacity);
}
