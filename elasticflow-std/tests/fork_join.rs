//! Fork/join round trips.

use elasticflow::*;
use elasticflow_std::sim::{Sim, Sink, Source};
use elasticflow_std::*;
use proptest::prelude::*;
use static_assertions::{assert_impl_all, assert_not_impl_any};

assert_impl_all!(BlockingFork<u8, 3>: RegisteredEgress, RegisteredIngress);
assert_impl_all!(Join<u8, 3>: RegisteredEgress, RegisteredIngress);
assert_not_impl_any!(LazyFork<u8, 3>: RegisteredEgress, RegisteredIngress);
assert_not_impl_any!(EagerFork<u8, 3>: RegisteredEgress, RegisteredIngress);

proptest! {
    #[test]
    fn eager_fork_delivers_each_item_once_per_egress(
        items in prop::collection::vec(any::<u16>(), 0..32),
        accept in prop::collection::vec(prop::collection::vec(any::<bool>(), 1..8), 3),
    ) {
        let mut fork = EagerFork::<u16, 3>::new();
        let mut source = Source::new(items.iter().copied());
        let mut received = [Vec::new(), Vec::new(), Vec::new()];

        for step in 0..(items.len() + 1) * 64 {
            let o_bwd = Array::from_fn(|i| Ready::new(accept[i][step % accept[i].len()] || step % 8 == 7));
            let i_fwd = source.fwd();
            let (o_fwd, i_bwd) = fork.step(&i_fwd, &o_bwd);
            for (i, (fwd, bwd)) in o_fwd.iter().zip(o_bwd.iter()).enumerate() {
                if fwd.fire(bwd) {
                    received[i].push(fwd.inner);
                }
            }
            source.update(&i_bwd);
        }

        prop_assert!(source.is_empty());
        for stream in &received {
            prop_assert_eq!(stream, &items);
        }
    }

    #[test]
    fn blocking_fork_into_join_realigns(
        items in prop::collection::vec(any::<u16>(), 0..32), accept in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let module = BlockingFork::<u16, 3>::new().then(Join::new());
        let sink = Sink::new().with_pattern(move |step| accept[step % accept.len()] || step % 5 == 0);
        let mut sim = Sim::new(module, Source::new(items.iter().copied()), sink);
        prop_assert!(sim.run_until_drained(10_000).is_some());

        let expected = items.iter().map(|item| Array::<u16, 3>::repeat(*item)).collect::<Vec<_>>();
        prop_assert_eq!(sim.received(), expected.as_slice());
    }
}

#[test]
fn eager_fork_into_join_reassembles() {
    let items = [3u8, 1, 4, 1, 5];
    let mut fork = EagerFork::<u8, 3>::new();
    let mut join = Join::<u8, 3>::new();
    let mut source = Source::new(items);
    let mut out = Vec::new();

    for step in 0..40 {
        // The join's ingress is registered, so it can feed the fork's egress handshake first.
        let join_ready = join.ingress_bwd().into_inner();
        let (fork_out, fork_ready) = fork.step(&source.fwd(), &join_ready);
        let (join_out, _) = join.step(&fork_out, &Ready::new(step % 3 != 0));
        if join_out.fire(&Ready::new(step % 3 != 0)) {
            out.push(join_out.inner.into_inner());
        }
        source.update(&fork_ready);
    }

    assert_eq!(out, items.map(|item| [item; 3]).to_vec());
}

#[test]
fn lazy_fork_between_buffers() {
    let mut upstream = SkidBuffer::new();
    let mut fork = LazyFork::<u8, 2>::new();
    let mut downstream = Join::<u8, 2>::new();
    let mut source = Source::new(0..10u8);
    let mut out = Vec::new();

    for step in 0..60 {
        let up_fwd = upstream.egress_fwd().into_inner();
        let down_bwd = downstream.ingress_bwd().into_inner();
        let (fork_out, fork_ready) = fork.step(&up_fwd, &down_bwd);
        let sink_ready = Ready::new(step % 2 == 0);
        let (join_out, _) = downstream.step(&fork_out, &sink_ready);
        let (_, up_ready) = upstream.step(&source.fwd(), &fork_ready);
        source.update(&up_ready);
        if join_out.fire(&sink_ready) {
            out.push(join_out.inner[0]);
        }
    }

    assert_eq!(out, (0..10).collect::<Vec<_>>());
}
