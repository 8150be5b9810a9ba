//! Forking a stream three ways and joining it back.

use std::error::Error;

use elasticflow::*;
use elasticflow_std::sim::{Sim, Sink, Source};
use elasticflow_std::*;

pub fn run() -> Result<(), Box<dyn Error>> {
    let items = (0..100u16).collect::<Vec<_>>();

    let module = BlockingFork::<u16, 3>::new().then(Join::new());
    let sink = Sink::new().with_pattern(|step| step % 3 != 0);
    let mut sim = Sim::new(module, Source::new(items.iter().copied()), sink);
    let steps = sim.run_until_drained(1000).ok_or("blocking fork did not drain")?;
    if !sim.received().iter().zip(&items).all(|(joined, item)| joined.iter().all(|e| e == item)) {
        return Err("join misaligned the forked streams".into());
    }
    tracing::info!(steps, "blocking fork into join");

    // The eager fork has no registered egress, so the join's registered ingress drives it.
    let mut fork = EagerFork::<u16, 3>::new();
    let mut join = Join::<u16, 3>::new();
    let mut source = Source::new(items.iter().copied());
    let mut joined = 0;
    let mut steps = 0;
    while joined < items.len() {
        let (fork_out, fork_ready) = fork.step(&source.fwd(), &join.ingress_bwd().into_inner());
        let sink_ready = Ready::new(steps % 4 != 0);
        let (join_out, _) = join.step(&fork_out, &sink_ready);
        source.update(&fork_ready);
        if join_out.fire(&sink_ready) {
            joined += 1;
        }
        steps += 1;
        if steps > 1000 {
            return Err("eager fork stalled".into());
        }
    }
    tracing::info!(steps, "eager fork into join");
    Ok(())
}
