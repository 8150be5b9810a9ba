//! Skid buffer, credit buffer and FIFO in series, under random-looking stalls.

use std::error::Error;

use elasticflow::*;
use elasticflow_std::sim::{Sim, Sink, Source};
use elasticflow_std::*;

const ITEMS: u32 = 1000;

pub fn run() -> Result<(), Box<dyn Error>> {
    let credit = CreditBuffer::new(CreditConfig { pipe_depth: 3, depth: 0 })?;
    tracing::info!(pipe_depth = credit.pipe_depth(), depth = credit.depth(), "credit buffer");

    let module = SkidBuffer::new().then(credit).then(Fifo::<u32>::with_capacity(8)?);
    let source = Source::new(0..ITEMS).with_pattern(|step| step % 7 != 3);
    let sink = Sink::new().with_pattern(|step| (step * 13) % 11 < 8);
    let mut sim = Sim::new(module, source, sink);

    let steps = sim.run_until_drained(10 * ITEMS as usize).ok_or("credit pipeline did not drain")?;
    if sim.received().iter().copied().ne(0..ITEMS) {
        return Err("credit pipeline reordered items".into());
    }
    tracing::info!(steps, items = ITEMS, rate = f64::from(ITEMS) / steps as f64, "credit pipeline drained");
    Ok(())
}
