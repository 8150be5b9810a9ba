//! Smoothing a bursty producer for a steady consumer.

use std::error::Error;

use elasticflow::*;
use elasticflow_std::sim::Source;
use elasticflow_std::*;

pub fn run() -> Result<(), Box<dyn Error>> {
    let config = StallSmootherConfig { depth: 8, threshold: 4 };
    let mut smoother = StallSmoother::new(config)?;
    // Bursts of four items, then a four-step stall.
    let mut source = Source::new(0..64u32).with_pattern(|step| step % 8 < 4);
    let mut first = None;
    let mut bubbles = 0;

    for step in 0..200 {
        let (o_fwd, (i_bwd, ())) = smoother.step(&(source.fwd(), false), &Ready::new(step % 2 == 0));
        source.update(&i_bwd);
        match (first, o_fwd.valid) {
            (None, true) => first = Some(step),
            (Some(_), false) if !source.is_empty() && step % 2 == 0 => bubbles += 1,
            _ => {}
        }
    }

    tracing::info!(first_output = ?first, bubbles, mode = ?smoother.mode(), "stall smoother");
    if bubbles != 0 {
        return Err(format!("stall smoother exposed {bubbles} bubbles").into());
    }
    Ok(())
}
