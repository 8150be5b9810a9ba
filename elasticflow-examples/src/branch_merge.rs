//! Splitting a stream into two lanes by parity and merging it back in order.

use std::error::Error;

use elasticflow::*;
use elasticflow_std::sim::Source;
use elasticflow_std::*;

pub fn run() -> Result<(), Box<dyn Error>> {
    let branch = Branch::<u32, 2>::new(BranchConfig::default());
    let merge = Merge::<u32, 2>::new();
    let mut lanes = [Fifo::<u32>::with_capacity(2)?, Fifo::<u32>::with_capacity(4)?];
    let mut source = Source::new(0..64u32).with_pattern(|step| step % 5 != 0);
    let mut out = Vec::new();
    let mut next_lane = 0;

    for step in 0..512 {
        let i_fwd = source.fwd();
        let route = Selector::from(i_fwd.inner as usize % 2);
        let lane_ready = Array::from_fn(|i| lanes[i].ingress_bwd().into_inner());
        let (lane_in, ((), i_bwd)) = branch.eval(&(route, i_fwd), &lane_ready);

        let lane_out = Array::from_fn(|i| lanes[i].egress_fwd().into_inner());
        let o_bwd = Ready::new(step % 3 != 1);
        let (o_fwd, ((), lane_bwd)) = merge.eval(&(Selector::from(next_lane), lane_out), &o_bwd);

        for (i, lane) in lanes.iter_mut().enumerate() {
            lane.commit(&lane_in[i], &lane_bwd[i]);
        }
        source.update(&i_bwd);
        if o_fwd.fire(&o_bwd) {
            out.push(o_fwd.inner);
            next_lane = 1 - next_lane;
        }
    }

    if out.iter().copied().ne(0..64) {
        return Err(format!("branch/merge produced {out:?}").into());
    }
    tracing::info!(items = out.len(), "branch into merge");
    Ok(())
}
