mod branch_merge;
mod credit_pipeline;
mod fork_join;
mod stall_smoother;

use std::error::Error;

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    credit_pipeline::run()?;
    fork_join::run()?;
    branch_merge::run()?;
    stall_smoother::run()?;
    Ok(())
}
