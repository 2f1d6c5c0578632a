use anyhow::Result;
use madx_track::{run, Config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = Config::new()?;
    let beam = run(&cfg)?;
    tracing::info!(
        particles = beam.rows(),
        lost = beam.count_non_finite(),
        "done"
    );
    Ok(())
}
