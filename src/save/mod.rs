use crate::{phase_space::PhaseSpace, Float};
use anyhow::{Context, Result};

pub const COLUMN_NAMES: [&str; 7] = ["x", "px", "y", "py", "delta", "ct", "tof"];

/// Write every `stride`-th particle to `outdir`, one `.npy` file per column.
pub fn save_phase_space(beam: &PhaseSpace, outdir: &str, stride: usize) -> Result<()> {
    let stride = stride.max(1);
    std::fs::create_dir_all(outdir).context("Unable to create output directory")?;

    for (col, name) in COLUMN_NAMES.iter().enumerate().take(beam.cols()) {
        let values: Vec<Float> = beam.column(col).step_by(stride).collect();
        npy::to_file(format!("{}/{}.npy", outdir, name), values)
            .with_context(|| format!("Could not save {} data to file", name))?;
    }

    Ok(())
}
