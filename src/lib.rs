use serde::Deserialize;
use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

pub mod beamline;
pub mod error;
pub mod init;
pub mod madx;
pub mod maps;
pub mod phase_space;
pub mod save;

pub use beamline::{Beamline, Element};
pub use error::TrackingError;
pub use maps::BendReduction;
pub use phase_space::{Buffers, PhaseSpace};

// The maps reproduce a double precision reference code, so unlike the
// rest of the ecosystem there is no single precision switch here.
pub type Float = f64;

/// Minimum number of particles a rayon task works on.
pub const ROW_CHUNK_SIZE: usize = 1024;

#[derive(Deserialize)]
pub struct Config {
    pub beam: BeamParams,
    #[serde(default)]
    pub tracking: Tracking,
    pub output: Output,
    pub beamline: Vec<Element>,
}

#[derive(Deserialize)]
pub struct BeamParams {
    pub particles: usize,
    /// Relativistic beta of the reference particle.
    pub beta: Float,
    pub seed: u64,
    #[serde(default)]
    pub time_of_flight: bool,
    /// Standard deviation of `[x, px, y, py, delta, ct]`.
    pub sigma: [Float; 6],
    #[serde(default)]
    pub mean: [Float; 6],
}

#[derive(Deserialize, Default)]
pub struct Tracking {
    #[serde(default)]
    pub bend_reduction: BendReduction,
}

#[derive(Deserialize)]
pub struct Output {
    pub write_output: bool,
    pub output_dir: String,
    pub stride: usize,
}

impl Config {
    pub fn new() -> Result<Config> {
        let contents =
            fs::read_to_string("config.toml").context("Could not open the config.toml file")?;
        Config::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Config> {
        let cfg: Config = toml::from_str(contents).with_context(|| "Could not parse Config file")?;
        if cfg.beam.beta <= 0.0 || cfg.beam.beta > 1.0 {
            return Err(anyhow::Error::msg("beam.beta must be in (0, 1]"));
        }
        if cfg.output.stride == 0 {
            return Err(anyhow::Error::msg("output.stride must be at least 1"));
        }
        Ok(cfg)
    }
}

/// Generate the beam, track it through the beamline once and optionally
/// save the result. Returns the tracked beam.
pub fn run(cfg: &Config) -> Result<PhaseSpace> {
    info!(
        particles = cfg.beam.particles,
        elements = cfg.beamline.len(),
        "initializing beam"
    );
    let mut beam = init::gaussian_beam(&cfg.beam).context("Could not build initial beam")?;

    let beamline =
        Beamline::new(cfg.beamline.clone()).with_reduction(cfg.tracking.bend_reduction);
    let global_parameters = [cfg.beam.beta];

    info!(length = beamline.length(), "tracking");
    beamline
        .track(&mut beam, &global_parameters)
        .context("Tracking through the beamline failed")?;

    let lost = beam.count_non_finite();
    if lost > 0 {
        warn!(lost, "particles with non-finite coordinates after tracking");
    }

    if cfg.output.write_output {
        info!(dir = %cfg.output.output_dir, "saving phase space");
        save::save_phase_space(&beam, &cfg.output.output_dir, cfg.output.stride)?;
    }

    Ok(beam)
}
