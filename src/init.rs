use crate::{
    error::TrackingError,
    phase_space::{PhaseSpace, CT, MAX_COLUMNS, MIN_COLUMNS},
    BeamParams, Float,
};
use itertools::izip;
use rand::prelude::*;
use rand_distr::StandardNormal;

/// Uncorrelated Gaussian beam, reproducible from `params.seed`.
///
/// Every row is `mean + sigma * N(0, 1)` column by column. The time of
/// flight column, when requested, starts at zero.
pub fn gaussian_beam(params: &BeamParams) -> Result<PhaseSpace, TrackingError> {
    let cols = if params.time_of_flight {
        MAX_COLUMNS
    } else {
        MIN_COLUMNS
    };
    let mut beam = PhaseSpace::zeros(params.particles, cols)?;
    let mut rng = StdRng::seed_from_u64(params.seed);

    for row in beam.as_mut_slice().chunks_mut(cols) {
        for (v, sigma, mean) in izip!(&mut row[..=CT], &params.sigma, &params.mean) {
            let r: Float = rng.sample(StandardNormal);
            *v = mean + sigma * r;
        }
    }
    Ok(beam)
}
