use crate::{
    error::{expect_element_parameters, expect_global_parameters, TrackingError},
    phase_space::{Buffers, CT, DELTA, PX, PY, TOF, X, Y},
    Float,
};
use tracing::trace;

/// Exact field-free propagation (MAD-X `ttdrf`).
///
/// `element_parameters`: `[length]`, `global_parameters`: `[beta, ..]`.
///
/// Column 5 is used as `pt` in the longitudinal factor. With a 7th column
/// the time of flight is advanced as well. A particle whose radicand is not
/// positive comes out non-finite.
pub fn track_drift<'a>(
    mut buffers: Buffers<'a>,
    element_parameters: &[Float],
    global_parameters: &[Float],
) -> Result<Buffers<'a>, TrackingError> {
    expect_element_parameters("drift", element_parameters, 1)?;
    expect_global_parameters("drift", global_parameters, 1)?;
    buffers.check_shape()?;

    let length = element_parameters[0];
    let beta = global_parameters[0];
    let time_of_flight = buffers.time_of_flight();
    trace!(rows = buffers.rows(), length, beta, time_of_flight, "drift");

    buffers.for_each_row(|src, dst| {
        let px = src[PX];
        let py = src[PY];
        let pt = src[CT];

        let lpz = length / (1.0 + 2.0 * pt / beta + pt * pt - px * px - py * py).sqrt();

        dst[X] = src[X] + lpz * px;
        dst[PX] = px;
        dst[Y] = src[Y] + lpz * py;
        dst[PY] = py;
        dst[DELTA] = src[DELTA];
        dst[CT] = pt;
        if time_of_flight {
            dst[TOF] = src[TOF] + (length - (1.0 + beta * pt) * lpz) / beta;
        }
    });

    Ok(buffers)
}
