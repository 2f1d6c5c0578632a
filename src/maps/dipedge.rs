use crate::{
    error::{expect_element_parameters, TrackingError},
    phase_space::{pass_through, Buffers, DELTA, PX, PY, X, Y},
    Float,
};
use tracing::trace;

/// Thin dipole edge: a linear fringe-field kick with no propagation.
///
/// `element_parameters`: `[fringe_x, fringe_y]`.
pub fn track_dipedge<'a>(
    mut buffers: Buffers<'a>,
    element_parameters: &[Float],
    _global_parameters: &[Float],
) -> Result<Buffers<'a>, TrackingError> {
    expect_element_parameters("dipedge", element_parameters, 2)?;
    buffers.check_shape()?;
    let fringe_x = element_parameters[0];
    let fringe_y = element_parameters[1];
    trace!(rows = buffers.rows(), fringe_x, fringe_y, "dipedge");

    buffers.for_each_row(|src, dst| {
        let x = src[X];
        let y = src[Y];
        dst[X] = x;
        dst[PX] = src[PX] + fringe_x * x;
        dst[Y] = y;
        dst[PY] = src[PY] + fringe_y * y;
        pass_through(src, dst, DELTA);
    });

    Ok(buffers)
}
