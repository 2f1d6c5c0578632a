use crate::{
    error::{expect_element_parameters, TrackingError},
    maps::{
        drift::track_drift,
        focusing::{principal, transfer},
        tilt::{Rotation, Tilt},
    },
    phase_space::{pass_through, Buffers, DELTA, PX, PY, X, Y},
    Float,
};
use tracing::{debug, trace};

/// Thick quadrupole (MAD-X `ttcfd` without the dipole terms).
///
/// `element_parameters`: `[length, k1, tilt]`.
///
/// The Hamiltonian is `H = k1 x^2 / 2 + px^2 / (2 (1 + delta))`, so the
/// strength each particle sees is `k1 / (1 + delta)`. The horizontal plane
/// focuses when that is positive and the vertical plane always gets the
/// opposite sign. A zero `k1` is tracked as a drift of the same length.
pub fn track_quadrupole<'a>(
    mut buffers: Buffers<'a>,
    element_parameters: &[Float],
    global_parameters: &[Float],
) -> Result<Buffers<'a>, TrackingError> {
    expect_element_parameters("quadrupole", element_parameters, 3)?;
    let length = element_parameters[0];
    let k1 = element_parameters[1];
    let tilt = Tilt::new(element_parameters[2]);

    if k1 == 0.0 {
        debug!(length, "quadrupole with k1 = 0 tracked as drift");
        return track_drift(buffers, &element_parameters[..1], global_parameters);
    }

    buffers.check_shape()?;
    trace!(rows = buffers.rows(), length, k1, ?tilt, "quadrupole");

    buffers.for_each_row(|src, dst| {
        let delta_plus_1 = src[DELTA] + 1.0;
        let mut x = src[X];
        let mut xp = src[PX] / delta_plus_1;
        let mut y = src[Y];
        let mut yp = src[PY] / delta_plus_1;

        if let Some(t) = &tilt {
            let r = t.rotate(x, xp, y, yp, Rotation::Forward);
            x = r.0;
            xp = r.1;
            y = r.2;
            yp = r.3;
        }

        let kx = k1 / delta_plus_1;
        let ky = -kx;
        let (cx, sx) = principal(kx, length);
        let (cy, sy) = principal(ky, length);

        let (x_, xp_) = transfer(cx, sx, kx, x, xp);
        let (y_, yp_) = transfer(cy, sy, ky, y, yp);
        let mut out = (x_, xp_ * delta_plus_1, y_, yp_ * delta_plus_1);

        if let Some(t) = &tilt {
            out = t.rotate(out.0, out.1, out.2, out.3, Rotation::Backward);
        }

        dst[X] = out.0;
        dst[PX] = out.1;
        dst[Y] = out.2;
        dst[PY] = out.3;
        pass_through(src, dst, DELTA);
    });

    Ok(buffers)
}
