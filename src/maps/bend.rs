use crate::{
    error::{expect_element_parameters, TrackingError},
    maps::{
        focusing::principal,
        quadrupole::track_quadrupole,
        tilt::{Rotation, Tilt},
    },
    phase_space::{pass_through, Buffers, DELTA, PX, PY, X, Y},
    Float,
};
use serde::Deserialize;
use tracing::{debug, trace};

pub const BEND_PARAMETERS: usize = 11;

/// How a bend with zero angle is handed to the quadrupole kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BendReduction {
    /// `[length, k1, tilt]`: the bend's tilt is kept.
    Corrected,
    /// Same numbers as MAD-X based reference codes, which hand the
    /// quadrupole `[length, k1, 0.0, tilt]` and so lose the tilt.
    Reference,
}

impl Default for BendReduction {
    fn default() -> Self {
        BendReduction::Corrected
    }
}

/// Thick combined-function bend (MAD-X `ttcfd`), using the corrected
/// zero-angle reduction.
///
/// `element_parameters`:
/// `[length, angle, k1, k2, tilt, h, k0, e1_x, e1_y, e2_x, e2_y]`
/// where `k2` is reserved and ignored, `h` is the reference curvature, `k0`
/// the dipole strength and `e1_*`, `e2_*` the entrance and exit fringe
/// kicks per unit displacement.
pub fn track_bend<'a>(
    buffers: Buffers<'a>,
    element_parameters: &[Float],
    global_parameters: &[Float],
) -> Result<Buffers<'a>, TrackingError> {
    track_bend_with(
        buffers,
        element_parameters,
        global_parameters,
        BendReduction::Corrected,
    )
}

pub fn track_bend_with<'a>(
    mut buffers: Buffers<'a>,
    element_parameters: &[Float],
    global_parameters: &[Float],
    reduction: BendReduction,
) -> Result<Buffers<'a>, TrackingError> {
    expect_element_parameters("bend", element_parameters, BEND_PARAMETERS)?;
    let length = element_parameters[0];
    let angle = element_parameters[1];
    let k1 = element_parameters[2];
    let tilt_angle = element_parameters[4];
    let h = element_parameters[5];
    let k0 = element_parameters[6];
    let entrance_fringe_x = element_parameters[7];
    let entrance_fringe_y = element_parameters[8];
    let exit_fringe_x = element_parameters[9];
    let exit_fringe_y = element_parameters[10];

    if angle == 0.0 {
        let reduced = match reduction {
            BendReduction::Corrected => [length, k1, tilt_angle],
            BendReduction::Reference => [length, k1, 0.0],
        };
        debug!(length, k1, ?reduction, "bend with zero angle tracked as quadrupole");
        return track_quadrupole(buffers, &reduced, global_parameters);
    }

    let tilt = Tilt::new(tilt_angle);
    buffers.check_shape()?;
    trace!(rows = buffers.rows(), length, angle, k1, h, k0, ?tilt, "bend");

    buffers.for_each_row(|src, dst| {
        let delta_plus_1 = src[DELTA] + 1.0;
        let mut x = src[X];
        let mut xp = src[PX];
        let mut y = src[Y];
        let mut yp = src[PY];

        if let Some(t) = &tilt {
            let r = t.rotate(x, xp, y, yp, Rotation::Forward);
            x = r.0;
            xp = r.1;
            y = r.2;
            yp = r.3;
        }

        // entrance fringe field, on the canonical momenta
        xp += entrance_fringe_x * x;
        yp += entrance_fringe_y * y;

        // body
        let k0_ = k0 / delta_plus_1;
        let k1_ = k1 / delta_plus_1;
        let kx = k0_ * h + k1_;
        let ky = -k1_;
        let (cx, sx) = principal(kx, length);
        let (cy, sy) = principal(ky, length);

        xp /= delta_plus_1;
        yp /= delta_plus_1;

        let mut x_ = cx * x + sx * xp;
        let mut xp_ = ((-kx * x - k0_ + h) * sx + cx * xp) * delta_plus_1;
        let y_ = cy * y + sy * yp;
        let mut yp_ = (-ky * sy * y + cy * yp) * delta_plus_1;

        // dispersion from the mismatch between dipole field and curvature
        if kx != 0.0 {
            x_ += (k0_ - h) * (cx - 1.0) / kx;
        } else {
            x_ -= (k0_ - h) * 0.5 * length * length;
        }

        // exit fringe field, on the tracked positions
        xp_ += exit_fringe_x * x_;
        yp_ += exit_fringe_y * y_;

        let mut out = (x_, xp_, y_, yp_);
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
