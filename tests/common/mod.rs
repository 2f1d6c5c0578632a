#![allow(dead_code)]
use madx_track::{
    maps::{track_bend, track_dipedge, track_drift, track_quadrupole, Rotation, Tilt},
    Buffers, Float, PhaseSpace, TrackingError,
};

pub const E_TOL: Float = 1E-12;

pub type Kernel =
    for<'a> fn(Buffers<'a>, &[Float], &[Float]) -> Result<Buffers<'a>, TrackingError>;

pub const BETA: [Float; 1] = [0.9];

pub fn sample_beam(rows: usize, cols: usize) -> PhaseSpace {
    // This is a function that sets up a small, deterministic but
    // irregular ensemble so that it can be used in testing
    let mut data = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        let t = i as Float;
        data.push(1E-3 * (0.7 * t).sin());
        data.push(1E-4 * (1.3 * t + 0.2).cos());
        data.push(-2E-3 * (0.3 * t + 1.0).sin());
        data.push(2E-4 * (2.1 * t).sin());
        data.push(1E-3 * (0.9 * t).cos());
        data.push(1E-2 * (0.5 * t).sin());
        if cols == 7 {
            data.push(0.1 * t);
        }
    }
    PhaseSpace::from_vec(cols, data).unwrap()
}

/// Track a copy of `beam` through `kernel` with split buffers.
pub fn track(kernel: Kernel, beam: &PhaseSpace, params: &[Float]) -> PhaseSpace {
    let mut output = PhaseSpace::zeros(beam.rows(), beam.cols()).unwrap();
    kernel(Buffers::split(beam, &mut output), params, &BETA).unwrap();
    output
}

/// Track `beam` through `kernel` in place.
pub fn track_aliased(kernel: Kernel, beam: &PhaseSpace, params: &[Float]) -> PhaseSpace {
    let mut out = beam.clone();
    kernel(Buffers::aliased(&mut out), params, &BETA).unwrap();
    out
}

pub fn rotate(beam: &PhaseSpace, angle: Float, rotation: Rotation) -> PhaseSpace {
    let mut out = beam.clone();
    if let Some(t) = Tilt::new(angle) {
        for i in 0..out.rows() {
            let row = out.row_mut(i);
            let (x, px, y, py) = t.rotate(row[0], row[1], row[2], row[3], rotation);
            row[0] = x;
            row[1] = px;
            row[2] = y;
            row[3] = py;
        }
    }
    out
}

pub fn assert_close(a: &PhaseSpace, b: &PhaseSpace, tol: Float) {
    assert_eq!(a.rows(), b.rows());
    assert_eq!(a.cols(), b.cols());
    for (i, (v1, v2)) in a.as_slice().iter().zip(b.as_slice()).enumerate() {
        assert!(
            (v1 - v2).abs() < tol,
            "row {} col {}: {} != {}",
            i / a.cols(),
            i % a.cols(),
            v1,
            v2
        );
    }
}

/// One representative parameter set per kernel.
pub fn kernels() -> Vec<(&'static str, Kernel, Vec<Float>)> {
    vec![
        ("drift", track_drift as Kernel, vec![1.7]),
        ("quadrupole", track_quadrupole as Kernel, vec![0.4, 1.3, 0.2]),
        (
            "bend",
            track_bend as Kernel,
            vec![1.5, 0.08, -0.1, 0.0, 0.15, 0.05, 0.055, 0.01, -0.01, 0.02, -0.02],
        ),
        ("dipedge", track_dipedge as Kernel, vec![0.03, -0.02]),
    ]
}

/// Bend parameter vector with everything else zero.
pub fn bend(
    length: Float,
    angle: Float,
    k1: Float,
    tilt: Float,
    h: Float,
    k0: Float,
) -> Vec<Float> {
    vec![length, angle, k1, 0.0, tilt, h, k0, 0.0, 0.0, 0.0, 0.0]
}
