use crate::Float;

/// Principal trajectories `(C, S)` of `u'' = -k u` over `length`.
///
/// k > 0 focusing, circular functions
/// k < 0 defocusing, hyperbolic functions
/// k == 0 field free, `C = 1`, `S = length`
///
/// The transfer matrix of the plane is then
/// ```text
/// | C      S |
/// | -k*S   C |
/// ```
/// whose determinant `C^2 + k S^2` is 1 on every branch.
#[inline(always)]
pub fn principal(k: Float, length: Float) -> (Float, Float) {
    if k > 0.0 {
        let sqrt_k = k.sqrt();
        let kl = sqrt_k * length;
        (kl.cos(), kl.sin() / sqrt_k)
    } else if k < 0.0 {
        let sqrt_k = (-k).sqrt();
        let kl = sqrt_k * length;
        (kl.cosh(), kl.sinh() / sqrt_k)
    } else {
        (1.0, length)
    }
}

/// Apply the 2x2 plane matrix to normalised coordinates `(u, u')`.
#[inline(always)]
pub fn transfer(c: Float, s: Float, k: Float, u: Float, up: Float) -> (Float, Float) {
    (c * u + s * up, -k * s * u + c * up)
}
