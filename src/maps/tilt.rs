use crate::Float;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Into the element's tilted frame.
    Forward,
    /// Back to the reference frame.
    Backward,
}

impl Rotation {
    #[inline(always)]
    fn sign(self) -> Float {
        match self {
            Rotation::Forward => 1.0,
            Rotation::Backward => -1.0,
        }
    }
}

/// Cosine and sine of an element tilt, computed once per tracking call and
/// shared by every row so all particles see the same rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub cos: Float,
    pub sin: Float,
}

impl Tilt {
    /// `None` for an untilted element, so the row loop can skip the
    /// rotations entirely.
    pub fn new(angle: Float) -> Option<Tilt> {
        if angle != 0.0 {
            Some(Tilt {
                cos: angle.cos(),
                sin: angle.sin(),
            })
        } else {
            None
        }
    }

    /// Rotate the position pair and the momentum pair about the
    /// longitudinal axis. Both outputs of a pair come from the
    /// un-rotated inputs.
    #[inline(always)]
    pub fn rotate(
        &self,
        x: Float,
        px: Float,
        y: Float,
        py: Float,
        rotation: Rotation,
    ) -> (Float, Float, Float, Float) {
        let st = rotation.sign() * self.sin;
        let ct = self.cos;
        let x_ = ct * x + st * y;
        let y_ = ct * y - st * x;
        let px_ = ct * px + st * py;
        let py_ = ct * py - st * px;
        (x_, px_, y_, py_)
    }
}
