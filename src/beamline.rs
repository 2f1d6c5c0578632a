use crate::{
    error::TrackingError,
    maps::{track_bend_with, track_dipedge, track_drift, track_quadrupole, BendReduction},
    phase_space::{Buffers, PhaseSpace},
    Float,
};
use serde::Deserialize;
use tracing::debug;

/// A beamline element as written in `config.toml`.
///
/// ```toml
/// [[beamline]]
/// type = "quadrupole"
/// length = 0.5
/// k1 = 1.2
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Drift {
        length: Float,
    },
    Quadrupole {
        length: Float,
        k1: Float,
        #[serde(default)]
        tilt: Float,
    },
    Bend {
        length: Float,
        angle: Float,
        #[serde(default)]
        k1: Float,
        #[serde(default)]
        k2: Float,
        #[serde(default)]
        tilt: Float,
        /// Reference curvature, `angle / length` when left out.
        h: Option<Float>,
        /// Dipole strength, `h` when left out.
        k0: Option<Float>,
        #[serde(default)]
        entrance_fringe_x: Float,
        #[serde(default)]
        entrance_fringe_y: Float,
        #[serde(default)]
        exit_fringe_x: Float,
        #[serde(default)]
        exit_fringe_y: Float,
    },
    DipEdge {
        fringe_x: Float,
        fringe_y: Float,
    },
}

impl Element {
    pub fn name(&self) -> &'static str {
        match self {
            Element::Drift { .. } => "drift",
            Element::Quadrupole { .. } => "quadrupole",
            Element::Bend { .. } => "bend",
            Element::DipEdge { .. } => "dipedge",
        }
    }

    /// The positional parameter vector the element's kernel expects.
    pub fn parameters(&self) -> Vec<Float> {
        match *self {
            Element::Drift { length } => vec![length],
            Element::Quadrupole { length, k1, tilt } => vec![length, k1, tilt],
            Element::Bend {
                length,
                angle,
                k1,
                k2,
                tilt,
                h,
                k0,
                entrance_fringe_x,
                entrance_fringe_y,
                exit_fringe_x,
                exit_fringe_y,
            } => {
                let h = h.unwrap_or(if length != 0.0 { angle / length } else { 0.0 });
                let k0 = k0.unwrap_or(h);
                vec![
                    length,
                    angle,
                    k1,
                    k2,
                    tilt,
                    h,
                    k0,
                    entrance_fringe_x,
                    entrance_fringe_y,
                    exit_fringe_x,
                    exit_fringe_y,
                ]
            }
            Element::DipEdge { fringe_x, fringe_y } => vec![fringe_x, fringe_y],
        }
    }

    pub fn track<'a>(
        &self,
        buffers: Buffers<'a>,
        global_parameters: &[Float],
        reduction: BendReduction,
    ) -> Result<Buffers<'a>, TrackingError> {
        let params = self.parameters();
        match self {
            Element::Drift { .. } => track_drift(buffers, &params, global_parameters),
            Element::Quadrupole { .. } => track_quadrupole(buffers, &params, global_parameters),
            Element::Bend { .. } => {
                track_bend_with(buffers, &params, global_parameters, reduction)
            }
            Element::DipEdge { .. } => track_dipedge(buffers, &params, global_parameters),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Beamline {
    pub elements: Vec<Element>,
    pub reduction: BendReduction,
}

impl Beamline {
    pub fn new(elements: Vec<Element>) -> Beamline {
        Beamline {
            elements,
            reduction: BendReduction::default(),
        }
    }

    pub fn with_reduction(mut self, reduction: BendReduction) -> Beamline {
        self.reduction = reduction;
        self
    }

    /// Track `beam` in place through every element, in order.
    pub fn track(
        &self,
        beam: &mut PhaseSpace,
        global_parameters: &[Float],
    ) -> Result<(), TrackingError> {
        for (i, element) in self.elements.iter().enumerate() {
            debug!(index = i, element = element.name(), "tracking element");
            element.track(Buffers::aliased(beam), global_parameters, self.reduction)?;
        }
        Ok(())
    }

    pub fn length(&self) -> Float {
        self.elements
            .iter()
            .map(|e| match *e {
                Element::Drift { length }
                | Element::Quadrupole { length, .. }
                | Element::Bend { length, .. } => length,
                Element::DipEdge { .. } => 0.0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const E_TOL: Float = 1E-14;

    #[derive(Deserialize)]
    struct Lattice {
        beamline: Vec<Element>,
    }

    #[test]
    fn parses_elements_from_toml() {
        let lattice: Lattice = toml::from_str(
            r#"
            [[beamline]]
            type = "drift"
            length = 1.0

            [[beamline]]
            type = "quadrupole"
            length = 0.5
            k1 = -1.2

            [[beamline]]
            type = "bend"
            length = 2.0
            angle = 0.1
            entrance_fringe_x = 0.01

            [[beamline]]
            type = "dipedge"
            fringe_x = 0.02
            fringe_y = -0.02
            "#,
        )
        .unwrap();
        assert_eq!(lattice.beamline.len(), 4);
        assert_eq!(lattice.beamline[0], Element::Drift { length: 1.0 });
        assert_eq!(lattice.beamline[1].parameters(), vec![0.5, -1.2, 0.0]);
        let bend = lattice.beamline[2].parameters();
        assert_eq!(bend.len(), 11);
        assert!((bend[5] - 0.05).abs() < E_TOL);
        assert_eq!(bend[5], bend[6]);
        assert_eq!(bend[7], 0.01);
        assert_eq!(lattice.beamline[3].parameters(), vec![0.02, -0.02]);
    }

    #[test]
    fn zero_length_bend_has_no_curvature() {
        let bend = Element::Bend {
            length: 0.0,
            angle: 0.1,
            k1: 0.0,
            k2: 0.0,
            tilt: 0.0,
            h: None,
            k0: None,
            entrance_fringe_x: 0.0,
            entrance_fringe_y: 0.0,
            exit_fringe_x: 0.0,
            exit_fringe_y: 0.0,
        };
        let p = bend.parameters();
        assert_eq!((p[5], p[6]), (0.0, 0.0));
    }

    #[test]
    fn fodo_cell_matches_element_by_element_tracking() {
        let cell = Beamline::new(vec![
            Element::Quadrupole {
                length: 0.3,
                k1: 1.1,
                tilt: 0.0,
            },
            Element::Drift { length: 2.0 },
            Element::Quadrupole {
                length: 0.3,
                k1: -1.1,
                tilt: 0.0,
            },
            Element::Drift { length: 2.0 },
        ]);
        assert!((cell.length() - 4.6).abs() < E_TOL);

        let rows = vec![vec![1E-3, 0.0, -1E-3, 1E-4, 0.0, 0.0]];
        let mut beam = PhaseSpace::from_rows(&rows).unwrap();
        cell.track(&mut beam, &[1.0]).unwrap();

        let mut manual = PhaseSpace::from_rows(&rows).unwrap();
        track_quadrupole(Buffers::aliased(&mut manual), &[0.3, 1.1, 0.0], &[1.0]).unwrap();
        track_drift(Buffers::aliased(&mut manual), &[2.0], &[1.0]).unwrap();
        track_quadrupole(Buffers::aliased(&mut manual), &[0.3, -1.1, 0.0], &[1.0]).unwrap();
        track_drift(Buffers::aliased(&mut manual), &[2.0], &[1.0]).unwrap();
        assert_eq!(beam, manual);
    }

    #[test]
    fn missing_beta_is_reported() {
        let line = Beamline::new(vec![Element::Drift { length: 1.0 }]);
        let mut beam = PhaseSpace::zeros(3, 6).unwrap();
        assert!(line.track(&mut beam, &[]).is_err());
    }
}
