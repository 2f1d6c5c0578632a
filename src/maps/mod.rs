//! Closed-form thick-element maps, one kernel per element type.
//!
//! Every kernel has the same shape: it takes the buffers, the element's
//! positional parameters and the global parameters (`[beta]`), checks
//! them, and writes every output row from the matching input row.
pub mod bend;
pub mod dipedge;
pub mod drift;
pub mod focusing;
pub mod quadrupole;
pub mod tilt;

pub use bend::{track_bend, track_bend_with, BendReduction};
pub use dipedge::track_dipedge;
pub use drift::track_drift;
pub use quadrupole::track_quadrupole;
pub use tilt::{Rotation, Tilt};
