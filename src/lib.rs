//! Keplerian orbit propagation.
//!
//! Given a set of [`OrbitalElements`], an [`Orbit`] produces the closed path
//! of the ellipse for display ([`Orbit::sample_path`]) and the position of
//! the orbiting body at any time ([`Orbit::position_at`]). Everything here is
//! a pure computation; the host owns the clock and whatever it draws.

pub mod elements;
pub mod error;
pub mod kepler;
pub mod math;
pub mod orbit;
pub mod perifocal;

pub use elements::{ElementUpdate, OrbitalElements};
pub use error::ElementsError;
pub use kepler::KeplerSolution;
pub use math::Orientation;
pub use orbit::{position_at, sample_path, Orbit, OrbitPath, Propagated};
