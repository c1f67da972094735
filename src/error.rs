use thiserror::Error;

/// Reasons a set of orbital elements is rejected before it reaches the
/// geometry engine.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ElementsError {
    #[error("Semi-major axis must be positive and finite, got {0}")]
    InvalidSemiMajorAxis(f64),

    #[error("Eccentricity must lie in [0, 1) for a closed orbit, got {0}")]
    InvalidEccentricity(f64),

    #[error("Orbital period must be positive and finite, got {0}")]
    InvalidPeriod(f64),

    #[error("Angle `{name}` must be finite, got {value}")]
    NonFiniteAngle { name: &'static str, value: f64 },

    #[error("Time of periapsis passage must be finite, got {0}")]
    NonFiniteTime(f64),

    #[error("Propagation time must be finite, got {0}")]
    NonFiniteEpoch(f64),

    #[error("At least one sample is needed to trace the orbit")]
    ZeroSampleCount,
}
