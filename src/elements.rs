use log::debug;
use serde::{Deserialize, Serialize};
use tau::TAU;

use crate::error::ElementsError;

/// Number of points used to trace a closed orbit unless configured otherwise.
pub const DEFAULT_SAMPLE_COUNT: u32 = 50;

/// The six-ish numbers that pin down a Keplerian ellipse: its shape, its
/// orientation in space and where the body is on it at a given time.
///
/// Only the inputs are stored. The semi-minor axis, focus distance and mean
/// motion are recomputed on every read, so they always agree with `a`, `e`
/// and `T`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalElements {
    semi_major_axis: f64,
    eccentricity: f64,
    inclination: f64,       // rad
    raan: f64,              // rad
    arg_periapsis: f64,     // rad
    period: f64,            // s
    time_of_periapsis: f64, // s
    sample_count: u32,
}

/// A change to one input field of [`OrbitalElements`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementUpdate {
    SemiMajorAxis(f64),
    Eccentricity(f64),
    Inclination(f64),
    Raan(f64),
    ArgPeriapsis(f64),
    Period(f64),
    TimeOfPeriapsis(f64),
    SampleCount(u32),
}

impl Default for OrbitalElements {
    fn default() -> Self {
        OrbitalElements {
            semi_major_axis: 1.0,
            eccentricity: 1.0 / 2f64.sqrt(),
            inclination: TAU / 10.0,
            raan: TAU / 8.0,
            arg_periapsis: TAU / 8.0,
            period: 120.0,
            time_of_periapsis: 0.0,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl OrbitalElements {
    /// Creates an orbit lying flat in the reference plane with its periapsis
    /// on the +x axis.
    pub fn planar(semi_major_axis: f64, eccentricity: f64, period: f64) -> Self {
        OrbitalElements {
            semi_major_axis,
            eccentricity,
            inclination: 0.0,
            raan: 0.0,
            arg_periapsis: 0.0,
            period,
            time_of_periapsis: 0.0,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }

    /// Returns a copy with `update` applied.
    pub fn with(mut self, update: ElementUpdate) -> Self {
        self.update(update);
        self
    }

    /// Overwrites one input field. Nothing is checked here; out-of-domain
    /// values are caught by [`validate`](Self::validate) or by
    /// [`try_update`](Self::try_update).
    pub fn update(&mut self, update: ElementUpdate) {
        match update {
            ElementUpdate::SemiMajorAxis(a) => self.semi_major_axis = a,
            ElementUpdate::Eccentricity(e) => self.eccentricity = e,
            ElementUpdate::Inclination(i) => self.inclination = i,
            ElementUpdate::Raan(raan) => self.raan = raan,
            ElementUpdate::ArgPeriapsis(omega) => self.arg_periapsis = omega,
            ElementUpdate::Period(period) => self.period = period,
            ElementUpdate::TimeOfPeriapsis(tau) => self.time_of_periapsis = tau,
            ElementUpdate::SampleCount(n) => self.sample_count = n,
        }
    }

    /// Applies `update` only if the resulting elements are valid. On error the
    /// elements are left untouched.
    pub fn try_update(&mut self, update: ElementUpdate) -> Result<(), ElementsError> {
        let candidate = self.with(update);
        if let Err(err) = candidate.validate() {
            debug!("Rejected {:?}: {}", update, err);
            return Err(err);
        }
        *self = candidate;
        Ok(())
    }

    /// Checks that these elements describe a closed, finite ellipse.
    pub fn validate(&self) -> Result<(), ElementsError> {
        let a = self.semi_major_axis;
        if !(a.is_finite() && a > 0.0) {
            return Err(ElementsError::InvalidSemiMajorAxis(a));
        }
        let e = self.eccentricity;
        if !(0.0..1.0).contains(&e) {
            return Err(ElementsError::InvalidEccentricity(e));
        }
        let period = self.period;
        if !(period.is_finite() && period > 0.0) {
            return Err(ElementsError::InvalidPeriod(period));
        }
        for &(name, value) in &[
            ("inclination", self.inclination),
            ("raan", self.raan),
            ("arg_periapsis", self.arg_periapsis),
        ] {
            if !value.is_finite() {
                return Err(ElementsError::NonFiniteAngle { name, value });
            }
        }
        if !self.time_of_periapsis.is_finite() {
            return Err(ElementsError::NonFiniteTime(self.time_of_periapsis));
        }
        if self.sample_count == 0 {
            return Err(ElementsError::ZeroSampleCount);
        }
        Ok(())
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    /// Right ascension of the ascending node.
    pub fn raan(&self) -> f64 {
        self.raan
    }

    /// Argument of periapsis (omega).
    pub fn arg_periapsis(&self) -> f64 {
        self.arg_periapsis
    }

    /// Seconds per revolution.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Time (tau) at which the body passes through periapsis.
    pub fn time_of_periapsis(&self) -> f64 {
        self.time_of_periapsis
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// `b = a * sqrt(1 - e^2)`
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity.powi(2)).sqrt()
    }

    /// Distance from the ellipse center to either focus, `c = e * a`.
    pub fn focus_distance(&self) -> f64 {
        self.eccentricity * self.semi_major_axis
    }

    /// Mean angular rate, `n = 2 pi / T`.
    pub fn mean_motion(&self) -> f64 {
        TAU / self.period
    }

    pub fn periapsis_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn apoapsis_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Mean anomaly at time `t`, `M = n * (t - tau)`. Not wrapped.
    pub fn mean_anomaly_at(&self, t: f64) -> f64 {
        self.mean_motion() * (t - self.time_of_periapsis)
    }
}
