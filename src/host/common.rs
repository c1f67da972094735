use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use keplerian_orbit::{ElementUpdate, OrbitalElements};

use super::io::parse_ron_file;

/// Where the elements come from: an optional RON file, then any per-field
/// overrides given on the command line.
#[derive(Args, Debug, Default)]
pub struct ElementArgs {
    /// RON file holding the orbital elements (defaults apply to missing fields)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Semi-major axis
    #[arg(long, global = true)]
    pub a: Option<f64>,

    /// Eccentricity, in [0, 1)
    #[arg(long, global = true)]
    pub e: Option<f64>,

    /// Inclination (rad)
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub inclination: Option<f64>,

    /// Right ascension of the ascending node (rad)
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub raan: Option<f64>,

    /// Argument of periapsis (rad)
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub omega: Option<f64>,

    /// Orbital period (s)
    #[arg(long, global = true)]
    pub period: Option<f64>,

    /// Time of periapsis passage (s)
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub tau: Option<f64>,

    /// Number of segments in the sampled path
    #[arg(long, global = true)]
    pub samples: Option<u32>,
}

macro_rules! apply_overrides {
    ($elements:ident, $args:ident; $($field:ident -> $variant:ident),* $(,)?) => {
        $(
            if let Some(value) = $args.$field {
                $elements
                    .try_update(ElementUpdate::$variant(value))
                    .with_context(|| format!("Rejected --{} {}", stringify!($field), value))?;
            }
        )*
    };
}

impl ElementArgs {
    /// Builds the elements, rejecting any override that would leave them
    /// invalid.
    pub fn resolve(&self) -> Result<OrbitalElements> {
        let mut elements = match &self.config {
            Some(file_path) => parse_ron_file(file_path)?,
            None => OrbitalElements::default(),
        };
        elements
            .validate()
            .context("Configured orbital elements are invalid")?;

        let args = self;
        apply_overrides!(elements, args;
                         a -> SemiMajorAxis,
                         e -> Eccentricity,
                         inclination -> Inclination,
                         raan -> Raan,
                         omega -> ArgPeriapsis,
                         period -> Period,
                         tau -> TimeOfPeriapsis,
                         samples -> SampleCount);

        Ok(elements)
    }
}
