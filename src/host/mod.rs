//! Headless stand-in for the renderer: drives the orbit engine and prints
//! what would be drawn.

mod common;
mod io;
mod render;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::{io::Write, path::PathBuf};

use keplerian_orbit::{Orbit, OrbitalElements};

use self::common::ElementArgs;

#[derive(Debug, Parser)]
#[command(about = "Keplerian orbit geometry and propagation", long_about = None)]
struct Cli {
    #[command(flatten)]
    elements: ElementArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the sampled orbit, its focus marker and apsides
    Path,
    /// Print the orbit after each rotation step, plus the auxiliary circle
    Stages,
    /// Print the body's position over a run of animation ticks
    Animate {
        /// Elapsed time of the first tick (s)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        start: f64,

        /// Time between ticks (s)
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Number of ticks
        #[arg(short, long, default_value_t = 120)]
        frames: u32,
    },
    /// Write the default orbital elements as a RON file
    GenerateConfig {
        /// Path where the file should be written
        #[arg(short, long)]
        output_path: PathBuf,
        /// Overwrite any existing file at the given path
        #[arg(short, long)]
        force_overwrite: bool,
    },
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateConfig {
            output_path,
            force_overwrite,
        } => {
            if !force_overwrite && output_path.exists() {
                bail!("File {} already exists", output_path.display());
            }
            io::write_ron_file(&OrbitalElements::default(), &output_path)?;
            info!("Wrote default elements to {}", output_path.display());
            Ok(())
        }
        command => {
            let orbit = Orbit::new(cli.elements.resolve()?)?;
            draw(command, &orbit)
        }
    }
}

fn draw(command: Command, orbit: &Orbit) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Path => render::draw_path(&mut out, orbit, &orbit.sample_path())?,
        Command::Stages => render::draw_stages(&mut out, orbit, &orbit.staged_paths())?,
        Command::Animate { start, dt, frames } => {
            let unconverged = render::animate(&mut out, orbit, start, dt, frames)?;
            if unconverged > 0 {
                warn!(
                    "{} of {} positions used an unconverged eccentric anomaly",
                    unconverged, frames
                );
            }
        }
        Command::GenerateConfig { .. } => {}
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_parse_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "orbit", "animate", "--frames", "3", "--e", "0.2", "--inclination", "-0.5",
        ])
        .unwrap();
        assert_eq!(cli.elements.e, Some(0.2));
        assert_eq!(cli.elements.inclination, Some(-0.5));
        assert!(matches!(cli.command, Command::Animate { frames: 3, .. }));
    }
}
