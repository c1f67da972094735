//! CSV output standing in for a renderer: one row per point a renderer
//! would draw.

use nalgebra::Point3;
use std::io::{self, Write};

use keplerian_orbit::{orbit::StagedPaths, Orbit, OrbitPath};

fn write_point(out: &mut impl Write, label: &str, p: &Point3<f64>) -> io::Result<()> {
    writeln!(out, "{},{},{},{}", label, p.x, p.y, p.z)
}

/// Orbit polyline followed by the focus marker and the apsides.
pub fn draw_path(out: &mut impl Write, orbit: &Orbit, path: &OrbitPath) -> io::Result<()> {
    writeln!(out, "kind,x,y,z")?;
    for p in &path.points {
        write_point(out, "path", p)?;
    }
    write_point(out, "focus", &path.focus)?;
    write_point(out, "periapsis", &orbit.periapsis())?;
    write_point(out, "apoapsis", &orbit.apoapsis())
}

/// The intermediate ellipses of the orientation transform and the auxiliary
/// circle.
pub fn draw_stages(out: &mut impl Write, orbit: &Orbit, staged: &StagedPaths) -> io::Result<()> {
    writeln!(out, "kind,x,y,z")?;
    for (label, points) in &[
        ("flat", &staged.flat),
        ("inclined", &staged.inclined),
        ("yawed", &staged.yawed),
        ("rolled", &staged.rolled),
    ] {
        for p in points.iter() {
            write_point(out, label, p)?;
        }
    }
    for p in &orbit.auxiliary_circle() {
        write_point(out, "auxiliary", p)?;
    }
    Ok(())
}

/// Moves the body through `frames` ticks of `dt` seconds starting at `start`,
/// writing one row per tick.
pub fn animate(
    out: &mut impl Write,
    orbit: &Orbit,
    start: f64,
    dt: f64,
    frames: u32,
) -> io::Result<u32> {
    writeln!(out, "t,x,y,z,converged")?;
    let mut unconverged = 0;
    for frame in 0..frames {
        let t = start + frame as f64 * dt;
        let propagated = orbit.position_at(t);
        if !propagated.solution.converged {
            unconverged += 1;
        }
        let p = propagated.position;
        writeln!(
            out,
            "{},{},{},{},{}",
            t, p.x, p.y, p.z, propagated.solution.converged
        )?;
    }
    Ok(unconverged)
}
