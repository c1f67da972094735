use log::{debug, trace};
use nalgebra::{Point2, Point3, Rotation3};
use tau::TAU;

use crate::elements::OrbitalElements;
use crate::error::ElementsError;
use crate::kepler::{self, KeplerSolution};
use crate::math::Orientation;
use crate::perifocal::{embed, PerifocalEllipse};

/// A validated snapshot of orbital elements, ready to be sampled and
/// propagated.
///
/// Cheap to build and `Copy`; rebuild it whenever the elements change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    elements: OrbitalElements,
    ellipse: PerifocalEllipse,
    orientation: Orientation,
    rotation: Rotation3<f64>,
}

/// The closed polyline of an orbit and its focus marker, both in the display
/// frame.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitPath {
    /// `sample_count + 1` points; the first and last coincide.
    pub points: Vec<Point3<f64>>,
    pub focus: Point3<f64>,
}

/// The ellipse drawn after each rotation of the orientation transform.
#[derive(Clone, Debug, PartialEq)]
pub struct StagedPaths {
    pub flat: Vec<Point3<f64>>,
    pub inclined: Vec<Point3<f64>>,
    pub yawed: Vec<Point3<f64>>,
    pub rolled: Vec<Point3<f64>>,
}

/// Where the body is at some instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Propagated {
    pub position: Point3<f64>,
    /// The solver result the position was computed from. Check
    /// `solution.converged` to find out whether the position is exact.
    pub solution: KeplerSolution,
}

impl Orbit {
    pub fn new(elements: OrbitalElements) -> Result<Self, ElementsError> {
        elements.validate()?;
        let orientation = Orientation::of(&elements);
        Ok(Orbit {
            elements,
            ellipse: PerifocalEllipse::of(&elements),
            orientation,
            rotation: orientation.rotation(),
        })
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn ellipse(&self) -> &PerifocalEllipse {
        &self.ellipse
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// Carries a point of the orbital plane into the display frame.
    pub fn to_display(&self, p: &Point2<f64>) -> Point3<f64> {
        self.rotation * embed(p)
    }

    /// The points of the orbit, with eccentric anomaly stepped uniformly from
    /// `-pi` to `pi` inclusive.
    pub fn path_points(&self) -> PathPoints {
        PathPoints {
            orbit: *self,
            next: 0,
            sample_count: self.elements.sample_count(),
        }
    }

    pub fn sample_path(&self) -> OrbitPath {
        let points: Vec<_> = self.path_points().collect();
        debug!(
            "Sampled {} orbit points (a = {}, e = {})",
            points.len(),
            self.elements.semi_major_axis(),
            self.elements.eccentricity()
        );
        OrbitPath {
            points,
            focus: self.focus(),
        }
    }

    /// Position of the body at time `t` (s). `t` must be finite.
    ///
    /// Never fails: if the Kepler solver runs out of iterations, the position
    /// is computed from its last estimate and `solution.converged` is false.
    /// A non-finite `t` ends up there too, with a NaN position.
    pub fn position_at(&self, t: f64) -> Propagated {
        let mean_anom = self.elements.mean_anomaly_at(t);
        let solution = kepler::solve(self.elements.eccentricity(), mean_anom);
        let position = self.to_display(&self.ellipse.point(solution.eccentric_anomaly));
        trace!(
            "t = {}: M = {}, E = {} after {} iterations",
            t,
            mean_anom,
            solution.eccentric_anomaly,
            solution.iterations
        );
        Propagated { position, solution }
    }

    pub fn focus(&self) -> Point3<f64> {
        self.to_display(&self.ellipse.focus())
    }

    pub fn periapsis(&self) -> Point3<f64> {
        self.to_display(&self.ellipse.periapsis())
    }

    pub fn apoapsis(&self) -> Point3<f64> {
        self.to_display(&self.ellipse.apoapsis())
    }

    /// The auxiliary circle sampled at the same eccentric anomalies as
    /// [`path_points`](Self::path_points), in the display frame.
    pub fn auxiliary_circle(&self) -> Vec<Point3<f64>> {
        self.sample_angles()
            .map(|ecc_anom| self.to_display(&self.ellipse.auxiliary_point(ecc_anom)))
            .collect()
    }

    /// The orbit drawn once per rotation step: flat in the orbital plane, then
    /// after the inclination, after the argument of periapsis and finally
    /// after the RAAN. The last polyline equals [`sample_path`](Self::sample_path).
    pub fn staged_paths(&self) -> StagedPaths {
        let n = self.elements.sample_count() as usize + 1;
        let mut staged = StagedPaths {
            flat: Vec::with_capacity(n),
            inclined: Vec::with_capacity(n),
            yawed: Vec::with_capacity(n),
            rolled: Vec::with_capacity(n),
        };
        for ecc_anom in self.sample_angles() {
            let stages = self
                .orientation
                .stages(&embed(&self.ellipse.point(ecc_anom)).coords);
            staged.flat.push(stages.flat.into());
            staged.inclined.push(stages.inclined.into());
            staged.yawed.push(stages.yawed.into());
            staged.rolled.push(stages.rolled.into());
        }
        staged
    }

    fn sample_angles(&self) -> impl Iterator<Item = f64> {
        let n = self.elements.sample_count();
        (0..=u64::from(n)).map(move |i| sample_angle(i, n))
    }
}

/// Eccentric anomaly of sample `i` out of `n` intervals.
fn sample_angle(i: u64, n: u32) -> f64 {
    -TAU / 2.0 + (i as f64 / n as f64) * TAU
}

/// Iterator over the display points of an orbit. Clone it to start over.
#[derive(Clone, Debug)]
pub struct PathPoints {
    orbit: Orbit,
    next: u64,
    sample_count: u32,
}

impl PathPoints {
    fn end(&self) -> u64 {
        u64::from(self.sample_count) + 1
    }
}

impl Iterator for PathPoints {
    type Item = Point3<f64>;

    fn next(&mut self) -> Option<Point3<f64>> {
        if self.next >= self.end() {
            return None;
        }
        let ecc_anom = sample_angle(self.next, self.sample_count);
        self.next += 1;
        Some(self.orbit.to_display(&self.orbit.ellipse.point(ecc_anom)))
    }

    fn nth(&mut self, n: usize) -> Option<Point3<f64>> {
        self.next = self.next.saturating_add(n as u64).min(self.end());
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end() - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PathPoints {}

/// Validates `elements` and samples the closed orbit.
pub fn sample_path(elements: &OrbitalElements) -> Result<OrbitPath, ElementsError> {
    Ok(Orbit::new(*elements)?.sample_path())
}

/// Validates `elements` and `t`, then computes the body's position at time
/// `t`.
pub fn position_at(elements: &OrbitalElements, t: f64) -> Result<Propagated, ElementsError> {
    let orbit = Orbit::new(*elements)?;
    if !t.is_finite() {
        return Err(ElementsError::NonFiniteEpoch(t));
    }
    Ok(orbit.position_at(t))
}
