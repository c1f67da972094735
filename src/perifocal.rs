use nalgebra::{Point2, Point3, Vector2};

use crate::elements::OrbitalElements;

/// An orbital ellipse in its own plane, parameterised by eccentric anomaly.
///
/// The central body sits at the origin and periapsis lies on the +x axis, so
/// the geometric center of the ellipse is at `(-c, 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerifocalEllipse {
    pub semi_axes: Vector2<f64>,
    pub eccentricity: f64,
}

impl PerifocalEllipse {
    pub fn of(elements: &OrbitalElements) -> Self {
        PerifocalEllipse {
            semi_axes: Vector2::new(elements.semi_major_axis(), elements.semi_minor_axis()),
            eccentricity: elements.eccentricity(),
        }
    }

    fn focus_distance(&self) -> f64 {
        self.eccentricity * self.semi_axes.x
    }

    /// Point on the ellipse at eccentric anomaly `ecc_anom`:
    /// `(a (cos E - e), b sin E)`.
    pub fn point(&self, ecc_anom: f64) -> Point2<f64> {
        let (sin_e, cos_e) = ecc_anom.sin_cos();
        Point2::new(
            self.semi_axes.x * (cos_e - self.eccentricity),
            self.semi_axes.y * sin_e,
        )
    }

    /// Point on the auxiliary circle (radius `a`, sharing the ellipse's
    /// center) at the same eccentric anomaly. The ellipse point is this one
    /// squashed along y by `b / a`.
    pub fn auxiliary_point(&self, ecc_anom: f64) -> Point2<f64> {
        let (sin_e, cos_e) = ecc_anom.sin_cos();
        let a = self.semi_axes.x;
        Point2::new(a * cos_e - self.focus_distance(), a * sin_e)
    }

    /// Marker point `(-c, 0)`, one focal distance from the origin along -x.
    pub fn focus(&self) -> Point2<f64> {
        Point2::new(-self.focus_distance(), 0.0)
    }

    pub fn periapsis(&self) -> Point2<f64> {
        Point2::new(self.semi_axes.x * (1.0 - self.eccentricity), 0.0)
    }

    pub fn apoapsis(&self) -> Point2<f64> {
        Point2::new(-self.semi_axes.x * (1.0 + self.eccentricity), 0.0)
    }
}

/// Lifts a point of the orbital plane into 3D with `z = 0`.
pub fn embed(p: &Point2<f64>) -> Point3<f64> {
    Point3::new(p.x, p.y, 0.0)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::elements::ElementUpdate;
    use approx::assert_abs_diff_eq;
    use tau::TAU;

    fn ellipse(a: f64, e: f64) -> PerifocalEllipse {
        PerifocalEllipse::of(&OrbitalElements::planar(a, e, 1.0))
    }

    #[test]
    fn apsides_lie_on_the_ellipse() {
        let ellipse = ellipse(2.0, 0.5);
        assert_abs_diff_eq!(ellipse.point(0.0), ellipse.periapsis(), epsilon = 1e-15);
        assert_abs_diff_eq!(ellipse.point(TAU / 2.0), ellipse.apoapsis(), epsilon = 1e-15);
        assert_abs_diff_eq!(ellipse.periapsis(), Point2::new(1.0, 0.0));
        assert_abs_diff_eq!(ellipse.apoapsis(), Point2::new(-3.0, 0.0));
        assert_abs_diff_eq!(ellipse.focus(), Point2::new(-1.0, 0.0));
    }

    #[test]
    fn points_satisfy_the_canonical_equation() {
        let ellipse = ellipse(3.0, 0.8);
        let center = ellipse.focus();
        for i in 0..32 {
            let p = ellipse.point(i as f64 * TAU / 32.0);
            let d = (p - center).component_div(&ellipse.semi_axes);
            assert_abs_diff_eq!(d.norm_squared(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn auxiliary_circle_has_radius_a_about_the_center() {
        let ellipse = ellipse(1.5, 0.6);
        for i in 0..16 {
            let ecc_anom = i as f64 * TAU / 16.0;
            let aux = ellipse.auxiliary_point(ecc_anom);
            let p = ellipse.point(ecc_anom);
            assert_abs_diff_eq!((aux - ellipse.focus()).norm(), 1.5, epsilon = 1e-12);
            assert_abs_diff_eq!(aux.x, p.x, epsilon = 1e-12);
            assert_abs_diff_eq!(
                p.y,
                aux.y * ellipse.semi_axes.y / ellipse.semi_axes.x,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn semi_axes_follow_elements() {
        let mut elements = OrbitalElements::planar(1.0, 0.6, 1.0);
        assert_abs_diff_eq!(ellipse(1.0, 0.6).semi_axes, Vector2::new(1.0, 0.8), epsilon = 1e-15);

        elements.update(ElementUpdate::SemiMajorAxis(5.0));
        let ellipse = PerifocalEllipse::of(&elements);
        assert_eq!(ellipse.semi_axes.x, 5.0);
        assert_eq!(ellipse.semi_axes.y, elements.semi_minor_axis());
    }

    #[test]
    fn embedding_keeps_the_plane() {
        let p = embed(&Point2::new(0.25, -4.0));
        assert_eq!(p, Point3::new(0.25, -4.0, 0.0));
    }
}
