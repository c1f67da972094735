use nalgebra::{Point3, Rotation3, Unit, Vector3};

use crate::elements::OrbitalElements;

/// Right-handed rotation by `angle` radians about `axis`.
pub fn rotate_about(axis: &Unit<Vector3<f64>>, angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(axis, angle)
}

/// The three angles that carry the perifocal x-y plane into the display
/// frame.
///
/// A vector is turned about Y by the inclination, then about Z by the
/// argument of periapsis, then about X by the RAAN. This is not the usual
/// Z-X-Z convention and the order must not be changed: doing so moves the
/// rendered orbit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub inclination: f64,
    pub arg_periapsis: f64,
    pub raan: f64,
}

/// A vector after each successive step of [`Orientation::stages`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationStages {
    /// In the perifocal plane, untouched.
    pub flat: Vector3<f64>,
    /// After the pitch about Y by the inclination.
    pub inclined: Vector3<f64>,
    /// After the yaw about Z by the argument of periapsis.
    pub yawed: Vector3<f64>,
    /// After the roll about X by the RAAN; equal to [`Orientation::apply`].
    pub rolled: Vector3<f64>,
}

impl Orientation {
    pub fn of(elements: &OrbitalElements) -> Self {
        Orientation {
            inclination: elements.inclination(),
            arg_periapsis: elements.arg_periapsis(),
            raan: elements.raan(),
        }
    }

    /// Computes the composed rotation `R_x(raan) * R_z(omega) * R_y(i)`.
    pub fn rotation(&self) -> Rotation3<f64> {
        rotate_about(&Vector3::x_axis(), self.raan)
            * rotate_about(&Vector3::z_axis(), self.arg_periapsis)
            * rotate_about(&Vector3::y_axis(), self.inclination)
    }

    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.rotation() * v
    }

    pub fn apply_point(&self, p: &Point3<f64>) -> Point3<f64> {
        self.rotation() * p
    }

    /// Applies the three rotations one at a time, keeping every intermediate
    /// result.
    pub fn stages(&self, v: &Vector3<f64>) -> OrientationStages {
        let inclined = rotate_about(&Vector3::y_axis(), self.inclination) * v;
        let yawed = rotate_about(&Vector3::z_axis(), self.arg_periapsis) * inclined;
        let rolled = rotate_about(&Vector3::x_axis(), self.raan) * yawed;
        OrientationStages {
            flat: *v,
            inclined,
            yawed,
            rolled,
        }
    }
}
