use nalgebra::{Matrix2, Matrix3, Vector2};
use serde::{Deserialize, Serialize};

use crate::Point;

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// The x axis (`y = 0`); flips y.
    X,
    /// The y axis (`x = 0`); flips x.
    Y,
    /// The line through `point` with direction `angle` (radians).
    Line { point: Point, angle: f64 },
}

impl Axis {
    /// Homogeneous reflection matrix across this axis.
    #[must_use]
    pub fn reflection(&self) -> Matrix3<f64> {
        let (point, angle) = match *self {
            Axis::X => (Point::origin(), 0.0),
            Axis::Y => (Point::origin(), std::f64::consts::FRAC_PI_2),
            Axis::Line { point, angle } => (point, angle),
        };

        // R = 2 u u^T - I for the unit direction u
        let (s, c) = angle.sin_cos();
        let u = Vector2::new(c, s);
        let reflect_2 = 2.0 * u * u.transpose() - Matrix2::identity();
        let mut reflect_3 = Matrix3::identity();
        reflect_3.fixed_view_mut::<2, 2>(0, 0).copy_from(&reflect_2);

        let offset = Vector2::new(point.x, point.y);
        Matrix3::new_translation(&offset) * reflect_3 * Matrix3::new_translation(&-offset)
    }
}

/// Rigid transforms that produce new values.
///
/// Implementors only provide [`Transform::transform`]; the matrix is always a
/// homogeneous rotation, reflection and/or translation, never a scaling.
pub trait Transform: Sized {
    fn transform(&self, matrix: &Matrix3<f64>) -> Self;

    fn translate(&self, dx: f64, dy: f64) -> Self {
        self.transform(&Matrix3::new_translation(&Vector2::new(dx, dy)))
    }

    /// Rotates counter-clockwise by `angle` radians around `pivot`.
    fn rotate_about(&self, pivot: Point, angle: f64) -> Self {
        let offset = Vector2::new(pivot.x, pivot.y);
        let m = Matrix3::new_translation(&offset)
            * Matrix3::new_rotation(angle)
            * Matrix3::new_translation(&-offset);
        self.transform(&m)
    }

    fn mirror(&self, axis: Axis) -> Self {
        self.transform(&axis.reflection())
    }
}

/// Whether the homogeneous matrix reverses orientation.
pub(crate) fn is_reflection(matrix: &Matrix3<f64>) -> bool {
    matrix[(0, 0)] * matrix[(1, 1)] - matrix[(0, 1)] * matrix[(1, 0)] < 0.0
}
