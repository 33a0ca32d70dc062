//! 2D geometry primitives for planar conductor outlines.
//!
//! Everything here is an immutable value: transforms return new values and
//! never mutate in place. Lengths are millimetres, angles radians.

pub mod error;
pub mod fillet;
pub mod path;
pub mod point;
pub mod primitives;
pub mod transform;

pub use error::GeometryError;
pub use fillet::{CornerRounding, Rounded};
pub use path::Path;
pub use point::Point;
pub use primitives::{Arc, ArcDirection, Line, Segment};
pub use transform::{Axis, Transform};

/// Homogeneous 2D transform matrix accepted by [`Transform::transform`].
pub use nalgebra::Matrix3;

/// Distance below which two points are considered coincident (mm).
pub const TOLERANCE: f64 = 1e-6;

/// Angular distance below which two angles are considered equal (rad).
pub const ANGLE_TOLERANCE: f64 = 1e-12;

/// Normalizes an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can return TAU itself for tiny negative inputs
    if a >= std::f64::consts::TAU {
        0.0
    } else {
        a
    }
}
