use std::ops::{Add, Sub};

use nalgebra::{Matrix3, Point2};
use serde::{Deserialize, Serialize};

use crate::transform::Transform;
use crate::TOLERANCE;

/// A position in the board plane, in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Point at `radius` from `center` in direction `angle` (radians).
    #[must_use]
    pub fn from_polar(center: Point, radius: f64, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(center.x + radius * c, center.y + radius * s)
    }

    #[must_use]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        (*other - *self).norm()
    }

    /// Angle of the vector from `center` to this point, in `(-π, π]`.
    #[must_use]
    pub fn angle_from(&self, center: &Point) -> f64 {
        let d = *self - *center;
        d.y.atan2(d.x)
    }

    #[must_use]
    pub fn scale(&self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    #[must_use]
    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    #[must_use]
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let n = self.norm();
        if n == 0.0 {
            *self
        } else {
            self.scale(1.0 / n)
        }
    }

    /// This vector turned a quarter turn counter-clockwise.
    #[must_use]
    pub const fn perp(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[must_use]
    pub fn approx_eq(&self, other: &Point) -> bool {
        self.distance(other) <= TOLERANCE
    }

    pub(crate) fn to_na(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub(crate) fn from_na(p: Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Transform for Point {
    fn transform(&self, matrix: &Matrix3<f64>) -> Self {
        Point::from_na(matrix.transform_point(&self.to_na()))
    }
}
