use std::f64::consts::TAU;

use nalgebra::Matrix3;
use serde::Serialize;

use crate::error::GeometryError;
use crate::transform::{is_reflection, Transform};
use crate::{normalize_angle, Point, ANGLE_TOLERANCE, TOLERANCE};

/// Default angular step used when flattening arcs for previews (5 degrees).
pub const DEFAULT_MAX_ANGLE: f64 = std::f64::consts::PI / 36.0;

/// Smallest angular step accepted when flattening arcs.
const MIN_SAMPLE_ANGLE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

impl ArcDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            ArcDirection::Clockwise => ArcDirection::CounterClockwise,
            ArcDirection::CounterClockwise => ArcDirection::Clockwise,
        }
    }

    /// +1 for counter-clockwise, -1 for clockwise.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            ArcDirection::Clockwise => -1.0,
            ArcDirection::CounterClockwise => 1.0,
        }
    }
}

/// A straight segment between two distinct points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Line {
    start: Point,
    end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Result<Self, GeometryError> {
        if start.distance(&end) <= TOLERANCE {
            return Err(GeometryError::DegenerateSegment { at: start });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> Point {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Point {
        self.end
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> Point {
        (self.end - self.start).normalized()
    }

    /// Orthogonal projection of `p` onto the infinite line.
    #[must_use]
    pub fn project(&self, p: Point) -> Point {
        let d = self.direction();
        self.start + d.scale((p - self.start).dot(&d))
    }
}

impl Transform for Line {
    fn transform(&self, matrix: &Matrix3<f64>) -> Self {
        Self {
            start: self.start.transform(matrix),
            end: self.end.transform(matrix),
        }
    }
}

/// A circular arc swept from `start_angle` to `end_angle` in `direction`.
///
/// Angles are stored normalized to `[0, 2π)`; the sweep is always in
/// `(0, 2π)` and measured along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arc {
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    direction: ArcDirection,
}

impl Arc {
    pub fn new(
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        direction: ArcDirection,
    ) -> Result<Self, GeometryError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius { radius });
        }
        let start_angle = normalize_angle(start_angle);
        let end_angle = normalize_angle(end_angle);
        let diff = (start_angle - end_angle).abs();
        if diff < ANGLE_TOLERANCE || (TAU - diff) < ANGLE_TOLERANCE {
            return Err(GeometryError::DegenerateArc { angle: start_angle });
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            end_angle,
            direction,
        })
    }

    /// Builds the arc around `center` running from `start` to `end`.
    ///
    /// Both endpoints must lie on the same circle (within [`TOLERANCE`]) and
    /// must not coincide with the center or with each other.
    pub fn from_endpoints(
        center: Point,
        start: Point,
        end: Point,
        direction: ArcDirection,
    ) -> Result<Self, GeometryError> {
        let start_radius = start.distance(&center);
        let end_radius = end.distance(&center);
        if start_radius <= TOLERANCE {
            return Err(GeometryError::InvalidRadius {
                radius: start_radius,
            });
        }
        if (start_radius - end_radius).abs() > TOLERANCE {
            return Err(GeometryError::EndpointMismatch {
                center,
                start_radius,
                end_radius,
            });
        }
        if start.distance(&end) <= TOLERANCE {
            return Err(GeometryError::DegenerateArc {
                angle: start.angle_from(&center),
            });
        }
        Self::new(
            center,
            start_radius,
            start.angle_from(&center),
            end.angle_from(&center),
            direction,
        )
    }

    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub const fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[must_use]
    pub const fn end_angle(&self) -> f64 {
        self.end_angle
    }

    #[must_use]
    pub const fn direction(&self) -> ArcDirection {
        self.direction
    }

    /// Swept angle along `direction`, in `(0, 2π)`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        let raw = match self.direction {
            ArcDirection::CounterClockwise => self.end_angle - self.start_angle,
            ArcDirection::Clockwise => self.start_angle - self.end_angle,
        };
        raw.rem_euclid(TAU)
    }

    /// Swept arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep()
    }

    #[must_use]
    pub fn point_at(&self, angle: f64) -> Point {
        Point::from_polar(self.center, self.radius, angle)
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.point_at(self.start_angle)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        self.point_at(self.end_angle)
    }

    /// Point halfway along the sweep (the three-point form used by KiCad).
    #[must_use]
    pub fn mid(&self) -> Point {
        self.point_at(self.start_angle + self.direction.sign() * self.sweep() / 2.0)
    }

    /// DXF polyline bulge: `tan(sweep / 4)`, negative for clockwise arcs.
    #[must_use]
    pub fn bulge(&self) -> f64 {
        self.direction.sign() * (self.sweep() / 4.0).tan()
    }

    /// Unit tangent in the direction of travel at `angle`.
    #[must_use]
    pub fn tangent_at(&self, angle: f64) -> Point {
        let (s, c) = angle.sin_cos();
        Point::new(-s, c).scale(self.direction.sign())
    }

    #[must_use]
    pub fn start_tangent(&self) -> Point {
        self.tangent_at(self.start_angle)
    }

    #[must_use]
    pub fn end_tangent(&self) -> Point {
        self.tangent_at(self.end_angle)
    }

    /// Closest point on the full circle to `p`.
    #[must_use]
    pub fn project(&self, p: Point) -> Point {
        self.center + (p - self.center).normalized().scale(self.radius)
    }

    /// Same circle and direction, new endpoints.
    pub fn with_endpoints(&self, start: Point, end: Point) -> Result<Self, GeometryError> {
        Self::new(
            self.center,
            self.radius,
            start.angle_from(&self.center),
            end.angle_from(&self.center),
            self.direction,
        )
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start_angle: self.end_angle,
            end_angle: self.start_angle,
            direction: self.direction.reversed(),
            ..*self
        }
    }

    /// Piecewise-linear approximation with at most `max_angle` per step.
    /// Includes both endpoints.
    #[must_use]
    pub fn sample(&self, max_angle: f64) -> Vec<Point> {
        let sweep = self.sweep();
        let step = max_angle.max(MIN_SAMPLE_ANGLE);
        let count = ((sweep / step).ceil() as usize).max(1);
        let signed = self.direction.sign() * sweep;
        (0..=count)
            .map(|i| self.point_at(self.start_angle + signed * i as f64 / count as f64))
            .collect()
    }
}

impl Transform for Arc {
    fn transform(&self, matrix: &Matrix3<f64>) -> Self {
        let center = self.center.transform(matrix);
        let start = self.start().transform(matrix);
        let end = self.end().transform(matrix);
        let direction = if is_reflection(matrix) {
            self.direction.reversed()
        } else {
            self.direction
        };
        Self {
            center,
            radius: self.radius,
            start_angle: normalize_angle(start.angle_from(&center)),
            end_angle: normalize_angle(end.angle_from(&center)),
            direction,
        }
    }
}

/// One primitive of a [`crate::Path`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Line(Line),
    Arc(Arc),
}

impl Segment {
    #[must_use]
    pub fn start(&self) -> Point {
        match self {
            Segment::Line(l) => l.start(),
            Segment::Arc(a) => a.start(),
        }
    }

    #[must_use]
    pub fn end(&self) -> Point {
        match self {
            Segment::Line(l) => l.end(),
            Segment::Arc(a) => a.end(),
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Segment::Line(l) => l.length(),
            Segment::Arc(a) => a.length(),
        }
    }

    #[must_use]
    pub fn start_tangent(&self) -> Point {
        match self {
            Segment::Line(l) => l.direction(),
            Segment::Arc(a) => a.start_tangent(),
        }
    }

    #[must_use]
    pub fn end_tangent(&self) -> Point {
        match self {
            Segment::Line(l) => l.direction(),
            Segment::Arc(a) => a.end_tangent(),
        }
    }

    /// Closest point to `p` on the segment's supporting line or circle.
    #[must_use]
    pub fn project(&self, p: Point) -> Point {
        match self {
            Segment::Line(l) => l.project(p),
            Segment::Arc(a) => a.project(p),
        }
    }

    /// Distance travelled along the supporting curve between two of its points.
    #[must_use]
    pub(crate) fn distance_along(&self, from: Point, to: Point) -> f64 {
        match self {
            Segment::Line(_) => from.distance(&to),
            Segment::Arc(a) => {
                let delta = (to.angle_from(&a.center()) - from.angle_from(&a.center()))
                    .rem_euclid(TAU);
                a.radius() * delta.min(TAU - delta)
            }
        }
    }

    /// Same supporting curve, new endpoints.
    pub fn with_endpoints(&self, start: Point, end: Point) -> Result<Self, GeometryError> {
        match self {
            Segment::Line(_) => Line::new(start, end).map(Segment::Line),
            Segment::Arc(a) => a.with_endpoints(start, end).map(Segment::Arc),
        }
    }

    #[must_use]
    pub fn sample(&self, max_angle: f64) -> Vec<Point> {
        match self {
            Segment::Line(l) => vec![l.start(), l.end()],
            Segment::Arc(a) => a.sample(max_angle),
        }
    }
}

impl From<Line> for Segment {
    fn from(line: Line) -> Self {
        Segment::Line(line)
    }
}

impl From<Arc> for Segment {
    fn from(arc: Arc) -> Self {
        Segment::Arc(arc)
    }
}

impl Transform for Segment {
    fn transform(&self, matrix: &Matrix3<f64>) -> Self {
        match self {
            Segment::Line(l) => Segment::Line(l.transform(matrix)),
            Segment::Arc(a) => Segment::Arc(a.transform(matrix)),
        }
    }
}
