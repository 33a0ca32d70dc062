use std::f64::consts::TAU;

use nalgebra::Matrix3;
use serde::Serialize;

use crate::error::GeometryError;
use crate::primitives::Segment;
use crate::transform::Transform;
use crate::{Point, TOLERANCE};

/// A continuous chain of lines and arcs.
///
/// Consecutive segments share endpoints within [`TOLERANCE`]; a closed path
/// additionally ends where it starts. Both are checked on construction and
/// preserved by every [`Transform`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    segments: Vec<Segment>,
    closed: bool,
}

impl Path {
    pub fn open(segments: Vec<Segment>) -> Result<Self, GeometryError> {
        Self::new(segments, false)
    }

    pub fn closed(segments: Vec<Segment>) -> Result<Self, GeometryError> {
        Self::new(segments, true)
    }

    pub fn new(segments: Vec<Segment>, closed: bool) -> Result<Self, GeometryError> {
        let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
            return Err(GeometryError::EmptyPath);
        };

        for (i, pair) in segments.windows(2).enumerate() {
            let at = pair[0].end();
            let gap = at.distance(&pair[1].start());
            if gap > TOLERANCE {
                return Err(GeometryError::Disconnected {
                    segment_index: i,
                    at,
                    gap,
                });
            }
        }

        if closed {
            let gap = last.end().distance(&first.start());
            if gap > TOLERANCE {
                return Err(GeometryError::NotClosed { gap });
            }
        }

        Ok(Self { segments, closed })
    }

    /// Concatenates open pieces end to end.
    pub fn join<'a>(
        pieces: impl IntoIterator<Item = &'a Path>,
        closed: bool,
    ) -> Result<Self, GeometryError> {
        let segments = pieces
            .into_iter()
            .flat_map(|p| p.segments.iter().copied())
            .collect();
        Self::new(segments, closed)
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a path holds at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.segments[0].start()
    }

    #[must_use]
    pub fn end(&self) -> Point {
        self.segments[self.segments.len() - 1].end()
    }

    /// Total length, arcs measured along their sweep.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Largest distance from `center` to any point of the path.
    #[must_use]
    pub fn bounding_radius(&self, center: Point) -> f64 {
        self.segments
            .iter()
            .map(|segment| {
                let ends = segment
                    .start()
                    .distance(&center)
                    .max(segment.end().distance(&center));
                match segment {
                    Segment::Line(_) => ends,
                    Segment::Arc(arc) => {
                        let away = arc.center() - center;
                        if away.norm() <= TOLERANCE {
                            return arc.radius();
                        }
                        let angle = away.y.atan2(away.x);
                        let offset = (angle - arc.start_angle()) * arc.direction().sign();
                        if offset.rem_euclid(TAU) <= arc.sweep() {
                            away.norm() + arc.radius()
                        } else {
                            ends
                        }
                    }
                }
            })
            .fold(0.0, f64::max)
    }

    /// Flattens the path into points, arcs stepped by at most `max_angle`.
    ///
    /// Shared joints appear once; a closed path does not repeat its start.
    #[must_use]
    pub fn sample(&self, max_angle: f64) -> Vec<Point> {
        let mut points: Vec<Point> = Vec::new();
        for segment in &self.segments {
            let pts = segment.sample(max_angle);
            let skip = usize::from(!points.is_empty());
            points.extend(pts.into_iter().skip(skip));
        }
        if self.closed && points.len() > 1 {
            points.pop();
        }
        points
    }
}

impl Transform for Path {
    fn transform(&self, matrix: &Matrix3<f64>) -> Self {
        Self {
            segments: self.segments.iter().map(|s| s.transform(matrix)).collect(),
            closed: self.closed,
        }
    }
}
