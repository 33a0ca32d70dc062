use planar_geometry::{Arc, Matrix3, Path, Point, Transform};
use serde::Serialize;

/// One revolution of the winding.
///
/// The inner edge runs counter-clockwise around `inner_radius` and then jogs
/// outward to the next turn; the outer edge comes back clockwise along
/// `outer_radius`. Both are open paths, joined into the full outline by
/// [`crate::Spiral`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    index: usize,
    inner_radius: f64,
    outer_radius: f64,
    inner_arc: Arc,
    outer_arc: Arc,
    inner_edge: Path,
    outer_edge: Path,
    /// Mean length of the two jog walls; zero for the last turn.
    crossing_length: f64,
    corner_radius: f64,
}

impl Turn {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        index: usize,
        inner_radius: f64,
        outer_radius: f64,
        inner_arc: Arc,
        outer_arc: Arc,
        inner_edge: Path,
        outer_edge: Path,
        crossing_length: f64,
    ) -> Self {
        Self {
            index,
            inner_radius,
            outer_radius,
            inner_arc,
            outer_arc,
            inner_edge,
            outer_edge,
            crossing_length,
            corner_radius: 0.0,
        }
    }

    pub(crate) fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Position counted from the innermost turn.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    #[must_use]
    pub const fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    #[must_use]
    pub fn mean_radius(&self) -> f64 {
        0.5 * (self.inner_radius + self.outer_radius)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.inner_arc.center()
    }

    /// Angle at which the turn's inner edge starts.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.inner_arc.start_angle()
    }

    /// Angle at which the turn's inner edge reaches the jog.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.inner_arc.end_angle()
    }

    /// Angular extent of the turn, a little under a full revolution.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.inner_arc.sweep()
    }

    #[must_use]
    pub const fn inner_arc(&self) -> &Arc {
        &self.inner_arc
    }

    #[must_use]
    pub const fn outer_arc(&self) -> &Arc {
        &self.outer_arc
    }

    #[must_use]
    pub const fn inner_edge(&self) -> &Path {
        &self.inner_edge
    }

    #[must_use]
    pub const fn outer_edge(&self) -> &Path {
        &self.outer_edge
    }

    #[must_use]
    pub const fn crossing_length(&self) -> f64 {
        self.crossing_length
    }

    /// Corner radius applied to this turn's junctions in the final outline.
    #[must_use]
    pub const fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Length of the turn's centre line: the mean of its two arcs plus the
    /// mean of its two jog walls.
    #[must_use]
    pub fn conductor_length(&self) -> f64 {
        0.5 * (self.inner_arc.length() + self.outer_arc.length()) + self.crossing_length
    }
}

impl Transform for Turn {
    fn transform(&self, matrix: &Matrix3<f64>) -> Self {
        Self {
            inner_arc: self.inner_arc.transform(matrix),
            outer_arc: self.outer_arc.transform(matrix),
            inner_edge: self.inner_edge.transform(matrix),
            outer_edge: self.outer_edge.transform(matrix),
            ..*self
        }
    }
}
