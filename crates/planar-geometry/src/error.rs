use thiserror::Error;

use crate::Point;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("arc radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: f64 },

    #[error("degenerate arc: start and end angle coincide at {angle} rad")]
    DegenerateArc { angle: f64 },

    #[error("degenerate segment: both endpoints are at ({}, {})", .at.x, .at.y)]
    DegenerateSegment { at: Point },

    #[error(
        "arc endpoints are not on a common circle around ({}, {}): distances {start_radius} and {end_radius}",
        .center.x, .center.y
    )]
    EndpointMismatch {
        center: Point,
        start_radius: f64,
        end_radius: f64,
    },

    #[error("path is disconnected after segment {segment_index}: gap of {gap} mm at ({}, {})", .at.x, .at.y)]
    Disconnected {
        segment_index: usize,
        at: Point,
        gap: f64,
    },

    #[error("closed path does not return to its start: gap of {gap} mm")]
    NotClosed { gap: f64 },

    #[error("path has no segments")]
    EmptyPath,
}
