use std::fmt;

use planar_geometry::GeometryError;
use thiserror::Error;

/// Manufacturability constraint a request ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// `(turns - 1) * min_spacing` leaves no radial room for copper.
    ReservedSpacing { turns: usize },
    /// A turn came out narrower than the minimum trace width.
    MinTraceWidth { turn: usize },
    /// The terminal slot of the innermost turn does not fit inside the inner radius.
    TerminalSlot,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::ReservedSpacing { turns } => write!(
                f,
                "spacing reserved between {turns} turns consumes the whole annulus"
            ),
            Constraint::MinTraceWidth { turn } => {
                write!(f, "turn {turn} is narrower than the minimum trace width")
            }
            Constraint::TerminalSlot => {
                write!(f, "terminal slot is wider than the inner radius")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpiralError {
    #[error("invalid {name} = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("infeasible spiral: {constraint} (got {value} mm, limit {limit} mm)")]
    Infeasible {
        constraint: Constraint,
        value: f64,
        limit: f64,
    },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
