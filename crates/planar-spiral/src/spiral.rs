use planar_geometry::{CornerRounding, Matrix3, Path, Point, Rounded, Transform};
use serde::Serialize;
use tracing::{debug, warn};

use crate::allocator::{allocate, RadialPartition};
use crate::builder::{build_turn, stitch};
use crate::error::SpiralError;
use crate::params::SpiralParams;
use crate::turn::Turn;

/// A complete single-layer winding: its turns and their joint outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spiral {
    params: SpiralParams,
    center: Point,
    partition: RadialPartition,
    turns: Vec<Turn>,
    outline: Path,
    rounding: CornerRounding,
}

impl Spiral {
    pub fn new(params: &SpiralParams) -> Result<Self, SpiralError> {
        let partition = allocate(params)?;
        let gap = params.terminal_gap();

        let turns = (0..partition.len())
            .map(|k| build_turn(&partition, k, gap))
            .collect::<Result<Vec<_>, _>>()?;
        let Rounded { path, rounding } = stitch(&turns, params.corner_radius)?;
        if rounding.is_clamped() {
            warn!(
                requested = rounding.requested,
                applied = rounding.applied,
                "corner radius does not fit, clamped"
            );
        }

        let (dx, dy) = (params.center.x, params.center.y);
        let turns: Vec<Turn> = turns
            .into_iter()
            .map(|t| t.with_corner_radius(rounding.applied).translate(dx, dy))
            .collect();

        debug!(
            turns = turns.len(),
            segments = path.len(),
            corners = rounding.corners,
            "built spiral"
        );

        Ok(Self {
            params: params.clone(),
            center: params.center,
            partition,
            turns,
            outline: path.translate(dx, dy),
            rounding,
        })
    }

    /// Parameters the spiral was built from.
    #[must_use]
    pub const fn params(&self) -> &SpiralParams {
        &self.params
    }

    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn num_turns(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub const fn partition(&self) -> &RadialPartition {
        &self.partition
    }

    #[must_use]
    pub fn iterations(&self) -> usize {
        self.partition.iterations()
    }

    #[must_use]
    pub fn widths(&self) -> Vec<f64> {
        self.partition.widths()
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.partition.spacing()
    }

    /// Closed clockwise outline of the copper.
    #[must_use]
    pub const fn outline(&self) -> &Path {
        &self.outline
    }

    #[must_use]
    pub const fn rounding(&self) -> &CornerRounding {
        &self.rounding
    }

    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.turns.first().map_or(0.0, Turn::inner_radius)
    }

    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        self.turns.last().map_or(0.0, Turn::outer_radius)
    }

    /// Total centre-line length of the conductor.
    #[must_use]
    pub fn conductor_length(&self) -> f64 {
        self.turns.iter().map(Turn::conductor_length).sum()
    }
}

impl Transform for Spiral {
    fn transform(&self, matrix: &Matrix3<f64>) -> Self {
        Self {
            params: SpiralParams {
                center: self.center.transform(matrix),
                ..self.params.clone()
            },
            center: self.center.transform(matrix),
            partition: self.partition.clone(),
            turns: self.turns.iter().map(|t| t.transform(matrix)).collect(),
            outline: self.outline.transform(matrix),
            rounding: self.rounding,
        }
    }
}
