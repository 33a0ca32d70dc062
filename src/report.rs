use std::fmt::Write as _;

use planar_geometry::{CornerRounding, Path, Point};
use planar_spiral::{Allocation, Spiral};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TurnRow {
    pub index: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub width: f64,
    pub length: f64,
    pub resistance: f64,
}

/// Summary of a built winding and its resistance.
#[derive(Debug, Clone, Serialize)]
pub struct SpiralReport {
    pub center: Point,
    pub allocation: Allocation,
    pub iterations: usize,
    pub spacing: f64,
    pub thickness: f64,
    pub temperature: f64,
    pub corner_rounding: CornerRounding,
    pub turns: Vec<TurnRow>,
    pub total_length: f64,
    pub total_resistance: f64,
}

impl SpiralReport {
    pub fn new(spiral: &Spiral, resistances: &[f64], thickness: f64, temperature: f64) -> Self {
        let turns: Vec<TurnRow> = spiral
            .turns()
            .iter()
            .zip(resistances)
            .map(|(turn, &resistance)| TurnRow {
                index: turn.index(),
                inner_radius: turn.inner_radius(),
                outer_radius: turn.outer_radius(),
                width: turn.width(),
                length: turn.conductor_length(),
                resistance,
            })
            .collect();

        Self {
            center: spiral.center(),
            allocation: spiral.params().allocation,
            iterations: spiral.iterations(),
            spacing: spiral.spacing(),
            thickness,
            temperature,
            corner_rounding: *spiral.rounding(),
            total_length: spiral.conductor_length(),
            total_resistance: resistances.iter().sum(),
            turns,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Spiral at ({:.3}, {:.3}): {} turns, {} allocation, spacing {:.3} mm",
            self.center.x,
            self.center.y,
            self.turns.len(),
            self.allocation,
            self.spacing
        );
        let _ = writeln!(
            out,
            "Copper {:.4} mm at {:.1} °C",
            self.thickness, self.temperature
        );
        let _ = writeln!(
            out,
            "{:>4}  {:>10}  {:>10}  {:>9}  {:>11}  {:>14}",
            "turn", "inner (mm)", "outer (mm)", "width (mm)", "length (mm)", "resistance (Ω)"
        );
        for row in &self.turns {
            let _ = writeln!(
                out,
                "{:>4}  {:>10.4}  {:>10.4}  {:>9.4}  {:>11.3}  {:>14.6e}",
                row.index,
                row.inner_radius,
                row.outer_radius,
                row.width,
                row.length,
                row.resistance
            );
        }
        if self.corner_rounding.is_clamped() {
            let _ = writeln!(
                out,
                "Corner radius clamped: requested {:.4} mm, applied {:.4} mm",
                self.corner_rounding.requested, self.corner_rounding.applied
            );
        }
        let _ = writeln!(out, "Total length: {:.3} mm", self.total_length);
        let _ = write!(out, "Total resistance: {:.6e} Ω", self.total_resistance);
        out
    }
}

/// Outline handed to CAD/preview tools: exact primitives plus a polyline.
#[derive(Debug, Serialize)]
pub struct OutlineExport<'a> {
    pub center: Point,
    pub outline: &'a Path,
    pub polyline: Vec<Point>,
}

impl<'a> OutlineExport<'a> {
    pub fn new(spiral: &'a Spiral, max_angle: f64) -> Self {
        Self {
            center: spiral.center(),
            outline: spiral.outline(),
            polyline: spiral.outline().sample(max_angle),
        }
    }
}
