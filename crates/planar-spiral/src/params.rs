use std::fmt;
use std::str::FromStr;

use bon::Builder;
use planar_geometry::Point;
use serde::{Deserialize, Serialize};

use crate::error::SpiralError;

/// Default manufacturing floor for trace width (mm).
pub const DEFAULT_MIN_TRACE_WIDTH: f64 = 0.1;

/// How the conductor span is split between turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Allocation {
    /// Width proportional to the square root of the mean turn radius,
    /// iterated to a fixed point.
    #[default]
    MinimumResistance,
    /// Equal widths.
    Uniform,
    /// Turn inner radii in geometric progression between the annulus bounds.
    Geometric,
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Allocation::MinimumResistance => "minimum-resistance",
            Allocation::Uniform => "uniform",
            Allocation::Geometric => "geometric",
        })
    }
}

impl FromStr for Allocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimum-resistance" => Ok(Allocation::MinimumResistance),
            "uniform" => Ok(Allocation::Uniform),
            "geometric" => Ok(Allocation::Geometric),
            other => Err(format!(
                "unknown allocation \"{other}\" (expected minimum-resistance, uniform or geometric)"
            )),
        }
    }
}

fn default_min_trace_width() -> f64 {
    DEFAULT_MIN_TRACE_WIDTH
}

/// Everything needed to build a [`crate::Spiral`]. Lengths in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct SpiralParams {
    #[serde(default)]
    #[builder(default)]
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub num_turns: usize,
    /// Minimum clearance between adjacent turns.
    pub min_spacing: f64,
    #[serde(default)]
    #[builder(default)]
    pub corner_radius: f64,
    #[serde(default = "default_min_trace_width")]
    #[builder(default = DEFAULT_MIN_TRACE_WIDTH)]
    pub min_trace_width: f64,
    #[serde(default)]
    #[builder(default)]
    pub allocation: Allocation,
}

impl SpiralParams {
    pub fn validate(&self) -> Result<(), SpiralError> {
        let invalid = |name, value, reason| {
            Err(SpiralError::InvalidArgument {
                name,
                value,
                reason,
            })
        };

        if !(self.center.x.is_finite() && self.center.y.is_finite()) {
            return invalid("center", f64::NAN, "coordinates must be finite");
        }
        if !(self.inner_radius.is_finite() && self.inner_radius > 0.0) {
            return invalid("inner_radius", self.inner_radius, "must be positive");
        }
        if !(self.outer_radius.is_finite() && self.outer_radius > self.inner_radius) {
            return invalid(
                "outer_radius",
                self.outer_radius,
                "must be greater than inner_radius",
            );
        }
        if self.num_turns == 0 {
            return invalid("num_turns", 0.0, "at least one turn is required");
        }
        if !(self.min_spacing.is_finite() && self.min_spacing >= 0.0) {
            return invalid("min_spacing", self.min_spacing, "must be zero or positive");
        }
        if !(self.corner_radius.is_finite() && self.corner_radius >= 0.0) {
            return invalid(
                "corner_radius",
                self.corner_radius,
                "must be zero or positive",
            );
        }
        if !(self.min_trace_width.is_finite() && self.min_trace_width > 0.0) {
            return invalid("min_trace_width", self.min_trace_width, "must be positive");
        }
        Ok(())
    }

    /// `outer_radius - inner_radius`.
    #[must_use]
    pub fn radial_span(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// Radial room taken by the gaps between turns.
    #[must_use]
    pub fn reserved_spacing(&self) -> f64 {
        self.num_turns.saturating_sub(1) as f64 * self.min_spacing
    }

    /// Width of the slot separating the innermost terminal from the first
    /// crossing. Falls back to the trace-width floor when no spacing is set.
    #[must_use]
    pub fn terminal_gap(&self) -> f64 {
        if self.min_spacing > 0.0 {
            self.min_spacing
        } else {
            self.min_trace_width
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SpiralParams {
        SpiralParams::builder()
            .inner_radius(6.0)
            .outer_radius(12.0)
            .num_turns(3)
            .min_spacing(0.2)
            .build()
    }

    #[test]
    fn builder_fills_defaults() {
        let p = base();
        assert_eq!(p.center, Point::origin());
        assert_eq!(p.corner_radius, 0.0);
        assert_eq!(p.min_trace_width, DEFAULT_MIN_TRACE_WIDTH);
        assert_eq!(p.allocation, Allocation::MinimumResistance);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn yaml_uses_same_defaults() {
        let p: SpiralParams = serde_yaml::from_str(
            "inner_radius: 6\nouter_radius: 12\nnum_turns: 3\nmin_spacing: 0.2\n",
        )
        .unwrap();
        assert_eq!(p, base());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_yaml::from_str::<SpiralParams>(
            "inner_radius: 6\nouter_radius: 12\nnum_turns: 3\nmin_spacing: 0.2\nturns: 4\n",
        );
        assert!(err.is_err());
    }

    #[test]
    fn rejects_inverted_annulus() {
        let p = SpiralParams {
            outer_radius: 5.0,
            ..base()
        };
        match p.validate() {
            Err(SpiralError::InvalidArgument { name, value, .. }) => {
                assert_eq!(name, "outer_radius");
                assert_eq!(value, 5.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_turns_and_negative_spacing() {
        assert!(SpiralParams { num_turns: 0, ..base() }.validate().is_err());
        assert!(SpiralParams { min_spacing: -0.1, ..base() }.validate().is_err());
        assert!(SpiralParams { corner_radius: f64::NAN, ..base() }.validate().is_err());
    }

    #[test]
    fn allocation_parses_from_kebab_case() {
        assert_eq!("uniform".parse::<Allocation>(), Ok(Allocation::Uniform));
        assert_eq!(
            "minimum-resistance".parse::<Allocation>(),
            Ok(Allocation::MinimumResistance)
        );
        assert!("fastest".parse::<Allocation>().is_err());
        assert!("optimal".parse::<Allocation>().is_err());
        assert_eq!(Allocation::Geometric.to_string(), "geometric");
    }
}
