//! DC resistance of a winding from its conductor geometry.
//!
//! Lengths, widths and thicknesses are millimetres; resistivity is Ω·m.

use std::f64::consts::TAU;

use planar_spiral::{Spiral, Turn};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ResistanceError;
use crate::material::Resistivity;

/// Copper thickness per ounce of plating weight (mm).
pub const THICKNESS_PER_OZ: f64 = 0.035;

/// Converts `ρ·mm / mm²` into ohms.
const MM_PER_M: f64 = 1e3;

/// A stretch of conductor with constant cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConductorSection {
    /// Centre-line length.
    pub length: f64,
    pub width: f64,
}

/// Anything that can be broken down into conductor sections in series.
pub trait Winding {
    fn sections(&self) -> Vec<ConductorSection>;
}

impl Winding for Turn {
    fn sections(&self) -> Vec<ConductorSection> {
        vec![ConductorSection {
            length: self.conductor_length(),
            width: self.width(),
        }]
    }
}

impl Winding for Spiral {
    fn sections(&self) -> Vec<ConductorSection> {
        self.turns().iter().flat_map(|turn| turn.sections()).collect()
    }
}

impl Winding for [ConductorSection] {
    fn sections(&self) -> Vec<ConductorSection> {
        self.to_vec()
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ResistanceError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ResistanceError::InvalidArgument {
            name,
            value,
            reason: "must be positive",
        })
    }
}

/// Resistance (Ω) of every section of `winding`, in order.
pub fn estimate_turn_resistances<W, M>(
    winding: &W,
    thickness: f64,
    temperature: f64,
    material: &M,
) -> Result<Vec<f64>, ResistanceError>
where
    W: Winding + ?Sized,
    M: Resistivity + ?Sized,
{
    let thickness = positive("thickness", thickness)?;
    let rho = material.resistivity(temperature)?;

    winding
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| {
            for (field, value) in [("length", section.length), ("width", section.width)] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ResistanceError::InvalidSection {
                        index,
                        field,
                        value,
                    });
                }
            }
            Ok(rho * section.length / (section.width * thickness) * MM_PER_M)
        })
        .collect()
}

/// Total series resistance (Ω) of `winding`.
pub fn estimate_resistance<W, M>(
    winding: &W,
    thickness: f64,
    temperature: f64,
    material: &M,
) -> Result<f64, ResistanceError>
where
    W: Winding + ?Sized,
    M: Resistivity + ?Sized,
{
    let turns = estimate_turn_resistances(winding, thickness, temperature, material)?;
    let total: f64 = turns.iter().sum();
    debug!(sections = turns.len(), thickness, temperature, total, "estimated resistance");
    Ok(total)
}

/// Resistance (Ω) around a full closed annulus, current flowing azimuthally.
pub fn annulus_resistance(
    thickness: f64,
    inner_radius: f64,
    outer_radius: f64,
    resistivity: f64,
) -> Result<f64, ResistanceError> {
    let thickness = positive("thickness", thickness)?;
    let inner_radius = positive("inner_radius", inner_radius)?;
    let resistivity = positive("resistivity", resistivity)?;
    if !(outer_radius.is_finite() && outer_radius > inner_radius) {
        return Err(ResistanceError::InvalidArgument {
            name: "outer_radius",
            value: outer_radius,
            reason: "must be greater than inner_radius",
        });
    }
    Ok(TAU * resistivity / (thickness * (outer_radius / inner_radius).ln()) * MM_PER_M)
}

/// Plating thickness (mm) of `oz` ounces of copper.
#[must_use]
pub fn copper_weight_to_thickness(oz: f64) -> f64 {
    THICKNESS_PER_OZ * oz
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::error::MaterialError;
    use crate::material::COPPER;

    fn strip() -> [ConductorSection; 2] {
        [
            ConductorSection {
                length: 100.0,
                width: 1.0,
            },
            ConductorSection {
                length: 50.0,
                width: 2.0,
            },
        ]
    }

    #[test]
    fn one_metre_square_strip() {
        // 1 m long, 1 mm wide, 1 mm thick: ρ / 1e-6 m²
        let section = [ConductorSection {
            length: 1000.0,
            width: 1.0,
        }];
        let r = estimate_resistance(&section[..], 1.0, 25.0, &COPPER).unwrap();
        assert_relative_eq!(r, 1.68e-2, max_relative = 1e-12);
    }

    #[test]
    fn sums_every_section() {
        let sections = strip();
        let per_turn = estimate_turn_resistances(&sections[..], 0.035, 25.0, &COPPER).unwrap();
        assert_eq!(per_turn.len(), 2);
        assert_relative_eq!(per_turn[0], 4.0 * per_turn[1], max_relative = 1e-12);
        let total = estimate_resistance(&sections[..], 0.035, 25.0, &COPPER).unwrap();
        assert_relative_eq!(total, per_turn.iter().sum::<f64>(), max_relative = 1e-12);
    }

    #[test]
    fn rejects_bad_thickness() {
        let err = estimate_resistance(&strip()[..], 0.0, 25.0, &COPPER).unwrap_err();
        assert_eq!(
            err,
            ResistanceError::InvalidArgument {
                name: "thickness",
                value: 0.0,
                reason: "must be positive",
            }
        );
        assert!(estimate_resistance(&strip()[..], f64::NAN, 25.0, &COPPER).is_err());
    }

    #[test]
    fn rejects_degenerate_section() {
        let sections = [
            ConductorSection {
                length: 10.0,
                width: 1.0,
            },
            ConductorSection {
                length: 10.0,
                width: -0.5,
            },
        ];
        let err = estimate_resistance(&sections[..], 0.035, 25.0, &COPPER).unwrap_err();
        assert_eq!(
            err,
            ResistanceError::InvalidSection {
                index: 1,
                field: "width",
                value: -0.5,
            }
        );
    }

    #[test]
    fn material_errors_are_wrapped() {
        let err = estimate_resistance(&strip()[..], 0.035, 500.0, &COPPER).unwrap_err();
        assert!(matches!(
            err,
            ResistanceError::Material(MaterialError::OutOfRange { .. })
        ));
    }

    #[test]
    fn annulus_formula() {
        // ln(e) = 1
        let r = annulus_resistance(1.0, 1.0, std::f64::consts::E, 1.68e-8).unwrap();
        assert_relative_eq!(r, TAU * 1.68e-5, max_relative = 1e-12);
        assert!(annulus_resistance(1.0, 2.0, 2.0, 1.68e-8).is_err());
    }

    #[test]
    fn copper_weights() {
        assert_abs_diff_eq!(copper_weight_to_thickness(1.0), 0.035, epsilon = 1e-15);
        assert_abs_diff_eq!(copper_weight_to_thickness(2.0), 0.07, epsilon = 1e-15);
    }
}
