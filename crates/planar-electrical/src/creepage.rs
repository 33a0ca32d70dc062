//! Minimum conductor spacing per IPC-2221 table 6-1.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CreepageError;

/// Where the conductors sit and how they are protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    B1,
    B2,
    B3,
    B4,
    A5,
    A6,
    A7,
}

impl Classification {
    pub const ALL: [Classification; 7] = [
        Classification::B1,
        Classification::B2,
        Classification::B3,
        Classification::B4,
        Classification::A5,
        Classification::A6,
        Classification::A7,
    ];

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Classification::B1 => "Internal Conductors",
            Classification::B2 => "External Conductors, uncoated, sea level to 3050 m",
            Classification::B3 => "External Conductors, uncoated, over 3050 m",
            Classification::B4 => {
                "External Conductors, with permanent polymer coating (any elevation)"
            }
            Classification::A5 => {
                "External Conductors, with conformal coating over assembly (any elevation)"
            }
            Classification::A6 => "External Component lead/termination, uncoated",
            Classification::A7 => {
                "External Component lead termination, with conformal coating (any elevation)"
            }
        }
    }

    const fn column(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Classification {
    type Err = CreepageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CreepageError::UnknownClassification(s.to_string()))
    }
}

/// Upper voltage bound (V) and spacing (mm) per classification column.
const TABLE: [(f64, [f64; 7]); 9] = [
    (15.0, [0.05, 0.1, 0.1, 0.05, 0.13, 0.13, 0.13]),
    (30.0, [0.05, 0.1, 0.1, 0.05, 0.13, 0.25, 0.13]),
    (50.0, [0.1, 0.6, 0.6, 0.13, 0.13, 0.4, 0.13]),
    (100.0, [0.1, 0.6, 1.5, 0.13, 0.13, 0.5, 0.13]),
    (150.0, [0.2, 0.6, 3.2, 0.4, 0.4, 0.8, 0.4]),
    (170.0, [0.2, 1.25, 3.2, 0.4, 0.4, 0.8, 0.4]),
    (250.0, [0.2, 1.25, 6.4, 0.4, 0.4, 0.8, 0.4]),
    (300.0, [0.2, 1.25, 12.5, 0.4, 0.4, 0.8, 0.4]),
    (500.0, [0.25, 2.5, 12.5, 0.8, 0.8, 1.5, 0.8]),
];

/// Additional spacing (mm) per volt above the last table row.
const PER_VOLT: [f64; 7] = [0.0025, 0.005, 0.025, 0.00305, 0.00305, 0.00305, 0.00305];

/// Minimum spacing (mm) for a working `voltage` (V, RMS or DC peak).
pub fn creepage(voltage: f64, classification: Classification) -> Result<f64, CreepageError> {
    if !(voltage.is_finite() && voltage >= 0.0) {
        return Err(CreepageError::InvalidVoltage { voltage });
    }
    let column = classification.column();

    if let Some((_, row)) = TABLE.iter().find(|(limit, _)| *limit >= voltage) {
        return Ok(row[column]);
    }

    let (top, row) = TABLE[TABLE.len() - 1];
    Ok(row[column] + (voltage - top) * PER_VOLT[column])
}
