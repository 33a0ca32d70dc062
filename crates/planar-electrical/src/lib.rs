//! Electrical side of a planar winding: DC resistance from the conductor
//! geometry, temperature-dependent resistivity, and IPC-2221 creepage.

pub mod creepage;
pub mod error;
pub mod material;
pub mod resistance;

pub use creepage::{creepage, Classification};
pub use error::{CreepageError, MaterialError, ResistanceError};
pub use material::{Conductor, Resistivity, COPPER};
pub use resistance::{
    annulus_resistance, copper_weight_to_thickness, estimate_resistance,
    estimate_turn_resistances, ConductorSection, Winding,
};
