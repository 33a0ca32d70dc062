//! Single-layer spiral windings.
//!
//! [`allocate`] splits an annulus into turns whose widths minimize the total
//! DC resistance under a minimum spacing; [`Spiral::new`] turns that
//! partition into one continuous, optionally rounded copper outline.

pub mod allocator;
pub mod builder;
pub mod error;
pub mod params;
pub mod spiral;
pub mod turn;

pub use allocator::{allocate, RadialPartition, TurnBounds};
pub use error::{Constraint, SpiralError};
pub use params::{Allocation, SpiralParams};
pub use spiral::Spiral;
pub use turn::Turn;
