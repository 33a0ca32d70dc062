//! Radial partition of the annulus into turns.
//!
//! A turn of width `w` at mean radius `m` has resistance proportional to
//! `m / w`. Minimizing `Σ m_i / w_i` subject to `Σ w_i = W` gives
//! `w_i ∝ sqrt(m_i)`; since `m_i` depends on the widths of the turns inside
//! it, the allocation is iterated to a fixed point.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Constraint, SpiralError};
use crate::params::{Allocation, SpiralParams};

pub const MAX_ITERATIONS: usize = 100;

/// Largest per-turn width change (mm) at which the fixed point is accepted.
pub const CONVERGENCE: f64 = 1e-12;

/// Radial extent of one turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnBounds {
    pub inner: f64,
    pub outer: f64,
}

impl TurnBounds {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.outer - self.inner
    }

    #[must_use]
    pub fn mean_radius(&self) -> f64 {
        0.5 * (self.inner + self.outer)
    }
}

/// Turns ordered from the inside out. The outer bound of the last turn is the
/// annulus outer radius exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialPartition {
    bounds: Vec<TurnBounds>,
    spacing: f64,
    iterations: usize,
}

impl RadialPartition {
    #[must_use]
    pub fn bounds(&self) -> &[TurnBounds] {
        &self.bounds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    #[must_use]
    pub fn widths(&self) -> Vec<f64> {
        self.bounds.iter().map(TurnBounds::width).collect()
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Fixed-point iterations used; zero for closed-form allocations.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `Σ mean_radius / width`, proportional to the DC resistance of the
    /// winding for a fixed sheet resistance.
    #[must_use]
    pub fn resistance_proxy(&self) -> f64 {
        self.bounds
            .iter()
            .map(|b| b.mean_radius() / b.width())
            .sum()
    }
}

/// Splits the annulus described by `params` into `num_turns` turns.
pub fn allocate(params: &SpiralParams) -> Result<RadialPartition, SpiralError> {
    params.validate()?;

    let n = params.num_turns;
    let reserved = params.reserved_spacing();
    let available = params.radial_span() - reserved;
    if available <= 0.0 {
        return Err(SpiralError::Infeasible {
            constraint: Constraint::ReservedSpacing { turns: n },
            value: reserved,
            limit: params.radial_span(),
        });
    }

    // no strategy can make its narrowest turn wider than the mean
    let mean_width = available / n as f64;
    if mean_width < params.min_trace_width {
        return Err(SpiralError::Infeasible {
            constraint: Constraint::MinTraceWidth { turn: 0 },
            value: mean_width,
            limit: params.min_trace_width,
        });
    }

    let gap = params.terminal_gap();
    if params.inner_radius <= gap {
        return Err(SpiralError::Infeasible {
            constraint: Constraint::TerminalSlot,
            value: gap,
            limit: params.inner_radius,
        });
    }

    let (widths, iterations) = match params.allocation {
        Allocation::MinimumResistance => {
            minimum_resistance(params.inner_radius, params.min_spacing, available, n)
        }
        Allocation::Uniform => (vec![available / n as f64; n], 0),
        Allocation::Geometric => (geometric(params), 0),
    };

    let bounds = stack(params, &widths);
    for (turn, b) in bounds.iter().enumerate() {
        if b.width() < params.min_trace_width {
            return Err(SpiralError::Infeasible {
                constraint: Constraint::MinTraceWidth { turn },
                value: b.width(),
                limit: params.min_trace_width,
            });
        }
    }

    debug!(
        allocation = %params.allocation,
        turns = n,
        iterations,
        "allocated turn widths"
    );

    Ok(RadialPartition {
        bounds,
        spacing: params.min_spacing,
        iterations,
    })
}

fn minimum_resistance(inner: f64, spacing: f64, available: f64, n: usize) -> (Vec<f64>, usize) {
    let mut widths = vec![available / n as f64; n];

    for iteration in 1..=MAX_ITERATIONS {
        let mut radius = inner;
        let roots: Vec<f64> = widths
            .iter()
            .map(|w| {
                let mean = radius + 0.5 * w;
                radius += w + spacing;
                mean.sqrt()
            })
            .collect();
        let total: f64 = roots.iter().sum();

        let next: Vec<f64> = roots.iter().map(|r| available * r / total).collect();
        let delta = next
            .iter()
            .zip(&widths)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        widths = next;

        debug!(iteration, delta, "width allocation step");
        if delta < CONVERGENCE {
            return (widths, iteration);
        }
    }

    warn!(
        iterations = MAX_ITERATIONS,
        "width allocation did not converge, using last iterate"
    );
    (widths, MAX_ITERATIONS)
}

/// Inner radii `r_i = a^((n-i)/n) * b^(i/n)`; each turn fills the room up to
/// the next inner radius less the spacing.
fn geometric(params: &SpiralParams) -> Vec<f64> {
    let n = params.num_turns;
    let (a, b) = (params.inner_radius, params.outer_radius);
    let radii: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            a.powf(1.0 - t) * b.powf(t)
        })
        .collect();

    let mut widths: Vec<f64> = radii
        .windows(2)
        .map(|pair| pair[1] - pair[0] - params.min_spacing)
        .collect();
    widths.push(b - radii[n - 1]);
    widths
}

fn stack(params: &SpiralParams, widths: &[f64]) -> Vec<TurnBounds> {
    let mut inner = params.inner_radius;
    let mut bounds: Vec<TurnBounds> = widths
        .iter()
        .map(|w| {
            let b = TurnBounds {
                inner,
                outer: inner + w,
            };
            inner = b.outer + params.min_spacing;
            b
        })
        .collect();
    if let Some(last) = bounds.last_mut() {
        last.outer = params.outer_radius;
    }
    bounds
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::params::DEFAULT_MIN_TRACE_WIDTH;

    fn params(inner: f64, outer: f64, turns: usize, spacing: f64) -> SpiralParams {
        SpiralParams::builder()
            .inner_radius(inner)
            .outer_radius(outer)
            .num_turns(turns)
            .min_spacing(spacing)
            .build()
    }

    #[test]
    fn three_turn_partition_fills_annulus() {
        let p = allocate(&params(6.0, 12.0, 3, 0.2)).unwrap();
        let widths = p.widths();
        assert_eq!(widths.len(), 3);
        assert_abs_diff_eq!(widths.iter().sum::<f64>() + 2.0 * 0.2, 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(widths[0], 1.646_288, epsilon = 1e-5);
        assert_abs_diff_eq!(widths[1], 1.867_505, epsilon = 1e-5);
        assert_abs_diff_eq!(widths[2], 2.086_207, epsilon = 1e-5);
        assert_eq!(p.bounds()[2].outer, 12.0);
        assert!(p.iterations() > 0 && p.iterations() < MAX_ITERATIONS);
    }

    #[test]
    fn widths_grow_outward() {
        let p = allocate(&params(2.0, 20.0, 4, 0.2)).unwrap();
        let widths = p.widths();
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn spacing_between_turns_is_exact() {
        let p = allocate(&params(2.0, 20.0, 4, 0.3)).unwrap();
        for pair in p.bounds().windows(2) {
            assert_abs_diff_eq!(pair[1].inner - pair[0].outer, 0.3, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_turn_takes_whole_annulus() {
        let p = allocate(&params(100.0, 101.0, 1, 0.0)).unwrap();
        assert_eq!(p.bounds(), &[TurnBounds { inner: 100.0, outer: 101.0 }]);
    }

    #[test]
    fn optimal_beats_uniform() {
        for (a, b, n, s) in [(6.0, 12.0, 3, 0.2), (2.0, 20.0, 4, 0.2), (1.0, 30.0, 8, 0.15)] {
            let base = params(a, b, n, s);
            let optimal = allocate(&base).unwrap().resistance_proxy();
            let uniform = allocate(&SpiralParams {
                allocation: Allocation::Uniform,
                ..base
            })
            .unwrap()
            .resistance_proxy();
            assert!(optimal < uniform, "{optimal} >= {uniform}");
        }
    }

    #[test]
    fn uniform_widths_are_equal() {
        let p = allocate(&SpiralParams {
            allocation: Allocation::Uniform,
            ..params(6.0, 12.0, 3, 0.2)
        })
        .unwrap();
        for w in p.widths() {
            assert_abs_diff_eq!(w, 5.6 / 3.0, epsilon = 1e-12);
        }
        assert_eq!(p.iterations(), 0);
    }

    #[test]
    fn geometric_radii_follow_progression() {
        let p = allocate(&SpiralParams {
            allocation: Allocation::Geometric,
            ..params(6.0, 12.0, 3, 0.2)
        })
        .unwrap();
        let ratio = 2f64.powf(1.0 / 3.0);
        assert_abs_diff_eq!(p.bounds()[1].inner, 6.0 * ratio, epsilon = 1e-9);
        assert_abs_diff_eq!(p.bounds()[2].inner, 6.0 * ratio * ratio, epsilon = 1e-9);
        assert_abs_diff_eq!(p.widths()[0], 1.359_526, epsilon = 1e-5);
    }

    #[test]
    fn too_many_turns_is_infeasible() {
        let err = allocate(&params(10.0, 11.0, 50, 0.5)).unwrap_err();
        match err {
            SpiralError::Infeasible {
                constraint: Constraint::ReservedSpacing { turns },
                value,
                limit,
            } => {
                assert_eq!(turns, 50);
                assert_abs_diff_eq!(value, 24.5, epsilon = 1e-12);
                assert_abs_diff_eq!(limit, 1.0, epsilon = 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn trace_floor_is_enforced() {
        // 0.9 mm of copper over 10 turns leaves 0.09 mm each
        let err = allocate(&params(10.0, 11.8, 10, 0.1)).unwrap_err();
        assert!(matches!(
            err,
            SpiralError::Infeasible {
                constraint: Constraint::MinTraceWidth { turn: 0 },
                ..
            }
        ));
    }

    #[test]
    fn huge_turn_count_without_spacing_is_rejected() {
        let err = allocate(&params(6.0, 12.0, 1 << 61, 0.0)).unwrap_err();
        match err {
            SpiralError::Infeasible {
                constraint: Constraint::MinTraceWidth { turn: 0 },
                value,
                limit,
            } => {
                assert!(value < limit);
                assert_eq!(limit, DEFAULT_MIN_TRACE_WIDTH);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn terminal_slot_must_fit_inside_inner_radius() {
        let err = allocate(&params(0.2, 10.0, 2, 0.5)).unwrap_err();
        assert!(matches!(
            err,
            SpiralError::Infeasible {
                constraint: Constraint::TerminalSlot,
                ..
            }
        ));
    }

    #[test]
    fn invalid_arguments_surface_before_allocation() {
        let err = allocate(&params(-1.0, 10.0, 2, 0.5)).unwrap_err();
        assert!(matches!(err, SpiralError::InvalidArgument { name: "inner_radius", .. }));
    }
}
