use planar_geometry::{Axis, Point, Transform};
use planar_spiral::{allocate, Allocation, Spiral, SpiralError, SpiralParams};
use proptest::prelude::*;

fn feasible_params() -> impl Strategy<Value = SpiralParams> {
    (1.0f64..20.0, 2.0f64..40.0, 1usize..8, 0.05f64..0.5).prop_map(
        |(inner, span, turns, spacing)| {
            SpiralParams::builder()
                .inner_radius(inner)
                .outer_radius(inner + span)
                .num_turns(turns)
                .min_spacing(spacing)
                .min_trace_width(0.05)
                .build()
        },
    )
}

proptest! {
    #[test]
    fn widths_and_spacing_fill_the_annulus(params in feasible_params()) {
        match allocate(&params) {
            Ok(p) => {
                let filled = p.widths().iter().sum::<f64>() + params.reserved_spacing();
                prop_assert!((filled - params.radial_span()).abs() < 1e-9);
                prop_assert!(p.widths().iter().all(|w| *w >= params.min_trace_width));
            }
            Err(SpiralError::Infeasible { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected {other:?}"),
        }
    }

    #[test]
    fn minimum_resistance_never_loses_to_uniform(params in feasible_params()) {
        let uniform = SpiralParams { allocation: Allocation::Uniform, ..params.clone() };
        if let (Ok(best), Ok(flat)) = (allocate(&params), allocate(&uniform)) {
            prop_assert!(best.resistance_proxy() <= flat.resistance_proxy() + 1e-9);
        }
    }

    #[test]
    fn outline_is_closed(params in feasible_params(), corner in 0.0f64..2.0) {
        let params = SpiralParams { corner_radius: corner, ..params };
        if let Ok(spiral) = Spiral::new(&params) {
            prop_assert!(spiral.outline().is_closed());
            prop_assert!(spiral.rounding().applied <= corner + 1e-9);
        }
    }

    #[test]
    fn transforms_preserve_turn_widths(params in feasible_params(), angle in -6.0f64..6.0) {
        if let Ok(spiral) = Spiral::new(&params) {
            let moved = spiral
                .rotate_about(Point::new(3.0, -1.0), angle)
                .mirror(Axis::X)
                .translate(10.0, 4.0);
            prop_assert_eq!(moved.num_turns(), spiral.num_turns());
            for (a, b) in spiral.turns().iter().zip(moved.turns()) {
                prop_assert!((a.width() - b.width()).abs() < 1e-12);
                prop_assert!((a.conductor_length() - b.conductor_length()).abs() < 1e-9);
            }
            prop_assert!((spiral.outline().length() - moved.outline().length()).abs() < 1e-6);
        }
    }
}
