//! Per-turn path construction and stitching.
//!
//! Turns are drawn around the origin. Every turn keeps a jog slot on the
//! negative x axis: below it the turn's inner edge steps out to the next turn
//! along a vertical wall, and the outer edge of the next turn steps back in
//! along a parallel wall. The innermost turn starts at a radial terminal cut
//! one terminal gap to the right of that slot.

use planar_geometry::{Arc, ArcDirection, GeometryError, Line, Path, Point, Rounded, Segment};

use crate::allocator::RadialPartition;
use crate::turn::Turn;

/// Point on the circle of radius `r` whose distance from the slot axis is `c`,
/// on the lower half-plane.
fn slot_point(r: f64, c: f64) -> Point {
    Point::new(-c, -(r * r - c * c).max(0.0).sqrt())
}

/// Builds turn `index` of `partition` around the origin.
pub fn build_turn(
    partition: &RadialPartition,
    index: usize,
    terminal_gap: f64,
) -> Result<Turn, GeometryError> {
    let bounds = partition.bounds();
    let turn = bounds[index];
    let (a, b) = (turn.inner, turn.outer);
    let next = bounds.get(index + 1);
    let terminal = bounds[0].inner - terminal_gap;
    let (entry, exit) = match index.checked_sub(1).map(|i| bounds[i]) {
        Some(prev) => (prev.inner, prev.outer),
        None => (terminal, terminal),
    };
    let origin = Point::origin();
    let jog_inner = Point::new(-a, 0.0);

    let inner_arc = Arc::from_endpoints(
        origin,
        slot_point(a, entry),
        jog_inner,
        ArcDirection::CounterClockwise,
    )?;
    let step_to = next.map_or(b, |n| n.inner);
    let inner_wall = Line::new(jog_inner, slot_point(step_to, a))?;

    let mut outer_segments: Vec<Segment> = Vec::with_capacity(3);
    let mut crossing_length = 0.0;
    let outer_start = match next {
        Some(n) => {
            let jog_outer = Point::new(-b, 0.0);
            let wall = Line::new(slot_point(n.outer, b), jog_outer)?;
            crossing_length = 0.5 * (inner_wall.length() + wall.length());
            outer_segments.push(wall.into());
            jog_outer
        }
        None => slot_point(b, a),
    };
    let outer_arc = Arc::from_endpoints(
        origin,
        outer_start,
        slot_point(b, exit),
        ArcDirection::Clockwise,
    )?;
    outer_segments.push(outer_arc.into());
    if index == 0 {
        outer_segments.push(Line::new(slot_point(b, terminal), slot_point(a, terminal))?.into());
    }

    Ok(Turn::new(
        index,
        a,
        b,
        inner_arc,
        outer_arc,
        Path::open(vec![inner_arc.into(), inner_wall.into()])?,
        Path::open(outer_segments)?,
        crossing_length,
    ))
}

/// Joins the turns into one closed clockwise outline: inner edges from the
/// inside out, then outer edges back in, closed by the terminal cut. Junctions
/// are rounded with `corner_radius`, clamped to what fits.
pub fn stitch(turns: &[Turn], corner_radius: f64) -> Result<Rounded, GeometryError> {
    let pieces = turns
        .iter()
        .map(Turn::inner_edge)
        .chain(turns.iter().rev().map(Turn::outer_edge));
    Path::join(pieces, true)?.round_corners(corner_radius)
}
