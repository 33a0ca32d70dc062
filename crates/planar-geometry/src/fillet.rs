//! Corner rounding.
//!
//! Every non-tangent junction of a path is replaced by an arc tangent to both
//! neighbours. The fillet center is found by offsetting the two neighbouring
//! primitives by the radius toward the inside of the turn and intersecting
//! the offsets.

use serde::Serialize;

use crate::error::GeometryError;
use crate::path::Path;
use crate::primitives::{Arc, ArcDirection, Segment};
use crate::{Point, TOLERANCE};

/// Cross product of unit tangents below which a junction counts as smooth.
const TANGENT_TOLERANCE: f64 = 1e-9;

const BISECTION_STEPS: usize = 48;

/// What was asked for and what was actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CornerRounding {
    pub requested: f64,
    pub applied: f64,
    /// Number of junctions that received a fillet.
    pub corners: usize,
}

impl CornerRounding {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            requested: 0.0,
            applied: 0.0,
            corners: 0,
        }
    }

    /// True when the requested radius did not fit and a smaller one was used.
    #[must_use]
    pub fn is_clamped(&self) -> bool {
        self.applied < self.requested - TOLERANCE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rounded {
    pub path: Path,
    pub rounding: CornerRounding,
}

#[derive(Debug, Clone, Copy)]
struct Fillet {
    arc: Arc,
    /// Tangent point on the incoming segment.
    from: Point,
    /// Tangent point on the outgoing segment.
    to: Point,
    trim_in: f64,
    trim_out: f64,
}

#[derive(Debug, Clone, Copy)]
enum Corner {
    /// Tangent-continuous or a full reversal; left as is.
    Smooth,
    Fillet(Fillet),
}

enum Offset {
    Line { point: Point, dir: Point },
    Circle { center: Point, radius: f64 },
}

impl Path {
    /// Rounds every corner with `radius`, clamping the radius down to the
    /// largest value whose fillets still fit.
    ///
    /// A non-positive radius returns the path unchanged.
    pub fn round_corners(&self, radius: f64) -> Result<Rounded, GeometryError> {
        if !(radius > 0.0) {
            return Ok(Rounded {
                path: self.clone(),
                rounding: CornerRounding {
                    requested: radius.max(0.0),
                    ..CornerRounding::none()
                },
            });
        }

        let (applied, corners) = match plan(self, radius) {
            Some(corners) => (radius, corners),
            None => {
                let mut lo = 0.0;
                let mut hi = radius;
                let mut best = None;
                for _ in 0..BISECTION_STEPS {
                    let mid = 0.5 * (lo + hi);
                    match plan(self, mid) {
                        Some(c) => {
                            lo = mid;
                            best = Some(c);
                        }
                        None => hi = mid,
                    }
                }
                match best {
                    Some(c) => (lo, c),
                    None => (0.0, vec![Corner::Smooth; junction_count(self)]),
                }
            }
        };

        let path = apply(self, &corners)?;
        let filleted = corners
            .iter()
            .filter(|c| matches!(c, Corner::Fillet(_)))
            .count();

        Ok(Rounded {
            path,
            rounding: CornerRounding {
                requested: radius,
                applied: if filleted == 0 { 0.0 } else { applied },
                corners: filleted,
            },
        })
    }
}

fn junction_count(path: &Path) -> usize {
    let n = path.len();
    if path.is_closed() {
        n
    } else {
        n - 1
    }
}

/// Junction `j` sits between segment `j` and segment `j + 1` (wrapping when closed).
fn plan(path: &Path, radius: f64) -> Option<Vec<Corner>> {
    let segs = path.segments();
    let n = segs.len();
    let corners: Vec<Corner> = (0..junction_count(path))
        .map(|j| corner(&segs[j], &segs[(j + 1) % n], radius))
        .collect::<Option<_>>()?;

    for (i, seg) in segs.iter().enumerate() {
        let before = incoming_corner(path, &corners, i).map_or(0.0, |f| f.trim_out);
        let after = corners.get(i).and_then(as_fillet).map_or(0.0, |f| f.trim_in);
        if before + after > seg.length() + TOLERANCE {
            return None;
        }
    }
    Some(corners)
}

fn as_fillet(c: &Corner) -> Option<&Fillet> {
    match c {
        Corner::Fillet(f) => Some(f),
        Corner::Smooth => None,
    }
}

fn incoming_corner<'a>(path: &Path, corners: &'a [Corner], i: usize) -> Option<&'a Fillet> {
    if i == 0 {
        if path.is_closed() {
            corners.last().and_then(as_fillet)
        } else {
            None
        }
    } else {
        corners.get(i - 1).and_then(as_fillet)
    }
}

fn apply(path: &Path, corners: &[Corner]) -> Result<Path, GeometryError> {
    let mut out: Vec<Segment> = Vec::with_capacity(path.len() + corners.len());
    for (i, seg) in path.segments().iter().enumerate() {
        let incoming = incoming_corner(path, corners, i);
        let outgoing = corners.get(i).and_then(as_fillet);

        let start = incoming.map_or(seg.start(), |f| f.to);
        let end = outgoing.map_or(seg.end(), |f| f.from);
        let remaining = seg.length()
            - incoming.map_or(0.0, |f| f.trim_out)
            - outgoing.map_or(0.0, |f| f.trim_in);

        if remaining > TOLERANCE {
            if incoming.is_some() || outgoing.is_some() {
                out.push(seg.with_endpoints(start, end)?);
            } else {
                out.push(*seg);
            }
        }
        if let Some(f) = outgoing {
            out.push(Segment::Arc(f.arc));
        }
    }
    Path::new(out, path.is_closed())
}

fn corner(incoming: &Segment, outgoing: &Segment, radius: f64) -> Option<Corner> {
    let t_in = incoming.end_tangent();
    let t_out = outgoing.start_tangent();
    let turn = t_in.cross(&t_out);
    if turn.abs() < TANGENT_TOLERANCE {
        return Some(Corner::Smooth);
    }

    // fillet center lies on the inside of the turn
    let side = turn.signum();
    let vertex = incoming.end();
    let center = intersect(
        &offset(incoming, side, radius)?,
        &offset(outgoing, side, radius)?,
    )
    .into_iter()
    .min_by(|a, b| a.distance(&vertex).total_cmp(&b.distance(&vertex)))?;

    let from = incoming.project(center);
    let to = outgoing.project(center);

    // tangent points must lie behind / ahead of the vertex, not on extensions
    if (vertex - from).dot(&t_in) < -TOLERANCE || (to - vertex).dot(&t_out) < -TOLERANCE {
        return None;
    }

    let direction = if side > 0.0 {
        ArcDirection::CounterClockwise
    } else {
        ArcDirection::Clockwise
    };
    let arc = Arc::new(
        center,
        radius,
        from.angle_from(&center),
        to.angle_from(&center),
        direction,
    )
    .ok()?;

    Some(Corner::Fillet(Fillet {
        arc,
        from,
        to,
        trim_in: incoming.distance_along(from, vertex),
        trim_out: outgoing.distance_along(vertex, to),
    }))
}

/// Offset of a segment's supporting curve by `distance`; `side` is +1 for left.
fn offset(segment: &Segment, side: f64, distance: f64) -> Option<Offset> {
    match segment {
        Segment::Line(l) => {
            let dir = l.direction();
            Some(Offset::Line {
                point: l.start() + dir.perp().scale(side * distance),
                dir,
            })
        }
        Segment::Arc(a) => {
            // the left of a counter-clockwise arc is its inside
            let inward = (side > 0.0) == (a.direction() == ArcDirection::CounterClockwise);
            let radius = if inward {
                a.radius() - distance
            } else {
                a.radius() + distance
            };
            (radius > TOLERANCE).then_some(Offset::Circle {
                center: a.center(),
                radius,
            })
        }
    }
}

fn intersect(a: &Offset, b: &Offset) -> Vec<Point> {
    match (a, b) {
        (Offset::Line { point: p, dir: d }, Offset::Line { point: q, dir: e }) => {
            let den = d.cross(e);
            if den.abs() < TANGENT_TOLERANCE {
                return vec![];
            }
            let t = (*q - *p).cross(e) / den;
            vec![*p + d.scale(t)]
        }
        (Offset::Line { point, dir }, Offset::Circle { center, radius })
        | (Offset::Circle { center, radius }, Offset::Line { point, dir }) => {
            let f = *point - *center;
            let b = f.dot(dir);
            let disc = b * b - (f.dot(&f) - radius * radius);
            if disc < 0.0 {
                return vec![];
            }
            let root = disc.sqrt();
            vec![
                *point + dir.scale(-b - root),
                *point + dir.scale(-b + root),
            ]
        }
        (
            Offset::Circle {
                center: c1,
                radius: r1,
            },
            Offset::Circle {
                center: c2,
                radius: r2,
            },
        ) => {
            let d = c1.distance(c2);
            if d < TOLERANCE || d > r1 + r2 || d < (r1 - r2).abs() {
                return vec![];
            }
            let along = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
            let h = (r1 * r1 - along * along).max(0.0).sqrt();
            let u = (*c2 - *c1).scale(1.0 / d);
            let m = *c1 + u.scale(along);
            vec![m + u.perp().scale(h), m - u.perp().scale(h)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Line;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn square(side: f64) -> Path {
        let p = [
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ];
        let segs = (0..4)
            .map(|i| Segment::Line(Line::new(p[i], p[(i + 1) % 4]).unwrap()))
            .collect();
        Path::closed(segs).unwrap()
    }

    #[test]
    fn zero_radius_keeps_sharp_corners() {
        let path = square(2.0);
        let rounded = path.round_corners(0.0).unwrap();
        assert_eq!(rounded.path, path);
        assert_eq!(rounded.rounding.corners, 0);
    }

    #[test]
    fn rounded_square_perimeter() {
        let r = 0.25;
        let rounded = square(2.0).round_corners(r).unwrap();
        assert_eq!(rounded.rounding.corners, 4);
        assert!(!rounded.rounding.is_clamped());
        assert_eq!(rounded.path.len(), 8);
        // four sides shortened by 2r each, plus one full circle
        assert_abs_diff_eq!(
            rounded.path.length(),
            4.0 * (2.0 - 2.0 * r) + 2.0 * PI * r,
            epsilon = 1e-9
        );
    }

    #[test]
    fn fillets_are_tangent_to_neighbours() {
        let rounded = square(3.0).round_corners(0.5).unwrap();
        let segs = rounded.path.segments();
        for i in 0..segs.len() {
            let a = segs[i];
            let b = segs[(i + 1) % segs.len()];
            assert!(a.end().approx_eq(&b.start()));
            assert_abs_diff_eq!(a.end_tangent().cross(&b.start_tangent()), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn oversized_radius_is_clamped_to_half_side() {
        let rounded = square(2.0).round_corners(5.0).unwrap();
        assert!(rounded.rounding.is_clamped());
        assert_abs_diff_eq!(rounded.rounding.requested, 5.0);
        assert_abs_diff_eq!(rounded.rounding.applied, 1.0, epsilon = 1e-6);
        assert!(rounded.rounding.corners > 0);
    }

    #[test]
    fn line_to_arc_fillet_touches_arc_circle() {
        // radial line into a counter-clockwise arc of radius 5
        let arc = Arc::new(Point::origin(), 5.0, 0.0, PI / 2.0, ArcDirection::CounterClockwise)
            .unwrap();
        let line = Line::new(Point::new(2.0, 0.0), Point::new(5.0, 0.0)).unwrap();
        let path = Path::open(vec![line.into(), arc.into()]).unwrap();
        let rounded = path.round_corners(0.5).unwrap();
        assert_eq!(rounded.rounding.corners, 1);

        let Segment::Arc(fillet) = rounded.path.segments()[1] else {
            panic!("expected fillet arc");
        };
        assert_abs_diff_eq!(fillet.radius(), 0.5, epsilon = 1e-12);
        // internally tangent: center sits radius - r from the arc center
        assert_abs_diff_eq!(fillet.center().norm(), 4.5, epsilon = 1e-9);
        // and r from the line
        assert_abs_diff_eq!(fillet.center().y, 0.5, epsilon = 1e-9);
    }
}
