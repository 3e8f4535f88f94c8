//! Cohen–Sutherland line clipping against an axis-aligned rectangle.

use crate::geometry::{PlotRect, ScreenPoint};

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(rect: PlotRect, point: ScreenPoint) -> u8 {
    let mut code = INSIDE;
    if point.x < rect.left() {
        code |= LEFT;
    } else if point.x > rect.right() {
        code |= RIGHT;
    }
    if point.y < rect.top() {
        code |= TOP;
    } else if point.y > rect.bottom() {
        code |= BOTTOM;
    }
    code
}

/// Membership test reusing the outcode classification.
#[must_use]
pub fn is_inside(rect: PlotRect, point: ScreenPoint) -> bool {
    point.is_defined() && outcode(rect, point) == INSIDE
}

/// Clips the segment `p0..p1` against `rect`.
///
/// Returns `None` when the segment lies entirely outside, the original
/// endpoints when entirely inside, and the boundary intersection otherwise.
/// Zero-length segments classify as a point and never loop.
#[must_use]
pub fn clip_line(
    rect: PlotRect,
    p0: ScreenPoint,
    p1: ScreenPoint,
) -> Option<(ScreenPoint, ScreenPoint)> {
    if !p0.is_defined() || !p1.is_defined() {
        return None;
    }

    let mut a = p0;
    let mut b = p1;
    let mut code_a = outcode(rect, a);
    let mut code_b = outcode(rect, b);

    loop {
        if code_a | code_b == INSIDE {
            return Some((a, b));
        }
        if code_a & code_b != INSIDE {
            return None;
        }

        // At least one endpoint is outside; move it to the rect boundary.
        let code_out = if code_a != INSIDE { code_a } else { code_b };
        let moved = intersect_boundary(rect, a, b, code_out)?;

        if code_out == code_a {
            a = moved;
            code_a = outcode(rect, a);
        } else {
            b = moved;
            code_b = outcode(rect, b);
        }
    }
}

fn intersect_boundary(
    rect: PlotRect,
    a: ScreenPoint,
    b: ScreenPoint,
    code_out: u8,
) -> Option<ScreenPoint> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    // An axis-parallel or degenerate segment cannot cross the perpendicular
    // boundary it was classified against.
    if code_out & TOP != INSIDE {
        if dy == 0.0 {
            return None;
        }
        Some(ScreenPoint::new(
            a.x + dx * (rect.top() - a.y) / dy,
            rect.top(),
        ))
    } else if code_out & BOTTOM != INSIDE {
        if dy == 0.0 {
            return None;
        }
        Some(ScreenPoint::new(
            a.x + dx * (rect.bottom() - a.y) / dy,
            rect.bottom(),
        ))
    } else if code_out & RIGHT != INSIDE {
        if dx == 0.0 {
            return None;
        }
        Some(ScreenPoint::new(
            rect.right(),
            a.y + dy * (rect.right() - a.x) / dx,
        ))
    } else {
        if dx == 0.0 {
            return None;
        }
        Some(ScreenPoint::new(
            rect.left(),
            a.y + dy * (rect.left() - a.x) / dx,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{clip_line, is_inside};
    use crate::geometry::{PlotRect, ScreenPoint};

    fn rect_10() -> PlotRect {
        PlotRect::new(0.0, 0.0, 10.0, 10.0).expect("rect")
    }

    #[test]
    fn horizontal_crossing_segment_is_trimmed_to_both_edges() {
        let (a, b) = clip_line(
            rect_10(),
            ScreenPoint::new(-5.0, 5.0),
            ScreenPoint::new(15.0, 5.0),
        )
        .expect("crosses rect");
        assert_eq!(a, ScreenPoint::new(0.0, 5.0));
        assert_eq!(b, ScreenPoint::new(10.0, 5.0));
    }

    #[test]
    fn fully_inside_segment_is_unchanged() {
        let p0 = ScreenPoint::new(2.0, 2.0);
        let p1 = ScreenPoint::new(8.0, 7.0);
        assert_eq!(clip_line(rect_10(), p0, p1), Some((p0, p1)));
    }

    #[test]
    fn fully_outside_segment_is_rejected() {
        assert!(
            clip_line(
                rect_10(),
                ScreenPoint::new(-5.0, -5.0),
                ScreenPoint::new(-1.0, -2.0),
            )
            .is_none()
        );
        // Outside without sharing an outcode region.
        assert!(
            clip_line(
                rect_10(),
                ScreenPoint::new(-2.0, -2.0),
                ScreenPoint::new(-2.0, 12.0),
            )
            .is_none()
        );
    }

    #[test]
    fn zero_length_segment_terminates() {
        let inside = ScreenPoint::new(4.0, 4.0);
        assert_eq!(clip_line(rect_10(), inside, inside), Some((inside, inside)));

        let outside = ScreenPoint::new(-4.0, 4.0);
        assert!(clip_line(rect_10(), outside, outside).is_none());
    }

    #[test]
    fn diagonal_segment_clips_to_corner_region() {
        let (a, b) = clip_line(
            rect_10(),
            ScreenPoint::new(-5.0, -5.0),
            ScreenPoint::new(15.0, 15.0),
        )
        .expect("crosses rect");
        assert_eq!(a, ScreenPoint::new(0.0, 0.0));
        assert_eq!(b, ScreenPoint::new(10.0, 10.0));
    }

    #[test]
    fn is_inside_matches_outcode_classification() {
        assert!(is_inside(rect_10(), ScreenPoint::new(5.0, 5.0)));
        assert!(is_inside(rect_10(), ScreenPoint::new(0.0, 10.0)));
        assert!(!is_inside(rect_10(), ScreenPoint::new(-0.1, 5.0)));
        assert!(!is_inside(rect_10(), ScreenPoint::UNDEFINED));
    }
}
