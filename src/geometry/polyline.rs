//! Screen-space queries over polylines and polygons.
//!
//! These helpers are deterministic and side-effect free so interactive
//! tracking and tests consume the exact same geometry output.

use crate::geometry::ScreenPoint;

/// Projects `target` onto the segment `a..b`, clamped to the endpoints.
///
/// Returns `ScreenPoint::UNDEFINED` when `a` and `b` coincide, since a
/// zero-length segment has no direction to project onto.
#[must_use]
pub fn point_on_line(target: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> ScreenPoint {
    let direction = b - a;
    let length_squared = direction.length_squared();
    if length_squared == 0.0 {
        return ScreenPoint::UNDEFINED;
    }

    let t = ((target - a).dot(direction) / length_squared).clamp(0.0, 1.0);
    a + direction * t
}

/// Finds the point on the polyline closest to `target`.
///
/// Each consecutive segment contributes its clamped projection; the minimum
/// Euclidean distance wins and the first segment wins exact ties. Returns
/// `None` for polylines with fewer than two points.
#[must_use]
pub fn nearest_point_on_polyline(target: ScreenPoint, points: &[ScreenPoint]) -> Option<ScreenPoint> {
    if points.len() < 2 {
        return None;
    }

    let mut best: Option<(f64, ScreenPoint)> = None;
    for segment in points.windows(2) {
        let candidate = point_on_line(target, segment[0], segment[1]);
        let candidate = if candidate.is_defined() {
            candidate
        } else {
            // Coincident endpoints degenerate to the point itself.
            segment[0]
        };
        let distance = target.distance_squared_to(candidate);
        if best.map(|(min, _)| distance < min).unwrap_or(true) {
            best = Some((distance, candidate));
        }
    }

    best.map(|(_, point)| point)
}

/// Even-odd ray-casting membership test.
///
/// The polygon is treated as implicitly closed. Points exactly on a left or
/// bottom edge count as inside, right and top edges as outside; this keeps
/// adjacent polygons non-overlapping and is pinned by tests.
#[must_use]
pub fn point_in_polygon(point: ScreenPoint, polygon: &[ScreenPoint]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Arithmetic mean of the vertices.
///
/// Deliberately not the area-weighted centroid: label placement only needs
/// a representative interior point for typical convex outlines, and the
/// vertex average preserves the reference output. Accuracy degrades for
/// strongly concave or self-intersecting polygons.
#[must_use]
pub fn centroid(points: &[ScreenPoint]) -> ScreenPoint {
    if points.is_empty() {
        return ScreenPoint::UNDEFINED;
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for point in points {
        sum_x += point.x;
        sum_y += point.y;
    }
    let count = points.len() as f64;
    ScreenPoint::new(sum_x / count, sum_y / count)
}

#[cfg(test)]
mod tests {
    use super::{centroid, nearest_point_on_polyline, point_in_polygon, point_on_line};
    use crate::geometry::ScreenPoint;

    #[test]
    fn projection_clamps_to_segment_endpoints() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(10.0, 0.0);

        let mid = point_on_line(ScreenPoint::new(5.0, 3.0), a, b);
        assert_eq!(mid, ScreenPoint::new(5.0, 0.0));

        let before = point_on_line(ScreenPoint::new(-4.0, 2.0), a, b);
        assert_eq!(before, a);

        let after = point_on_line(ScreenPoint::new(14.0, -2.0), a, b);
        assert_eq!(after, b);
    }

    #[test]
    fn projection_onto_degenerate_segment_is_undefined() {
        let p = ScreenPoint::new(3.0, 3.0);
        assert!(!point_on_line(ScreenPoint::new(0.0, 0.0), p, p).is_defined());
    }

    #[test]
    fn nearest_point_prefers_first_segment_on_ties() {
        // Target is equidistant from both segments of a V shape.
        let points = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(10.0, 0.0),
            ScreenPoint::new(10.0, 10.0),
        ];
        let hit = nearest_point_on_polyline(ScreenPoint::new(9.0, 1.0), &points).expect("hit");
        assert_eq!(hit, ScreenPoint::new(9.0, 0.0));
    }

    #[test]
    fn unit_square_membership() {
        let square = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(1.0, 0.0),
            ScreenPoint::new(1.0, 1.0),
            ScreenPoint::new(0.0, 1.0),
        ];
        assert!(point_in_polygon(ScreenPoint::new(0.5, 0.5), &square));
        assert!(!point_in_polygon(ScreenPoint::new(2.0, 2.0), &square));
        // Edge convention: left edge inside, right edge outside.
        assert!(point_in_polygon(ScreenPoint::new(0.0, 0.5), &square));
        assert!(!point_in_polygon(ScreenPoint::new(1.0, 0.5), &square));
    }

    #[test]
    fn centroid_is_vertex_average() {
        let triangle = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(6.0, 0.0),
            ScreenPoint::new(0.0, 3.0),
        ];
        assert_eq!(centroid(&triangle), ScreenPoint::new(2.0, 1.0));
        assert!(!centroid(&[]).is_defined());
    }
}
