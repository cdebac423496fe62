//! Point-in-polygon and segment-intersection tests.

use veneer_math::{Point2, Point3};

/// Test whether a point lies inside a polygon by ray casting.
///
/// Casts a horizontal ray from `point` and toggles containment at every
/// genuine edge crossing (even-odd rule). The polygon is implicitly closed
/// between its last and first vertices.
///
/// A polygon with fewer than 3 vertices has no interior and tests outside.
/// The caller must have wrap-aligned both the polygon and the point to a
/// common anchor. Self-intersecting input gets the conventional even-odd
/// answer.
///
/// Boundary behavior: the crossing test uses a strict `<` against the edge,
/// so a point exactly on a left-going edge counts inside while one on a
/// right-going edge counts outside.
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        let crosses = ((yi > point.y) != (yj > point.y))
            && point.x < (xj - xi) * (point.y - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Intersection of segments `(p1, p2)` and `(p3, p4)`, tested in the XY
/// projection.
///
/// Uses the determinant form of the two-line intersection; a zero
/// denominator (parallel or coincident lines) yields `None`, as does an
/// intersection point outside either segment's bounding range. The
/// returned point carries `p1.z` — strokes live on a locally planar patch
/// of the surface, so depth is passed through rather than interpolated.
pub fn segment_intersection(
    p1: &Point3,
    p2: &Point3,
    p3: &Point3,
    p4: &Point3,
) -> Option<Point3> {
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);
    let (x4, y4) = (p4.x, p4.y);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom == 0.0 {
        return None;
    }

    let px = ((x1 * y2 - y1 * x2) * (x3 - x4) - (x1 - x2) * (x3 * y4 - y3 * x4)) / denom;
    let py = ((x1 * y2 - y1 * x2) * (y3 - y4) - (y1 - y2) * (x3 * y4 - y3 * x4)) / denom;

    let in_range = |lo: f64, hi: f64, t: f64| t >= lo.min(hi) && t <= lo.max(hi);
    if !in_range(x1, x2, px)
        || !in_range(x3, x4, px)
        || !in_range(y1, y2, py)
        || !in_range(y3, y4, py)
    {
        return None;
    }

    Some(Point3::new(px, py, p1.z))
}
