use crate::geometry::primitives::Point;
use ordered_float::OrderedFloat;

/// Filters a set of points to only include those that are part of the convex hull.
/// The hull is returned in counterclockwise order, without collinear points.
pub fn convex_hull_from_points(mut points: Vec<Point>) -> Vec<Point> {
    //https://en.wikibooks.org/wiki/Algorithm_Implementation/Geometry/Convex_hull/Monotone_chain

    //sort the points by x coordinate, then y
    points.sort_by_key(|p| (OrderedFloat(p.0), OrderedFloat(p.1)));
    points.dedup();

    if points.len() < 3 {
        return points;
    }

    let mut lower_hull = points
        .iter()
        .fold(vec![], |hull, p| grow_convex_hull(hull, *p));
    let mut upper_hull = points
        .iter()
        .rev()
        .fold(vec![], |hull, p| grow_convex_hull(hull, *p));

    //First and last element of both hull parts are the same point
    upper_hull.pop();
    lower_hull.pop();

    lower_hull.append(&mut upper_hull);
    lower_hull
}

fn grow_convex_hull(mut h: Vec<Point>, next: Point) -> Vec<Point> {
    //pop all points from the hull which will be made irrelevant due to the new point
    while h.len() >= 2 && cross(h[h.len() - 2], h[h.len() - 1], next) <= 0.0 {
        h.pop();
    }
    h.push(next);
    h
}

fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

/// Twice the signed area of a polygon (shoelace formula).
/// Positive for counterclockwise winding, negative for clockwise.
pub fn signed_area_x2(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.0 * b.1 - b.0 * a.1
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hull_drops_interior_and_collinear_points() {
        let points = vec![
            Point(0.0, 0.0),
            Point(2.0, 0.0),
            Point(4.0, 0.0),
            Point(4.0, 4.0),
            Point(2.0, 2.0),
            Point(0.0, 4.0),
            Point(0.0, 4.0),
        ];
        let hull = convex_hull_from_points(points);
        assert_eq!(hull.len(), 4);
        assert!(signed_area_x2(&hull) > 0.0);
        assert_eq!(signed_area_x2(&hull), 32.0);
    }

    #[test]
    fn hull_of_too_few_points() {
        let hull = convex_hull_from_points(vec![Point(1.0, 1.0), Point(1.0, 1.0)]);
        assert_eq!(hull, vec![Point(1.0, 1.0)]);
    }
}
