use std::f64::consts::PI;

use itertools::Itertools;

use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::primitives::Point;

/// Regular polygon with `segments` sides that circumscribes a disk of `radius` around the origin.
///
/// The vertices are rotated half a segment so that, for a segment count divisible by four,
/// the flat sides sit on the axes at exactly `radius`. The polygon never lies inside the disk,
/// so a dilation with it never undershoots the requested clearance.
pub fn approximated_circle(radius: f64, segments: usize) -> Vec<Point> {
    let n = segments.max(3);
    let circumradius = radius / (PI / n as f64).cos();
    (0..n)
        .map(|i| {
            let angle = (i as f64 + 0.5) * 2.0 * PI / n as f64;
            Point(circumradius * angle.cos(), circumradius * angle.sin())
        })
        .collect()
}

/// Dilates a convex polygon by `margin` world units.
///
/// Returns the convex hull of the Minkowski sum of `hull` with [`approximated_circle`].
/// A non-positive margin returns the convex hull of `hull` itself.
pub fn dilate_convex(hull: &[Point], margin: f64, segments: usize) -> Vec<Point> {
    if margin <= 0.0 || segments < 3 {
        return convex_hull_from_points(hull.to_vec());
    }
    let disk = approximated_circle(margin, segments);
    let sums = hull
        .iter()
        .cartesian_product(disk.iter())
        .map(|(p, d)| *p + *d)
        .collect_vec();
    convex_hull_from_points(sums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::Rect;
    use float_cmp::approx_eq;

    #[test]
    fn circle_flat_sides_on_axes() {
        let circle = approximated_circle(2.0, 8);
        let bbox = Rect::bounding(&circle).unwrap();
        assert!(approx_eq!(f64, bbox.x_max, 2.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.y_min, -2.0, epsilon = 1e-9));
    }

    #[test]
    fn dilated_square_grows_by_margin() {
        let square = Rect::centered(20.0, 20.0).corners();
        let dilated = dilate_convex(&square, 2.0, 8);
        let bbox = Rect::bounding(&dilated).unwrap();
        assert!(approx_eq!(f64, bbox.x_min, -12.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.x_max, 12.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.y_min, -12.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.y_max, 12.0, epsilon = 1e-9));
    }

    #[test]
    fn zero_margin_keeps_hull() {
        let square = Rect::centered(10.0, 10.0).corners();
        assert_eq!(dilate_convex(&square, 0.0, 8).len(), 4);
    }
}
