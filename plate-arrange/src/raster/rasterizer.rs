use itertools::Itertools;
use log::debug;
use ndarray::Array2;

use crate::geometry::convex_hull::signed_area_x2;
use crate::geometry::primitives::Point;
use crate::raster::ShapeDescriptor;
use crate::util::FPA;

/// Cells on an edge, up to this tolerance, count as inside
const EDGE_TOLERANCE: f64 = 1e-9;

/// Converts a convex polygon in world coordinates into a [`ShapeDescriptor`].
///
/// World point `(x, y)` ends up in raster cell
/// `(round(y * scale) - offset_y, round(x * scale) - offset_x)`.
/// A cell `(r, c)` is filled when the point `(r, c)` of the shifted polygon lies inside every
/// half-plane spanned by its edges.
///
/// Only correct for convex polygons. Other input yields an unspecified raster, but never panics.
/// A polygon with fewer than 3 distinct vertices after scaling yields an empty descriptor.
pub fn rasterize_polygon(vertices: &[Point], scale: f64) -> ShapeDescriptor {
    //swap (x, y) into (row, col) and reverse the winding
    let mut swapped = vertices
        .iter()
        .rev()
        .map(|p| p.scale(scale))
        .map(|Point(x, y)| Point(y, x))
        .collect_vec();

    if n_distinct(&swapped) < 3 {
        debug!(
            "[RAST] degenerate polygon ({} vertices), empty raster",
            vertices.len()
        );
        return ShapeDescriptor::empty(scale);
    }

    let min_row = FPA(swapped.iter().map(|p| p.0).fold(f64::INFINITY, f64::min)).floor();
    let min_col = FPA(swapped.iter().map(|p| p.1).fold(f64::INFINITY, f64::min)).floor();

    swapped
        .iter_mut()
        .for_each(|p| *p = Point(p.0 - min_row as f64, p.1 - min_col as f64));

    let height = FPA(swapped.iter().map(|p| p.0).fold(0.0, f64::max)).ceil().max(1) as usize;
    let width = FPA(swapped.iter().map(|p| p.1).fold(0.0, f64::max)).ceil().max(1) as usize;

    let orientation = match signed_area_x2(&swapped) >= 0.0 {
        true => 1.0,
        false => -1.0,
    };

    let edges = (0..swapped.len())
        .map(|k| {
            let prev = (k + swapped.len() - 1) % swapped.len();
            (swapped[prev], swapped[k])
        })
        .collect_vec();

    let mut raster = Array2::from_shape_fn((height, width), |(r, c)| {
        let (r, c) = (r as f64, c as f64);
        edges
            .iter()
            .filter_map(|(p1, p2)| half_plane_side(*p1, *p2, r, c))
            .all(|side| orientation * side >= -EDGE_TOLERANCE)
    });

    if !raster.iter().any(|&cell| cell) {
        //a sliver thinner than a cell still claims one
        raster[[0, 0]] = true;
    }

    ShapeDescriptor::new(raster, min_col, min_row, scale)
}

/// Signed side of the point `(r, c)` relative to the directed edge `p1 -> p2`.
/// Positive on the left. `None` for zero-length edges, which do not constrain anything.
fn half_plane_side(p1: Point, p2: Point, r: f64, c: f64) -> Option<f64> {
    let (dr, dc) = (p2.0 - p1.0, p2.1 - p1.1);
    match (dr == 0.0, dc == 0.0) {
        (true, true) => None,
        //edge along a row: only the row of the cell matters
        (true, false) => Some(-dc.signum() * (r - p1.0)),
        //edge along a column: only the column of the cell matters
        (false, true) => Some(dr.signum() * (c - p1.1)),
        (false, false) => Some(dr * (c - p1.1) - dc * (r - p1.0)),
    }
}

fn n_distinct(points: &[Point]) -> usize {
    let mut distinct: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if !distinct
            .iter()
            .any(|q| FPA(p.0) == FPA(q.0) && FPA(p.1) == FPA(q.1))
        {
            distinct.push(*p);
        }
    }
    distinct.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_plane_special_cases_agree_with_cross_product() {
        let (p1, p2) = (Point(0.0, 0.0), Point(0.0, 5.0));
        let general = |r: f64, c: f64| (p2.0 - p1.0) * (c - p1.1) - (p2.1 - p1.1) * (r - p1.0);
        for (r, c) in [(1.0, 1.0), (-2.0, 3.0), (3.0, 7.0)] {
            let side = half_plane_side(p1, p2, r, c).unwrap();
            assert_eq!(side.signum(), general(r, c).signum());
        }
        assert_eq!(half_plane_side(p1, p1, 1.0, 1.0), None);
    }

    #[test]
    fn duplicate_vertices_are_not_distinct() {
        let points = [Point(0.0, 0.0), Point(0.0, 0.0), Point(1.0, 1.0)];
        assert_eq!(n_distinct(&points), 2);
    }
}
