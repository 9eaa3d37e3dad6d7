use itertools::Itertools;
use ndarray::Array2;

use crate::geometry::primitives::Point;
use crate::raster::rasterize_polygon;
use crate::util::assertions;

/// Binary raster of a polygon, positioned relative to the local origin of its object.
///
/// Cell `(r, c)` of the raster corresponds to cell `(r + offset_y, c + offset_x)` of the
/// object's local frame, in units of `1 / scale`.
/// Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDescriptor {
    raster: Array2<bool>,
    offset_x: i64,
    offset_y: i64,
    scale: f64,
    /// Filled cells of `raster`, in row-major order
    filled: Vec<(usize, usize)>,
}

impl ShapeDescriptor {
    pub fn new(raster: Array2<bool>, offset_x: i64, offset_y: i64, scale: f64) -> Self {
        let filled = raster
            .indexed_iter()
            .filter(|(_, cell)| **cell)
            .map(|(idx, _)| idx)
            .collect_vec();
        Self {
            raster,
            offset_x,
            offset_y,
            scale,
            filled,
        }
    }

    /// Descriptor of a degenerate polygon. It fits nowhere.
    pub fn empty(scale: f64) -> Self {
        Self::new(Array2::from_elem((0, 0), false), 0, 0, scale)
    }

    pub fn raster(&self) -> &Array2<bool> {
        &self.raster
    }

    pub fn offset_x(&self) -> i64 {
        self.offset_x
    }

    pub fn offset_y(&self) -> i64 {
        self.offset_y
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of rows of the raster
    pub fn height(&self) -> usize {
        self.raster.nrows()
    }

    /// Number of columns of the raster
    pub fn width(&self) -> usize {
        self.raster.ncols()
    }

    /// Area of the bounding box of the raster, in cells. Used to order objects.
    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    /// Filled cells as `(row, col)`, in row-major order
    pub fn filled_cells(&self) -> &[(usize, usize)] {
        &self.filled
    }

    pub fn n_filled(&self) -> usize {
        self.filled.len()
    }
}

/// Rasterizes both polygons of an object at the same scale.
///
/// Returns `(offset_shape, hull_shape)`: the first is used to test where the object fits,
/// the second to mark the bed as occupied once it is placed.
pub fn make_shape_descriptor(
    hull: &[Point],
    offset: &[Point],
    scale: f64,
) -> (ShapeDescriptor, ShapeDescriptor) {
    let offset_shape = rasterize_polygon(offset, scale);
    let hull_shape = rasterize_polygon(hull, scale);
    debug_assert!(assertions::descriptor_pair_consistent(
        &offset_shape,
        &hull_shape
    ));
    (offset_shape, hull_shape)
}
