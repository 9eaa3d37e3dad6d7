//Various checks to verify correctness of the state of the system
//Used in debug_assert!() blocks

use itertools::Itertools;

use crate::grid::{BedGrid, PRIORITY_OCCUPIED, PaintMode};
use crate::raster::ShapeDescriptor;

pub fn grid_fields_consistent(grid: &BedGrid) -> bool {
    let shape = (grid.height(), grid.width());
    grid.occupied().dim() == shape && grid.priority().dim() == shape
}

pub fn unique_priorities_ascending(grid: &BedGrid) -> bool {
    grid.unique_priorities()
        .iter()
        .tuple_windows()
        .all(|(a, b)| a < b)
}

pub fn descriptor_pair_consistent(offset: &ShapeDescriptor, hull: &ShapeDescriptor) -> bool {
    offset.scale() == hull.scale()
}

/// Checks that every in-bounds cell of `shape`, anchored at `(row, col)`, was painted with `mode`
pub fn shape_painted(
    grid: &BedGrid,
    row: i64,
    col: i64,
    shape: &ShapeDescriptor,
    mode: PaintMode,
) -> bool {
    let (top, left) = (row + shape.offset_y(), col + shape.offset_x());
    shape
        .filled_cells()
        .iter()
        .map(|&(r, c)| (top + r as i64, left + c as i64))
        .filter(|&(gr, gc)| grid.contains(gr, gc))
        .all(|(gr, gc)| {
            let (gr, gc) = (gr as usize, gc as usize);
            let retired = match mode {
                PaintMode::Placement => grid.priority_at(gr, gc) == PRIORITY_OCCUPIED,
                PaintMode::Obstacle => true,
            };
            grid.is_occupied(gr, gc) && retired
        })
}
