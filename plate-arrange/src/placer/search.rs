use log::debug;

use crate::geometry::primitives::Point;
use crate::grid::BedGrid;
use crate::raster::ShapeDescriptor;

/// Cell where a shape fits, as found by [`find_best_spot`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    /// Translation of the object in world units, quantized to `1 / scale`
    pub translation: Point,
    /// Anchor cell of the object's local origin
    pub row: i64,
    pub col: i64,
    /// Sum of the priorities under the shape
    pub penalty: u64,
    /// Priority of the bucket the anchor belongs to
    pub priority: u32,
}

/// Effort spent by a single search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Number of priority buckets that were entered
    pub buckets_visited: usize,
    /// Number of anchor cells for which the fit was tested
    pub anchors_tested: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// `None` if no bucket contained a cell where the shape fits
    pub spot: Option<Spot>,
    pub stats: SearchStats,
}

/// Searches the cell with the lowest priority at which `shape` fits.
///
/// The search starts at the bucket of `start_priority` (or the first bucket if that priority
/// does not exist) and only visits every `stride`-th bucket from there on.
/// Within a bucket, cells are tried in row-major order and the first fit wins.
pub fn find_best_spot(
    grid: &BedGrid,
    shape: &ShapeDescriptor,
    start_priority: u32,
    stride: usize,
) -> SearchOutcome {
    assert!(stride > 0, "stride must be at least 1");
    let mut stats = SearchStats::default();

    if shape.is_empty() || shape.height() > grid.height() || shape.width() > grid.width() {
        debug!(
            "[PLACE] shape of {}x{} cells can never fit the {}x{} grid",
            shape.width(),
            shape.height(),
            grid.width(),
            grid.height()
        );
        return SearchOutcome { spot: None, stats };
    }

    let priorities = grid.unique_priorities();
    let start_idx = priorities.binary_search(&start_priority).unwrap_or(0);

    for idx in (start_idx..priorities.len()).step_by(stride) {
        stats.buckets_visited += 1;
        for (r, c) in grid.bucket(idx) {
            stats.anchors_tested += 1;
            let (row, col) = (r as i64, c as i64);
            if let Some(penalty) = grid.fit_at_cell(row, col, shape) {
                let spot = Spot {
                    translation: grid.cell_to_world(row, col),
                    row,
                    col,
                    penalty,
                    priority: priorities[idx],
                };
                debug!(
                    "[PLACE] fit at ({}, {}) in bucket {}/{}, {} anchors tested",
                    spot.translation.0,
                    spot.translation.1,
                    idx,
                    priorities.len(),
                    stats.anchors_tested
                );
                return SearchOutcome {
                    spot: Some(spot),
                    stats,
                };
            }
        }
    }

    debug!(
        "[PLACE] no fit after {} buckets and {} anchors",
        stats.buckets_visited, stats.anchors_tested
    );
    SearchOutcome { spot: None, stats }
}
