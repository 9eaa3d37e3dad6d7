use itertools::Itertools;
use log::debug;
use ndarray::Array2;

use crate::config::PriorityStrategy;
use crate::geometry::primitives::Point;
use crate::raster::ShapeDescriptor;
use crate::util::assertions;

/// Priority given to cells covered by a placed object, so they are never tried as an anchor again
pub const PRIORITY_OCCUPIED: u32 = u32::MAX;

/// How a shape is stamped into the [`BedGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    /// Marks the cells as occupied and retires them from the priority field
    Placement,
    /// Only marks the cells as occupied
    Obstacle,
}

/// Discretized build plate. Holds which cells are occupied and how much each cell is preferred.
///
/// Both fields are `height x width` and stored in row-major order.
/// Row `r` and column `c` correspond to world `((c - origin_x) / scale, (r - origin_y) / scale)`.
#[derive(Debug, Clone)]
pub struct BedGrid {
    width: usize,
    height: usize,
    origin_x: i64,
    origin_y: i64,
    scale: f64,
    occupied: Array2<u8>,
    priority: Array2<u32>,
    /// Distinct priorities at the time the field was seeded, ascending
    unique_priorities: Vec<u32>,
    /// All cells, ordered by seeded priority and then row-major
    bucket_cells: Vec<(usize, usize)>,
    /// Start of each bucket of `unique_priorities` in `bucket_cells`, with a trailing end marker
    bucket_starts: Vec<usize>,
}

impl BedGrid {
    /// Creates an empty grid. Every cell is free and has priority 0.
    pub fn new(width: usize, height: usize, origin_x: i64, origin_y: i64, scale: f64) -> Self {
        assert!(scale > 0.0, "scale must be positive: {scale}");
        let mut grid = Self {
            width,
            height,
            origin_x,
            origin_y,
            scale,
            occupied: Array2::zeros((height, width)),
            priority: Array2::zeros((height, width)),
            unique_priorities: vec![],
            bucket_cells: vec![],
            bucket_starts: vec![],
        };
        grid.rebuild_priority_index();
        grid
    }

    /// Priority is the squared distance to the origin cell
    pub fn seed_priority_center_first(&mut self) {
        self.assert_priorities_fit(PriorityStrategy::CenterFirst);
        let (ox, oy) = (self.origin_x, self.origin_y);
        self.priority = Array2::from_shape_fn((self.height, self.width), |(r, c)| {
            let (dr, dc) = (r as i64 - oy, c as i64 - ox);
            (dr * dr + dc * dc) as u32
        });
        self.rebuild_priority_index();
    }

    /// Rows closer to the back (low row index) first, then columns closer to the center
    pub fn seed_priority_back_first(&mut self) {
        self.assert_priorities_fit(PriorityStrategy::BackFirst);
        let ox = self.origin_x;
        self.priority = Array2::from_shape_fn((self.height, self.width), |(r, c)| {
            (10 * r as i64 + (c as i64 - ox).abs()) as u32
        });
        self.rebuild_priority_index();
    }

    pub fn seed_priority(&mut self, strategy: PriorityStrategy) {
        match strategy {
            PriorityStrategy::CenterFirst => self.seed_priority_center_first(),
            PriorityStrategy::BackFirst => self.seed_priority_back_first(),
        }
    }

    /// Highest priority `strategy` seeds into a `width x height` grid with the given origin cell.
    /// Seeding requires it to stay below [`PRIORITY_OCCUPIED`].
    pub fn max_priority(
        width: usize,
        height: usize,
        origin_x: i64,
        origin_y: i64,
        strategy: PriorityStrategy,
    ) -> u64 {
        let farthest = |origin: i64, len: usize| {
            let last = (len as i64).saturating_sub(1);
            origin.unsigned_abs().max(last.saturating_sub(origin).unsigned_abs())
        };
        let (dr, dc) = (farthest(origin_y, height), farthest(origin_x, width));
        match strategy {
            PriorityStrategy::CenterFirst => {
                dr.saturating_mul(dr).saturating_add(dc.saturating_mul(dc))
            }
            PriorityStrategy::BackFirst => (height.saturating_sub(1) as u64)
                .saturating_mul(10)
                .saturating_add(dc),
        }
    }

    fn assert_priorities_fit(&self, strategy: PriorityStrategy) {
        let (w, h, ox, oy) = (self.width, self.height, self.origin_x, self.origin_y);
        let max = Self::max_priority(w, h, ox, oy, strategy);
        assert!(
            max < PRIORITY_OCCUPIED as u64,
            "priority {max} of a {w}x{h} grid does not fit the priority field"
        );
    }

    /// Snapshots the distinct priorities and the cells belonging to each of them.
    /// Later placements only retire cells, so the snapshot stays valid for iteration.
    fn rebuild_priority_index(&mut self) {
        self.bucket_cells = self
            .priority
            .indexed_iter()
            .map(|(idx, &p)| (p, idx))
            .sorted_unstable()
            .map(|(_, idx)| idx)
            .collect_vec();

        self.unique_priorities.clear();
        self.bucket_starts.clear();
        for (i, &(r, c)) in self.bucket_cells.iter().enumerate() {
            let p = self.priority[[r, c]];
            if self.unique_priorities.last() != Some(&p) {
                self.unique_priorities.push(p);
                self.bucket_starts.push(i);
            }
        }
        self.bucket_starts.push(self.bucket_cells.len());

        debug_assert!(assertions::unique_priorities_ascending(self));
        debug!(
            "[GRID] seeded {}x{} grid, {} distinct priorities",
            self.width,
            self.height,
            self.unique_priorities.len()
        );
    }

    /// Cells of the `idx`-th priority bucket that have not been retired, in row-major order
    pub fn bucket(&self, idx: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let p = self.unique_priorities[idx];
        self.bucket_cells[self.bucket_starts[idx]..self.bucket_starts[idx + 1]]
            .iter()
            .copied()
            .filter(move |&(r, c)| self.priority[[r, c]] == p)
    }

    /// Cell `(row, col)` containing the world point, can lie outside the grid
    pub fn world_to_cell(&self, x: f64, y: f64) -> (i64, i64) {
        let row = (y * self.scale).round_ties_even() as i64 + self.origin_y;
        let col = (x * self.scale).round_ties_even() as i64 + self.origin_x;
        (row, col)
    }

    /// World position of a cell, quantized to `1 / scale`
    pub fn cell_to_world(&self, row: i64, col: i64) -> Point {
        Point(
            (col - self.origin_x) as f64 / self.scale,
            (row - self.origin_y) as f64 / self.scale,
        )
    }

    /// Stamps `shape` with its local origin at world `(x, y)`. Cells outside the grid are clipped.
    pub fn paint(&mut self, x: f64, y: f64, shape: &ShapeDescriptor, mode: PaintMode) {
        let (row, col) = self.world_to_cell(x, y);
        self.paint_at_cell(row, col, shape, mode);
    }

    /// Stamps `shape` as a placed object: occupied and retired from the priority field
    pub fn paint_occupancy(&mut self, x: f64, y: f64, shape: &ShapeDescriptor) {
        self.paint(x, y, shape, PaintMode::Placement);
    }

    /// Stamps `shape` with its local origin at cell `(row, col)`. Cells outside the grid are clipped.
    pub fn paint_at_cell(&mut self, row: i64, col: i64, shape: &ShapeDescriptor, mode: PaintMode) {
        let (top, left) = (row + shape.offset_y(), col + shape.offset_x());
        for &(r, c) in shape.filled_cells() {
            let (gr, gc) = (top + r as i64, left + c as i64);
            if let Some(idx) = self.index(gr, gc) {
                self.occupied[idx] = 1;
                if mode == PaintMode::Placement {
                    self.priority[idx] = PRIORITY_OCCUPIED;
                }
            }
        }
    }

    /// Marks every cell within `margin` cells of the grid boundary as occupied
    pub fn paint_border(&mut self, margin: usize) {
        let (h, w) = (self.height, self.width);
        self.occupied.indexed_iter_mut().for_each(|((r, c), cell)| {
            if r < margin || c < margin || r + margin >= h || c + margin >= w {
                *cell = 1;
            }
        });
    }

    /// Penalty of `shape` with its local origin at cell `(row, col)`:
    /// the sum of the priorities under its filled cells.
    /// `None` if the shape leaves the grid or collides with an occupied cell.
    pub fn fit_at_cell(&self, row: i64, col: i64, shape: &ShapeDescriptor) -> Option<u64> {
        if shape.is_empty() {
            return None;
        }
        let (top, left) = (row + shape.offset_y(), col + shape.offset_x());
        let in_bounds = top >= 0
            && left >= 0
            && top + shape.height() as i64 <= self.height as i64
            && left + shape.width() as i64 <= self.width as i64;
        if !in_bounds {
            return None;
        }
        let (top, left) = (top as usize, left as usize);

        let mut penalty = 0;
        for &(r, c) in shape.filled_cells() {
            let idx = [top + r, left + c];
            if self.occupied[idx] != 0 {
                return None;
            }
            penalty += self.priority[idx] as u64;
        }
        Some(penalty)
    }

    /// [`BedGrid::fit_at_cell`] for the cell containing world `(x, y)`
    pub fn test_fit(&self, x: f64, y: f64, shape: &ShapeDescriptor) -> Option<u64> {
        let (row, col) = self.world_to_cell(x, y);
        self.fit_at_cell(row, col, shape)
    }

    fn index(&self, row: i64, col: i64) -> Option<[usize; 2]> {
        match self.contains(row, col) {
            true => Some([row as usize, col as usize]),
            false => None,
        }
    }

    pub fn contains(&self, row: i64, col: i64) -> bool {
        (0..self.height as i64).contains(&row) && (0..self.width as i64).contains(&col)
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.occupied[[row, col]] != 0
    }

    pub fn priority_at(&self, row: usize, col: usize) -> u32 {
        self.priority[[row, col]]
    }

    pub fn occupied(&self) -> &Array2<u8> {
        &self.occupied
    }

    pub fn priority(&self) -> &Array2<u32> {
        &self.priority
    }

    pub fn unique_priorities(&self) -> &[u32] {
        &self.unique_priorities
    }

    pub fn n_occupied(&self) -> usize {
        self.occupied.iter().filter(|&&cell| cell != 0).count()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn origin_x(&self) -> i64 {
        self.origin_x
    }

    pub fn origin_y(&self) -> i64 {
        self.origin_y
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}
