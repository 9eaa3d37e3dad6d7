use std::cmp::Reverse;

use itertools::Itertools;
use log::{debug, info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{ArrangeConfig, BuildVolume};
use crate::error::{ArrangeError, ArrangeResult, ensure_input};
use crate::geometry::primitives::{Point, Rect};
use crate::grid::{BedGrid, PRIORITY_OCCUPIED, PaintMode};
use crate::job::{ArrangeObject, CancelToken, Yielder};
use crate::placer::{SearchStats, find_best_spot};
use crate::raster::{ShapeDescriptor, make_shape_descriptor, rasterize_polygon};
use crate::util::{FPA, assertions};

/// Places a set of movable objects on a build plate, around a set of fixed ones.
#[derive(Debug, Clone)]
pub struct ArrangementJob {
    build_volume: BuildVolume,
    config: ArrangeConfig,
}

/// Result of an arrangement, in the order the movable objects were supplied
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    pub placements: Vec<PlacementOutcome>,
    /// Indices of the movable objects in the order they were placed
    pub processing_order: Vec<usize>,
    pub all_placed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementOutcome {
    Placed(Placement),
    /// No spot was found, the object is put at the fallback translation
    Unplaced { fallback: Point, stats: SearchStats },
}

/// A movable object that found a spot on the bed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Translation of the object's local origin, in world units
    pub translation: Point,
    /// Priority the search was seeded with
    pub start_priority: u32,
    /// Priority of the bucket in which the spot was found
    pub priority: u32,
    pub penalty: u64,
    pub stats: SearchStats,
}

impl PlacementOutcome {
    /// Translation to apply to the object, on or off the bed
    pub fn translation(&self) -> Point {
        match self {
            PlacementOutcome::Placed(p) => p.translation,
            PlacementOutcome::Unplaced { fallback, .. } => *fallback,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementOutcome::Placed(_))
    }

    pub fn stats(&self) -> SearchStats {
        match self {
            PlacementOutcome::Placed(p) => p.stats,
            PlacementOutcome::Unplaced { stats, .. } => *stats,
        }
    }
}

impl Arrangement {
    pub fn n_placed(&self) -> usize {
        self.placements.iter().filter(|p| p.is_placed()).count()
    }
}

impl ArrangementJob {
    pub fn new(build_volume: BuildVolume, config: ArrangeConfig) -> ArrangeResult<Self> {
        let BuildVolume {
            width,
            depth,
            edge_margin,
            ..
        } = build_volume;
        ensure_input!(
            width.is_finite() && depth.is_finite() && width > 0.0 && depth > 0.0,
            "build volume must have positive dimensions, got {width} x {depth}"
        );
        ensure_input!(
            edge_margin.is_finite() && edge_margin >= 0.0,
            "edge margin must be non-negative, got {edge_margin}"
        );
        ensure_input!(
            config.clearance.is_finite() && config.clearance >= 0.0,
            "clearance must be non-negative, got {}",
            config.clearance
        );
        ensure_input!(
            config.scale.is_finite() && config.scale > 0.0,
            "scale must be positive, got {}",
            config.scale
        );
        ensure_input!(config.stride >= 1, "stride must be at least 1");
        ensure_input!(
            (width * config.scale).floor() >= 1.0 && (depth * config.scale).floor() >= 1.0,
            "build volume of {width} x {depth} is smaller than a single cell at scale {}",
            config.scale
        );
        let (grid_width, grid_height) = grid_size(&build_volume, config.scale);
        let max_priority = BedGrid::max_priority(
            grid_width,
            grid_height,
            (grid_width / 2) as i64,
            (grid_height / 2) as i64,
            config.priority_strategy,
        );
        ensure_input!(
            max_priority < PRIORITY_OCCUPIED as u64,
            "grid of {grid_width} x {grid_height} cells is too large, priorities reach {max_priority}"
        );
        for area in &build_volume.disallowed_areas {
            validate_polygon(area, "disallowed area")?;
            ensure_input!(
                fits_grid(area, config.scale, (grid_width, grid_height), 2),
                "disallowed area is larger than the bed"
            );
        }
        if config.clearance < edge_margin {
            warn!(
                "[ARR] clearance ({}) is smaller than the edge margin ({edge_margin})",
                config.clearance
            );
        }

        Ok(Self {
            build_volume,
            config,
        })
    }

    pub fn build_volume(&self) -> &BuildVolume {
        &self.build_volume
    }

    pub fn config(&self) -> &ArrangeConfig {
        &self.config
    }

    /// Arranges `movable` around `fixed` without progress reporting, yielding or cancellation
    pub fn arrange_all(
        &self,
        fixed: &[ArrangeObject],
        movable: &[ArrangeObject],
    ) -> ArrangeResult<Arrangement> {
        self.arrange(fixed, movable, |_| {}, || {}, &CancelToken::new())
    }

    /// Arranges `movable` around `fixed`.
    ///
    /// `progress` receives the fraction of movable objects processed after each of them.
    /// `yielder` is called after the fixed objects are painted and after every movable object,
    /// followed by a check of `cancel`. A cancelled arrangement reports nothing.
    pub fn arrange(
        &self,
        fixed: &[ArrangeObject],
        movable: &[ArrangeObject],
        progress: impl FnMut(f64),
        yielder: impl Yielder,
        cancel: &CancelToken,
    ) -> ArrangeResult<Arrangement> {
        self.arrange_with_grid(fixed, movable, progress, yielder, cancel)
            .map(|(arrangement, _)| arrangement)
    }

    /// Same as [`ArrangementJob::arrange`], but also returns the final state of the bed
    pub fn arrange_with_grid(
        &self,
        fixed: &[ArrangeObject],
        movable: &[ArrangeObject],
        mut progress: impl FnMut(f64),
        mut yielder: impl Yielder,
        cancel: &CancelToken,
    ) -> ArrangeResult<(Arrangement, BedGrid)> {
        for obj in fixed.iter().chain(movable.iter()) {
            validate_polygon(&obj.hull, "object hull")?;
            if let Some(offset) = &obj.offset {
                validate_polygon(offset, "object offset")?;
            }
        }

        let mut grid = self.prepare_grid(fixed)?;

        yielder.yield_point();
        if cancel.is_cancelled() {
            info!("[ARR] cancelled after painting the fixed objects");
            return Err(ArrangeError::Cancelled);
        }

        let descriptors = self.describe_all(movable);

        //largest first, ties keep the supplied order
        let processing_order = (0..movable.len())
            .sorted_by_cached_key(|&i| Reverse(descriptors[i].0.area()))
            .collect_vec();

        let n_objects = movable.len();
        let mut placements: Vec<Option<PlacementOutcome>> = vec![None; n_objects];
        let mut last_area = None;
        let mut last_priority = 0;
        let mut n_unplaced = 0;

        for (k, &i) in processing_order.iter().enumerate() {
            let (offset_shape, hull_shape) = &descriptors[i];
            let area = offset_shape.area();
            let start_priority = match last_area == Some(area) {
                true => last_priority,
                false => 0,
            };

            let outcome = find_best_spot(&grid, offset_shape, start_priority, self.config.stride);

            placements[i] = Some(match outcome.spot {
                Some(spot) => {
                    grid.paint_at_cell(spot.row, spot.col, hull_shape, PaintMode::Placement);
                    debug_assert!(assertions::shape_painted(
                        &grid,
                        spot.row,
                        spot.col,
                        hull_shape,
                        PaintMode::Placement
                    ));
                    last_area = Some(area);
                    last_priority = spot.priority;
                    debug!(
                        "[ARR] object {i} placed at ({}, {}), priority {}",
                        spot.translation.0, spot.translation.1, spot.priority
                    );
                    PlacementOutcome::Placed(Placement {
                        translation: spot.translation,
                        start_priority,
                        priority: spot.priority,
                        penalty: spot.penalty,
                        stats: outcome.stats,
                    })
                }
                None => {
                    let fallback = self.config.fallback.position(n_unplaced);
                    n_unplaced += 1;
                    debug!(
                        "[ARR] no spot for object {i}, moved to ({}, {})",
                        fallback.0, fallback.1
                    );
                    PlacementOutcome::Unplaced {
                        fallback,
                        stats: outcome.stats,
                    }
                }
            });

            progress((k + 1) as f64 / n_objects as f64);
            yielder.yield_point();
            if cancel.is_cancelled() {
                info!("[ARR] cancelled after {}/{} objects", k + 1, n_objects);
                return Err(ArrangeError::Cancelled);
            }
        }
        if n_objects == 0 {
            progress(1.0);
        }

        let placements = placements.into_iter().flatten().collect_vec();
        debug_assert!(placements.len() == n_objects);
        debug_assert!(assertions::grid_fields_consistent(&grid));

        let arrangement = Arrangement {
            all_placed: n_unplaced == 0,
            placements,
            processing_order,
        };
        info!(
            "[ARR] placed {}/{} objects around {} fixed ones",
            arrangement.n_placed(),
            n_objects,
            fixed.len()
        );
        Ok((arrangement, grid))
    }

    /// Creates the grid of the bed, seeds its priorities and paints every obstacle onto it
    pub fn prepare_grid(&self, fixed: &[ArrangeObject]) -> ArrangeResult<BedGrid> {
        let scale = self.config.scale;
        let (width, height) = grid_size(&self.build_volume, scale);
        let mut grid = BedGrid::new(width, height, (width / 2) as i64, (height / 2) as i64, scale);
        grid.seed_priority(self.config.priority_strategy);

        let (origin_row, origin_col) = grid.world_to_cell(0.0, 0.0);
        for (i, obj) in fixed.iter().enumerate() {
            let offset = obj.offset_polygon(self.config.clearance, self.config.circle_segments);
            //the clearance band may stick out of the bed, the hull may not
            let slack = 2 * FPA(self.config.clearance * scale).ceil().max(0) as usize + 2;
            ensure_input!(
                fits_grid(&obj.hull, scale, (width, height), 0)
                    && fits_grid(&offset, scale, (width, height), slack),
                "fixed object {i} exceeds the bed"
            );
            let (offset_shape, hull_shape) = make_shape_descriptor(&obj.hull, &offset, scale);

            let within_bed = match hull_shape.is_empty() {
                true => obj.hull.iter().all(|p| {
                    let (row, col) = grid.world_to_cell(p.0, p.1);
                    grid.contains(row, col)
                }),
                false => hull_shape.filled_cells().iter().all(|&(r, c)| {
                    grid.contains(
                        origin_row + hull_shape.offset_y() + r as i64,
                        origin_col + hull_shape.offset_x() + c as i64,
                    )
                }),
            };
            ensure_input!(within_bed, "fixed object {i} exceeds the bed");
            if offset_shape.is_empty() {
                debug!("[ARR] fixed object {i} and its clearance are degenerate, ignored");
                continue;
            }
            grid.paint_at_cell(origin_row, origin_col, &offset_shape, PaintMode::Obstacle);
        }

        let margin_cells = FPA(self.build_volume.edge_margin * scale).ceil().max(0) as usize;
        grid.paint_border(margin_cells);

        for area in &self.build_volume.disallowed_areas {
            let shape = rasterize_polygon(area, scale);
            grid.paint_at_cell(origin_row, origin_col, &shape, PaintMode::Obstacle);
        }
        debug!(
            "[ARR] {} of {} cells blocked before placement",
            grid.n_occupied(),
            grid.width() * grid.height()
        );

        Ok(grid)
    }

    /// Offset and hull descriptors of a movable object.
    /// Both are empty if the object can never fit the bed.
    pub fn describe(&self, obj: &ArrangeObject) -> (ShapeDescriptor, ShapeDescriptor) {
        let scale = self.config.scale;
        let offset = obj.offset_polygon(self.config.clearance, self.config.circle_segments);
        let bed = grid_size(&self.build_volume, scale);
        if !fits_grid(&offset, scale, bed, 0) || !fits_grid(&obj.hull, scale, bed, 0) {
            debug!("[ARR] object larger than the bed, not rasterized");
            return (ShapeDescriptor::empty(scale), ShapeDescriptor::empty(scale));
        }
        let (offset_shape, hull_shape) = make_shape_descriptor(&obj.hull, &offset, scale);
        match hull_shape.is_empty() {
            //a degenerate hull never fits, whatever its offset looks like
            true => (ShapeDescriptor::empty(scale), hull_shape),
            false => (offset_shape, hull_shape),
        }
    }

    #[cfg(feature = "parallel")]
    fn describe_all(&self, objects: &[ArrangeObject]) -> Vec<(ShapeDescriptor, ShapeDescriptor)> {
        objects.par_iter().map(|obj| self.describe(obj)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn describe_all(&self, objects: &[ArrangeObject]) -> Vec<(ShapeDescriptor, ShapeDescriptor)> {
        objects.iter().map(|obj| self.describe(obj)).collect()
    }
}

/// Number of columns and rows of the grid covering the bed
fn grid_size(build_volume: &BuildVolume, scale: f64) -> (usize, usize) {
    let width = (build_volume.width * scale).floor() as usize;
    let height = (build_volume.depth * scale).floor() as usize;
    (width, height)
}

/// Whether the bounding box of `polygon`, in cells, is at most `slack` cells larger than the grid.
/// A raster of a polygon that fails this check can never be placed on the grid.
fn fits_grid(
    polygon: &[Point],
    scale: f64,
    (width, height): (usize, usize),
    slack: usize,
) -> bool {
    match Rect::bounding(polygon) {
        Some(bbox) => {
            FPA(bbox.width() * scale).ceil() <= (width + slack) as i64
                && FPA(bbox.height() * scale).ceil() <= (height + slack) as i64
        }
        None => true,
    }
}

fn validate_polygon(points: &[Point], what: &str) -> ArrangeResult<()> {
    ensure_input!(!points.is_empty(), "{what} has no vertices");
    ensure_input!(
        points.iter().all(|p| p.0.is_finite() && p.1.is_finite()),
        "{what} has non-finite vertices"
    );
    Ok(())
}
