use itertools::Itertools;
use log::debug;

use crate::config::BuildVolume;
use crate::error::{ArrangeResult, ensure_input};
use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::primitives::{Point, Rect};
use crate::io::ext_repr::{ExtBed, ExtInstance, ExtObject, ExtShape};
use crate::job::ArrangeObject;

/// Identifies a single copy of an [`ExtObject`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub id: u64,
    pub copy: usize,
}

/// An [`ExtInstance`] converted into the types the arrangement works with
#[derive(Clone, Debug)]
pub struct Instance {
    pub name: String,
    pub build_volume: BuildVolume,
    pub fixed: Vec<ArrangeObject>,
    /// Every copy of every movable object
    pub movable: Vec<ArrangeObject>,
    /// Which object and copy each entry of `movable` is
    pub movable_refs: Vec<ObjectRef>,
}

pub fn import_instance(ext_instance: &ExtInstance) -> ArrangeResult<Instance> {
    let build_volume = import_bed(&ext_instance.bed)?;
    let fixed = ext_instance
        .fixed
        .iter()
        .map(import_object)
        .collect::<ArrangeResult<Vec<_>>>()?;

    let mut movable = vec![];
    let mut movable_refs = vec![];
    for ext_object in &ext_instance.objects {
        let object = import_object(ext_object)?;
        for copy in 0..ext_object.copies {
            movable.push(object.clone());
            movable_refs.push(ObjectRef {
                id: ext_object.id,
                copy,
            });
        }
    }
    debug!(
        "[IMPORT] instance {:?}: {} fixed, {} movable (incl. copies)",
        ext_instance.name,
        fixed.len(),
        movable.len()
    );

    Ok(Instance {
        name: ext_instance.name.clone(),
        build_volume,
        fixed,
        movable,
        movable_refs,
    })
}

pub fn import_bed(ext_bed: &ExtBed) -> ArrangeResult<BuildVolume> {
    let disallowed_areas = ext_bed
        .disallowed_areas
        .iter()
        .map(import_shape)
        .collect::<ArrangeResult<Vec<_>>>()?;
    Ok(BuildVolume {
        width: ext_bed.width,
        depth: ext_bed.depth,
        edge_margin: ext_bed.edge_margin,
        disallowed_areas,
    })
}

pub fn import_object(ext_object: &ExtObject) -> ArrangeResult<ArrangeObject> {
    let hull = import_shape(&ext_object.shape)?;
    match &ext_object.offset_shape {
        Some(offset) => Ok(ArrangeObject::with_offset(hull, import_shape(offset)?)),
        None => Ok(ArrangeObject::new(hull)),
    }
}

/// Converts a shape into the vertices of its convex hull
pub fn import_shape(ext_shape: &ExtShape) -> ArrangeResult<Vec<Point>> {
    match ext_shape {
        ExtShape::Rectangle {
            x_min,
            y_min,
            width,
            height,
        } => {
            ensure_input!(
                *width > 0.0 && *height > 0.0,
                "rectangle must have a positive width and height, got {width} x {height}"
            );
            Ok(Rect::new(*x_min, *y_min, x_min + width, y_min + height)
                .corners()
                .to_vec())
        }
        ExtShape::Polygon(points) => {
            ensure_input!(!points.is_empty(), "polygon has no vertices");
            ensure_input!(
                points.iter().all(|(x, y)| x.is_finite() && y.is_finite()),
                "polygon has non-finite vertices"
            );
            let points = points.iter().map(|&p| Point::from(p)).collect_vec();
            Ok(convex_hull_from_points(points))
        }
    }
}
