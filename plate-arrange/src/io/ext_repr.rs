use serde::{Deserialize, Serialize};

/// A build plate and the objects to arrange on it
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInstance {
    /// The name of the instance
    pub name: String,
    /// The bed on which the objects are arranged
    pub bed: ExtBed,
    /// Objects which stay where they are, in world coordinates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed: Vec<ExtObject>,
    /// Objects to be arranged, in their local frame
    pub objects: Vec<ExtObject>,
}

/// External representation of a [`BuildVolume`](crate::config::BuildVolume).
/// World (0, 0) is the center of the bed.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtBed {
    pub width: f64,
    pub depth: f64,
    /// Band along the boundary of the bed that has to stay empty
    #[serde(default)]
    pub edge_margin: f64,
    /// Regions of the bed that are off limits, in world coordinates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disallowed_areas: Vec<ExtShape>,
}

/// External representation of an [`ArrangeObject`](crate::job::ArrangeObject).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtObject {
    /// Unique identifier of the object
    pub id: u64,
    /// Outline of the object as seen from above. Only its convex hull is used
    pub shape: ExtShape,
    /// Outline including the clearance around the object.
    /// Derived from `shape` and the configured clearance if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_shape: Option<ExtShape>,
    /// Number of copies of this object to arrange
    #[serde(default = "default_copies")]
    pub copies: usize,
}

fn default_copies() -> usize {
    1
}

/// Various ways to represent a shape
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ExtShape {
    /// Axis-aligned rectangle. With its bottom left corner at (x_min, y_min), a width and height
    Rectangle {
        x_min: f64,
        y_min: f64,
        width: f64,
        height: f64,
    },
    /// Polygon given by its vertices
    Polygon(Vec<(f64, f64)>),
}

/// Outcome of an arrangement
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSolution {
    /// One entry per copy of every movable object
    pub placements: Vec<ExtPlacement>,
    /// Whether every object found a spot on the bed
    pub all_placed: bool,
    /// The time it took to generate the solution in milliseconds
    pub run_time_ms: u64,
}

/// Where a single copy of an object ended up
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlacement {
    /// The id of the object in the instance
    pub object_id: u64,
    /// Which copy of the object, starting at 0
    pub copy: usize,
    /// `false` if the object did not fit and was moved to its fallback translation
    pub placed: bool,
    /// The translation applied to the object
    pub translation: (f64, f64),
    /// Priority of the spot on the bed, if placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}
