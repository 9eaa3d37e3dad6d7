use serde::{Deserialize, Serialize};

use crate::geometry::minkowski::dilate_convex;
use crate::geometry::primitives::Point;

/// An object on the build plate, as seen from above
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ArrangeObject {
    /// Convex hull of the projection of the object, in its local frame.
    /// For fixed objects the local frame is the world frame.
    pub hull: Vec<Point>,
    /// Hull dilated by the clearance (e.g. including the print head for one-at-a-time printing).
    /// If absent, it is derived from `hull` and the configured clearance.
    #[serde(default)]
    pub offset: Option<Vec<Point>>,
}

impl ArrangeObject {
    pub fn new(hull: Vec<Point>) -> Self {
        Self { hull, offset: None }
    }

    pub fn with_offset(hull: Vec<Point>, offset: Vec<Point>) -> Self {
        Self {
            hull,
            offset: Some(offset),
        }
    }

    /// Polygon used to test where the object fits
    pub fn offset_polygon(&self, clearance: f64, circle_segments: usize) -> Vec<Point> {
        match &self.offset {
            Some(offset) => offset.clone(),
            None => dilate_convex(&self.hull, clearance, circle_segments),
        }
    }
}
