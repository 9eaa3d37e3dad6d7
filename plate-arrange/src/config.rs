use serde::{Deserialize, Serialize};

use crate::geometry::primitives::Point;

/// The printable region of the printer, in world units.
/// World (0, 0) is the center of the bed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BuildVolume {
    /// Extent of the bed along the x-axis
    pub width: f64,
    /// Extent of the bed along the y-axis
    pub depth: f64,
    /// Width of the band along the bed boundary in which nothing may be placed
    #[serde(default)]
    pub edge_margin: f64,
    /// Convex regions of the bed that are off limits (clips, prime tower, ...), in world coordinates
    #[serde(default)]
    pub disallowed_areas: Vec<Vec<Point>>,
}

impl Default for BuildVolume {
    fn default() -> Self {
        Self {
            width: 350.0,
            depth: 250.0,
            edge_margin: 0.0,
            disallowed_areas: vec![],
        }
    }
}

/// Configuration of an [`ArrangementJob`](crate::job::ArrangementJob)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ArrangeConfig {
    /// Minimum gap between any two objects, in world units
    pub clearance: f64,
    /// Only every `stride`-th distinct priority is searched. Higher is faster but packs worse
    pub stride: usize,
    /// Number of grid cells per world unit
    pub scale: f64,
    /// Which cells of the bed are preferred
    pub priority_strategy: PriorityStrategy,
    /// Number of segments of the polygon approximating the clearance disk
    pub circle_segments: usize,
    /// Where objects that do not fit on the bed are put
    pub fallback: FallbackPlacement,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            clearance: 8.0,
            stride: 10,
            scale: 0.5,
            priority_strategy: PriorityStrategy::CenterFirst,
            circle_segments: 8,
            fallback: FallbackPlacement::default(),
        }
    }
}

/// Determines the priority field of the bed. Lower priorities are filled first.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PriorityStrategy {
    /// Squared distance to the center of the bed
    #[default]
    CenterFirst,
    /// Row first, then distance to the center column
    BackFirst,
}

/// Translation given to objects for which no spot on the bed was found
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum FallbackPlacement {
    /// Every unplaced object gets the same translation
    Fixed(Point),
    /// The k-th unplaced object is put at `start + k * step`
    Row { start: Point, step: Point },
}

impl FallbackPlacement {
    /// Translation of the `k`-th (zero-based) unplaced object
    pub fn position(&self, k: usize) -> Point {
        match self {
            FallbackPlacement::Fixed(p) => *p,
            FallbackPlacement::Row { start, step } => *start + *step * k as f64,
        }
    }
}

impl Default for FallbackPlacement {
    fn default() -> Self {
        FallbackPlacement::Row {
            start: Point(200.0, 0.0),
            step: Point(0.0, -20.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_row_advances() {
        let fallback = FallbackPlacement::default();
        assert_eq!(fallback.position(0), Point(200.0, 0.0));
        assert_eq!(fallback.position(3), Point(200.0, -60.0));
        assert_eq!(
            FallbackPlacement::Fixed(Point(1.0, 2.0)).position(7),
            Point(1.0, 2.0)
        );
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: ArrangeConfig = serde_json::from_str(r#"{"stride": 1}"#).unwrap();
        assert_eq!(config.stride, 1);
        assert_eq!(config.clearance, 8.0);
        assert_eq!(config.priority_strategy, PriorityStrategy::CenterFirst);
    }
}
