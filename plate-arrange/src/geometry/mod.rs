/// Convex hull of a set of points
pub mod convex_hull;

/// Dilation of convex polygons by a clearance margin
pub mod minkowski;

/// Basic geometric primitives
pub mod primitives;
