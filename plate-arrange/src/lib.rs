#![doc = document_features::document_features!()]
//! Grid-based arrangement of objects on the build plate of a 3D printer.
//!
//! Objects are described by their projected convex hulls. Every hull is rasterized into a
//! [`ShapeDescriptor`](raster::ShapeDescriptor) and placed on a [`BedGrid`](grid::BedGrid)
//! at the cell with the lowest priority where it fits.

/// Errors surfaced at the boundary of the library
pub mod error;

/// Configuration of the arrangement
pub mod config;

/// Geometric primitives and the few polygon algorithms the arrangement needs
pub mod geometry;

/// Conversion of convex polygons into binary occupancy rasters
pub mod raster;

/// The occupancy and priority fields of the build plate
pub mod grid;

/// Searching the lowest-priority cell where a shape fits
pub mod placer;

/// Orchestration of a complete multi-object arrangement
pub mod job;

/// Importing instances into and exporting arrangements out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;

#[doc(inline)]
pub use error::{ArrangeError, ArrangeResult};
