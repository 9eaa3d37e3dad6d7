mod bed_grid;

#[doc(inline)]
pub use bed_grid::BedGrid;
#[doc(inline)]
pub use bed_grid::PRIORITY_OCCUPIED;
#[doc(inline)]
pub use bed_grid::PaintMode;
