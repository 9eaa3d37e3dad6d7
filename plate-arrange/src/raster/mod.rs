mod rasterizer;
mod shape_descriptor;

#[doc(inline)]
pub use rasterizer::rasterize_polygon;
#[doc(inline)]
pub use shape_descriptor::ShapeDescriptor;
#[doc(inline)]
pub use shape_descriptor::make_shape_descriptor;
