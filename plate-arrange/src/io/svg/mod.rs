mod arrangement_to_svg;
pub mod svg_util;

#[doc(inline)]
pub use arrangement_to_svg::arrangement_to_svg;
#[doc(inline)]
pub use svg_util::SvgDrawOptions;
#[doc(inline)]
pub use svg_util::SvgLayoutTheme;
