use plate_arrange::config::ArrangeConfig;
use plate_arrange::io::svg::SvgDrawOptions;
use serde::{Deserialize, Serialize};

/// Configuration of a pfill run
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PFillConfig {
    /// Configuration of the arrangement itself
    #[serde(default)]
    pub arrange_config: ArrangeConfig,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}
