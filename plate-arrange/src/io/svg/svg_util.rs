use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::Path;
use svg::node::element::path::Data;

use crate::geometry::primitives::Point;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Draw the clearance outline around every object
    #[serde(default)]
    pub draw_offsets: bool,
    ///Draw objects that did not fit at their fallback translation
    #[serde(default)]
    pub draw_unplaced: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            draw_offsets: true,
            draw_unplaced: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f32,
    pub bed_fill: Color,
    pub blocked_fill: Color,
    pub fixed_fill: Color,
    pub object_fill: Color,
    pub unplaced_fill: Color,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::EARTH_TONES
    }
}

impl SvgLayoutTheme {
    pub const EARTH_TONES: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        bed_fill: Color(0xCC, 0x82, 0x4A),
        blocked_fill: Color(0x2D, 0x2D, 0x2D),
        fixed_fill: Color(0x8C, 0x5A, 0x33),
        object_fill: Color(0xFF, 0xC8, 0x79),
        unplaced_fill: Color(0xFF, 0x00, 0x00),
    };

    pub const GRAY: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.5,
        bed_fill: Color(0xD3, 0xD3, 0xD3),
        blocked_fill: Color(0x63, 0x63, 0x63),
        fixed_fill: Color(0x4A, 0x4A, 0x4A),
        object_fill: Color(0x7A, 0x7A, 0x7A),
        unplaced_fill: Color(0xD0, 0x00, 0x00),
    };
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(u8, u8, u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl TryFrom<&str> for Color {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid color: {s}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("invalid color: {s}"))
        };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Closed path through `points`, translated by `translation`
pub fn polygon_data(points: &[Point], translation: Point) -> Data {
    let translated = points.iter().map(|p| *p + translation).collect_vec();
    append_polygon_data(Data::new(), &translated)
}

/// Appends a closed subpath through `points`, used to cut holes with the `evenodd` fill rule
pub fn append_polygon_data(data: Data, points: &[Point]) -> Data {
    let mut vertices = points.iter().map(|p| (p.0 as f32, p.1 as f32));
    let Some(first) = vertices.next() else {
        return data;
    };
    vertices
        .fold(data.move_to(first), |data, v| data.line_to(v))
        .close()
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_round_trips_through_hex() {
        let color = Color::try_from("#ffc879").unwrap();
        assert_eq!(color, Color(0xFF, 0xC8, 0x79));
        assert_eq!(format!("{color}"), "#FFC879");
        assert!(Color::try_from("#12345").is_err());
        assert!(Color::try_from("zzzzzz").is_err());
    }
}
