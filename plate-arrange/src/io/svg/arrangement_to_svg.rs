use itertools::Itertools;
use svg::Document;
use svg::node::element::{Group, Text, Title};

use crate::config::ArrangeConfig;
use crate::geometry::primitives::{Point, Rect};
use crate::io::import::Instance;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;
use crate::job::{Arrangement, PlacementOutcome};

/// Draws the bed of `instance` with every object of `arrangement` on it.
/// World (0, 0), the center of the bed, is the center of the drawing.
pub fn arrangement_to_svg(
    instance: &Instance,
    arrangement: &Arrangement,
    config: &ArrangeConfig,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let theme = &options.theme;
    let bv = &instance.build_volume;
    let bed = Rect::centered(bv.width, bv.depth);

    let offsets = instance
        .movable
        .iter()
        .map(|obj| obj.offset_polygon(config.clearance, config.circle_segments))
        .collect_vec();

    let vbox = {
        let mut points = bed.corners().to_vec();
        if options.draw_unplaced {
            for (outcome, obj) in arrangement.placements.iter().zip(instance.movable.iter()) {
                if let PlacementOutcome::Unplaced { fallback, .. } = outcome {
                    points.extend(obj.hull.iter().map(|p| *p + *fallback));
                }
            }
        }
        Rect::bounding(&points).unwrap_or(bed).scale(1.10)
    };

    let stroke_width =
        f64::min(vbox.width(), vbox.height()) as f32 * 0.001 * theme.stroke_width_multiplier;

    let offset_style = [
        ("fill", "none"),
        ("stroke", "black"),
        ("stroke-width", &*format!("{}", 0.5 * stroke_width)),
        ("stroke-opacity", "0.5"),
        (
            "stroke-dasharray",
            &*format!("{} {}", 1.0 * stroke_width, 2.0 * stroke_width),
        ),
        ("stroke-linecap", "round"),
        ("stroke-linejoin", "round"),
    ];

    let label = {
        let label_content = format!(
            "width: {:.1} | depth: {:.1} | placed: {}/{} | {}",
            bv.width,
            bv.depth,
            arrangement.n_placed(),
            arrangement.placements.len(),
            title,
        );
        let font_size = f64::min(bed.width(), bed.height()) * 0.025;
        Text::new(label_content)
            .set("x", bed.x_min as f32)
            .set("y", (bed.y_min - 0.5 * font_size) as f32)
            .set("font-size", font_size as f32)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    //draw bed, border and disallowed areas
    let bed_group = {
        let mut bed_group = Group::new()
            .set("id", "bed")
            .add(svg_util::data_to_path(
                svg_util::polygon_data(&bed.corners(), Point::default()),
                &[
                    ("fill", &*format!("{}", theme.bed_fill)),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ],
            ))
            .add(Title::new(format!("bed, {} x {}", bv.width, bv.depth)));

        let blocked_style = [
            ("fill", &*format!("{}", theme.blocked_fill)),
            ("fill-opacity", "0.5"),
            ("fill-rule", "evenodd"),
            ("stroke", "none"),
        ];

        let margin = bv.edge_margin;
        if margin > 0.0 && 2.0 * margin < f64::min(bv.width, bv.depth) {
            let inner = Rect::centered(bv.width - 2.0 * margin, bv.depth - 2.0 * margin);
            let border_data = svg_util::append_polygon_data(
                svg_util::polygon_data(&bed.corners(), Point::default()),
                &inner.corners(),
            );
            bed_group = bed_group.add(
                svg_util::data_to_path(border_data, &blocked_style)
                    .add(Title::new(format!("edge margin: {margin}"))),
            );
        }
        for (i, area) in bv.disallowed_areas.iter().enumerate() {
            bed_group = bed_group.add(
                svg_util::data_to_path(
                    svg_util::polygon_data(area, Point::default()),
                    &blocked_style,
                )
                .add(Title::new(format!("disallowed area {i}"))),
            );
        }
        bed_group
    };

    //draw fixed objects
    let fixed_group = instance.fixed.iter().enumerate().fold(
        Group::new().set("id", "fixed"),
        |group, (i, obj)| {
            let mut group = group.add(
                svg_util::data_to_path(
                    svg_util::polygon_data(&obj.hull, Point::default()),
                    &[
                        ("fill", &*format!("{}", theme.fixed_fill)),
                        ("stroke", "black"),
                        ("stroke-width", &*format!("{}", stroke_width)),
                    ],
                )
                .add(Title::new(format!("fixed object {i}"))),
            );
            if options.draw_offsets {
                let offset = obj.offset_polygon(config.clearance, config.circle_segments);
                group = group.add(svg_util::data_to_path(
                    svg_util::polygon_data(&offset, Point::default()),
                    &offset_style,
                ));
            }
            group
        },
    );

    //draw movable objects
    let mut objects_group = Group::new().set("id", "objects");
    for (i, (outcome, obj)) in arrangement
        .placements
        .iter()
        .zip(instance.movable.iter())
        .enumerate()
    {
        let t = outcome.translation();
        let (fill, title) = match outcome {
            PlacementOutcome::Placed(p) => (
                theme.object_fill,
                format!(
                    "object {i}, translation: ({:.2}, {:.2}), priority: {}",
                    t.0, t.1, p.priority
                ),
            ),
            PlacementOutcome::Unplaced { .. } if options.draw_unplaced => (
                theme.unplaced_fill,
                format!("object {i}, unplaced, moved to ({:.2}, {:.2})", t.0, t.1),
            ),
            PlacementOutcome::Unplaced { .. } => continue,
        };
        objects_group = objects_group.add(
            svg_util::data_to_path(
                svg_util::polygon_data(&obj.hull, t),
                &[
                    ("fill", &*format!("{}", fill)),
                    ("fill-opacity", "0.8"),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", stroke_width)),
                ],
            )
            .add(Title::new(title)),
        );
        if options.draw_offsets && outcome.is_placed() {
            objects_group = objects_group.add(svg_util::data_to_path(
                svg_util::polygon_data(&offsets[i], t),
                &offset_style,
            ));
        }
    }

    let vbox_svg = (
        vbox.x_min as f32,
        vbox.y_min as f32,
        vbox.width() as f32,
        vbox.height() as f32,
    );

    Document::new()
        .set("viewBox", vbox_svg)
        .add(bed_group)
        .add(fixed_group)
        .add(objects_group)
        .add(label)
}

