#[cfg(test)]
mod tests {
    use plate_arrange::ArrangeError;
    use plate_arrange::config::ArrangeConfig;
    use plate_arrange::geometry::primitives::Point;
    use plate_arrange::io::export::export_arrangement;
    use plate_arrange::io::ext_repr::{ExtInstance, ExtShape};
    use plate_arrange::io::import::{ObjectRef, import_instance, import_shape};
    use plate_arrange::io::svg::{SvgDrawOptions, arrangement_to_svg};
    use plate_arrange::job::ArrangementJob;
    use test_case::test_case;

    const INSTANCE: &str = r#"{
        "name": "calibration_plate",
        "bed": {
            "width": 200.0,
            "depth": 160.0,
            "edge_margin": 2.0,
            "disallowed_areas": [
                { "type": "rectangle", "data": { "x_min": 80.0, "y_min": 60.0, "width": 20.0, "height": 20.0 } }
            ]
        },
        "fixed": [
            { "id": 100, "shape": { "type": "rectangle", "data": { "x_min": -90.0, "y_min": -70.0, "width": 30.0, "height": 30.0 } } }
        ],
        "objects": [
            { "id": 1, "shape": { "type": "rectangle", "data": { "x_min": -10.0, "y_min": -10.0, "width": 20.0, "height": 20.0 } }, "copies": 3 },
            { "id": 2, "shape": { "type": "polygon", "data": [[-15.0, -10.0], [0.0, -2.0], [15.0, -10.0], [0.0, 20.0]] } },
            { "id": 3, "shape": { "type": "rectangle", "data": { "x_min": -5.0, "y_min": -5.0, "width": 10.0, "height": 10.0 } },
              "offset_shape": { "type": "rectangle", "data": { "x_min": -20.0, "y_min": -20.0, "width": 40.0, "height": 40.0 } } }
        ]
    }"#;

    fn ext_instance() -> ExtInstance {
        serde_json::from_str(INSTANCE).unwrap()
    }

    #[test]
    fn copies_are_expanded() {
        let instance = import_instance(&ext_instance()).unwrap();

        assert_eq!(instance.name, "calibration_plate");
        assert_eq!(instance.fixed.len(), 1);
        assert_eq!(instance.movable.len(), 5);
        assert_eq!(
            instance.movable_refs,
            vec![
                ObjectRef { id: 1, copy: 0 },
                ObjectRef { id: 1, copy: 1 },
                ObjectRef { id: 1, copy: 2 },
                ObjectRef { id: 2, copy: 0 },
                ObjectRef { id: 3, copy: 0 },
            ]
        );
        assert_eq!(instance.movable[0], instance.movable[2]);
        assert_eq!(instance.build_volume.edge_margin, 2.0);
        assert_eq!(instance.build_volume.disallowed_areas.len(), 1);
    }

    #[test]
    fn polygons_are_reduced_to_their_hull() {
        let instance = import_instance(&ext_instance()).unwrap();
        //the reflex vertex at (0, -2) is dropped
        let triangle = &instance.movable[3];
        assert_eq!(triangle.hull.len(), 3);
        assert!(!triangle.hull.contains(&Point(0.0, -2.0)));
        assert!(triangle.offset.is_none());

        let with_offset = &instance.movable[4];
        assert_eq!(with_offset.offset.as_ref().map(|o| o.len()), Some(4));
    }

    #[test]
    fn arrange_and_export() {
        let ext_instance = ext_instance();
        let instance = import_instance(&ext_instance).unwrap();
        let job = ArrangementJob::new(instance.build_volume.clone(), ArrangeConfig::default()).unwrap();
        let arrangement = job.arrange_all(&instance.fixed, &instance.movable).unwrap();
        let solution = export_arrangement(&arrangement, &instance.movable_refs, 42);

        assert!(solution.all_placed);
        assert_eq!(solution.run_time_ms, 42);
        assert_eq!(solution.placements.len(), 5);
        for (placement, obj_ref) in solution.placements.iter().zip(instance.movable_refs.iter()) {
            assert_eq!(placement.object_id, obj_ref.id);
            assert_eq!(placement.copy, obj_ref.copy);
            assert!(placement.placed);
            assert!(placement.priority.is_some());
        }

        let json = serde_json::to_string(&solution).unwrap();
        assert!(json.contains("\"all_placed\":true"));
    }

    #[test]
    fn unplaced_objects_are_exported_without_priority() {
        let mut ext_instance = ext_instance();
        ext_instance.objects[0].copies = 40;
        let instance = import_instance(&ext_instance).unwrap();
        let job = ArrangementJob::new(instance.build_volume.clone(), ArrangeConfig::default()).unwrap();
        let arrangement = job.arrange_all(&instance.fixed, &instance.movable).unwrap();
        let solution = export_arrangement(&arrangement, &instance.movable_refs, 0);

        assert!(!solution.all_placed);
        let unplaced = solution.placements.iter().filter(|p| !p.placed).collect::<Vec<_>>();
        assert!(!unplaced.is_empty());
        assert!(unplaced.iter().all(|p| p.priority.is_none()));
        assert!(unplaced.iter().any(|p| p.translation == (200.0, 0.0)));
    }

    #[test]
    fn svg_contains_every_layer() {
        let instance = import_instance(&ext_instance()).unwrap();
        let config = ArrangeConfig::default();
        let job = ArrangementJob::new(instance.build_volume.clone(), config.clone()).unwrap();
        let arrangement = job.arrange_all(&instance.fixed, &instance.movable).unwrap();

        let document = arrangement_to_svg(
            &instance,
            &arrangement,
            &config,
            SvgDrawOptions::default(),
            "calibration_plate",
        );
        let svg = document.to_string();
        for id in ["bed", "fixed", "objects"] {
            assert!(svg.contains(&format!("id=\"{id}\"")), "missing group {id}");
        }
        assert!(svg.contains("disallowed area 0"));
        assert!(svg.contains("edge margin: 2"));
        assert!(svg.contains("placed: 5/5"));
    }

    #[test_case(ExtShape::Rectangle { x_min: 0.0, y_min: 0.0, width: 0.0, height: 10.0 }; "flat rectangle")]
    #[test_case(ExtShape::Rectangle { x_min: 0.0, y_min: 0.0, width: 10.0, height: -1.0 }; "negative height")]
    #[test_case(ExtShape::Polygon(vec![]); "empty polygon")]
    #[test_case(ExtShape::Polygon(vec![(0.0, 0.0), (f64::NAN, 1.0), (1.0, 0.0)]); "nan vertex")]
    fn invalid_shapes_are_rejected(shape: ExtShape) {
        assert!(matches!(import_shape(&shape), Err(ArrangeError::InvalidInput(_))));
    }

    #[test]
    fn invalid_object_fails_the_import() {
        let mut ext_instance = ext_instance();
        ext_instance.objects[1].shape = ExtShape::Polygon(vec![]);
        assert!(matches!(
            import_instance(&ext_instance),
            Err(ArrangeError::InvalidInput(_))
        ));
    }
}
