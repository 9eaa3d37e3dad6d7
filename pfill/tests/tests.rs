#[cfg(test)]
mod tests {
    use std::path::Path;

    use pfill::config::PFillConfig;
    use pfill::io;
    use pfill::io::output::PFillOutput;
    use pfill::solve::solve;
    use plate_arrange::config::PriorityStrategy;
    use test_case::test_case;

    #[test_case("../assets/calibration_plate.json", true; "calibration_plate")]
    #[test_case("../assets/crowded_plate.json", false; "crowded_plate")]
    fn test_instance(instance_path: &str, all_placed: bool) {
        let ext_instance = io::read_instance(Path::new(instance_path)).unwrap();
        let config = PFillConfig::default();
        let solution = solve(&ext_instance, &config).unwrap();

        let n_copies: usize = ext_instance.objects.iter().map(|o| o.copies).sum();
        assert_eq!(solution.ext_solution.placements.len(), n_copies);
        assert_eq!(solution.ext_solution.all_placed, all_placed);
        assert_eq!(solution.arrangement.all_placed, all_placed);
    }

    #[test_case(PriorityStrategy::CenterFirst; "center first")]
    #[test_case(PriorityStrategy::BackFirst; "back first")]
    fn solving_is_deterministic(strategy: PriorityStrategy) {
        let ext_instance = io::read_instance(Path::new("../assets/calibration_plate.json")).unwrap();
        let mut config = PFillConfig::default();
        config.arrange_config.priority_strategy = strategy;

        let first = solve(&ext_instance, &config).unwrap();
        let second = solve(&ext_instance, &config).unwrap();
        assert_eq!(first.arrangement, second.arrangement);
        assert_eq!(
            first.ext_solution.placements,
            second.ext_solution.placements
        );
    }

    #[test]
    fn output_embeds_instance_and_config() {
        let ext_instance = io::read_instance(Path::new("../assets/crowded_plate.json")).unwrap();
        let config = PFillConfig::default();
        let solution = solve(&ext_instance, &config).unwrap();
        let output = PFillOutput {
            instance: ext_instance,
            solution: solution.ext_solution,
            config,
        };

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["name"], "crowded_plate");
        assert!(json["bed"].is_object());
        assert!(json["solution"]["placements"].is_array());
        assert_eq!(json["config"]["arrange_config"]["stride"], 10);

        let parsed: PFillOutput = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.instance.objects.len(), 2);
    }

    #[test]
    fn partial_config_file() {
        let config: PFillConfig =
            serde_json::from_str(r#"{"arrange_config": {"clearance": 2.0}}"#).unwrap();
        assert_eq!(config.arrange_config.clearance, 2.0);
        assert_eq!(config.arrange_config.scale, 0.5);
        assert!(config.svg_draw_options.draw_offsets);
    }

    #[test]
    fn missing_instance_file() {
        assert!(io::read_instance(Path::new("../assets/does_not_exist.json")).is_err());
    }
}
