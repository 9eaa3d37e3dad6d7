use std::fs;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use pfill::config::PFillConfig;
use pfill::io;
use pfill::io::cli::Cli;
use pfill::io::output::PFillOutput;
use pfill::solve::solve;
use plate_arrange::io::svg::arrangement_to_svg;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            PFillConfig::default()
        }
        Some(config_file) => io::read_config(config_file)?,
    };
    info!("[MAIN] Successfully parsed PFillConfig: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let ext_instance = io::read_instance(&args.input_file)?;
    let solution = solve(&ext_instance, &config)?;

    if !args.no_svg {
        let svg = arrangement_to_svg(
            &solution.instance,
            &solution.arrangement,
            &config.arrange_config,
            config.svg_draw_options,
            &ext_instance.name,
        );
        let svg_path = args.solution_folder.join(format!("sol_{input_stem}.svg"));
        io::write_svg(&svg, &svg_path)?;
    }

    let output = PFillOutput {
        instance: ext_instance,
        solution: solution.ext_solution,
        config,
    };
    let solution_path = args.solution_folder.join(format!("sol_{input_stem}.json"));
    io::write_json(&output, &solution_path)?;

    Ok(())
}
