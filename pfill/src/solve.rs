use std::time::Instant;

use anyhow::Result;
use log::{debug, info};
use plate_arrange::io::export::export_arrangement;
use plate_arrange::io::ext_repr::{ExtInstance, ExtSolution};
use plate_arrange::io::import::{Instance, import_instance};
use plate_arrange::job::{Arrangement, ArrangementJob, CancelToken};
use thousands::Separable;

use crate::config::PFillConfig;

/// An imported instance together with its arrangement
pub struct PFillSolution {
    pub instance: Instance,
    pub arrangement: Arrangement,
    pub ext_solution: ExtSolution,
}

/// Imports `ext_instance` and arranges all of its objects on the bed
pub fn solve(ext_instance: &ExtInstance, config: &PFillConfig) -> Result<PFillSolution> {
    let start = Instant::now();
    let instance = import_instance(ext_instance)?;
    let job = ArrangementJob::new(instance.build_volume.clone(), config.arrange_config.clone())?;

    let arrangement = job.arrange(
        &instance.fixed,
        &instance.movable,
        |fraction| debug!("[PFILL] {:.0}% of the objects processed", fraction * 100.0),
        || {},
        &CancelToken::new(),
    )?;

    let run_time = start.elapsed();
    let n_anchors: usize = arrangement
        .placements
        .iter()
        .map(|p| p.stats().anchors_tested)
        .sum();
    info!(
        "[PFILL] arranged {:?} in {:.3}ms, {}/{} objects placed ({} anchors tested)",
        instance.name,
        run_time.as_secs_f64() * 1000.0,
        arrangement.n_placed(),
        arrangement.placements.len(),
        n_anchors.separate_with_commas()
    );

    let ext_solution = export_arrangement(
        &arrangement,
        &instance.movable_refs,
        run_time.as_millis() as u64,
    );

    Ok(PFillSolution {
        instance,
        arrangement,
        ext_solution,
    })
}
