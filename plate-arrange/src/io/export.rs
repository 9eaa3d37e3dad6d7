use itertools::Itertools;

use crate::io::ext_repr::{ExtPlacement, ExtSolution};
use crate::io::import::ObjectRef;
use crate::job::{Arrangement, PlacementOutcome};

/// Exports an arrangement to an external representation.
///
/// * `refs` - The object and copy of every movable object, in the order they were arranged.
/// * `run_time_ms` - The time it took to compute the arrangement.
pub fn export_arrangement(
    arrangement: &Arrangement,
    refs: &[ObjectRef],
    run_time_ms: u64,
) -> ExtSolution {
    assert_eq!(arrangement.placements.len(), refs.len());

    let placements = arrangement
        .placements
        .iter()
        .zip(refs.iter())
        .map(|(outcome, obj_ref)| ExtPlacement {
            object_id: obj_ref.id,
            copy: obj_ref.copy,
            placed: outcome.is_placed(),
            translation: outcome.translation().into(),
            priority: match outcome {
                PlacementOutcome::Placed(p) => Some(p.priority),
                PlacementOutcome::Unplaced { .. } => None,
            },
        })
        .collect_vec();

    ExtSolution {
        placements,
        all_placed: arrangement.all_placed,
        run_time_ms,
    }
}
