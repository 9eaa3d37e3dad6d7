use plate_arrange::io::ext_repr::{ExtInstance, ExtSolution};
use serde::{Deserialize, Serialize};

use crate::config::PFillConfig;

/// Everything written to the solution file: the instance, its arrangement and the config used
#[derive(Serialize, Deserialize, Clone)]
pub struct PFillOutput {
    #[serde(flatten)]
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub config: PFillConfig,
}
