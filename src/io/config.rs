//! YAML configuration for a simulation run.

use crate::errors::SimulationError;
use crate::simulation::SimulationParams;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// On-disk run description: the physical parameters plus optional
/// reproducibility and budget knobs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(flatten)]
    pub params: SimulationParams,
    /// Seed for the random source; omit for entropy-based seeding
    pub seed: Option<u64>,
    /// Iteration ceiling; omit to sample until convergence
    pub max_steps: Option<u64>,
}

/// Read and validate a run configuration from a YAML file.
///
/// Example file:
/// ```yaml
/// force: 1.0
/// n_segments: 10
/// segment_length: 1.0
/// temperature: 300.0
/// block_size: 3
/// tolerance: 1.0e-5
/// seed: 42
/// max_steps: 10000000
/// ```
pub fn read_config(path: impl AsRef<Path>) -> Result<SimulationConfig, SimulationError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config: SimulationConfig = serde_yaml::from_reader(reader)?;
    config.params.validate()?;
    Ok(config)
}
