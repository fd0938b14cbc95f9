//! IO module - configuration handling for stretching simulations.

mod config;

pub use config::{read_config, SimulationConfig};
