//! DNA Stretch - Metropolis Monte Carlo simulation of DNA stretching in Rust
//!
//! This crate simulates the mechanical stretching of a semi-flexible polymer
//! chain held under an external pulling force and reports the equilibrium
//! mean end-to-end extension. Companion utilities cover the surrounding
//! experiment: worm-like-chain calibration, Newton minimum search, and CCD
//! bead-image reduction.

pub mod chain;
pub mod convergence;
pub mod energy;
pub mod errors;
pub mod imaging;
pub mod io;
pub mod metropolis;
pub mod moves;
pub mod optimize;
pub mod simulation;
pub mod stats;
pub mod wlc;

// Re-export commonly used types at crate root
pub use chain::Conformation;
pub use convergence::{ExtensionWindow, WINDOW_CAPACITY};
pub use energy::{EnergyModel, BOLTZMANN};
pub use errors::{FitError, OptimizeError, SimulationError};
pub use io::{read_config, SimulationConfig};
pub use metropolis::Metropolis;
pub use moves::BlockProposer;
pub use simulation::{run_simulation, Simulation, SimulationParams};
pub use wlc::{fit_wlc, wlc_force, WlcFit};
