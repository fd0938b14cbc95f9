//! Mechanical potential energy of the chain under a constant pulling force.

use crate::chain::Conformation;

/// Boltzmann constant in J/K (CODATA 2018).
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Energy model for a chain pulled by a constant force along the measured
/// axis: E = −F·z. No internal elastic term in this reduced model, so more
/// extended conformations are lower in energy when F > 0.
#[derive(Clone, Copy, Debug)]
pub struct EnergyModel {
    pub force: f64,
    pub segment_length: f64,
}

impl EnergyModel {
    pub fn new(force: f64, segment_length: f64) -> Self {
        Self {
            force,
            segment_length,
        }
    }

    /// Potential energy of `conformation` under the applied force.
    pub fn energy(&self, conformation: &Conformation) -> f64 {
        -self.force * conformation.extension(self.segment_length)
    }
}
