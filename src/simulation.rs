//! Simulation driver: the Metropolis Monte Carlo loop for a pulled chain.
//!
//! One iteration is propose → accept/reject → re-measure → record. The loop
//! is a Markov chain: each step depends on the conformation the previous
//! step retained, so iterations are strictly sequential. Independent runs
//! with different parameters share no state and may be launched in parallel
//! by the caller.

use crate::chain::Conformation;
use crate::convergence::{ExtensionWindow, WINDOW_CAPACITY};
use crate::energy::{EnergyModel, BOLTZMANN};
use crate::errors::SimulationError;
use crate::metropolis::Metropolis;
use crate::moves::BlockProposer;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Immutable parameter set for one simulation run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Pulling force along the measured axis
    pub force: f64,
    /// Number of chain segments
    pub n_segments: usize,
    /// Length of each rigid segment
    pub segment_length: f64,
    /// Temperature in Kelvin
    pub temperature: f64,
    /// Number of consecutive angles re-drawn per proposal
    pub block_size: usize,
    /// Convergence threshold on the window variance
    pub tolerance: f64,
    /// Boltzmann constant; override to work in a different unit system
    #[serde(default = "default_boltzmann")]
    pub boltzmann: f64,
}

fn default_boltzmann() -> f64 {
    BOLTZMANN
}

impl SimulationParams {
    pub fn new(
        force: f64,
        n_segments: usize,
        segment_length: f64,
        temperature: f64,
        block_size: usize,
        tolerance: f64,
    ) -> Self {
        Self {
            force,
            n_segments,
            segment_length,
            temperature,
            block_size,
            tolerance,
            boltzmann: BOLTZMANN,
        }
    }

    /// Fail fast on any precondition violation, before any sampler state is
    /// built. Nothing is silently clamped.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.n_segments == 0 {
            return Err(SimulationError::EmptyChain(self.n_segments));
        }
        if self.block_size == 0 || self.block_size > self.n_segments {
            return Err(SimulationError::InvalidBlockSize {
                block_size: self.block_size,
                chain_length: self.n_segments,
            });
        }
        if self.temperature <= 0.0 {
            return Err(SimulationError::NonPositiveTemperature(self.temperature));
        }
        if self.tolerance <= 0.0 {
            return Err(SimulationError::NonPositiveTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// A running Monte Carlo simulation. Owns the current conformation, the
/// trailing extension window, and the random source.
pub struct Simulation<R: Rng> {
    params: SimulationParams,
    proposer: BlockProposer,
    metropolis: Metropolis,
    chain: Conformation,
    window: ExtensionWindow,
    steps: u64,
    rng: R,
}

impl<R: Rng> Simulation<R> {
    /// Validate the parameters and draw the initial random conformation.
    pub fn new(params: SimulationParams, mut rng: R) -> Result<Self, SimulationError> {
        params.validate()?;
        let proposer = BlockProposer::new(params.block_size, params.n_segments)?;
        let energy = EnergyModel::new(params.force, params.segment_length);
        let metropolis = Metropolis::new(energy, params.temperature, params.boltzmann);
        let chain = Conformation::random(params.n_segments, &mut rng);
        Ok(Self {
            params,
            proposer,
            metropolis,
            chain,
            window: ExtensionWindow::new(WINDOW_CAPACITY),
            steps: 0,
            rng,
        })
    }

    /// One Monte Carlo iteration. Returns the extension of the retained
    /// conformation, which is always re-measured and recorded whether the
    /// move was accepted or not.
    pub fn step(&mut self) -> f64 {
        let candidate = self.proposer.propose(&self.chain, &mut self.rng);
        if self.metropolis.accepts(&self.chain, &candidate, &mut self.rng) {
            self.chain = candidate;
        }
        let extension = self.chain.extension(self.params.segment_length);
        self.window.record(extension);
        self.steps += 1;
        extension
    }

    /// Run until the trailing window reports convergence, then return the
    /// mean extension over the final window.
    ///
    /// Unbounded by construction: termination depends on the stochastic
    /// process reaching a low-variance regime. Production callers that need
    /// a ceiling should use [`Simulation::run_bounded`].
    pub fn run(&mut self) -> f64 {
        while !self.is_converged() {
            self.step();
        }
        self.window.mean()
    }

    /// Like [`Simulation::run`], but gives up after `max_steps` further
    /// iterations and reports how many steps the run consumed in total.
    pub fn run_bounded(&mut self, max_steps: u64) -> Result<f64, SimulationError> {
        for _ in 0..max_steps {
            if self.is_converged() {
                return Ok(self.window.mean());
            }
            self.step();
        }
        if self.is_converged() {
            return Ok(self.window.mean());
        }
        Err(SimulationError::NotConverged(self.steps))
    }

    pub fn is_converged(&self) -> bool {
        self.window.is_converged(self.params.tolerance)
    }

    pub fn window(&self) -> &ExtensionWindow {
        &self.window
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Total Monte Carlo steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Current chain conformation.
    pub fn conformation(&self) -> &Conformation {
        &self.chain
    }
}

/// The lazy sample stream: each item is the extension recorded by one
/// Monte Carlo step. Never yields `None`; the caller decides when to stop
/// consuming (e.g. with `take` or by polling `is_converged`).
impl<R: Rng> Iterator for Simulation<R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.step())
    }
}

/// Convenience entry point: run a simulation to convergence with the
/// thread-local RNG and return the mean equilibrium extension.
pub fn run_simulation(
    force: f64,
    n_segments: usize,
    segment_length: f64,
    temperature: f64,
    block_size: usize,
    tolerance: f64,
) -> Result<f64, SimulationError> {
    let params = SimulationParams::new(
        force,
        n_segments,
        segment_length,
        temperature,
        block_size,
        tolerance,
    );
    let mut simulation = Simulation::new(params, rand::thread_rng())?;
    Ok(simulation.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_params() -> SimulationParams {
        SimulationParams::new(1.0, 10, 1.0, 300.0, 3, 1e-5)
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let mut p = test_params();
        p.n_segments = 0;
        assert!(matches!(p.validate(), Err(SimulationError::EmptyChain(_))));

        let mut p = test_params();
        p.block_size = 11;
        assert!(matches!(
            p.validate(),
            Err(SimulationError::InvalidBlockSize { .. })
        ));

        let mut p = test_params();
        p.temperature = 0.0;
        assert!(matches!(
            p.validate(),
            Err(SimulationError::NonPositiveTemperature(_))
        ));

        let mut p = test_params();
        p.tolerance = -1.0;
        assert!(matches!(
            p.validate(),
            Err(SimulationError::NonPositiveTolerance(_))
        ));
    }

    #[test]
    fn test_step_records_one_sample() {
        let mut sim = Simulation::new(test_params(), StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(sim.window().len(), 0);
        let z = sim.step();
        assert_eq!(sim.window().len(), 1);
        assert_eq!(sim.steps(), 1);
        assert!(z.abs() <= 10.0 + 1e-12);
    }

    #[test]
    fn test_iterator_yields_extensions() {
        let sim = Simulation::new(test_params(), StdRng::seed_from_u64(2)).unwrap();
        let samples: Vec<f64> = sim.take(100).collect();
        assert_eq!(samples.len(), 100);
        assert!(samples.iter().all(|z| z.abs() <= 10.0 + 1e-12));
    }

    #[test]
    fn test_run_bounded_reports_budget_exhaustion() {
        // 100 steps cannot even fill the 500-sample window.
        let mut sim = Simulation::new(test_params(), StdRng::seed_from_u64(3)).unwrap();
        match sim.run_bounded(100) {
            Err(SimulationError::NotConverged(steps)) => assert_eq!(steps, 100),
            other => panic!("expected NotConverged, got {other:?}"),
        }
    }

    #[test]
    fn test_run_terminates_and_is_physical() {
        let mut sim = Simulation::new(test_params(), StdRng::seed_from_u64(4)).unwrap();
        let z = sim.run_bounded(5_000_000).unwrap();
        // Finite force at room temperature: partial but positive extension.
        assert!(z > 0.0 && z < 10.0);
    }

    #[test]
    fn test_seeded_runs_are_bit_identical() {
        let mut a = Simulation::new(test_params(), StdRng::seed_from_u64(42)).unwrap();
        let mut b = Simulation::new(test_params(), StdRng::seed_from_u64(42)).unwrap();
        let za = a.run_bounded(5_000_000).unwrap();
        let zb = b.run_bounded(5_000_000).unwrap();
        assert_eq!(za.to_bits(), zb.to_bits());
        assert_eq!(a.steps(), b.steps());
    }

    #[test]
    fn test_independent_runs_agree_statistically() {
        let za = Simulation::new(test_params(), StdRng::seed_from_u64(10))
            .unwrap()
            .run_bounded(5_000_000)
            .unwrap();
        let zb = Simulation::new(test_params(), StdRng::seed_from_u64(11))
            .unwrap()
            .run_bounded(5_000_000)
            .unwrap();
        assert!((za - zb).abs() < 0.5);
    }
}
