//! Metropolis acceptance rule.
//!
//! Downhill moves are always accepted; uphill moves with probability
//! exp(−ΔE / k_B T). In the long run conformations are visited with
//! frequency proportional to their Boltzmann weight.

use crate::chain::Conformation;
use crate::energy::EnergyModel;
use rand::Rng;

/// The Metropolis criterion for one energy model at one temperature.
/// Stateless between calls; each uphill decision consumes one uniform draw.
#[derive(Clone, Copy, Debug)]
pub struct Metropolis {
    energy: EnergyModel,
    temperature: f64,
    boltzmann: f64,
}

impl Metropolis {
    /// `boltzmann` is injected rather than read from a global so alternate
    /// unit systems (and test doubles) can substitute their own value.
    pub fn new(energy: EnergyModel, temperature: f64, boltzmann: f64) -> Self {
        Self {
            energy,
            temperature,
            boltzmann,
        }
    }

    /// Decide whether to replace `current` with `candidate`.
    ///
    /// The uphill branch has ΔE ≥ 0, so the exponent is ≤ 0 and the
    /// acceptance probability lies in (0, 1]; no overflow is possible.
    pub fn accepts(
        &self,
        current: &Conformation,
        candidate: &Conformation,
        rng: &mut impl Rng,
    ) -> bool {
        let e_current = self.energy.energy(current);
        let e_candidate = self.energy.energy(candidate);

        if e_candidate < e_current {
            return true;
        }
        let p = ((e_current - e_candidate) / (self.boltzmann * self.temperature)).exp();
        rng.gen::<f64>() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::BOLTZMANN;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_downhill_always_accepted() {
        let metropolis = Metropolis::new(EnergyModel::new(1.0, 1.0), 300.0, BOLTZMANN);
        let coiled = Conformation::from_angles(vec![1.5, -1.5, 1.5]);
        let stretched = Conformation::from_angles(vec![0.0, 0.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert!(metropolis.accepts(&coiled, &stretched, &mut rng));
        }
    }

    #[test]
    fn test_equal_energy_always_accepted() {
        // ΔE = 0 gives P = 1 and u ∈ [0, 1) is always below it.
        let metropolis = Metropolis::new(EnergyModel::new(1.0, 1.0), 300.0, BOLTZMANN);
        let a = Conformation::from_angles(vec![0.5, -0.5]);
        let b = Conformation::from_angles(vec![-0.5, 0.5]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(metropolis.accepts(&a, &b, &mut rng));
        }
    }

    #[test]
    fn test_uphill_rejected_at_low_temperature() {
        // With k_B T tiny relative to ΔE the acceptance probability
        // underflows to 0; no uphill move should ever pass.
        let metropolis = Metropolis::new(EnergyModel::new(1.0, 1.0), 1e-6, BOLTZMANN);
        let stretched = Conformation::from_angles(vec![0.0, 0.0, 0.0]);
        let coiled = Conformation::from_angles(vec![1.5, -1.5, 1.5]);
        let mut rng = StdRng::seed_from_u64(2);
        let accepted = (0..10_000)
            .filter(|_| metropolis.accepts(&stretched, &coiled, &mut rng))
            .count();
        assert_eq!(accepted, 0);
    }

    #[test]
    fn test_uphill_sometimes_accepted_at_high_temperature() {
        // Unit-scale k_B makes thermal energy comparable to ΔE.
        let metropolis = Metropolis::new(EnergyModel::new(1.0, 1.0), 1.0, 1.0);
        let stretched = Conformation::from_angles(vec![0.0, 0.0, 0.0]);
        let coiled = Conformation::from_angles(vec![1.5, -1.5, 1.5]);
        let mut rng = StdRng::seed_from_u64(3);
        let accepted = (0..10_000)
            .filter(|_| metropolis.accepts(&stretched, &coiled, &mut rng))
            .count();
        assert!(accepted > 0);
        assert!(accepted < 10_000);
    }
}
