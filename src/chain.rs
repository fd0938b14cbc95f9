//! Planar freely-rotating chain model of a DNA strand.
//!
//! The strand is reduced to N rigid segments of equal length; a conformation
//! is the vector of segment orientation angles in (-π, π]. The observable of
//! interest is the projected end-to-end extension along the pulling axis.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::f64::consts::PI;

/// A chain conformation: one orientation angle per segment.
///
/// Replaced wholesale on each accepted Monte Carlo move, never mutated in
/// place; the chain length is fixed for the lifetime of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Conformation {
    angles: Vec<f64>,
}

impl Conformation {
    /// Build a conformation from explicit angles.
    pub fn from_angles(angles: Vec<f64>) -> Self {
        Self { angles }
    }

    /// Draw a fresh conformation of `n` segments, each angle uniform over
    /// (-π, π].
    pub fn random(n: usize, rng: &mut impl Rng) -> Self {
        let dist = Uniform::new(-PI, PI);
        let angles = (0..n).map(|_| dist.sample(rng)).collect();
        Self { angles }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Segment orientation angles.
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Projected end-to-end extension along the pulling axis:
    /// z = ℓ · Σ cos θᵢ. An empty chain has extension 0.
    pub fn extension(&self, segment_length: f64) -> f64 {
        segment_length * self.angles.iter().map(|&theta| theta.cos()).sum::<f64>()
    }
}
