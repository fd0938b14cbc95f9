//! Worm-like-chain force law and calibration against measured data.
//!
//! The interpolation formula for the WLC restoring force is
//! F(z) = (k_B·T / L_p) · (1/(4(1−z/L_0)²) − 1/4 + z/L_0), with L_p the
//! persistence length and L_0 the contour length. `fit_wlc` recovers both
//! parameters from experimental (force, extension) pairs by damped
//! Gauss-Newton least squares.

use crate::errors::FitError;
use nalgebra::{Matrix2, Vector2};

const MAX_FIT_ITERATIONS: usize = 200;
const STEP_TOLERANCE: f64 = 1e-12;

/// WLC interpolation force at extension `z`.
///
/// Diverges as z → L_0; callers are expected to stay below the contour
/// length.
pub fn wlc_force(z: f64, lp: f64, l0: f64, temperature: f64, boltzmann: f64) -> f64 {
    let s = z / l0;
    (boltzmann * temperature / lp) * (1.0 / (4.0 * (1.0 - s) * (1.0 - s)) - 0.25 + s)
}

/// Result of a WLC calibration fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WlcFit {
    pub persistence_length: f64,
    pub contour_length: f64,
}

/// Fit {L_p, L_0} to `data`, a slice of (force, extension) pairs.
///
/// Gauss-Newton with a finite-difference Jacobian and step halving; the
/// contour length is kept above the largest measured extension so the model
/// stays finite at every iterate.
pub fn fit_wlc(
    data: &[(f64, f64)],
    temperature: f64,
    boltzmann: f64,
) -> Result<WlcFit, FitError> {
    if data.len() < 2 {
        return Err(FitError::TooFewPoints {
            needed: 2,
            got: data.len(),
        });
    }

    let z_max = data
        .iter()
        .map(|&(_, z)| z)
        .fold(f64::NEG_INFINITY, f64::max);
    let l0_floor = z_max * (1.0 + 1e-6);

    // Start with a generous contour length, then match the persistence
    // length to the midpoint force.
    let mut l0 = 2.0 * z_max;
    let (f_mid, z_mid) = data[data.len() / 2];
    let shape_mid = {
        let s = z_mid / l0;
        1.0 / (4.0 * (1.0 - s) * (1.0 - s)) - 0.25 + s
    };
    let mut lp = boltzmann * temperature * shape_mid / f_mid;

    let cost = |lp: f64, l0: f64| -> f64 {
        data.iter()
            .map(|&(f, z)| {
                let r = wlc_force(z, lp, l0, temperature, boltzmann) - f;
                r * r
            })
            .sum()
    };

    let mut current_cost = cost(lp, l0);

    for _ in 0..MAX_FIT_ITERATIONS {
        // Finite-difference Jacobian of the residual vector in (lp, l0).
        let h_lp = lp * 1e-6;
        let h_l0 = l0 * 1e-6;
        let mut jtj = Matrix2::zeros();
        let mut jtr = Vector2::zeros();
        for &(f, z) in data {
            let r = wlc_force(z, lp, l0, temperature, boltzmann) - f;
            let d_lp = (wlc_force(z, lp + h_lp, l0, temperature, boltzmann)
                - wlc_force(z, lp - h_lp, l0, temperature, boltzmann))
                / (2.0 * h_lp);
            let d_l0 = (wlc_force(z, lp, l0 + h_l0, temperature, boltzmann)
                - wlc_force(z, lp, l0 - h_l0, temperature, boltzmann))
                / (2.0 * h_l0);
            let j = Vector2::new(d_lp, d_l0);
            jtj += j * j.transpose();
            jtr += j * r;
        }

        let inverse = jtj
            .try_inverse()
            .ok_or(FitError::SingularNormalEquations)?;
        let full_step: Vector2<f64> = -(inverse * jtr);

        // Step halving: shrink until the step is admissible and decreases
        // the cost.
        let mut scale = 1.0;
        let mut improved = false;
        for _ in 0..40 {
            let lp_new = lp + scale * full_step[0];
            let l0_new = l0 + scale * full_step[1];
            if lp_new > 0.0 && l0_new > l0_floor {
                let new_cost = cost(lp_new, l0_new);
                if new_cost < current_cost {
                    let relative_step = (scale * full_step[0] / lp).abs()
                        .max((scale * full_step[1] / l0).abs());
                    lp = lp_new;
                    l0 = l0_new;
                    current_cost = new_cost;
                    improved = true;
                    if relative_step < STEP_TOLERANCE {
                        return Ok(WlcFit {
                            persistence_length: lp,
                            contour_length: l0,
                        });
                    }
                    break;
                }
            }
            scale *= 0.5;
        }

        if !improved {
            // No admissible descent direction left: the iterate is at a
            // numerical minimum.
            return Ok(WlcFit {
                persistence_length: lp,
                contour_length: l0,
            });
        }
    }

    Err(FitError::NoConvergence(MAX_FIT_ITERATIONS))
}
