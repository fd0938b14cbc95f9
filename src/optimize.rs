//! Finite-difference derivatives and Newton local-minimum search, in one and
//! two dimensions. Used to locate minima of fitted force-extension energy
//! landscapes; independent of the sampler.

use crate::errors::OptimizeError;
use nalgebra::{Matrix2, Vector2};

const GRADIENT_TOLERANCE: f64 = 1e-7;
const MAX_NEWTON_ITERATIONS: usize = 10_000;

/// Central-difference first derivative of `phi` at `x` with step `h`.
pub fn derivative(phi: impl Fn(f64) -> f64, x: f64, h: f64) -> f64 {
    (phi(x + h) - phi(x - h)) / (2.0 * h)
}

/// Central-difference second derivative of `phi` at `x` with step `h`.
pub fn second_derivative(phi: impl Fn(f64) -> f64, x: f64, h: f64) -> f64 {
    (phi(x + h) - 2.0 * phi(x) + phi(x - h)) / (h * h)
}

/// Newton search for a local minimum of `phi` starting from `x0`.
/// Iterates x ← x − φ′(x)/φ″(x) until |φ′(x)| falls below 1e-7.
pub fn minimize_1d(
    phi: impl Fn(f64) -> f64,
    x0: f64,
    h: f64,
) -> Result<f64, OptimizeError> {
    let mut x = x0;
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let slope = derivative(&phi, x, h);
        if slope.abs() < GRADIENT_TOLERANCE {
            return Ok(x);
        }
        let curvature = second_derivative(&phi, x, h);
        if curvature == 0.0 || !curvature.is_finite() {
            return Err(OptimizeError::SingularCurvature);
        }
        x -= slope / curvature;
    }
    Err(OptimizeError::NoConvergence(MAX_NEWTON_ITERATIONS))
}

/// Central-difference gradient of `g` at `x`.
pub fn gradient(g: impl Fn(Vector2<f64>) -> f64, x: Vector2<f64>, h: f64) -> Vector2<f64> {
    let ex = Vector2::new(h, 0.0);
    let ey = Vector2::new(0.0, h);
    Vector2::new(
        (g(x + ex) - g(x - ex)) / (2.0 * h),
        (g(x + ey) - g(x - ey)) / (2.0 * h),
    )
}

/// Central-difference Hessian of `g` at `x`. Symmetric by construction.
pub fn hessian(g: impl Fn(Vector2<f64>) -> f64, x: Vector2<f64>, h: f64) -> Matrix2<f64> {
    let ex = Vector2::new(h, 0.0);
    let ey = Vector2::new(0.0, h);
    let gxx = (g(x + ex) - 2.0 * g(x) + g(x - ex)) / (h * h);
    let gyy = (g(x + ey) - 2.0 * g(x) + g(x - ey)) / (h * h);
    let gxy = (g(x + ex + ey) - g(x + ex - ey) - g(x - ex + ey) + g(x - ex - ey)) / (4.0 * h * h);
    Matrix2::new(gxx, gxy, gxy, gyy)
}

/// Newton search for a local minimum of `g` on the plane: solves
/// H·Δ = −∇g at each iterate until ‖∇g‖ falls below 1e-7.
pub fn minimize_2d(
    g: impl Fn(Vector2<f64>) -> f64,
    x0: Vector2<f64>,
    h: f64,
) -> Result<Vector2<f64>, OptimizeError> {
    let mut x = x0;
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let grad = gradient(&g, x, h);
        if grad.norm() < GRADIENT_TOLERANCE {
            return Ok(x);
        }
        let hess = hessian(&g, x, h);
        let inverse = hess
            .try_inverse()
            .ok_or(OptimizeError::SingularCurvature)?;
        x -= inverse * grad;
    }
    Err(OptimizeError::NoConvergence(MAX_NEWTON_ITERATIONS))
}
