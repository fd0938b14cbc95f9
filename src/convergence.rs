//! Online stationarity test over a trailing window of extension samples.
//!
//! The sampler is declared equilibrated once the variance of the most recent
//! W samples drops below a tolerance. A trailing fixed-size window detects
//! when recent samples have stopped drifting without needing an analytic
//! equilibration-time estimate.

use crate::stats;
use std::collections::VecDeque;

/// Number of trailing extension samples the convergence test looks at.
pub const WINDOW_CAPACITY: usize = 500;

/// Fixed-capacity FIFO of the most recent extension samples.
#[derive(Clone, Debug)]
pub struct ExtensionWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl ExtensionWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest entry once the window is full.
    pub fn record(&mut self, sample: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True once `capacity` samples have been recorded.
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Arithmetic mean of the current contents.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let (head, tail) = self.samples.as_slices();
        (stats::mean(head) * head.len() as f64 + stats::mean(tail) * tail.len() as f64)
            / self.samples.len() as f64
    }

    /// Population variance of the current contents.
    pub fn variance(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let m = self.mean();
        self.samples.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / self.samples.len() as f64
    }

    /// The convergence test: the window must be exactly full, and its
    /// population variance strictly below `tolerance`. A partially filled
    /// window never reports convergence, whatever its variance.
    pub fn is_converged(&self, tolerance: f64) -> bool {
        self.is_full() && self.variance() < tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_partial_window_never_converges() {
        let mut window = ExtensionWindow::new(500);
        for _ in 0..499 {
            window.record(1.0);
        }
        // Variance is exactly zero, but the window is not yet full.
        assert_relative_eq!(window.variance(), 0.0);
        assert!(!window.is_converged(1e9));
    }

    #[test]
    fn test_full_constant_window_converges() {
        let mut window = ExtensionWindow::new(500);
        for _ in 0..500 {
            window.record(2.5);
        }
        assert!(window.is_full());
        assert_relative_eq!(window.variance(), 0.0);
        assert!(window.is_converged(1e-12));
        assert_relative_eq!(window.mean(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_fifo_eviction() {
        let mut window = ExtensionWindow::new(3);
        for x in [1.0, 2.0, 3.0, 4.0] {
            window.record(x);
        }
        assert_eq!(window.len(), 3);
        // 1.0 evicted; mean of {2, 3, 4}.
        assert_relative_eq!(window.mean(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_variance_gate() {
        let mut window = ExtensionWindow::new(4);
        for x in [0.0, 1.0, 0.0, 1.0] {
            window.record(x);
        }
        assert_relative_eq!(window.variance(), 0.25, epsilon = 1e-12);
        assert!(!window.is_converged(0.25)); // strict inequality
        assert!(window.is_converged(0.26));
    }
}
