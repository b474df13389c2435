use crate::error::{FitError, Result};
use crate::evolution::{Candidate, Differentiable};

/// Fixed-step gradient descent, kept as a baseline for the evolutionary fit.
#[derive(Clone, Copy, Debug)]
pub struct SteepestDescent {
    pub step_size: f64,
}

impl Default for SteepestDescent {
    fn default() -> Self {
        Self { step_size: 0.01 }
    }
}

impl SteepestDescent {
    pub fn new(step_size: f64) -> Self {
        Self { step_size }
    }

    /// Applies `w ← w − (α/n)·∇f(w)` for `iterations` steps starting at `initial`,
    /// where `n` is the number of coefficients.
    pub fn run<P: Differentiable>(
        &self,
        problem: &P,
        initial: Candidate,
        iterations: usize,
    ) -> Result<Candidate> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(FitError::config(format!(
                "step size ({}) must be finite and > 0",
                self.step_size
            )));
        }
        if initial.is_empty() {
            return Err(FitError::config("initial point has no coefficients"));
        }

        let rate = self.step_size / initial.len() as f64;
        let mut w = initial;
        for iteration in 0..iterations {
            let grad = problem.gradient(&w);
            for (wk, gk) in w.iter_mut().zip(&grad) {
                *wk -= rate * gk;
            }

            if let Some(&value) = w.iter().find(|v| !v.is_finite()) {
                return Err(FitError::NonFiniteResult {
                    index: iteration,
                    value,
                });
            }
        }

        tracing::info!(
            iterations,
            step_size = self.step_size,
            objective = problem.objective(&w),
            "steepest descent complete"
        );

        Ok(w)
    }
}
