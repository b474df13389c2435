use crate::error::{FitError, Result};
use crate::evolution::{Differentiable, Problem};
use crate::polynomial;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

// Gaussian perturbation applied to the stored samples
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoiseConfig {
    pub mean: f64,
    pub std_dev: f64,
    pub seed: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 0.5,
            seed: 0,
        }
    }
}

impl NoiseConfig {
    fn distribution(&self) -> Result<Normal<f64>> {
        if !self.mean.is_finite() {
            return Err(FitError::config(format!(
                "noise mean ({}) must be finite",
                self.mean
            )));
        }
        if !(self.std_dev.is_finite() && self.std_dev >= 0.0) {
            return Err(FitError::config(format!(
                "noise std_dev ({}) must be finite and >= 0",
                self.std_dev
            )));
        }
        Normal::new(self.mean, self.std_dev).map_err(|e| {
            FitError::config(format!("noise std_dev ({}): {}", self.std_dev, e))
        })
    }
}

fn target(x: f64) -> f64 {
    (2.0 * PI * x).sin()
}

// `samples` points spread evenly over [0, 1], both endpoints included
pub fn linspace(samples: usize) -> Vec<f64> {
    let last = samples.saturating_sub(1).max(1) as f64;
    (0..samples).map(|i| i as f64 / last).collect()
}

// Least-squares fit of a polynomial to samples of sin(2πx) on [0, 1]
#[derive(Clone, Debug)]
pub struct FittingProblem {
    xs: Vec<f64>,
    ys: Vec<f64>,
    truth: Vec<f64>,
}

impl FittingProblem {
    pub fn new(samples: usize) -> Result<Self> {
        if samples < 2 {
            return Err(FitError::config(format!(
                "sample count ({}) must be >= 2",
                samples
            )));
        }

        let xs = linspace(samples);
        let truth: Vec<f64> = xs.iter().map(|&x| target(x)).collect();

        Ok(Self {
            ys: truth.clone(),
            xs,
            truth,
        })
    }

    // Only the stored samples are perturbed, `true_error` still measures
    // against the noise-free values
    pub fn with_noise(samples: usize, noise: &NoiseConfig) -> Result<Self> {
        let mut problem = Self::new(samples)?;
        let normal = noise.distribution()?;
        let mut rng = StdRng::seed_from_u64(noise.seed);

        for y in problem.ys.iter_mut() {
            *y += normal.sample(&mut rng);
        }

        tracing::debug!(
            samples,
            mean = noise.mean,
            std_dev = noise.std_dev,
            "perturbed samples with gaussian noise"
        );

        Ok(problem)
    }

    pub fn from_config(samples: usize, noise: Option<&NoiseConfig>) -> Result<Self> {
        match noise {
            Some(noise) => Self::with_noise(samples, noise),
            None => Self::new(samples),
        }
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn truth(&self) -> &[f64] {
        &self.truth
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn objective(&self, w: &[f64]) -> f64 {
        sum_of_squares(&self.xs, &self.ys, w)
    }

    pub fn true_error(&self, w: &[f64]) -> f64 {
        sum_of_squares(&self.xs, &self.truth, w)
    }

    pub fn gradient(&self, w: &[f64]) -> Vec<f64> {
        let mut grad = vec![0.0; w.len()];

        for (&x, &y) in self.xs.iter().zip(&self.ys) {
            let residual = y - polynomial::evaluate_at(x, w);
            let mut power = 1.0;
            for g in grad.iter_mut() {
                *g -= 2.0 * residual * power;
                power *= x;
            }
        }

        grad
    }
}

fn sum_of_squares(xs: &[f64], ys: &[f64], w: &[f64]) -> f64 {
    xs.iter()
        .zip(ys)
        .map(|(&x, &y)| {
            let d = y - polynomial::evaluate_at(x, w);
            d * d
        })
        .sum()
}

impl Problem for FittingProblem {
    fn objective(&self, candidate: &[f64]) -> f64 {
        FittingProblem::objective(self, candidate)
    }
}

impl Differentiable for FittingProblem {
    fn gradient(&self, candidate: &[f64]) -> Vec<f64> {
        FittingProblem::gradient(self, candidate)
    }
}
