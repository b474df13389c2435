use crate::population::Population;

// A candidate solution - polynomial coefficients where index k
// multiplies x^k
pub type Candidate = Vec<f64>;

// This trait represents the function minimized by the optimizer.
// It must be pure: the same candidate always yields the same value
pub trait Problem: Send + Sync {
    fn objective(&self, candidate: &[f64]) -> f64;
}

// Problems that can also report the gradient of their objective
pub trait Differentiable: Problem {
    fn gradient(&self, candidate: &[f64]) -> Vec<f64>;
}

// This trait observes the run after every generation. It only
// reports, the number of generations is fixed up front
pub trait Monitor {
    fn on_generation(&mut self, population: &Population, objectives: &[f64], generation: usize);
}

// Monitor that ignores every notification
#[derive(Debug, Default)]
pub struct Silent;

impl Monitor for Silent {
    fn on_generation(&mut self, _: &Population, _: &[f64], _: usize) {}
}
