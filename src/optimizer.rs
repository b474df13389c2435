use crate::error::{FitError, Result};
use crate::evolution::{Candidate, Monitor, Problem, Silent};
use crate::mutation::RandOneBinomial;
use crate::population::{self, Population};
use crate::selection::improves;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const MIN_POPULATION: usize = 4;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DEConfig {
    pub coefficients: usize,
    pub population_size: usize,
    pub scaling: f64,
    pub crossover_rate: f64,
}

impl Default for DEConfig {
    fn default() -> Self {
        Self {
            coefficients: 9,
            population_size: 30,
            scaling: 0.6,
            crossover_rate: 0.5,
        }
    }
}

impl DEConfig {
    pub fn validate(&self) -> Result<()> {
        if self.coefficients < 1 {
            return Err(FitError::config(format!(
                "coefficient count ({}) must be >= 1",
                self.coefficients
            )));
        }
        if self.population_size < MIN_POPULATION {
            return Err(FitError::config(format!(
                "population size ({}) must be >= {}",
                self.population_size, MIN_POPULATION
            )));
        }
        if !(self.crossover_rate > 0.0 && self.crossover_rate <= 1.0) {
            return Err(FitError::config(format!(
                "crossover rate ({}) must be in (0, 1]",
                self.crossover_rate
            )));
        }
        if !(self.scaling.is_finite() && self.scaling > 0.0) {
            return Err(FitError::config(format!(
                "scaling factor ({}) must be finite and > 0",
                self.scaling
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Running,
    Done,
}

/// Differential evolution over a fixed-size population.
///
/// Replacements are committed as soon as a trial wins, so later indices of
/// a sweep already see the members updated earlier in the same sweep.
#[derive(Debug)]
pub struct DifferentialEvolution<'p, P: Problem, R: Rng> {
    problem: &'p P,
    operator: RandOneBinomial,
    population: Population,
    objectives: Vec<f64>,
    rng: R,
    phase: Phase,
    generation: usize,
}

impl<'p, P: Problem> DifferentialEvolution<'p, P, StdRng> {
    pub fn with_seed(problem: &'p P, config: &DEConfig, seed: u64) -> Result<Self> {
        Self::new(problem, config, StdRng::seed_from_u64(seed))
    }
}

impl<'p, P: Problem, R: Rng> DifferentialEvolution<'p, P, R> {
    /// Validates `config` and samples the initial population from `rng`.
    pub fn new(problem: &'p P, config: &DEConfig, mut rng: R) -> Result<Self> {
        config.validate()?;

        let population = Population::random(config.population_size, config.coefficients, &mut rng);
        let objectives = evaluate_all(problem, &population)?;

        tracing::info!(
            population_size = config.population_size,
            coefficients = config.coefficients,
            scaling = config.scaling,
            crossover_rate = config.crossover_rate,
            "initialized population"
        );

        Ok(Self {
            problem,
            operator: RandOneBinomial::new(config.scaling, config.crossover_rate),
            population,
            objectives,
            rng,
            phase: Phase::Initialized,
            generation: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    pub fn into_population(self) -> Population {
        self.population
    }

    /// One sweep over every index in order, committing winners in place.
    pub fn step_generation(&mut self) -> Result<()> {
        if self.phase == Phase::Done {
            return Err(FitError::Finished);
        }
        self.phase = Phase::Running;

        let mut replaced = 0usize;
        for i in 0..self.population.len() {
            let trial = self.operator.propose(&self.population, i, &mut self.rng);
            let value = match FitError::ensure_finite(i, self.problem.objective(&trial)) {
                Ok(value) => value,
                Err(err) => {
                    self.phase = Phase::Done;
                    tracing::warn!(
                        generation = self.generation,
                        index = i,
                        "non-finite trial, run aborted"
                    );
                    return Err(err);
                }
            };

            if improves(value, self.objectives[i]) {
                self.population.replace(i, trial);
                self.objectives[i] = value;
                replaced += 1;
            }
        }

        self.generation += 1;
        tracing::debug!(generation = self.generation, replaced, "sweep complete");
        Ok(())
    }

    /// Runs exactly `iterations` generations and freezes the population.
    pub fn run(&mut self, iterations: usize) -> Result<&Population> {
        self.run_with(iterations, &mut Silent)
    }

    pub fn run_with<M: Monitor + ?Sized>(
        &mut self,
        iterations: usize,
        monitor: &mut M,
    ) -> Result<&Population> {
        if self.phase == Phase::Done {
            return Err(FitError::Finished);
        }

        for _ in 0..iterations {
            self.step_generation()?;
            monitor.on_generation(&self.population, &self.objectives, self.generation);
        }

        self.finish();
        Ok(&self.population)
    }

    /// Sweeps generations until `budget` of wall-clock time has elapsed.
    pub fn run_for(&mut self, budget: Duration) -> Result<&Population> {
        if self.phase == Phase::Done {
            return Err(FitError::Finished);
        }

        let start = Instant::now();
        while start.elapsed() < budget {
            self.step_generation()?;
        }

        self.finish();
        Ok(&self.population)
    }

    fn finish(&mut self) {
        self.phase = Phase::Done;
        tracing::info!(
            generations = self.generation,
            best_objective = self.best_objective(),
            "run complete"
        );
    }

    /// The member with the smallest objective; ties go to the lowest index.
    pub fn best(&self) -> Candidate {
        self.population.get(self.best_index()).to_vec()
    }

    pub fn best_index(&self) -> usize {
        population::argmin(&self.objectives).map_or(0, |(i, _)| i)
    }

    pub fn best_objective(&self) -> f64 {
        self.objectives[self.best_index()]
    }

    /// True when every member's objective is within `tolerance` of member 0.
    pub fn is_uniform(&self, tolerance: f64) -> bool {
        population::is_uniform(&self.objectives, tolerance)
    }
}

fn evaluate_all<P: Problem>(problem: &P, population: &Population) -> Result<Vec<f64>> {
    population
        .objectives(problem)
        .into_iter()
        .enumerate()
        .map(|(i, value)| FitError::ensure_finite(i, value))
        .collect()
}
