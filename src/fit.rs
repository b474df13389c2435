use crate::error::{FitError, Result};
use crate::evolution::{Candidate, Monitor};
use crate::fitting_problem::{FittingProblem, NoiseConfig};
use crate::optimizer::{DEConfig, DifferentialEvolution};
use crate::population::Population;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Everything a driver chooses for one fit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FitConfig {
    pub samples: usize,
    pub iterations: usize,
    pub seed: u64,
    pub noise: Option<NoiseConfig>,
    pub de: DEConfig,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            samples: 20,
            iterations: 10_000,
            seed: 0,
            noise: None,
            de: DEConfig::default(),
        }
    }
}

impl FitConfig {
    pub fn validate(&self) -> Result<()> {
        if self.samples < 2 {
            return Err(FitError::config(format!(
                "sample count ({}) must be >= 2",
                self.samples
            )));
        }
        self.de.validate()
    }

    pub fn problem(&self) -> Result<FittingProblem> {
        FittingProblem::from_config(self.samples, self.noise.as_ref())
    }
}

#[derive(Clone, Debug)]
pub struct FitOutcome {
    pub population: Population,
    pub best: Candidate,
    pub objective: f64,
    pub true_error: f64,
    pub generations: usize,
    pub runtime: f64,
}

/// Builds the problem, runs the optimizer for `config.iterations` generations
/// and extracts the best candidate.
pub fn fit<M: Monitor + ?Sized>(
    config: &FitConfig,
    monitor: &mut M,
) -> Result<(FittingProblem, FitOutcome)> {
    config.validate()?;
    let problem = config.problem()?;

    let start = Instant::now();
    let mut de = DifferentialEvolution::with_seed(&problem, &config.de, config.seed)?;
    de.run_with(config.iterations, monitor)?;
    let runtime = start.elapsed().as_secs_f64();

    let best = de.best();
    let outcome = FitOutcome {
        objective: de.best_objective(),
        true_error: problem.true_error(&best),
        generations: de.generation(),
        population: de.into_population(),
        best,
        runtime,
    };

    Ok((problem, outcome))
}
