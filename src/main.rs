use chrono::Local;
use colored::Colorize;
use csv::Writer;
use itertools::iproduct;
use polynomial_de::visualization::{visualize_convergence, visualize_fit};
use polynomial_de::{
    fit, DEConfig, FitConfig, FitCurve, FitOutcome, NoiseConfig, ProgressMonitor, Silent,
    SteepestDescent,
};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::error::Error;
use std::fs::{File, OpenOptions};
use std::hash::{Hash, Hasher};

#[derive(Debug)]
pub struct TestSchema {
    samples: Vec<usize>,
    coefficients: Vec<usize>,
    population_size: Vec<usize>,
    iterations: Vec<usize>,
    noisy: Vec<bool>,
}

#[derive(Debug, Serialize)]
pub struct FinalTestResult {
    pub scenario: u64,
    pub repetitions: u64,
    pub samples: usize,
    pub coefficients: usize,
    pub population_size: usize,
    pub iterations: usize,
    pub noisy: bool,
    pub scaling: f64,
    pub crossover_rate: f64,
    pub best_true_error: f64,
    pub mean_true_error: f64,
    pub mean_objective: f64,
    pub mean_runtime: f64,
    pub var_true_error: f64,
    pub var_objective: f64,
    pub var_runtime: f64,
}

const REPETITIONS: u64 = 5;
const DESCENT_ITERATIONS: usize = 1_000_000;

fn mean_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let variance = values
        .iter()
        .map(|&v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    (mean, variance)
}

fn hash_combination(
    samples: usize,
    coefficients: usize,
    population_size: usize,
    iterations: usize,
    noisy: bool,
) -> u64 {
    let mut hasher = DefaultHasher::new();

    samples.hash(&mut hasher);
    coefficients.hash(&mut hasher);
    population_size.hash(&mut hasher);
    iterations.hash(&mut hasher);
    noisy.hash(&mut hasher);

    hasher.finish()
}

fn collect_benchmarks(schemas: &[TestSchema], file_path: &str) -> Result<(), Box<dyn Error>> {
    let mut visited: HashSet<u64> = HashSet::new();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    let mut writer = Writer::from_writer(file);

    for schema in schemas {
        for (&samples, &coefficients, &population_size, &iterations, &noisy) in iproduct!(
            &schema.samples,
            &schema.coefficients,
            &schema.population_size,
            &schema.iterations,
            &schema.noisy
        ) {
            let hash = hash_combination(samples, coefficients, population_size, iterations, noisy);

            if !visited.insert(hash) {
                println!("Scenario {} already evaluated, skipping...", hash);
                continue;
            }
            println!("Scenario {} is being run...", hash);

            let base = FitConfig {
                samples,
                iterations,
                seed: 0,
                noise: noisy.then(NoiseConfig::default),
                de: DEConfig {
                    coefficients,
                    population_size,
                    ..Default::default()
                },
            };

            // Every repetition owns its generator, so they can run side by side.
            let runs = (0..REPETITIONS)
                .into_par_iter()
                .map(|seed| {
                    let config = FitConfig {
                        seed,
                        ..base.clone()
                    };
                    fit(&config, &mut Silent).map(|(_, outcome)| outcome)
                })
                .collect::<Result<Vec<FitOutcome>, _>>()?;

            let true_errors: Vec<f64> = runs.iter().map(|r| r.true_error).collect();
            let objectives: Vec<f64> = runs.iter().map(|r| r.objective).collect();
            let runtimes: Vec<f64> = runs.iter().map(|r| r.runtime).collect();

            let (mean_true_error, var_true_error) = mean_variance(&true_errors);
            let (mean_objective, var_objective) = mean_variance(&objectives);
            let (mean_runtime, var_runtime) = mean_variance(&runtimes);

            let result = FinalTestResult {
                scenario: hash,
                repetitions: REPETITIONS,
                samples,
                coefficients,
                population_size,
                iterations,
                noisy,
                scaling: base.de.scaling,
                crossover_rate: base.de.crossover_rate,
                best_true_error: true_errors.iter().copied().fold(f64::INFINITY, f64::min),
                mean_true_error,
                mean_objective,
                mean_runtime,
                var_true_error,
                var_objective,
                var_runtime,
            };

            writer.serialize(result)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn headline_fit(date_str: &str) -> Result<(), Box<dyn Error>> {
    let config = FitConfig::default();
    let mut monitor = ProgressMonitor::new(1000);
    let (problem, outcome) = fit(&config, &mut monitor)?;

    println!(
        "{} - objective: {:.8}, true error: {:.8}, runtime: {:.2}s",
        "Differential evolution".bold().green(),
        outcome.objective,
        outcome.true_error,
        outcome.runtime,
    );
    println!("Coefficients: {:?}", outcome.best);

    let curve = FitCurve::new(&problem, &outcome.best);
    curve.write_csv(File::create(format!("fit_{}.csv", date_str))?)?;
    visualize_fit(&curve, &format!("fit_{}.png", date_str))?;
    visualize_convergence(&monitor.history, &format!("convergence_{}.png", date_str))?;

    let descent = SteepestDescent::default().run(
        &problem,
        vec![0.0; config.de.coefficients],
        DESCENT_ITERATIONS,
    )?;
    println!(
        "{} - objective: {:.8}, true error: {:.8}",
        "Steepest descent".bold().yellow(),
        problem.objective(&descent),
        problem.true_error(&descent),
    );

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let schemas = vec![
        TestSchema {
            samples: vec![20],
            coefficients: vec![3, 5, 9],
            population_size: vec![10, 30, 50],
            iterations: vec![1_000, 5_000],
            noisy: vec![false],
        },
        TestSchema {
            samples: vec![20, 50],
            coefficients: vec![9],
            population_size: vec![30],
            iterations: vec![5_000, 10_000],
            noisy: vec![false, true],
        },
    ];

    let now = Local::now();
    let date_str = now.format("%Y-%m-%d_%H-%M-%S").to_string();
    let filename = format!("benchmark_results_{}.csv", date_str);

    collect_benchmarks(&schemas, &filename)?;
    headline_fit(&date_str)
}
