use polynomial_de::{
    fit, DEConfig, DifferentialEvolution, FitConfig, FittingProblem, Phase, Population, Silent,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn de_config(coefficients: usize, population_size: usize) -> DEConfig {
    DEConfig {
        coefficients,
        population_size,
        ..Default::default()
    }
}

fn final_population(seed: u64) -> Population {
    let problem = FittingProblem::new(3).unwrap();
    let rng = StdRng::seed_from_u64(seed);
    let mut de = DifferentialEvolution::new(&problem, &de_config(2, 10), rng).unwrap();
    de.run(200).unwrap();
    de.into_population()
}

#[test]
fn test_same_seed_reproduces_population() {
    let first = final_population(2024);
    let second = final_population(2024);

    for (a, b) in first.iter().zip(second.iter()) {
        let a_bits: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
        let b_bits: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }
    assert_ne!(first, final_population(2025));
}

#[test]
fn test_degree_eight_fit_converges() {
    let problem = FittingProblem::new(21).unwrap();
    let mut de = DifferentialEvolution::with_seed(&problem, &de_config(9, 30), 0).unwrap();

    let initial: Vec<f64> = de
        .population()
        .iter()
        .map(|m| problem.true_error(m))
        .collect();

    de.run(10_000).unwrap();
    assert_eq!(de.phase(), Phase::Done);

    let error = problem.true_error(&de.best());
    assert!(
        initial.iter().all(|&e| error < e),
        "best error {} not below the initial population",
        error
    );
    assert!(error < 0.01, "true error {} should fall below 0.01", error);
}

#[test]
fn test_constant_fit_approaches_zero_mean() {
    let config = FitConfig {
        samples: 21,
        iterations: 500,
        seed: 11,
        de: de_config(1, 20),
        ..Default::default()
    };
    let (_, outcome) = fit(&config, &mut Silent).unwrap();

    assert_eq!(outcome.best.len(), 1);
    assert!(
        outcome.best[0].abs() < 1e-3,
        "constant {} should be close to 0",
        outcome.best[0]
    );
}

#[test]
fn test_invalid_configurations() {
    assert!(FittingProblem::new(1).unwrap_err().is_config_error());

    let problem = FittingProblem::new(5).unwrap();
    for config in [de_config(0, 10), de_config(3, 3)] {
        let err = DifferentialEvolution::with_seed(&problem, &config, 0).unwrap_err();
        assert!(err.is_config_error());
    }
}
