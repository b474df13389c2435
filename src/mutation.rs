use crate::evolution::Candidate;
use crate::population::Population;
use rand::Rng;

// DE/rand/1/bin: mutant v = x[r1] + F * (x[r2] - x[r3]), crossed with the target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandOneBinomial {
    pub scaling: f64,
    pub crossover_rate: f64,
}

impl RandOneBinomial {
    pub fn new(scaling: f64, crossover_rate: f64) -> Self {
        Self {
            scaling,
            crossover_rate,
        }
    }

    // Panics when the population has fewer than 4 members
    pub fn propose<R: Rng + ?Sized>(
        &self,
        population: &Population,
        target: usize,
        rng: &mut R,
    ) -> Candidate {
        let donors = select_donors(target, population.len(), rng);
        let start = rng.gen_range(0..population.dim());
        let mutant = self.mutant(population, donors);

        crossover(
            population.get(target),
            &mutant,
            start,
            self.crossover_rate,
            rng,
        )
    }

    pub fn mutant(&self, population: &Population, [r1, r2, r3]: [usize; 3]) -> Candidate {
        population
            .get(r1)
            .iter()
            .zip(population.get(r2))
            .zip(population.get(r3))
            .map(|((&a, &b), &c)| a + self.scaling * (b - c))
            .collect()
    }
}

// Three pairwise distinct indices from [0, pool_size), none equal to `exclude`,
// resampled on every collision. Panics when `pool_size` is below 4.
pub fn select_donors<R: Rng + ?Sized>(exclude: usize, pool_size: usize, rng: &mut R) -> [usize; 3] {
    assert!(
        pool_size >= 4,
        "donor selection needs at least 4 members, got {}",
        pool_size
    );

    let mut donors = [0usize; 3];
    let mut found = 0;

    while found < donors.len() {
        let candidate = rng.gen_range(0..pool_size);
        if candidate != exclude && !donors[..found].contains(&candidate) {
            donors[found] = candidate;
            found += 1;
        }
    }

    donors
}

// The start dimension always takes the mutant, later ones with probability `crossover_rate`
pub fn crossover<R: Rng + ?Sized>(
    target: &[f64],
    mutant: &[f64],
    start: usize,
    crossover_rate: f64,
    rng: &mut R,
) -> Candidate {
    let n = target.len();
    let mut trial = target.to_vec();
    let mut j = start;

    for step in 0..n {
        if step == 0 || rng.gen::<f64>() < crossover_rate {
            trial[j] = mutant[j];
        }
        j = (j + 1) % n;
    }

    trial
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_donors_distinct_and_exclude_target() {
        let mut rng = StdRng::seed_from_u64(42);

        for trial in 0..10_000 {
            let pool_size = 4 + trial % 27;
            let exclude = trial % pool_size;
            let donors = select_donors(exclude, pool_size, &mut rng);

            assert!(donors.iter().all(|&d| d < pool_size));
            assert!(!donors.contains(&exclude));
            assert_ne!(donors[0], donors[1]);
            assert_ne!(donors[0], donors[2]);
            assert_ne!(donors[1], donors[2]);
        }
    }

    #[test]
    fn test_donors_with_minimum_population() {
        let mut rng = StdRng::seed_from_u64(7);

        for trial in 0..10_000 {
            let exclude = trial % 4;
            let donors: HashSet<usize> = select_donors(exclude, 4, &mut rng).into_iter().collect();
            let expected: HashSet<usize> = (0..4).filter(|&i| i != exclude).collect();
            assert_eq!(donors, expected);
        }
    }

    #[test]
    #[should_panic(expected = "at least 4 members")]
    fn test_donors_reject_small_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        select_donors(0, 3, &mut rng);
    }

    #[test]
    #[should_panic(expected = "at least 4 members")]
    fn test_propose_rejects_small_population() {
        let mut rng = StdRng::seed_from_u64(4);
        let population =
            Population::from_members(vec![vec![0.0], vec![1.0], vec![2.0]]).unwrap();
        RandOneBinomial::new(0.6, 0.5).propose(&population, 0, &mut rng);
    }

    #[test]
    fn test_mutant_is_difference_vector() {
        let population = Population::from_members(vec![
            vec![0.0, 0.0],
            vec![1.0, 2.0],
            vec![3.0, 5.0],
            vec![1.0, 1.0],
        ])
        .unwrap();
        let operator = RandOneBinomial::new(0.5, 0.5);

        // x[1] + 0.5 * (x[2] - x[3])
        assert_eq!(operator.mutant(&population, [1, 2, 3]), vec![2.0, 4.0]);
    }

    #[test]
    fn test_start_dimension_always_crossed() {
        let mut rng = StdRng::seed_from_u64(1);
        let target = vec![0.0; 6];
        let mutant = vec![1.0; 6];

        for start in 0..6 {
            // The lowest valid rate still forces the start dimension over.
            let trial = crossover(&target, &mutant, start, f64::MIN_POSITIVE, &mut rng);
            assert_eq!(trial[start], 1.0);
            assert_ne!(trial, target);
        }
    }

    #[test]
    fn test_full_crossover_rate_copies_mutant() {
        let mut rng = StdRng::seed_from_u64(2);
        let target = vec![0.0, 0.0, 0.0];
        let mutant = vec![1.0, 2.0, 3.0];
        assert_eq!(crossover(&target, &mutant, 2, 1.0, &mut rng), mutant);
    }

    #[test]
    fn test_crossover_keeps_coefficient_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let target = vec![10.0, 20.0, 30.0, 40.0];
        let mutant = vec![1.0, 2.0, 3.0, 4.0];
        let trial = crossover(&target, &mutant, 3, 0.5, &mut rng);

        for (k, &value) in trial.iter().enumerate() {
            assert!(value == target[k] || value == mutant[k]);
        }
        assert_eq!(trial[3], 4.0);
    }

    #[test]
    fn test_single_dimension_takes_mutant() {
        let mut rng = StdRng::seed_from_u64(9);
        let population =
            Population::from_members(vec![vec![0.0], vec![1.0], vec![2.0], vec![4.0]]).unwrap();
        let operator = RandOneBinomial::new(0.6, 0.5);
        let trial = operator.propose(&population, 0, &mut rng);

        assert_eq!(trial.len(), 1);
        assert_ne!(trial[0], 0.0);
    }

    #[test]
    fn test_propose_preserves_dimension() {
        let mut rng = StdRng::seed_from_u64(13);
        let population = Population::random(10, 9, &mut rng);
        let operator = RandOneBinomial::new(0.6, 0.5);

        for i in 0..population.len() {
            assert_eq!(operator.propose(&population, i, &mut rng).len(), 9);
        }
    }
}
