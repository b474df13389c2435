use crate::evolution::Problem;

/// Greedy replacement rule: the challenger wins only on strict improvement,
/// ties keep the incumbent.
#[inline]
pub fn improves(trial_objective: f64, target_objective: f64) -> bool {
    trial_objective < target_objective
}

/// Returns whichever of `target` and `trial` survives into the next generation.
pub fn select<'a, P: Problem>(target: &'a [f64], trial: &'a [f64], problem: &P) -> &'a [f64] {
    if improves(problem.objective(trial), problem.objective(target)) {
        trial
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting_problem::FittingProblem;

    #[test]
    fn test_better_trial_replaces_target() {
        let problem = FittingProblem::new(11).unwrap();
        let target = [5.0, 5.0];
        let trial = [0.0, 0.0];
        assert_eq!(select(&target, &trial, &problem), &trial);
    }

    #[test]
    fn test_worse_trial_is_discarded() {
        let problem = FittingProblem::new(11).unwrap();
        let target = [0.0];
        let trial = [3.0];
        assert_eq!(select(&target, &trial, &problem), &target);
    }

    struct Sphere;

    impl Problem for Sphere {
        fn objective(&self, candidate: &[f64]) -> f64 {
            candidate.iter().map(|c| c * c).sum()
        }
    }

    #[test]
    fn test_tie_keeps_incumbent() {
        let target = [0.5, -1.0];
        let trial = [-0.5, 1.0];
        assert!(std::ptr::eq(select(&target, &trial, &Sphere), &target[..]));
    }

    #[test]
    fn test_improves_is_strict() {
        assert!(improves(1.0, 2.0));
        assert!(!improves(2.0, 2.0));
        assert!(!improves(3.0, 2.0));
    }
}
