use crate::evolution::{Candidate, Problem};
use rand::distributions::Uniform;
use rand::Rng;
use rayon::prelude::*;

pub const INIT_LOWER: f64 = -5.0;
pub const INIT_UPPER: f64 = 5.0;

// Members are only replaced in place, size and dimension never change
#[derive(Clone, Debug, PartialEq)]
pub struct Population {
    members: Vec<Candidate>,
    dim: usize,
}

impl Population {
    pub fn random<R: Rng + ?Sized>(size: usize, dim: usize, rng: &mut R) -> Self {
        let range = Uniform::new(INIT_LOWER, INIT_UPPER);
        let members: Vec<Candidate> = (0..size)
            .map(|_| (0..dim).map(|_| rng.sample(&range)).collect())
            .collect();

        Self { members, dim }
    }

    // None when the members disagree on dimension
    pub fn from_members(members: Vec<Candidate>) -> Option<Self> {
        let dim = members.first().map_or(0, |m| m.len());
        if members.iter().any(|m| m.len() != dim) {
            return None;
        }
        Some(Self { members, dim })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, index: usize) -> &[f64] {
        &self.members[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.members.iter().map(|m| m.as_slice())
    }

    pub(crate) fn replace(&mut self, index: usize, candidate: Candidate) {
        debug_assert_eq!(candidate.len(), self.dim);
        self.members[index] = candidate;
    }

    pub fn objectives<P: Problem>(&self, problem: &P) -> Vec<f64> {
        self.members
            .par_iter()
            .map(|m| problem.objective(m))
            .collect()
    }
}

// Ties go to the lowest index
pub fn argmin(values: &[f64]) -> Option<(usize, f64)> {
    let mut iter = values.iter().copied().enumerate();
    let first = iter.next()?;
    Some(iter.fold(first, |best, (i, v)| if v < best.1 { (i, v) } else { best }))
}

pub fn is_uniform(values: &[f64], tolerance: f64) -> bool {
    match values.first() {
        Some(&first) => values.iter().all(|v| (first - v).abs() <= tolerance),
        None => true,
    }
}
