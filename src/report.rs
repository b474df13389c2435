use crate::evolution::Monitor;
use crate::fitting_problem::FittingProblem;
use crate::polynomial;
use crate::population::{self, Population};
use colored::Colorize;
use csv::Writer;
use serde::Serialize;
use std::error::Error;
use std::io::Write;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub truth: f64,
    pub sample: f64,
    pub fitted: f64,
}

/// A fitted polynomial evaluated on the problem's grid, next to the exact
/// function and the (possibly noisy) samples it was fitted to.
#[derive(Clone, Debug)]
pub struct FitCurve {
    pub points: Vec<CurvePoint>,
}

impl FitCurve {
    pub fn new(problem: &FittingProblem, coefficients: &[f64]) -> Self {
        let fitted = polynomial::evaluate(problem.xs(), coefficients);
        let points = problem
            .xs()
            .iter()
            .zip(problem.truth())
            .zip(problem.ys())
            .zip(fitted)
            .map(|(((&x, &truth), &sample), fitted)| CurvePoint {
                x,
                truth,
                sample,
                fitted,
            })
            .collect();

        Self { points }
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), Box<dyn Error>> {
        let mut writer = Writer::from_writer(writer);
        for point in &self.points {
            writer.serialize(point)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Prints a progress line every `interval` generations and keeps the best
/// objective of every generation it has seen.
#[derive(Debug)]
pub struct ProgressMonitor {
    pub interval: usize,
    pub history: Vec<f64>,
}

impl ProgressMonitor {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            history: Vec::new(),
        }
    }
}

impl Monitor for ProgressMonitor {
    fn on_generation(&mut self, population: &Population, objectives: &[f64], generation: usize) {
        let best = population::argmin(objectives).map_or(f64::NAN, |(_, v)| v);
        self.history.push(best);

        if generation % self.interval == 0 {
            let worst = objectives.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            println!(
                "{} - Best objective: {:.8}, spread: {:.3e}, members: {}, uniform: {}",
                format!("Generation {:5}", generation).bold().red(),
                best,
                worst - best,
                population.len(),
                population::is_uniform(objectives, 1e-6),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_columns() {
        let problem = FittingProblem::new(3).unwrap();
        let curve = FitCurve::new(&problem, &[1.0, 2.0]);

        assert_eq!(curve.xs(), vec![0.0, 0.5, 1.0]);
        let fitted: Vec<f64> = curve.points.iter().map(|p| p.fitted).collect();
        assert_eq!(fitted, vec![1.0, 2.0, 3.0]);
        assert!(curve.points.iter().all(|p| p.truth == p.sample));
    }

    #[test]
    fn test_curve_csv() {
        let problem = FittingProblem::new(2).unwrap();
        let curve = FitCurve::new(&problem, &[0.5]);
        let mut out = Vec::new();
        curve.write_csv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x,truth,sample,fitted"));
        assert_eq!(lines.next(), Some("0.0,0.0,0.0,0.5"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn test_monitor_records_history() {
        let population =
            Population::from_members(vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let mut monitor = ProgressMonitor::new(1000);

        monitor.on_generation(&population, &[3.0, 1.0, 2.0, 1.0], 1);
        monitor.on_generation(&population, &[0.5, 1.0, 2.0, 1.0], 2);

        assert_eq!(monitor.history, vec![1.0, 0.5]);
    }
}
