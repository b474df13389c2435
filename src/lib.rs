//! Fits a polynomial to samples of `sin(2πx)` on [0, 1] with differential
//! evolution (DE/rand/1/bin), and reports the error against the exact curve.
//!
//! ```no_run
//! use polynomial_de::{fit, FitConfig, Silent};
//!
//! let (_problem, outcome) = fit(&FitConfig::default(), &mut Silent)?;
//! println!("true error = {}", outcome.true_error);
//! # Ok::<(), polynomial_de::FitError>(())
//! ```

pub mod error;
pub mod evolution;
pub mod fit;
pub mod fitting_problem;
pub mod mutation;
pub mod optimizer;
pub mod polynomial;
pub mod population;
pub mod report;
pub mod selection;
pub mod steepest_descent;
pub mod visualization;

pub use error::{FitError, Result};
pub use evolution::{Candidate, Differentiable, Monitor, Problem, Silent};
pub use fit::{fit, FitConfig, FitOutcome};
pub use fitting_problem::{FittingProblem, NoiseConfig};
pub use mutation::RandOneBinomial;
pub use optimizer::{DEConfig, DifferentialEvolution, Phase};
pub use population::Population;
pub use report::{FitCurve, ProgressMonitor};
pub use steepest_descent::SteepestDescent;
