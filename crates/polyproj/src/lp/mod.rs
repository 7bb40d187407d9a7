//! Linear-programming backend seam.
//!
//! Purpose
//! - Expose the contract the projection core consumes: an optimal point, or
//!   `Infeasible` / `Unbounded` / a backend failure with its reason.
//! - Ship a self-contained dense simplex as the default backend; callers
//!   may substitute any [`LpSolver`] implementation.
//!
//! Scope
//! - Dense models only, all variables free. No sparse formats, integer
//!   variables, or presolve.

mod model;
mod simplex;

pub use model::LpModel;
pub use simplex::{DenseSimplex, SimplexCfg};

use nalgebra::DVector;
use thiserror::Error;

/// Failure taxonomy for a single LP solve.
#[derive(Clone, Debug, Error)]
pub enum LpError {
    /// The constraint system has no solution.
    #[error("linear program is infeasible")]
    Infeasible,
    /// The objective improves without bound along a feasible ray.
    #[error("linear program is unbounded")]
    Unbounded,
    /// Pivot budget exhausted before reaching optimality.
    #[error("simplex did not converge within {iterations} pivots")]
    IterationLimit { iterations: usize },
    /// Malformed model (shape mismatch or non-finite data).
    #[error("invalid model: {0}")]
    Invalid(String),
}

/// Backend contract: solve `min c·z` and return an optimal `z`.
///
/// Implementations must distinguish infeasibility from unboundedness, and
/// must surface non-convergence as an error rather than a wrong point.
pub trait LpSolver {
    fn solve(&self, model: &LpModel) -> Result<DVector<f64>, LpError>;
}
