//! Dense LP model over free variables.

use nalgebra::{DMatrix, DVector};

use super::LpError;

/// Dense linear program `min objective·z` subject to `a_ub z <= b_ub` and
/// `a_eq z = b_eq`, with every variable free.
///
/// Invariants:
/// - Nonempty constraint blocks have `objective.len()` columns.
/// - Either block may have zero rows.
#[derive(Clone, Debug)]
pub struct LpModel {
    pub objective: DVector<f64>,
    pub a_ub: DMatrix<f64>,
    pub b_ub: DVector<f64>,
    pub a_eq: DMatrix<f64>,
    pub b_eq: DVector<f64>,
}

impl LpModel {
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    /// Check shapes and finiteness; solvers call this before touching data.
    pub fn validate(&self) -> Result<(), LpError> {
        let n = self.num_vars();
        if n == 0 {
            return Err(LpError::Invalid("empty objective".into()));
        }
        if self.a_ub.nrows() != self.b_ub.len() {
            return Err(LpError::Invalid(format!(
                "inequality rows mismatch: {} vs {}",
                self.a_ub.nrows(),
                self.b_ub.len()
            )));
        }
        if self.a_ub.nrows() > 0 && self.a_ub.ncols() != n {
            return Err(LpError::Invalid(format!(
                "inequality columns mismatch: {} vs {}",
                self.a_ub.ncols(),
                n
            )));
        }
        if self.a_eq.nrows() != self.b_eq.len() {
            return Err(LpError::Invalid(format!(
                "equality rows mismatch: {} vs {}",
                self.a_eq.nrows(),
                self.b_eq.len()
            )));
        }
        if self.a_eq.nrows() > 0 && self.a_eq.ncols() != n {
            return Err(LpError::Invalid(format!(
                "equality columns mismatch: {} vs {}",
                self.a_eq.ncols(),
                n
            )));
        }
        let finite = self.objective.iter().all(|v| v.is_finite())
            && self.a_ub.iter().all(|v| v.is_finite())
            && self.b_ub.iter().all(|v| v.is_finite())
            && self.a_eq.iter().all(|v| v.is_finite())
            && self.b_eq.iter().all(|v| v.is_finite());
        if !finite {
            return Err(LpError::Invalid("non-finite model entry".into()));
        }
        Ok(())
    }
}
