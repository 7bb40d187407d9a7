//! Extreme-point oracle: one LP per probe direction.
//!
//! The augmented program has variables `z = (x, y)` with `A x <= b`,
//! `C x = d` and `E x - y = -f`; maximizing `dir · y` over it yields the
//! support point of the projected region in direction `dir`.

use nalgebra::{DMatrix, DVector, Vector2};
use thiserror::Error;

use crate::hrep::{Polytope, ProjectionMap2};
use crate::lp::{LpError, LpModel, LpSolver};

/// Per-probe failure classification.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Augmented constraints unsatisfiable: the projected set is empty.
    #[error("augmented constraint system is infeasible")]
    Infeasible,
    /// The projected set is unbounded along the probed direction.
    #[error("projection is unbounded along the probed direction")]
    Unbounded,
    /// Backend failure (pivot budget, malformed model, ...).
    #[error("LP backend failure: {0}")]
    Solver(LpError),
}

/// Support-function oracle over the projected feasible set.
///
/// The fixed constraint blocks are assembled once at construction; each
/// probe only writes the objective. Calls are independent of each other and
/// may be retried with a different direction.
pub struct SupportOracle<'a, S> {
    solver: &'a S,
    a_ub: DMatrix<f64>,
    b_ub: DVector<f64>,
    a_eq: DMatrix<f64>,
    b_eq: DVector<f64>,
    n: usize,
}

impl<'a, S: LpSolver> SupportOracle<'a, S> {
    /// Assemble the augmented constraint blocks over `z = (x, y)`.
    pub fn new(
        poly: &Polytope,
        map: &ProjectionMap2,
        max_radius: Option<f64>,
        solver: &'a S,
    ) -> Self {
        let n = poly.dim();
        let m = poly.num_inequalities();
        let p = poly.num_equalities();
        let radius_rows = if max_radius.is_some() { 4 } else { 0 };

        // [ A  0 ] z <= b, plus optional |y_i| <= max_radius rows.
        let mut a_ub = DMatrix::zeros(m + radius_rows, n + 2);
        let mut b_ub = DVector::zeros(m + radius_rows);
        a_ub.view_mut((0, 0), (m, n)).copy_from(poly.a());
        b_ub.rows_mut(0, m).copy_from(poly.b());
        if let Some(r) = max_radius {
            for k in 0..4 {
                let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                a_ub[(m + k, n + k / 2)] = sign;
                b_ub[m + k] = r;
            }
        }

        // [ C  0 ] z = d and [ E  -I ] z = -f.
        let mut a_eq = DMatrix::zeros(p + 2, n + 2);
        let mut b_eq = DVector::zeros(p + 2);
        if let Some((c, d)) = poly.eq() {
            a_eq.view_mut((0, 0), (p, n)).copy_from(c);
            b_eq.rows_mut(0, p).copy_from(d);
        }
        a_eq.view_mut((p, 0), (2, n)).copy_from(map.e());
        a_eq[(p, n)] = -1.0;
        a_eq[(p + 1, n + 1)] = -1.0;
        let f = map.f();
        b_eq[p] = -f.x;
        b_eq[p + 1] = -f.y;

        Self {
            solver,
            a_ub,
            b_ub,
            a_eq,
            b_eq,
            n,
        }
    }

    /// Concrete LP for one probe direction: maximize `dir·y`.
    pub fn build_query(&self, dir: Vector2<f64>) -> LpModel {
        let mut objective = DVector::zeros(self.n + 2);
        objective[self.n] = -dir.x;
        objective[self.n + 1] = -dir.y;
        LpModel {
            objective,
            a_ub: self.a_ub.clone(),
            b_ub: self.b_ub.clone(),
            a_eq: self.a_eq.clone(),
            b_eq: self.b_eq.clone(),
        }
    }

    /// Support point of the projected region in direction `dir` (arbitrary
    /// nonzero; normalized here).
    pub fn support(&self, dir: Vector2<f64>) -> Result<Vector2<f64>, OracleError> {
        let norm = dir.norm();
        if !norm.is_finite() || norm <= 0.0 {
            return Err(OracleError::Solver(LpError::Invalid(
                "zero probe direction".into(),
            )));
        }
        let model = self.build_query(dir / norm);
        match self.solver.solve(&model) {
            Ok(z) => Ok(Vector2::new(z[self.n], z[self.n + 1])),
            Err(LpError::Infeasible) => Err(OracleError::Infeasible),
            Err(LpError::Unbounded) => Err(OracleError::Unbounded),
            Err(e) => Err(OracleError::Solver(e)),
        }
    }
}
