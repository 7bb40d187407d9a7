//! H-representation inputs: the polytope `{x : Ax <= b, Cx = d}` and the
//! planar affine map `y = Ex + f`.
//!
//! Purpose
//! - Hold caller-owned, immutable problem data with shapes checked once at
//!   construction, so the algorithm core never revalidates.
//!
//! Conventions
//! - Inequalities are row-wise `a_i · x <= b_i`; equalities `c_j · x = d_j`.
//! - The projected space is fixed to two dimensions; `E` has two rows.

use nalgebra::{DMatrix, DVector, Vector2};
use thiserror::Error;

/// Shape mismatch in caller-supplied matrices.
#[derive(Clone, Debug, Error)]
pub enum ShapeError {
    #[error("inequality rows mismatch: A has {rows} rows, b has {len} entries")]
    Inequality { rows: usize, len: usize },
    #[error("equality rows mismatch: C has {rows} rows, d has {len} entries")]
    Equality { rows: usize, len: usize },
    #[error("equality columns mismatch: C has {got} columns, expected {expected}")]
    EqualityDim { got: usize, expected: usize },
    #[error("projection columns mismatch: E has {got} columns, expected {expected}")]
    ProjectionDim { got: usize, expected: usize },
    #[error("projection must map to the plane: E has {rows} rows, expected 2")]
    ProjectionRows { rows: usize },
}

/// Polytope `{x in R^n : Ax <= b, Cx = d}` (H-representation).
///
/// Invariants:
/// - `a.nrows() == b.len()`; if present, the equality pair has matching row
///   counts and `a.ncols()` columns.
/// - Read-only input to the projection core for the whole run.
#[derive(Clone, Debug)]
pub struct Polytope {
    a: DMatrix<f64>,
    b: DVector<f64>,
    eq: Option<(DMatrix<f64>, DVector<f64>)>,
}

impl Polytope {
    /// Build from the inequality system `Ax <= b`.
    pub fn from_inequalities(a: DMatrix<f64>, b: DVector<f64>) -> Result<Self, ShapeError> {
        if a.nrows() != b.len() {
            return Err(ShapeError::Inequality {
                rows: a.nrows(),
                len: b.len(),
            });
        }
        Ok(Self { a, b, eq: None })
    }

    /// Attach the equality system `Cx = d`.
    pub fn with_equalities(
        mut self,
        c: DMatrix<f64>,
        d: DVector<f64>,
    ) -> Result<Self, ShapeError> {
        if c.nrows() != d.len() {
            return Err(ShapeError::Equality {
                rows: c.nrows(),
                len: d.len(),
            });
        }
        if c.ncols() != self.dim() {
            return Err(ShapeError::EqualityDim {
                got: c.ncols(),
                expected: self.dim(),
            });
        }
        self.eq = Some((c, d));
        Ok(self)
    }

    /// Ambient dimension `n`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.a.ncols()
    }

    #[inline]
    pub fn num_inequalities(&self) -> usize {
        self.a.nrows()
    }

    #[inline]
    pub fn num_equalities(&self) -> usize {
        self.eq.as_ref().map_or(0, |(c, _)| c.nrows())
    }

    #[inline]
    pub(crate) fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    #[inline]
    pub(crate) fn b(&self) -> &DVector<f64> {
        &self.b
    }

    #[inline]
    pub(crate) fn eq(&self) -> Option<&(DMatrix<f64>, DVector<f64>)> {
        self.eq.as_ref()
    }

    /// Membership check with slack `eps`.
    ///
    /// `eps > 0` is permissive (enlarges the feasible region); `eps < 0` is
    /// strict. Equality rows are checked as `|c_j·x - d_j| <= |eps|`.
    pub fn contains_eps(&self, x: &DVector<f64>, eps: f64) -> bool {
        debug_assert_eq!(x.len(), self.dim());
        let ineq_ok = (&self.a * x - &self.b).iter().all(|&r| r <= eps);
        let eq_ok = self.eq.as_ref().map_or(true, |(c, d)| {
            (c * x - d).iter().all(|&r| r.abs() <= eps.abs())
        });
        ineq_ok && eq_ok
    }
}

/// Affine map `y = Ex + f` onto the plane.
#[derive(Clone, Debug)]
pub struct ProjectionMap2 {
    e: DMatrix<f64>,
    f: Vector2<f64>,
}

impl ProjectionMap2 {
    /// Build from a 2×n matrix and a plane offset.
    pub fn new(e: DMatrix<f64>, f: Vector2<f64>) -> Result<Self, ShapeError> {
        if e.nrows() != 2 {
            return Err(ShapeError::ProjectionRows { rows: e.nrows() });
        }
        Ok(Self { e, f })
    }

    /// Projection onto the first two coordinates of R^n.
    pub fn coordinate_plane(n: usize) -> Self {
        let mut e = DMatrix::zeros(2, n);
        if n > 0 {
            e[(0, 0)] = 1.0;
        }
        if n > 1 {
            e[(1, 1)] = 1.0;
        }
        Self {
            e,
            f: Vector2::zeros(),
        }
    }

    /// Source dimension `n`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.e.ncols()
    }

    #[inline]
    pub(crate) fn e(&self) -> &DMatrix<f64> {
        &self.e
    }

    #[inline]
    pub(crate) fn f(&self) -> Vector2<f64> {
        self.f
    }

    /// Image of a point: `Ex + f`.
    pub fn apply(&self, x: &DVector<f64>) -> Vector2<f64> {
        debug_assert_eq!(x.len(), self.dim());
        let y = &self.e * x;
        Vector2::new(y[0], y[1]) + self.f
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    #[test]
    fn shape_validation() {
        let bad = Polytope::from_inequalities(dmatrix![1.0, 0.0], dvector![1.0, 2.0]);
        assert!(matches!(bad, Err(ShapeError::Inequality { .. })));

        let p = Polytope::from_inequalities(dmatrix![1.0, 0.0; 0.0, 1.0], dvector![1.0, 1.0])
            .expect("valid shapes");
        let bad_eq = p.clone().with_equalities(dmatrix![1.0], dvector![0.0]);
        assert!(matches!(bad_eq, Err(ShapeError::EqualityDim { .. })));

        let bad_map = ProjectionMap2::new(dmatrix![1.0, 0.0], nalgebra::Vector2::zeros());
        assert!(matches!(bad_map, Err(ShapeError::ProjectionRows { .. })));
    }

    #[test]
    fn membership_and_apply() {
        // Unit box [-1,1]^2.
        let p = Polytope::from_inequalities(
            dmatrix![1.0, 0.0; -1.0, 0.0; 0.0, 1.0; 0.0, -1.0],
            dvector![1.0, 1.0, 1.0, 1.0],
        )
        .expect("valid shapes");
        assert!(p.contains_eps(&dvector![0.5, -0.5], 0.0));
        assert!(!p.contains_eps(&dvector![1.5, 0.0], 1e-9));
        // eps semantics: positive enlarges, negative shrinks.
        assert!(p.contains_eps(&dvector![1.0 + 1e-12, 0.0], 1e-9));
        assert!(!p.contains_eps(&dvector![1.0, 0.0], -1e-6));

        let map = ProjectionMap2::new(
            dmatrix![1.0, 0.0; 0.0, 1.0],
            nalgebra::Vector2::new(1.0, -1.0),
        )
        .expect("two rows");
        let y = map.apply(&dvector![0.25, 0.5]);
        assert!((y - nalgebra::Vector2::new(1.25, -0.5)).norm() < 1e-12);
    }
}
