//! Dense tableau simplex with Big-M artificials and free-variable
//! splitting.
//!
//! Method
//! - Free variables are split `z_j = u_j - w_j` with `u_j, w_j >= 0`
//!   (columns `2j` and `2j+1`).
//! - `<=` rows receive a slack; rows with negative right-hand side are
//!   negated first and receive an artificial instead. Equality rows always
//!   receive an artificial. Artificials carry a Big-M objective penalty.
//! - Entering: most negative reduced cost. Leaving: minimum ratio, lowest
//!   row on ties.
//! - Unbounded: an improving column with no positive pivot entry while all
//!   artificials sit at zero.
//! - Infeasible: an artificial still basic at a nonzero level at optimum.

use nalgebra::{DMatrix, DVector};

use super::{LpError, LpModel, LpSolver};

/// Pivot tolerances and budget for [`DenseSimplex`].
#[derive(Clone, Copy, Debug)]
pub struct SimplexCfg {
    /// Maximum number of pivots per solve.
    pub max_pivots: usize,
    /// Reduced-cost and pivot-entry tolerance.
    pub eps_pivot: f64,
    /// Residual tolerance for the end-of-run artificial check.
    pub eps_feas: f64,
    /// Penalty weight for artificial variables.
    pub big_m: f64,
}

impl Default for SimplexCfg {
    fn default() -> Self {
        Self {
            max_pivots: 10_000,
            eps_pivot: 1e-9,
            eps_feas: 1e-7,
            big_m: 1e7,
        }
    }
}

/// Self-contained dense simplex backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenseSimplex {
    pub cfg: SimplexCfg,
}

impl DenseSimplex {
    pub fn new(cfg: SimplexCfg) -> Self {
        Self { cfg }
    }
}

impl LpSolver for DenseSimplex {
    fn solve(&self, model: &LpModel) -> Result<DVector<f64>, LpError> {
        model.validate()?;
        solve_tableau(model, self.cfg)
    }
}

fn solve_tableau(model: &LpModel, cfg: SimplexCfg) -> Result<DVector<f64>, LpError> {
    let n = model.num_vars();
    let m_ub = model.a_ub.nrows();
    let m_eq = model.a_eq.nrows();
    let m = m_ub + m_eq;
    if m == 0 {
        // Free variables, no constraints: any nonzero objective is unbounded.
        return if model.objective.iter().all(|&c| c.abs() <= cfg.eps_pivot) {
            Ok(DVector::zeros(n))
        } else {
            Err(LpError::Unbounded)
        };
    }

    let n_split = 2 * n;
    let n_slack = m_ub;
    let neg_ub = (0..m_ub).filter(|&i| model.b_ub[i] < 0.0).count();
    let n_art = m_eq + neg_ub;
    let n_total = n_split + n_slack + n_art;
    let art_lo = n_split + n_slack;

    let mut t = DMatrix::<f64>::zeros(m + 1, n_total + 1);
    let mut basis = vec![0usize; m];
    let mut art_idx = art_lo;

    for i in 0..m_ub {
        let rhs = model.b_ub[i];
        let (mult, rhs) = if rhs < 0.0 { (-1.0, -rhs) } else { (1.0, rhs) };
        for j in 0..n {
            let v = mult * model.a_ub[(i, j)];
            t[(i, 2 * j)] = v;
            t[(i, 2 * j + 1)] = -v;
        }
        t[(i, n_total)] = rhs;
        if mult < 0.0 {
            // Negated slack cannot start basic; use an artificial instead.
            t[(i, n_split + i)] = -1.0;
            t[(i, art_idx)] = 1.0;
            basis[i] = art_idx;
            art_idx += 1;
        } else {
            t[(i, n_split + i)] = 1.0;
            basis[i] = n_split + i;
        }
    }
    for k in 0..m_eq {
        let i = m_ub + k;
        let rhs = model.b_eq[k];
        let (mult, rhs) = if rhs < 0.0 { (-1.0, -rhs) } else { (1.0, rhs) };
        for j in 0..n {
            let v = mult * model.a_eq[(k, j)];
            t[(i, 2 * j)] = v;
            t[(i, 2 * j + 1)] = -v;
        }
        t[(i, n_total)] = rhs;
        t[(i, art_idx)] = 1.0;
        basis[i] = art_idx;
        art_idx += 1;
    }

    // Objective row; artificials carry the Big-M penalty.
    for j in 0..n {
        t[(m, 2 * j)] = model.objective[j];
        t[(m, 2 * j + 1)] = -model.objective[j];
    }
    for j in art_lo..n_total {
        t[(m, j)] = cfg.big_m;
    }
    // Canonicalize: zero the reduced costs of the starting basis.
    for i in 0..m {
        let coef = t[(m, basis[i])];
        if coef.abs() > cfg.eps_pivot {
            for j in 0..=n_total {
                let v = t[(i, j)];
                t[(m, j)] -= coef * v;
            }
        }
    }

    let artificials_clear = |t: &DMatrix<f64>, basis: &[usize]| {
        basis
            .iter()
            .enumerate()
            .all(|(i, &bv)| bv < art_lo || t[(i, n_total)].abs() <= cfg.eps_feas)
    };

    let mut pivots = 0usize;
    loop {
        if pivots >= cfg.max_pivots {
            return Err(LpError::IterationLimit { iterations: pivots });
        }

        // Entering column: most negative reduced cost. Artificials never
        // re-enter once driven out.
        let mut col = None;
        let mut best = -cfg.eps_pivot;
        for j in 0..art_lo {
            let rc = t[(m, j)];
            if rc < best {
                best = rc;
                col = Some(j);
            }
        }
        let Some(col) = col else { break };

        // Leaving row: minimum ratio, lowest index on ties.
        let mut row = None;
        let mut best_ratio = f64::INFINITY;
        for i in 0..m {
            let p = t[(i, col)];
            if p > cfg.eps_pivot {
                let r = t[(i, n_total)] / p;
                if r < best_ratio {
                    best_ratio = r;
                    row = Some(i);
                }
            }
        }
        let Some(row) = row else {
            // Improving ray. If artificials are still positive the original
            // constraints were never satisfied; report that instead.
            return if artificials_clear(&t, &basis) {
                Err(LpError::Unbounded)
            } else {
                Err(LpError::Infeasible)
            };
        };

        // Pivot on (row, col).
        let piv = t[(row, col)];
        let prow: Vec<f64> = (0..=n_total).map(|j| t[(row, j)] / piv).collect();
        for (j, &v) in prow.iter().enumerate() {
            t[(row, j)] = v;
        }
        for i in 0..=m {
            if i == row {
                continue;
            }
            let factor = t[(i, col)];
            if factor != 0.0 {
                for (j, &v) in prow.iter().enumerate() {
                    t[(i, j)] -= factor * v;
                }
            }
        }
        basis[row] = col;
        pivots += 1;
    }

    if !artificials_clear(&t, &basis) {
        return Err(LpError::Infeasible);
    }

    // Recombine split variables.
    let mut z = DVector::zeros(n);
    for (i, &bv) in basis.iter().enumerate() {
        if bv < n_split {
            let val = t[(i, n_total)];
            if bv % 2 == 0 {
                z[bv / 2] += val;
            } else {
                z[bv / 2] -= val;
            }
        }
    }
    Ok(z)
}
