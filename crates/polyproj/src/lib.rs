//! Planar projection of convex polytopes in halfspace form.
//!
//! Given a polytope `{x : Ax <= b, Cx = d}` in R^n and an affine map
//! `y = Ex + f` onto the plane, this crate computes the projected region as
//! an ordered convex polygon by incremental support-function probing
//! (the Bretl–Lall projection scheme). Degenerate images (a point or a
//! segment) are detected and returned as values, not errors.
//!
//! The probe oracle solves one small LP per query. A self-contained dense
//! simplex ships as the default backend; any implementation of
//! [`lp::LpSolver`] can be substituted.

pub mod hrep;
pub mod lp;
pub mod project;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use hrep::{Polytope, ProjectionMap2, ShapeError};
pub use project::{
    project, project_with, PolygonResult, ProjectedRegion, ProjectionCfg, ProjectionError,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::hrep::{Polytope, ProjectionMap2};
    pub use crate::lp::{DenseSimplex, LpSolver, SimplexCfg};
    pub use crate::project::{
        project, project_with, PolygonResult, ProjectedRegion, ProjectionCfg, ProjectionError,
    };
    pub use nalgebra::Vector2;
}

/// Signed area of the parallelogram spanned by vectors `a` and `b` in R².
/// Positive for a→b counterclockwise, negative otherwise.
#[inline]
pub fn parallelogram_area(a: nalgebra::Vector2<f64>, b: nalgebra::Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
