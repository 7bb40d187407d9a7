//! Incremental planar projection of H-rep polytopes (Bretl–Lall).
//!
//! Purpose
//! - Compute the 2D image of `{x : Ax <= b, Cx = d}` under `y = Ex + f` as
//!   an ordered convex polygon, spending as few LP probes as possible.
//!
//! Why this design
//! - An inscribed polygon plus per-edge pending-area bounds gives the
//!   sandwich `polygon ⊆ region ⊆ polygon + pending`; the loop always
//!   expands the edge with the most area at stake, so the bound shrinks
//!   greedily and termination is a single comparison.
//! - Vertices live in an arena and are addressed by stable ids; splice
//!   insertion is O(1) and never invalidates other handles.
//!
//! References
//! - Bretl & Lall, "Testing static equilibrium for legged robots", IEEE
//!   Trans. Robotics 24(4), 2008 (the incremental projection scheme).

mod driver;
mod oracle;
mod polygon;

pub use driver::{project, project_with};
pub use oracle::{OracleError, SupportOracle};
pub use polygon::{Edges, PolygonArena, VertexId};

use nalgebra::Vector2;
use thiserror::Error;

use crate::hrep::ShapeError;
use crate::lp::LpError;

/// Tolerances and budget for one projection run.
#[derive(Clone, Copy, Debug)]
pub struct ProjectionCfg {
    /// Terminate when the summed pending area of all edges drops below this.
    pub area_tol: f64,
    /// Distance under which probe results count as duplicate or colinear.
    pub point_tol: f64,
    /// Cap on vertex insertions; hitting it yields a capped (non-converged)
    /// result rather than an error.
    pub max_iter: usize,
    /// Optional clamp `|y_i| <= max_radius` on the projected plane. `None`
    /// leaves genuine unboundedness detectable (and fatal); `Some(r)` clips
    /// the projection to the radius box instead.
    pub max_radius: Option<f64>,
}

impl Default for ProjectionCfg {
    fn default() -> Self {
        Self {
            area_tol: 1e-6,
            point_tol: 1e-7,
            max_iter: 1000,
            max_radius: None,
        }
    }
}

/// Converged or capped polygon output.
#[derive(Clone, Debug)]
pub struct PolygonResult {
    /// Vertices in counterclockwise cyclic order.
    pub vertices: Vec<Vector2<f64>>,
    /// True when the pending-area tolerance was met; false when the
    /// insertion cap cut the run short.
    pub converged: bool,
    /// Vertex insertions performed beyond the initial triangle.
    pub iterations: usize,
    /// Residual pending area at termination (upper bound on missing area).
    pub pending_area: f64,
}

/// Projected region: a full-dimensional polygon, or a lower-dimensional
/// degenerate image. Degenerate outputs are valid results, not errors.
#[derive(Clone, Debug)]
pub enum ProjectedRegion {
    Point(Vector2<f64>),
    Segment(Vector2<f64>, Vector2<f64>),
    Polygon(PolygonResult),
}

impl ProjectedRegion {
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !matches!(self, ProjectedRegion::Polygon(_))
    }

    #[inline]
    pub fn polygon(self) -> Option<PolygonResult> {
        if let ProjectedRegion::Polygon(p) = self {
            Some(p)
        } else {
            None
        }
    }
}

/// Fatal projection failures. All-or-nothing: no partial polygon is ever
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The augmented constraint system has no solution.
    #[error("feasible set is empty")]
    EmptyFeasibleSet,
    /// The projected set is unbounded in some probed direction.
    #[error("projection is unbounded")]
    UnboundedProjection,
    /// The LP backend failed (malformed model, pivot budget, ...).
    #[error("LP backend failed: {0}")]
    SolverFailure(LpError),
    /// Caller-supplied matrices have inconsistent shapes.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
