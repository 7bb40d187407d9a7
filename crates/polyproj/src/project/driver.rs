//! Initialization, refinement loop, and termination of the incremental
//! projection.
//!
//! Phases
//! - Initialize: two axis probes, degenerate short-circuits (point or
//!   segment), then a third orthogonal probe to seed a CCW triangle.
//! - Refine: pop the edge with the largest pending area (deterministic
//!   tie-break), splice in its cached support point, probe the two new
//!   edges' outward normals, repeat until the summed pending area is under
//!   tolerance or the insertion cap is hit.

use std::collections::BinaryHeap;

use nalgebra::Vector2;
use tracing::{debug, trace};

use crate::hrep::{Polytope, ProjectionMap2, ShapeError};
use crate::lp::{DenseSimplex, LpSolver};
use crate::parallelogram_area;

use super::oracle::{OracleError, SupportOracle};
use super::polygon::{EdgeKey, PolygonArena, VertexId};
use super::{PolygonResult, ProjectedRegion, ProjectionCfg, ProjectionError};

/// Project with the bundled dense simplex backend.
pub fn project(
    poly: &Polytope,
    map: &ProjectionMap2,
    cfg: &ProjectionCfg,
) -> Result<ProjectedRegion, ProjectionError> {
    let solver = DenseSimplex::default();
    project_with(poly, map, cfg, &solver)
}

/// Project with a caller-supplied LP backend.
pub fn project_with<S: LpSolver>(
    poly: &Polytope,
    map: &ProjectionMap2,
    cfg: &ProjectionCfg,
    solver: &S,
) -> Result<ProjectedRegion, ProjectionError> {
    if map.dim() != poly.dim() {
        return Err(ShapeError::ProjectionDim {
            got: map.dim(),
            expected: poly.dim(),
        }
        .into());
    }
    let driver = Driver {
        oracle: SupportOracle::new(poly, map, cfg.max_radius, solver),
        cfg: *cfg,
        arena: PolygonArena::default(),
        heap: BinaryHeap::new(),
        insertions: 0,
    };
    driver.run()
}

/// Initialization outcome: either a seeded triangle in the arena, or a
/// lower-dimensional image found early.
enum Init {
    Triangle,
    Point(Vector2<f64>),
    Segment(Vector2<f64>, Vector2<f64>),
}

/// Runner carrying the oracle, the growing polygon, and the edge heap.
struct Driver<'a, S> {
    oracle: SupportOracle<'a, S>,
    cfg: ProjectionCfg,
    arena: PolygonArena,
    heap: BinaryHeap<EdgeKey>,
    insertions: usize,
}

impl<S: LpSolver> Driver<'_, S> {
    fn run(mut self) -> Result<ProjectedRegion, ProjectionError> {
        match self.initialize()? {
            Init::Point(p) => {
                debug!(x = p.x, y = p.y, "projection is a single point");
                Ok(ProjectedRegion::Point(p))
            }
            Init::Segment(a, b) => {
                debug!("projection is a segment");
                Ok(ProjectedRegion::Segment(a, b))
            }
            Init::Triangle => self.refine(),
        }
    }

    fn probe(&self, dir: Vector2<f64>) -> Result<Vector2<f64>, ProjectionError> {
        self.oracle.support(dir).map_err(|e| match e {
            OracleError::Infeasible => ProjectionError::EmptyFeasibleSet,
            OracleError::Unbounded => ProjectionError::UnboundedProjection,
            OracleError::Solver(e) => ProjectionError::SolverFailure(e),
        })
    }

    fn initialize(&mut self) -> Result<Init, ProjectionError> {
        let tol = self.cfg.point_tol;
        let p1 = self.probe(Vector2::new(1.0, 0.0))?;
        let mut p2 = self.probe(Vector2::new(0.0, 1.0))?;

        if (p2 - p1).norm() <= tol {
            // The first two probes coincide. Confirm pointness against the
            // opposite axes before concluding; a flat region can hide its
            // extent from two probes that share an optimizer.
            let mut distinct = None;
            for dir in [Vector2::new(-1.0, 0.0), Vector2::new(0.0, -1.0)] {
                let q = self.probe(dir)?;
                if (q - p1).norm() > tol {
                    distinct = Some(q);
                    break;
                }
            }
            match distinct {
                None => return Ok(Init::Point(p1)),
                Some(q) => p2 = q,
            }
        }

        // Third point: orthogonal to the chord, clockwise-rotated sign
        // first, opposite sign second; keep the first non-colinear hit.
        let e = p2 - p1;
        let ortho = Vector2::new(e.y, -e.x);
        let mut third = None;
        for dir in [ortho, -ortho] {
            let q = self.probe(dir)?;
            if parallelogram_area(e, q - p1).abs() / e.norm() > tol {
                third = Some(q);
                break;
            }
        }
        let Some(p3) = third else {
            // Everything sits on the chord's line: the image is a segment.
            // Report its exact extent rather than the incidental probe hits.
            let u = e / e.norm();
            let hi = self.probe(u)?;
            let lo = self.probe(-u)?;
            return Ok(if (hi - lo).norm() <= tol {
                Init::Point(lo)
            } else {
                Init::Segment(lo, hi)
            });
        };

        let (p1, p2, p3) = if parallelogram_area(p2 - p1, p3 - p1) > 0.0 {
            (p1, p2, p3)
        } else {
            (p1, p3, p2)
        };
        self.arena = PolygonArena::from_triangle(p1, p2, p3);
        for v in [VertexId(0), VertexId(1), VertexId(2)] {
            self.seed_edge(v)?;
        }
        debug!(
            pending = self.arena.total_pending_area(),
            "seeded initial triangle"
        );
        Ok(Init::Triangle)
    }

    /// Probe the outward normal of edge `(v, next)`, cache the hit, and
    /// enqueue the edge if it can still gain area.
    fn seed_edge(&mut self, v: VertexId) -> Result<(), ProjectionError> {
        let normal = self.arena.outward_normal(v);
        let s = self.probe(normal)?;
        let pending = self.arena.set_support(v, s, self.cfg.point_tol);
        if pending > 0.0 {
            self.heap.push(EdgeKey {
                area: pending,
                vertex: v,
                epoch: self.arena.epoch(v),
            });
        }
        Ok(())
    }

    fn refine(&mut self) -> Result<ProjectedRegion, ProjectionError> {
        let mut converged = self.arena.total_pending_area() <= self.cfg.area_tol;
        while !converged && self.insertions < self.cfg.max_iter {
            let Some(key) = self.heap.pop() else {
                converged = true;
                break;
            };
            if key.epoch != self.arena.epoch(key.vertex)
                || key.area != self.arena.pending(key.vertex)
            {
                continue; // stale: the edge was re-spliced or marked tight
            }
            let v1 = key.vertex;
            let v2 = self.arena.next(v1);
            let s = self.arena.support(v1);
            let vnew = self.arena.insert_between(v1, v2, s);
            self.insertions += 1;
            trace!(vertex = vnew.0, x = s.x, y = s.y, "inserted support point");
            self.seed_edge(v1)?;
            self.seed_edge(vnew)?;
            converged = self.arena.total_pending_area() <= self.cfg.area_tol;
        }
        let pending_area = self.arena.total_pending_area();
        debug!(
            vertices = self.arena.len(),
            insertions = self.insertions,
            pending_area,
            converged,
            "refinement finished"
        );
        Ok(ProjectedRegion::Polygon(PolygonResult {
            vertices: self.finalize(),
            converged,
            iterations: self.insertions,
            pending_area,
        }))
    }

    /// Drop near-duplicate and colinear (zero-area) vertices from the
    /// output; the cyclic CCW order is preserved.
    fn finalize(&self) -> Vec<Vector2<f64>> {
        let pts = self.arena.points_ccw();
        let tol = self.cfg.point_tol;
        let m = pts.len();
        let mut keep = Vec::with_capacity(m);
        for i in 0..m {
            let prev = pts[(i + m - 1) % m];
            let cur = pts[i];
            let next = pts[(i + 1) % m];
            if (cur - prev).norm() <= tol {
                continue;
            }
            let chord = next - prev;
            let len = chord.norm();
            if len > 0.0 && parallelogram_area(chord, cur - prev).abs() / len <= tol {
                continue;
            }
            keep.push(cur);
        }
        if keep.len() < 3 {
            pts
        } else {
            keep
        }
    }
}
