//! Random H-rep polytopes in the plane (jittered tangents + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler of bounded 2D polytopes for
//!   property tests and benches: tangent halfspaces at jittered angles and
//!   offsets, with the origin strictly interior.
//!
//! Model
//! - Start from `m` equally spaced normal angles on [0, 2π), add bounded
//!   angular jitter, draw each offset from a positive range. Jitter is
//!   clamped so consecutive normals always positively span the plane, which
//!   keeps every draw bounded.
//! - Determinism uses a replay token `(seed, index)` mixed into one RNG.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::hrep::Polytope;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Jittered tangent-halfspace sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct JitterCfg {
    /// Number of halfspaces (at least 3).
    pub halfspaces: usize,
    /// Angular jitter as a fraction of the base spacing 2π/m.
    pub angle_jitter_frac: f64,
    /// Offsets drawn uniformly from this range; keep it positive so the
    /// origin stays strictly interior.
    pub offset: (f64, f64),
}

impl Default for JitterCfg {
    fn default() -> Self {
        Self {
            halfspaces: 8,
            angle_jitter_frac: 0.3,
            offset: (0.5, 1.5),
        }
    }
}

/// Draw a bounded random polytope in R² with the origin strictly interior.
pub fn draw_polytope_radial(cfg: JitterCfg, tok: ReplayToken) -> Polytope {
    let mut rng = tok.to_std_rng();
    let m = cfg.halfspaces.max(3);
    let delta = 2.0 * std::f64::consts::PI / (m as f64);
    // Largest jitter that keeps every angular gap under π (bounded draw).
    let aj_max = 0.95 * ((m as f64) / 2.0 - 1.0) / 2.0;
    let aj = cfg.angle_jitter_frac.clamp(0.0, aj_max.min(0.49));
    let mut a = DMatrix::zeros(m, 2);
    let mut b = DVector::zeros(m);
    for k in 0..m {
        let angle = (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
        a[(k, 0)] = angle.cos();
        a[(k, 1)] = angle.sin();
        b[k] = rng.gen_range(cfg.offset.0..cfg.offset.1);
    }
    Polytope::from_inequalities(a, b).expect("sampler emits matching shapes")
}
