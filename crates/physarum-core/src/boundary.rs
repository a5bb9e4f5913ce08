//! Boundary policies and the modulo arithmetic behind them.
//!
//! Periodic domains are a torus: anything leaving one edge reappears at the
//! opposite edge. Reflective domains bounce agents back and treat reads or
//! writes outside the grid as absent.

use serde::{Deserialize, Serialize};

/// How the domain edges behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Edges wrap (torus topology).
    #[default]
    Periodic,
    /// Agents bounce off edges; out-of-range cells read as zero and ignore deposits.
    Reflective,
}

impl BoundaryMode {
    pub fn is_periodic(self) -> bool {
        matches!(self, BoundaryMode::Periodic)
    }
}

impl std::fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryMode::Periodic => write!(f, "periodic"),
            BoundaryMode::Reflective => write!(f, "reflective"),
        }
    }
}

/// Floored modulo of a cell coordinate: `-1` maps to `size - 1`, `size` to `0`.
pub fn wrap_index(coord: i64, size: usize) -> usize {
    let n = size as i64;
    (((coord % n) + n) % n) as usize
}

/// Wrap a continuous coordinate into `[0, extent)`.
///
/// `rem_euclid` can return exactly `extent` when `value` is a tiny negative
/// number; that case is folded back to `0`.
pub fn wrap_coordinate(value: f64, extent: f64) -> f64 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Whether a continuous coordinate lies outside `[0, extent)`.
pub fn out_of_bounds(value: f64, extent: f64) -> bool {
    !(0.0..extent).contains(&value)
}

/// Resolve a signed cell coordinate against a grid axis.
///
/// Periodic axes always resolve; reflective axes resolve only when in range.
pub fn resolve_axis(coord: i64, size: usize, mode: BoundaryMode) -> Option<usize> {
    match mode {
        BoundaryMode::Periodic => Some(wrap_index(coord, size)),
        BoundaryMode::Reflective => {
            if coord >= 0 && (coord as usize) < size {
                Some(coord as usize)
            } else {
                None
            }
        }
    }
}
