//! Field statistics and run reports.
//!
//! These are observations only; nothing here feeds back into the simulation.

use crate::population::PopulationReport;
use physarum_core::snapshot::FieldView;
use physarum_core::types::Step;
use serde::{Deserialize, Serialize};

/// Summary statistics of a trail grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub cells: usize,
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Cells holding any trail at all.
    pub nonzero_cells: usize,
}

impl FieldStats {
    pub fn from_view(view: &FieldView<'_>) -> Self {
        let values = view.values();
        if values.is_empty() {
            return Self {
                cells: 0,
                total: 0.0,
                mean: 0.0,
                min: 0.0,
                max: 0.0,
                nonzero_cells: 0,
            };
        }

        let total: f64 = values.iter().sum();
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);
        let nonzero_cells = values.iter().filter(|v| **v != 0.0).count();

        Self {
            cells: values.len(),
            total,
            mean: total / values.len() as f64,
            min,
            max,
            nonzero_cells,
        }
    }

    /// Fraction of cells holding trail.
    pub fn coverage(&self) -> f64 {
        if self.cells == 0 {
            0.0
        } else {
            self.nonzero_cells as f64 / self.cells as f64
        }
    }
}

/// What happened during one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepReport {
    /// Zero-based index of the step that just completed.
    pub step: Step,
    pub population: PopulationReport,
    /// Field total after decay.
    pub total_mass: f64,
    /// Whether a snapshot was emitted for this step.
    pub exported: bool,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub steps: u64,
    pub agents: usize,
    pub seed: u64,
    pub final_stats: FieldStats,
    pub snapshots_emitted: usize,
    pub total_reflected: u64,
    pub total_dropped_deposits: u64,
    pub wall_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_small_grid() {
        let values = [0.0, 2.0, 0.0, 6.0];
        let stats = FieldStats::from_view(&FieldView::new(2, 2, &values));
        assert_eq!(stats.cells, 4);
        assert_eq!(stats.total, 8.0);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 6.0);
        assert_eq!(stats.nonzero_cells, 2);
        assert_eq!(stats.coverage(), 0.5);
    }

    #[test]
    fn stats_of_empty_grid() {
        let stats = FieldStats::from_view(&FieldView::new(0, 0, &[]));
        assert_eq!(stats.cells, 0);
        assert_eq!(stats.coverage(), 0.0);
    }
}
