//! Snapshot export seam.
//!
//! The simulation hands its trail grid to a [`SnapshotSink`] on a configured
//! cadence. Sinks decide what to do with it: record it, write it to disk,
//! render it. The simulation neither knows nor cares how frames are stored.

use crate::error::ExportError;
use crate::types::Step;

/// Read-only view of a trail grid at one point in time.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    width: usize,
    height: usize,
    values: &'a [f64],
}

impl<'a> FieldView<'a> {
    /// Wrap a row-major buffer. `values.len()` must equal `width * height`.
    pub fn new(width: usize, height: usize, values: &'a [f64]) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell values, `index = y * width + x`.
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// One row of the grid.
    pub fn row(&self, y: usize) -> &'a [f64] {
        &self.values[y * self.width..(y + 1) * self.width]
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Largest cell value (`0` for an empty grid).
    pub fn max(&self) -> f64 {
        self.values.iter().cloned().fold(0.0f64, f64::max)
    }
}

/// Consumer of field snapshots.
pub trait SnapshotSink {
    /// Receive the field as it stands after decay of `step`.
    fn on_snapshot(&mut self, step: Step, field: &FieldView<'_>) -> Result<(), ExportError>;

    /// Called once after the last step of a run.
    fn finish(&mut self) -> Result<(), ExportError> {
        Ok(())
    }
}

impl<F> SnapshotSink for F
where
    F: FnMut(Step, &FieldView<'_>) -> Result<(), ExportError>,
{
    fn on_snapshot(&mut self, step: Step, field: &FieldView<'_>) -> Result<(), ExportError> {
        self(step, field)
    }
}

/// Sink that discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn on_snapshot(&mut self, _step: Step, _field: &FieldView<'_>) -> Result<(), ExportError> {
        Ok(())
    }
}
