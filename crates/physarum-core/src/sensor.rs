//! SENSE: reading the trail ahead.
//!
//! An agent never sees the whole field. It places three probes at a fixed
//! distance ahead of itself, one straight on and one to each side, and reads
//! the cell under each. That is all the information it steers by.

use crate::boundary::{self, BoundaryMode};
use crate::config::{DomainShape, SensorGeometry};
use crate::types::{Agent, Cell, Position, SensorReadings};

/// Read access to a trail grid.
///
/// Implementors provide raw cell access and the boundary policy; resolution
/// of out-of-range cells and probe placement come for free.
pub trait TrailSampler {
    /// Grid dimensions `(width, height)`.
    fn dimensions(&self) -> (usize, usize);

    /// Boundary policy used to resolve out-of-range cells.
    fn boundary(&self) -> BoundaryMode;

    /// Raw value at an in-range cell.
    fn get(&self, x: usize, y: usize) -> f64;

    /// Resolve a signed cell to grid coordinates.
    ///
    /// Periodic grids wrap each axis with a floored modulo; reflective grids
    /// return `None` when the cell is outside.
    fn resolve(&self, cell: Cell) -> Option<(usize, usize)> {
        let (w, h) = self.dimensions();
        let mode = self.boundary();
        let x = boundary::resolve_axis(cell.x, w, mode)?;
        let y = boundary::resolve_axis(cell.y, h, mode)?;
        Some((x, y))
    }

    /// Value at a signed cell; absent cells read as `0`.
    fn sample(&self, cell: Cell) -> f64 {
        self.resolve(cell).map(|(x, y)| self.get(x, y)).unwrap_or(0.0)
    }
}

/// Where the left, center, and right probes of an agent land.
pub fn probe_positions(agent: &Agent, geometry: &SensorGeometry) -> [Position; 3] {
    geometry
        .offsets()
        .map(|offset| agent.position.offset(agent.heading + offset, geometry.offset))
}

/// Read the three probes of an agent from a field.
pub fn sense<S: TrailSampler + ?Sized>(
    field: &S,
    agent: &Agent,
    geometry: &SensorGeometry,
    domain: &DomainShape,
) -> SensorReadings {
    let [left, center, right] =
        probe_positions(agent, geometry).map(|probe| field.sample(domain.cell_of(&probe)));
    SensorReadings::new(left, center, right)
}
