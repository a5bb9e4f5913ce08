//! The trail field: a scalar grid that agents sense and deposit into.
//!
//! Each step the field receives deposits, diffuses through a 3×3 kernel, and
//! decays multiplicatively. Diffusion is double-buffered: the new grid is
//! computed into a scratch buffer from the untouched old grid and the two are
//! swapped, so no neighbor read ever sees a value from the same pass.
//!
//! Periodic fields wrap every neighbor read. Reflective fields pad the grid
//! with a ring of zeros, so trail diffusing off the edge is lost.

use physarum_core::boundary::{self, BoundaryMode};
use physarum_core::config::{DiffusionKernel, SimulationConfig};
use physarum_core::error::{ConfigError, Result};
use physarum_core::sensor::TrailSampler;
use physarum_core::snapshot::FieldView;
use physarum_core::types::Cell;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Double-buffered trail grid.
#[derive(Debug, Clone)]
pub struct TrailField {
    width: usize,
    height: usize,
    boundary: BoundaryMode,
    kernel: DiffusionKernel,
    max_concentration: Option<f64>,
    values: Vec<f64>,
    scratch: Vec<f64>,
}

impl TrailField {
    /// A zero-initialized field. Both dimensions must be at least 1.
    pub fn new(
        width: usize,
        height: usize,
        boundary: BoundaryMode,
        kernel: DiffusionKernel,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConfigError::invalid(
                "field_size",
                format!("{}x{}", width, height),
                "grid must be at least 1x1",
            )
            .into());
        }
        Ok(Self {
            width,
            height,
            boundary,
            kernel,
            max_concentration: None,
            values: vec![0.0; width * height],
            scratch: vec![0.0; width * height],
        })
    }

    /// A zero-initialized field sized and configured for a simulation.
    pub fn for_config(config: &SimulationConfig) -> Result<Self> {
        let (width, height) = config.domain.grid_size();
        Ok(Self::new(width, height, config.boundary, config.kernel)?
            .with_max_concentration(config.max_concentration))
    }

    /// A pre-seeded field. Values are row-major and must be finite and non-negative.
    pub fn from_values(
        width: usize,
        height: usize,
        boundary: BoundaryMode,
        kernel: DiffusionKernel,
        values: Vec<f64>,
    ) -> Result<Self> {
        let mut field = Self::new(width, height, boundary, kernel)?;
        if values.len() != width * height {
            return Err(ConfigError::invalid(
                "initial_field",
                format!("{} values", values.len()),
                format!("expected {}x{} = {}", width, height, width * height),
            )
            .into());
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(ConfigError::invalid(
                "initial_field",
                bad.to_string(),
                "concentrations must be finite and non-negative",
            )
            .into());
        }
        field.values = values;
        Ok(field)
    }

    /// Clamp cells to `max` after every decay. `None` leaves the field unbounded.
    pub fn with_max_concentration(mut self, max: Option<f64>) -> Self {
        self.max_concentration = max;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn kernel(&self) -> DiffusionKernel {
        self.kernel
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row-major cell values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Read-only view for export and statistics.
    pub fn view(&self) -> FieldView<'_> {
        FieldView::new(self.width, self.height, &self.values)
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let idx = y * self.width + x;
        self.values[idx] = value;
    }

    /// Add `amount` to the cell, resolving it with the boundary policy.
    ///
    /// Returns `false` when the cell is outside a reflective grid; nothing
    /// is written in that case.
    pub fn deposit(&mut self, cell: Cell, amount: f64) -> bool {
        match self.resolve(cell) {
            Some((x, y)) => {
                self.values[y * self.width + x] += amount;
                true
            }
            None => false,
        }
    }

    /// One diffusion pass through the configured 3×3 kernel.
    pub fn diffuse(&mut self) {
        let weights = self.kernel.weights();
        let (width, height, mode) = (self.width, self.height, self.boundary);
        let src = &self.values;

        #[cfg(feature = "parallel")]
        self.scratch
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| diffuse_row(src, row, y, width, height, mode, &weights));

        #[cfg(not(feature = "parallel"))]
        for (y, row) in self.scratch.chunks_mut(width).enumerate() {
            diffuse_row(src, row, y, width, height, mode, &weights);
        }

        std::mem::swap(&mut self.values, &mut self.scratch);
    }

    /// Multiply every cell by `1 - fraction`.
    pub fn decay(&mut self, fraction: f64) {
        let keep = 1.0 - fraction;
        for v in &mut self.values {
            *v *= keep;
        }
    }

    /// Apply the optional upper bound.
    pub fn clamp(&mut self) {
        if let Some(max) = self.max_concentration {
            for v in &mut self.values {
                if *v > max {
                    *v = max;
                }
            }
        }
    }

    /// End-of-step field update: diffuse, decay, then clamp.
    pub fn settle(&mut self, decay: f64) {
        self.diffuse();
        self.decay(decay);
        self.clamp();
    }
}

impl TrailSampler for TrailField {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }
}

/// Compute row `y` of the diffused grid from `src` into `out`.
fn diffuse_row(
    src: &[f64],
    out: &mut [f64],
    y: usize,
    width: usize,
    height: usize,
    mode: BoundaryMode,
    weights: &[[f64; 3]; 3],
) {
    for (x, cell) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (ky, weight_row) in weights.iter().enumerate() {
            let ny = y as i64 + ky as i64 - 1;
            let Some(sy) = boundary::resolve_axis(ny, height, mode) else {
                continue;
            };
            for (kx, weight) in weight_row.iter().enumerate() {
                let nx = x as i64 + kx as i64 - 1;
                if let Some(sx) = boundary::resolve_axis(nx, width, mode) {
                    acc += weight * src[sy * width + sx];
                }
            }
        }
        *cell = acc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn periodic(n: usize) -> TrailField {
        TrailField::new(n, n, BoundaryMode::Periodic, DiffusionKernel::Uniform).unwrap()
    }

    #[test]
    fn starts_at_zero() {
        let field = periodic(4);
        assert_eq!(field.len(), 16);
        assert!(field.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn empty_grid_is_rejected() {
        for (w, h) in [(0, 5), (5, 0), (0, 0)] {
            let err = TrailField::new(w, h, BoundaryMode::Periodic, DiffusionKernel::Uniform).unwrap_err();
            assert_eq!(err.as_config().map(|e| e.field()), Some("field_size"));
        }
        let err = TrailField::from_values(0, 3, BoundaryMode::Reflective, DiffusionKernel::Uniform, vec![])
            .unwrap_err();
        assert_eq!(err.as_config().map(|e| e.field()), Some("field_size"));
    }

    #[test]
    fn periodic_deposit_wraps() {
        let mut field = periodic(5);
        assert!(field.deposit(Cell::new(-1, 5), 2.0));
        assert_eq!(field.get(4, 0), 2.0);
    }

    #[test]
    fn reflective_deposit_outside_is_ignored() {
        let mut field = TrailField::new(5, 5, BoundaryMode::Reflective, DiffusionKernel::Uniform).unwrap();
        assert!(!field.deposit(Cell::new(5, 0), 1.0));
        assert!(!field.deposit(Cell::new(0, -1), 1.0));
        assert_eq!(field.total(), 0.0);
    }

    #[test]
    fn periodic_uniform_diffusion_spreads_to_nine_cells() {
        let mut field = periodic(6);
        field.deposit(Cell::new(0, 0), 9.0);
        field.diffuse();
        for y in 0..6 {
            for x in 0..6 {
                let near = [0, 1, 5].contains(&x) && [0, 1, 5].contains(&y);
                let expected = if near { 1.0 } else { 0.0 };
                assert!((field.get(x, y) - expected).abs() < 1e-12, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn periodic_diffusion_conserves_mass() {
        for kernel in [DiffusionKernel::Uniform, DiffusionKernel::Peaked] {
            let values: Vec<f64> = (0..49).map(|i| ((i * 7) % 11) as f64).collect();
            let mut field = TrailField::from_values(7, 7, BoundaryMode::Periodic, kernel, values).unwrap();
            let before = field.total();
            for _ in 0..5 {
                field.diffuse();
            }
            assert!((field.total() - before).abs() < 1e-9, "{:?}", kernel);
        }
    }

    #[test]
    fn diffusion_reads_the_pre_pass_field() {
        // An in-place pass would smear a single spike asymmetrically.
        let mut field = periodic(5);
        field.set(2, 2, 9.0);
        field.diffuse();
        assert!((field.get(1, 2) - field.get(3, 2)).abs() < 1e-15);
        assert!((field.get(2, 1) - field.get(2, 3)).abs() < 1e-15);
        assert!((field.get(1, 1) - field.get(3, 3)).abs() < 1e-15);
    }

    #[test]
    fn reflective_diffusion_leaks_at_edges() {
        let mut field = TrailField::new(4, 4, BoundaryMode::Reflective, DiffusionKernel::Uniform).unwrap();
        field.set(0, 0, 9.0);
        field.diffuse();
        // Only the 2x2 corner block receives mass; five ninths fall off the grid.
        assert!((field.get(0, 0) - 1.0).abs() < 1e-12);
        assert!((field.get(1, 1) - 1.0).abs() < 1e-12);
        assert!((field.total() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn reflective_interior_matches_kernel() {
        let mut field = TrailField::new(5, 5, BoundaryMode::Reflective, DiffusionKernel::Peaked).unwrap();
        field.set(2, 2, 36.0);
        field.diffuse();
        assert!((field.get(2, 2) - 24.0).abs() < 1e-12);
        assert!((field.get(1, 2) - 2.0).abs() < 1e-12);
        assert!((field.get(3, 3) - 1.0).abs() < 1e-12);
        assert!((field.total() - 36.0).abs() < 1e-12);
    }

    #[test]
    fn decay_is_multiplicative() {
        let values = vec![1.0, 2.0, 4.0, 8.0];
        let mut field =
            TrailField::from_values(2, 2, BoundaryMode::Periodic, DiffusionKernel::Uniform, values).unwrap();
        field.decay(0.25);
        assert_eq!(field.values(), &[0.75, 1.5, 3.0, 6.0]);
    }

    #[test]
    fn clamp_is_off_by_default() {
        let mut field = periodic(2);
        field.deposit(Cell::new(0, 0), 1e6);
        field.clamp();
        assert_eq!(field.get(0, 0), 1e6);

        let mut bounded = periodic(2).with_max_concentration(Some(10.0));
        bounded.deposit(Cell::new(0, 0), 1e6);
        bounded.clamp();
        assert_eq!(bounded.get(0, 0), 10.0);
    }

    #[test]
    fn from_values_checks_shape_and_sign() {
        let short = TrailField::from_values(2, 2, BoundaryMode::Periodic, DiffusionKernel::Uniform, vec![0.0; 3]);
        assert!(short.is_err());
        let negative =
            TrailField::from_values(1, 2, BoundaryMode::Periodic, DiffusionKernel::Uniform, vec![0.0, -1.0]);
        assert!(negative.is_err());
    }
}
