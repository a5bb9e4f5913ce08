//! Simulation configuration.
//!
//! A [`SimulationConfig`] is an immutable parameter bundle handed to the
//! simulation once at construction. It is validated up front; nothing in the
//! step loop re-reads or mutates it.

use crate::boundary::{self, BoundaryMode};
use crate::error::{ConfigError, PhysarumError, Result};
use crate::types::{Cell, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Convert degrees to radians.
pub fn degrees(deg: f64) -> f64 {
    deg.to_radians()
}

/// Shape of the simulated domain and how it maps onto the trail grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainShape {
    /// A square of side `extent` sampled by a `resolution × resolution` grid.
    ///
    /// Positions map to cells with `floor(coord / extent * resolution)`.
    UnitSquare { extent: f64, resolution: usize },
    /// Positions are pixel coordinates; cells are the nearest pixel.
    ///
    /// Pixel `i` covers `[i - 0.5, i + 0.5)`, so the domain spans
    /// `[-0.5, width - 0.5)` and every inside position has an in-grid cell.
    PixelGrid { width: usize, height: usize },
}

impl DomainShape {
    /// Grid dimensions `(width, height)` in cells.
    pub fn grid_size(&self) -> (usize, usize) {
        match *self {
            DomainShape::UnitSquare { resolution, .. } => (resolution, resolution),
            DomainShape::PixelGrid { width, height } => (width, height),
        }
    }

    /// Domain extent `(x, y)` in domain units.
    pub fn extent(&self) -> (f64, f64) {
        match *self {
            DomainShape::UnitSquare { extent, .. } => (extent, extent),
            DomainShape::PixelGrid { width, height } => (width as f64, height as f64),
        }
    }

    /// Lower corner of the domain in domain units.
    pub fn origin(&self) -> (f64, f64) {
        match *self {
            DomainShape::UnitSquare { .. } => (0.0, 0.0),
            DomainShape::PixelGrid { .. } => (-0.5, -0.5),
        }
    }

    pub fn cell_count(&self) -> usize {
        let (w, h) = self.grid_size();
        w * h
    }

    /// The grid cell nearest to a position. May lie outside the grid.
    pub fn cell_of(&self, position: &Position) -> Cell {
        match *self {
            DomainShape::UnitSquare { extent, resolution } => {
                let scale = resolution as f64 / extent;
                Cell::new(
                    (position.x * scale).floor() as i64,
                    (position.y * scale).floor() as i64,
                )
            }
            // Halves round up, matching the `[i - 0.5, i + 0.5)` pixel window.
            DomainShape::PixelGrid { .. } => {
                let (ox, oy) = self.origin();
                Cell::new(
                    (position.x - ox).floor() as i64,
                    (position.y - oy).floor() as i64,
                )
            }
        }
    }

    /// Whether a position lies inside `[origin, origin + extent)` on both axes.
    pub fn contains(&self, position: &Position) -> bool {
        let (ex, ey) = self.extent();
        let (ox, oy) = self.origin();
        !boundary::out_of_bounds(position.x - ox, ex)
            && !boundary::out_of_bounds(position.y - oy, ey)
    }

    /// Wrap a position onto the torus.
    pub fn wrap(&self, position: &Position) -> Position {
        let (ex, ey) = self.extent();
        let (ox, oy) = self.origin();
        Position::new(
            ox + boundary::wrap_coordinate(position.x - ox, ex),
            oy + boundary::wrap_coordinate(position.y - oy, ey),
        )
    }
}

impl Default for DomainShape {
    fn default() -> Self {
        DomainShape::UnitSquare {
            extent: 1.0,
            resolution: 300,
        }
    }
}

impl fmt::Display for DomainShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainShape::UnitSquare { extent, resolution } => {
                write!(f, "square {} units @ {}x{}", extent, resolution, resolution)
            }
            DomainShape::PixelGrid { width, height } => write!(f, "{}x{} px", width, height),
        }
    }
}

/// 3×3 diffusion kernel shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffusionKernel {
    /// Every weight `1/9`.
    #[default]
    Uniform,
    /// Center `2/3`, edge neighbors `1/18`, corners `1/36`.
    Peaked,
}

impl DiffusionKernel {
    /// Weights indexed `[dy + 1][dx + 1]`. Both shapes sum to `1.0`.
    pub fn weights(self) -> [[f64; 3]; 3] {
        match self {
            DiffusionKernel::Uniform => [[1.0 / 9.0; 3]; 3],
            DiffusionKernel::Peaked => {
                let corner = 1.0 / 36.0;
                let edge = 1.0 / 18.0;
                [
                    [corner, edge, corner],
                    [edge, 2.0 / 3.0, edge],
                    [corner, edge, corner],
                ]
            }
        }
    }
}

/// Probe geometry shared by every agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorGeometry {
    /// Number of probes. The steering rule is defined for three.
    pub count: usize,
    /// Angle between the center probe and each side probe (radians).
    pub angle: f64,
    /// Radial distance of every probe from the agent (domain units).
    pub offset: f64,
}

impl SensorGeometry {
    /// Angular offsets of the left, center, and right probes.
    pub fn offsets(&self) -> [f64; 3] {
        [-self.angle, 0.0, self.angle]
    }
}

impl Default for SensorGeometry {
    fn default() -> Self {
        Self {
            count: 3,
            angle: degrees(45.0),
            offset: 38.0 / 300.0,
        }
    }
}

/// Named parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Unit square at 300×300, 10 000 agents, periodic edges.
    Reference,
    /// The reference geometry with reflective edges.
    Reflective,
    /// 200×200 pixel domain with pixel-unit sensors.
    PixelGrid,
    /// 64×64 quick preview.
    Small,
}

impl Preset {
    pub fn all() -> [Preset; 4] {
        [Preset::Reference, Preset::Reflective, Preset::PixelGrid, Preset::Small]
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Reference => "reference",
            Preset::Reflective => "reflective",
            Preset::PixelGrid => "pixel-grid",
            Preset::Small => "small",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::Reference => "unit square at 300x300, 10000 agents, periodic edges",
            Preset::Reflective => "reference geometry with reflective edges",
            Preset::PixelGrid => "200x200 pixel domain, pixel-unit sensors",
            Preset::Small => "64x64 preview, 500 agents, 200 steps",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Preset::all()
            .into_iter()
            .find(|p| p.name() == normalized)
            .ok_or_else(|| {
                ConfigError::invalid(
                    "preset",
                    s,
                    "expected one of reference, reflective, pixel-grid, small",
                )
            })
    }
}

/// Immutable parameter bundle for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub domain: DomainShape,
    /// Number of steps `run` executes.
    pub steps: u64,
    pub agent_count: usize,
    pub sensor: SensorGeometry,
    /// Rotation applied per unit of turn (radians).
    pub rotation_angle: f64,
    /// Distance moved per step (domain units).
    pub step_length: f64,
    /// Amount added to the cell under each agent per step.
    pub deposit: f64,
    /// Fraction removed from every cell per step, in `[0, 1)`.
    pub decay: f64,
    pub boundary: BoundaryMode,
    pub kernel: DiffusionKernel,
    /// Emit a snapshot every N steps. `None` disables export.
    pub export_every: Option<u64>,
    /// Extra random rotation magnitude (radians). `0` disables it.
    pub rotation_noise: f64,
    /// Optional upper bound on cell values. Off by default.
    pub max_concentration: Option<f64>,
    /// Seed for the random source. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Log progress every N steps. `0` disables progress logging.
    pub log_every: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Reference)
    }
}

impl SimulationConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let reference = SimulationConfig {
            domain: DomainShape::UnitSquare {
                extent: 1.0,
                resolution: 300,
            },
            steps: 10_000,
            agent_count: 10_000,
            sensor: SensorGeometry::default(),
            rotation_angle: degrees(45.0),
            step_length: 1.0 / 300.0,
            deposit: 0.1,
            decay: 0.1,
            boundary: BoundaryMode::Periodic,
            kernel: DiffusionKernel::Uniform,
            export_every: None,
            rotation_noise: 0.0,
            max_concentration: None,
            seed: None,
            log_every: 100,
        };

        match preset {
            Preset::Reference => reference,
            Preset::Reflective => SimulationConfig {
                boundary: BoundaryMode::Reflective,
                ..reference
            },
            Preset::PixelGrid => SimulationConfig {
                domain: DomainShape::PixelGrid {
                    width: 200,
                    height: 200,
                },
                steps: 2_000,
                agent_count: 4_000,
                sensor: SensorGeometry {
                    count: 3,
                    angle: degrees(45.0),
                    offset: 9.0,
                },
                step_length: 1.0,
                deposit: 5.0,
                ..reference
            },
            Preset::Small => SimulationConfig {
                domain: DomainShape::UnitSquare {
                    extent: 1.0,
                    resolution: 64,
                },
                steps: 200,
                agent_count: 500,
                sensor: SensorGeometry {
                    count: 3,
                    angle: degrees(45.0),
                    offset: 9.0 / 64.0,
                },
                step_length: 1.0 / 64.0,
                deposit: 0.5,
                ..reference
            },
        }
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the export cadence.
    pub fn with_export_every(mut self, every: u64) -> Self {
        self.export_every = Some(every);
        self
    }

    /// Whether a snapshot is due after `step` (zero-based).
    pub fn exports_at(&self, step: u64) -> bool {
        match self.export_every {
            Some(every) if every > 0 => step % every == 0,
            _ => false,
        }
    }

    /// Check every parameter. Called before the simulation loop starts.
    pub fn validate(&self) -> Result<()> {
        match self.domain {
            DomainShape::UnitSquare { extent, resolution } => {
                positive("domain.extent", extent)?;
                if resolution == 0 {
                    return Err(invalid("domain.resolution", resolution, "must be positive"));
                }
            }
            DomainShape::PixelGrid { width, height } => {
                if width == 0 {
                    return Err(invalid("domain.width", width, "must be positive"));
                }
                if height == 0 {
                    return Err(invalid("domain.height", height, "must be positive"));
                }
            }
        }

        if self.agent_count == 0 {
            return Err(invalid("agent_count", 0, "at least one agent is required"));
        }
        if self.sensor.count != 3 {
            return Err(invalid(
                "sensor.count",
                self.sensor.count,
                "only the three-probe geometry is supported",
            ));
        }
        finite("sensor.angle", self.sensor.angle)?;
        non_negative("sensor.offset", self.sensor.offset)?;
        finite("rotation_angle", self.rotation_angle)?;
        positive("step_length", self.step_length)?;
        non_negative("deposit", self.deposit)?;
        non_negative("rotation_noise", self.rotation_noise)?;

        if !(0.0..1.0).contains(&self.decay) {
            return Err(ConfigError::out_of_range("decay", 0.0, 1.0, self.decay).into());
        }
        if self.export_every == Some(0) {
            return Err(invalid("export_every", 0, "cadence must be at least 1"));
        }
        if let Some(max) = self.max_concentration {
            positive("max_concentration", max)?;
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl fmt::Display, reason: &str) -> PhysarumError {
    PhysarumError::invalid_config(field, value.to_string(), reason)
}

fn finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must not be negative"))
    }
}
