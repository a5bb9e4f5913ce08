//! # Physarum
//!
//! Agent-based trail network simulation in the style of Physarum
//! polycephalum.
//!
//! Thousands of point agents wander a 2D domain. Each one reads the trail
//! field through three forward probes, turns toward the strongest reading,
//! steps forward, and deposits trail. The field diffuses and decays every
//! step. Branching networks emerge from nothing more than this loop.
//!
//! ## Quick Start
//!
//! ```rust
//! use physarum::prelude::*;
//!
//! let mut config = SimulationConfig::from_preset(Preset::Small).with_seed(7);
//! config.steps = 20;
//! config.agent_count = 200;
//!
//! let mut recorder = SnapshotRecorder::new();
//! let mut sim = Simulation::new(config.with_export_every(10)).unwrap();
//! let summary = sim.run_into(&mut recorder).unwrap();
//!
//! assert_eq!(summary.steps, 20);
//! assert_eq!(recorder.frames().len(), 2);
//! println!("total trail: {:.3}", summary.final_stats.total);
//! ```
//!
//! ## Architecture
//!
//! - [`physarum_core`] - types, boundary math, steering rule, configuration, export seam
//! - [`physarum_runtime`] - trail field, agent population, simulation driver, sinks, metrics
//!
//! ## The step
//!
//! | Phase | What happens |
//! |-------|--------------|
//! | Sense | every agent reads three probes from the settled field |
//! | Steer | turn by the three-sensor rule, plus optional noise |
//! | Move | one step forward; wrap (periodic) or turn back once (reflective) |
//! | Deposit | every agent adds trail to its nearest cell |
//! | Diffuse | 3×3 kernel, double-buffered |
//! | Decay | every cell loses a fixed fraction |
//! | Export | a snapshot goes to the sink on the configured cadence |
//!
//! ## Boundaries
//!
//! Periodic domains are tori: agents, probes, deposits, and the diffusion
//! stencil all wrap. Reflective domains bounce agents back with a single
//! corrective step, read anything outside as zero, and lose trail that
//! diffuses off the edge.

// Re-export all subcrates
pub use physarum_core as core;
pub use physarum_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use physarum::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use physarum_core::types::{Agent, Cell, Position, SensorReadings, Step, Turn};

    // Configuration
    pub use physarum_core::boundary::BoundaryMode;
    pub use physarum_core::config::{
        degrees, DiffusionKernel, DomainShape, Preset, SensorGeometry, SimulationConfig,
    };

    // Core traits
    pub use physarum_core::sensor::TrailSampler;
    pub use physarum_core::snapshot::{FieldView, NullSink, SnapshotSink};

    // Error types
    pub use physarum_core::error::{ConfigError, ExportError, PhysarumError, Result};

    // Runtime
    pub use physarum_runtime::simulation::Simulation;
    pub use physarum_runtime::simulation_builder::SimulationBuilder;
    pub use physarum_runtime::trail_field::TrailField;
    pub use physarum_runtime::population::{AgentPopulation, PopulationReport};
    pub use physarum_runtime::metrics::{FieldStats, RunSummary, StepReport};
    pub use physarum_runtime::export::{read_frame, Frame, FrameDirectory, SnapshotRecorder};
    pub use physarum_runtime::bench::{
        run_benchmark, BenchmarkConfig, BenchmarkRun, BenchmarkSuite, ComparisonTable,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
