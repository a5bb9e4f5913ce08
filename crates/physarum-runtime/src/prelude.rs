//! Physarum Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use physarum_runtime::prelude::*;
//! ```

// Re-export the driver
pub use crate::simulation::Simulation;
pub use crate::simulation_builder::SimulationBuilder;

// Re-export state
pub use crate::population::{AgentPopulation, MoveOutcome, PopulationReport};
pub use crate::trail_field::TrailField;

// Re-export metrics and export sinks
pub use crate::export::{read_frame, Frame, FrameDirectory, SnapshotRecorder};
pub use crate::metrics::{FieldStats, RunSummary, StepReport};

// Re-export benchmarking
pub use crate::bench::{run_benchmark, BenchmarkConfig, BenchmarkRun, BenchmarkSuite};

pub use crate::rng::{create_rng, SimRng};

// Re-export from core
pub use physarum_core::prelude::*;
