//! Physarum Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use physarum_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{Agent, Cell, Position, SensorReadings, Step, Turn};

// Configuration
pub use crate::boundary::BoundaryMode;
pub use crate::config::{
    degrees, DiffusionKernel, DomainShape, Preset, SensorGeometry, SimulationConfig,
};

// Steering
pub use crate::decision::{classify, decide, TurnRule};

// Sensing and export seams
pub use crate::sensor::{sense, TrailSampler};
pub use crate::snapshot::{FieldView, NullSink, SnapshotSink};

// Re-export error types
pub use crate::error::{ConfigError, ExportError, PhysarumError, Result};
