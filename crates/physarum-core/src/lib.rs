//! # Physarum Core
//!
//! Core traits and types for Physarum-style trail simulation.
//!
//! A population of point agents wanders a 2D domain. Each agent reads the
//! trail field through three forward probes, turns toward the strongest
//! reading, steps forward, and deposits trail. The field diffuses and decays
//! every step. The networks that emerge come from this loop alone.
//!
//! This crate holds everything that does not own state:
//!
//! - **types** - `Position`, `Agent`, `Cell`, `Turn`, `SensorReadings`
//! - **boundary** - periodic wrapping and reflective bounds checks
//! - **config** - `SimulationConfig`, domain shapes, kernels, presets, validation
//! - **decision** - the three-sensor steering rule
//! - **sensor** - the `TrailSampler` trait and probe placement
//! - **snapshot** - `FieldView` and the `SnapshotSink` export seam
//! - **error** - error types for configuration and export
//!
//! ## Quick Start
//!
//! ```rust
//! use physarum_core::prelude::*;
//!
//! let config = SimulationConfig::from_preset(Preset::Small);
//! assert!(config.validate().is_ok());
//!
//! let readings = SensorReadings::new(0.0, 1.0, 0.0);
//! assert_eq!(classify(&readings), TurnRule::Straight);
//! ```

pub mod boundary;
pub mod config;
pub mod decision;
pub mod error;
pub mod prelude;
pub mod sensor;
pub mod snapshot;
pub mod types;
