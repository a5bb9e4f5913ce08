//! # Physarum Runtime
//!
//! The stateful half of the simulator: the trail field, the agent
//! population, and the driver that steps them together.
//!
//! A [`Simulation`](simulation::Simulation) owns one seeded random source,
//! one double-buffered [`TrailField`](trail_field::TrailField), and one
//! [`AgentPopulation`](population::AgentPopulation). Snapshots leave through
//! the `SnapshotSink` seam from `physarum-core`; this crate ships an
//! in-memory recorder and a JSON frame directory.
//!
//! With the `parallel` feature, sensing and diffusion run on rayon. Random
//! draws stay sequential, so a seed reproduces the same run either way.

pub mod bench;
pub mod export;
pub mod metrics;
pub mod population;
pub mod prelude;
pub mod rng;
pub mod simulation;
pub mod simulation_builder;
pub mod trail_field;
