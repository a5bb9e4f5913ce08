//! Builder for assembling a simulation.
//!
//! Everything the simulation needs is fixed here, before the first step:
//! the validated configuration, the seed, the snapshot sink, and optionally a
//! pre-seeded field or a hand-placed population.
//!
//! # Example
//!
//! ```rust
//! use physarum_runtime::prelude::*;
//!
//! let mut sim = SimulationBuilder::new()
//!     .with_preset(Preset::Small)
//!     .steps(5)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let summary = sim.run().unwrap();
//! assert_eq!(summary.steps, 5);
//! ```

use crate::population::AgentPopulation;
use crate::rng::{create_rng, entropy_seed};
use crate::simulation::Simulation;
use crate::trail_field::TrailField;
use physarum_core::config::{Preset, SimulationConfig};
use physarum_core::error::{ConfigError, Result};
use physarum_core::snapshot::{NullSink, SnapshotSink};
use physarum_core::types::Agent;
use tracing::{info, warn};

/// Builder for [`Simulation`].
pub struct SimulationBuilder {
    config: SimulationConfig,
    sink: Option<Box<dyn SnapshotSink>>,
    initial_field: Option<Vec<f64>>,
    agents: Option<Vec<Agent>>,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Start from the reference configuration.
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            sink: None,
            initial_field: None,
            agents: None,
        }
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.config = SimulationConfig::from_preset(preset);
        self
    }

    pub fn steps(mut self, steps: u64) -> Self {
        self.config.steps = steps;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn export_every(mut self, every: u64) -> Self {
        self.config.export_every = Some(every);
        self
    }

    /// Sink receiving snapshots on the export cadence.
    pub fn sink(mut self, sink: impl SnapshotSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Start from these row-major values instead of an empty field.
    pub fn with_initial_field(mut self, values: Vec<f64>) -> Self {
        self.initial_field = Some(values);
        self
    }

    /// Use these agents instead of a random population. Overrides `agent_count`.
    pub fn with_agents(mut self, agents: Vec<Agent>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Simulation> {
        let mut config = self.config;
        if let Some(agents) = &self.agents {
            config.agent_count = agents.len();
        }
        config.validate()?;

        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = entropy_seed();
                warn!(
                    "no seed configured, drew {} from OS entropy; pass it back to reproduce this run",
                    seed
                );
                seed
            }
        };
        config.seed = Some(seed);
        let mut rng = create_rng(seed);

        let (width, height) = config.domain.grid_size();
        let field = match self.initial_field {
            Some(values) => {
                TrailField::from_values(width, height, config.boundary, config.kernel, values)?
                    .with_max_concentration(config.max_concentration)
            }
            None => TrailField::for_config(&config)?,
        };

        let population = match self.agents {
            Some(agents) => {
                let finite = |a: &Agent| {
                    a.position.x.is_finite() && a.position.y.is_finite() && a.heading.is_finite()
                };
                if let Some(bad) = agents.iter().find(|a| !finite(a)) {
                    return Err(ConfigError::invalid(
                        "agents",
                        format!("{:?}", bad),
                        "positions and headings must be finite",
                    )
                    .into());
                }
                AgentPopulation::from_agents(agents)
            }
            None => AgentPopulation::random(config.agent_count, &config.domain, &mut rng),
        };

        info!(
            "simulation ready: {} domain, {} agents, {} boundary, seed {}",
            config.domain, population.len(), config.boundary, seed
        );

        Ok(Simulation {
            config,
            field,
            population,
            rng,
            seed,
            step: 0,
            sink: self.sink.unwrap_or_else(|| Box::new(NullSink)),
            snapshots_emitted: 0,
            total_reflected: 0,
            total_dropped: 0,
        })
    }
}
