//! Agent population: sense, steer, move, deposit.
//!
//! One population step runs in three passes:
//! 1. Every agent senses the settled field (pure reads, no agent sees
//!    another agent's move).
//! 2. Agents steer and move in index order, applying the boundary policy.
//! 3. Every agent deposits into the cell under its final position.
//!
//! Random draws happen only in pass 2, agent by agent: the steering draw
//! (random branches only), the rotation-noise sign (when noise is enabled),
//! then the bounce sign (when the agent was reflected).

use crate::trail_field::TrailField;
use physarum_core::boundary::BoundaryMode;
use physarum_core::config::{DomainShape, SimulationConfig};
use physarum_core::decision::{decide, random_sign};
use physarum_core::sensor::{sense, TrailSampler};
use physarum_core::types::{Agent, Position, SensorReadings, Turn};
use rand::Rng;
use serde::Serialize;
use std::f64::consts::{PI, TAU};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What the boundary policy did to an agent after it moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move stayed inside the domain.
    Inside,
    /// The agent left the domain and was wrapped to the opposite edge.
    Wrapped,
    /// The agent left the domain, turned around, and took one corrective move.
    Reflected,
}

/// Per-step population counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopulationReport {
    pub wrapped: usize,
    pub reflected: usize,
    /// Deposits that landed outside a reflective grid.
    pub dropped_deposits: usize,
}

/// All agents of a simulation.
#[derive(Debug, Clone, Default)]
pub struct AgentPopulation {
    agents: Vec<Agent>,
}

impl AgentPopulation {
    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// `count` agents uniform over the domain with headings uniform over `[0, 2π)`.
    ///
    /// Draws x, y, heading per agent, in agent order.
    pub fn random<R: Rng + ?Sized>(count: usize, domain: &DomainShape, rng: &mut R) -> Self {
        let (ex, ey) = domain.extent();
        let (ox, oy) = domain.origin();
        let agents = (0..count)
            .map(|_| {
                let x = ox + rng.gen_range(0.0..ex);
                let y = oy + rng.gen_range(0.0..ey);
                let heading = rng.gen_range(0.0..TAU);
                Agent::new(Position::new(x, y), heading)
            })
            .collect();
        Self { agents }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Read every agent's probes against the same field state.
    pub fn sense_all<S>(&self, field: &S, config: &SimulationConfig) -> Vec<SensorReadings>
    where
        S: TrailSampler + Sync + ?Sized,
    {
        #[cfg(feature = "parallel")]
        let readings = self
            .agents
            .par_iter()
            .map(|agent| sense(field, agent, &config.sensor, &config.domain))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let readings = self
            .agents
            .iter()
            .map(|agent| sense(field, agent, &config.sensor, &config.domain))
            .collect();

        readings
    }

    /// Steer and move every agent from pre-computed readings.
    pub fn steer_and_move<R: Rng + ?Sized>(
        &mut self,
        readings: &[SensorReadings],
        config: &SimulationConfig,
        rng: &mut R,
    ) -> PopulationReport {
        debug_assert_eq!(readings.len(), self.agents.len());
        let mut report = PopulationReport::default();
        for (agent, sensed) in self.agents.iter_mut().zip(readings) {
            steer(agent, sensed, config, rng);
            match move_agent(agent, config, rng) {
                MoveOutcome::Inside => {}
                MoveOutcome::Wrapped => report.wrapped += 1,
                MoveOutcome::Reflected => report.reflected += 1,
            }
        }
        report
    }

    /// Deposit into the cell under every agent. Returns how many deposits were dropped.
    pub fn deposit(&self, field: &mut TrailField, config: &SimulationConfig) -> usize {
        self.agents
            .iter()
            .filter(|agent| !field.deposit(config.domain.cell_of(&agent.position), config.deposit))
            .count()
    }

    /// Full population step: sense all, then move all, then deposit all.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        field: &mut TrailField,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> PopulationReport {
        let readings = self.sense_all(&*field, config);
        let mut report = self.steer_and_move(&readings, config, rng);
        report.dropped_deposits = self.deposit(field, config);
        report
    }
}

/// Turn an agent according to its readings, plus optional rotation noise.
pub fn steer<R: Rng + ?Sized>(
    agent: &mut Agent,
    readings: &SensorReadings,
    config: &SimulationConfig,
    rng: &mut R,
) -> Turn {
    let turn = decide(readings, rng);
    agent.rotate(turn.amount() * config.rotation_angle);
    if config.rotation_noise > 0.0 {
        agent.rotate(config.rotation_noise * random_sign(rng));
    }
    turn
}

/// Move one step along the heading and apply the boundary policy.
///
/// Reflection turns the agent by `±π` and takes exactly one more step. If
/// that step still ends outside the domain the agent stays there; sensing
/// and depositing treat the out-of-range cells as absent.
pub fn move_agent<R: Rng + ?Sized>(
    agent: &mut Agent,
    config: &SimulationConfig,
    rng: &mut R,
) -> MoveOutcome {
    agent.advance(config.step_length);
    if config.domain.contains(&agent.position) {
        return MoveOutcome::Inside;
    }

    match config.boundary {
        BoundaryMode::Periodic => {
            agent.position = config.domain.wrap(&agent.position);
            MoveOutcome::Wrapped
        }
        BoundaryMode::Reflective => {
            agent.rotate(PI * random_sign(rng));
            agent.advance(config.step_length);
            MoveOutcome::Reflected
        }
    }
}
