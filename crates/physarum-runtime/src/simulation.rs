//! The simulation driver.
//!
//! Owns the trail field, the agent population, the random source, and the
//! snapshot sink. Each step runs in a fixed order:
//!
//! 1. every agent senses the settled field
//! 2. agents steer and move, applying the boundary policy
//! 3. every agent deposits
//! 4. the field diffuses, decays, and is clamped if a bound is configured
//! 5. a snapshot is pushed to the sink when the export cadence matches

use crate::metrics::{FieldStats, RunSummary, StepReport};
use crate::population::AgentPopulation;
use crate::rng::SimRng;
use crate::simulation_builder::SimulationBuilder;
use crate::trail_field::TrailField;
use physarum_core::config::SimulationConfig;
use physarum_core::error::Result;
use physarum_core::snapshot::{NullSink, SnapshotSink};
use physarum_core::types::Step;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A running simulation.
pub struct Simulation {
    pub(crate) config: SimulationConfig,
    pub(crate) field: TrailField,
    pub(crate) population: AgentPopulation,
    pub(crate) rng: SimRng,
    pub(crate) seed: u64,
    pub(crate) step: Step,
    pub(crate) sink: Box<dyn SnapshotSink>,
    pub(crate) snapshots_emitted: usize,
    pub(crate) total_reflected: u64,
    pub(crate) total_dropped: u64,
}

impl Simulation {
    /// Validate `config` and build a simulation with random agents, a zero
    /// field, and no snapshot sink.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        SimulationBuilder::new().with_config(config).build()
    }

    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn field(&self) -> &TrailField {
        &self.field
    }

    pub fn population(&self) -> &AgentPopulation {
        &self.population
    }

    /// The seed the random source was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of completed steps.
    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.config.steps
    }

    pub fn snapshots_emitted(&self) -> usize {
        self.snapshots_emitted
    }

    /// Reflections across all completed steps.
    pub fn total_reflected(&self) -> u64 {
        self.total_reflected
    }

    /// Deposits dropped outside a reflective grid across all completed steps.
    pub fn total_dropped_deposits(&self) -> u64 {
        self.total_dropped
    }

    /// Statistics of the field as it stands.
    pub fn stats(&self) -> FieldStats {
        FieldStats::from_view(&self.field.view())
    }

    /// Advance one step, exporting to the stored sink.
    pub fn step(&mut self) -> Result<StepReport> {
        let mut sink = std::mem::replace(&mut self.sink, Box::new(NullSink));
        let result = self.step_into(sink.as_mut());
        self.sink = sink;
        result
    }

    /// Advance one step, exporting to `sink` instead of the stored one.
    pub fn step_into(&mut self, sink: &mut dyn SnapshotSink) -> Result<StepReport> {
        let step = self.step;

        let population = self
            .population
            .step(&mut self.field, &self.config, &mut self.rng);
        self.field.settle(self.config.decay);

        let exported = self.config.exports_at(step);
        if exported {
            sink.on_snapshot(step, &self.field.view())?;
            self.snapshots_emitted += 1;
        }

        self.total_reflected += population.reflected as u64;
        self.total_dropped += population.dropped_deposits as u64;
        self.step += 1;

        let total_mass = self.field.total();
        debug!(
            "step {}: {} wrapped, {} reflected, {} deposits dropped",
            step, population.wrapped, population.reflected, population.dropped_deposits
        );
        if self.config.log_every > 0 && self.step % self.config.log_every == 0 {
            info!("step {}/{}: total mass {:.4}", self.step, self.config.steps, total_mass);
        }

        Ok(StepReport {
            step,
            population,
            total_mass,
            exported,
        })
    }

    /// Run the remaining steps, exporting to the stored sink.
    pub fn run(&mut self) -> Result<RunSummary> {
        self.run_with(|_| {})
    }

    /// Run the remaining steps, calling `on_step` after each one.
    pub fn run_with<F>(&mut self, mut on_step: F) -> Result<RunSummary>
    where
        F: FnMut(&StepReport),
    {
        let mut sink = std::mem::replace(&mut self.sink, Box::new(NullSink));
        let result = self.drive(sink.as_mut(), &mut on_step);
        self.sink = sink;
        result
    }

    /// Run the remaining steps, exporting to `sink` instead of the stored one.
    pub fn run_into(&mut self, sink: &mut dyn SnapshotSink) -> Result<RunSummary> {
        self.drive(sink, &mut |_| {})
    }

    fn drive(
        &mut self,
        sink: &mut dyn SnapshotSink,
        on_step: &mut dyn FnMut(&StepReport),
    ) -> Result<RunSummary> {
        info!(
            "running {} steps from step {} ({} agents, seed {})",
            self.config.steps.saturating_sub(self.step),
            self.step,
            self.population.len(),
            self.seed
        );
        let start = Instant::now();

        while !self.is_finished() {
            let report = self.step_into(sink)?;
            on_step(&report);
        }
        sink.finish()?;

        let summary = self.summary(start.elapsed());
        info!(
            "finished {} steps in {} ms: total mass {:.4}, max {:.4}, {} snapshots",
            summary.steps,
            summary.wall_time_ms,
            summary.final_stats.total,
            summary.final_stats.max,
            summary.snapshots_emitted
        );
        Ok(summary)
    }

    fn summary(&self, elapsed: Duration) -> RunSummary {
        RunSummary {
            steps: self.step,
            agents: self.population.len(),
            seed: self.seed,
            final_stats: self.stats(),
            snapshots_emitted: self.snapshots_emitted,
            total_reflected: self.total_reflected,
            total_dropped_deposits: self.total_dropped,
            wall_time_ms: elapsed.as_millis() as u64,
        }
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("domain", &self.config.domain)
            .field("agents", &self.population.len())
            .field("seed", &self.seed)
            .field("step", &self.step)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::SnapshotRecorder;
    use physarum_core::config::Preset;
    use physarum_core::error::{ExportError, PhysarumError};
    use physarum_core::snapshot::FieldView;

    fn small(steps: u64) -> SimulationConfig {
        SimulationConfig {
            steps,
            agent_count: 50,
            ..SimulationConfig::from_preset(Preset::Small)
        }
        .with_seed(7)
    }

    #[test]
    fn run_completes_configured_steps() {
        let mut sim = Simulation::new(small(12)).unwrap();
        let summary = sim.run().unwrap();
        assert_eq!(summary.steps, 12);
        assert_eq!(summary.agents, 50);
        assert_eq!(summary.seed, 7);
        assert!(sim.is_finished());
        assert!(summary.final_stats.total > 0.0);
    }

    #[test]
    fn step_reports_zero_based_index() {
        let mut sim = Simulation::new(small(3)).unwrap();
        assert_eq!(sim.step().unwrap().step, 0);
        assert_eq!(sim.step().unwrap().step, 1);
        assert_eq!(sim.current_step(), 2);
    }

    #[test]
    fn exports_follow_cadence() {
        let mut sim = Simulation::new(small(10).with_export_every(4)).unwrap();
        let mut recorder = SnapshotRecorder::new();
        let summary = sim.run_into(&mut recorder).unwrap();
        let steps: Vec<Step> = recorder.frames().iter().map(|f| f.step).collect();
        assert_eq!(steps, vec![0, 4, 8]);
        assert_eq!(summary.snapshots_emitted, 3);
    }

    #[test]
    fn no_exports_without_cadence() {
        let mut sim = Simulation::new(small(5)).unwrap();
        let mut recorder = SnapshotRecorder::new();
        sim.run_into(&mut recorder).unwrap();
        assert!(recorder.frames().is_empty());
    }

    #[test]
    fn sink_failure_aborts_run() {
        let mut sim = Simulation::new(small(10).with_export_every(1)).unwrap();
        let mut calls = 0;
        let mut failing = |step: Step, _: &FieldView<'_>| {
            calls += 1;
            if step == 2 {
                Err(ExportError::Rejected("disk full".to_string()))
            } else {
                Ok(())
            }
        };
        let err = sim.run_into(&mut failing).unwrap_err();
        assert!(matches!(err, PhysarumError::Export(ExportError::Rejected(_))));
        assert_eq!(calls, 3);
        assert_eq!(sim.current_step(), 2);
    }

    #[test]
    fn run_with_sees_every_step() {
        let mut sim = Simulation::new(small(6)).unwrap();
        let mut seen = Vec::new();
        sim.run_with(|report| seen.push(report.step)).unwrap();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }
}
