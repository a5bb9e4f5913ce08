//! Benchmark harness for running and comparing simulations.
//!
//! Runs named configurations for a fixed number of steps, samples field
//! statistics at regular intervals, and compares the final state and wall
//! time across runs.

use crate::metrics::FieldStats;
use crate::simulation::Simulation;
use physarum_core::config::{Preset, SimulationConfig};
use physarum_core::error::Result;
use physarum_core::types::Step;
use serde::Serialize;
use std::time::Instant;

/// A single benchmark run capturing timeline data.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRun {
    pub name: String,
    pub steps: u64,
    pub agents: usize,
    pub seed: u64,
    pub stats_timeline: Vec<(Step, FieldStats)>,
    pub total_reflected: u64,
    pub wall_time_ms: u64,
}

impl BenchmarkRun {
    pub fn final_stats(&self) -> Option<&FieldStats> {
        self.stats_timeline.last().map(|(_, stats)| stats)
    }

    /// Agent steps per second of wall time.
    pub fn throughput(&self) -> f64 {
        let agent_steps = self.steps as f64 * self.agents as f64;
        agent_steps / (self.wall_time_ms.max(1) as f64 / 1000.0)
    }
}

/// Configuration for a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub name: String,
    pub simulation: SimulationConfig,
    /// Sample field statistics every N steps.
    pub stats_interval: u64,
}

impl BenchmarkConfig {
    pub fn new(name: &str, simulation: SimulationConfig) -> Self {
        Self {
            name: name.to_string(),
            simulation,
            stats_interval: 50,
        }
    }

    pub fn from_preset(preset: Preset, steps: u64, seed: u64) -> Self {
        let mut simulation = SimulationConfig::from_preset(preset).with_seed(seed);
        simulation.steps = steps;
        Self::new(preset.name(), simulation)
    }

    pub fn with_stats_interval(mut self, interval: u64) -> Self {
        self.stats_interval = interval.max(1);
        self
    }
}

/// Build a simulation from `config`, run it, and collect its timeline.
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<BenchmarkRun> {
    let mut simulation = config.simulation.clone();
    simulation.export_every = None;
    let mut sim = Simulation::new(simulation)?;

    let interval = config.stats_interval.max(1);
    let mut stats_timeline = vec![(0, sim.stats())];
    let start = Instant::now();

    while !sim.is_finished() {
        sim.step()?;
        let done = sim.current_step();
        if done % interval == 0 {
            stats_timeline.push((done, sim.stats()));
        }
    }

    let wall_time = start.elapsed();

    let steps = sim.current_step();
    if stats_timeline.last().map(|(s, _)| *s) != Some(steps) {
        stats_timeline.push((steps, sim.stats()));
    }

    Ok(BenchmarkRun {
        name: config.name.clone(),
        steps,
        agents: sim.population().len(),
        seed: sim.seed(),
        stats_timeline,
        total_reflected: sim.total_reflected(),
        wall_time_ms: wall_time.as_millis() as u64,
    })
}

/// A suite of benchmark runs for comparison.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkSuite {
    pub runs: Vec<BenchmarkRun>,
}

impl BenchmarkSuite {
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    pub fn add_run(&mut self, run: BenchmarkRun) {
        self.runs.push(run);
    }

    /// Compare final statistics across all runs.
    pub fn compare(&self) -> ComparisonTable {
        let rows = self
            .runs
            .iter()
            .map(|run| {
                let last = run.final_stats();
                ComparisonRow {
                    name: run.name.clone(),
                    steps: run.steps,
                    agents: run.agents,
                    wall_time_ms: run.wall_time_ms,
                    total_mass: last.map(|s| s.total).unwrap_or(0.0),
                    max: last.map(|s| s.max).unwrap_or(0.0),
                    coverage: last.map(|s| s.coverage()).unwrap_or(0.0),
                    throughput: run.throughput(),
                }
            })
            .collect();

        ComparisonTable { rows }
    }

    /// Export all runs to CSV format.
    pub fn to_csv(&self) -> String {
        let table = self.compare();
        let mut csv = String::new();
        csv.push_str("name,steps,agents,wall_time_ms,total_mass,max,coverage,agent_steps_per_sec\n");
        for row in &table.rows {
            csv.push_str(&format!(
                "{},{},{},{},{:.4},{:.4},{:.4},{:.0}\n",
                row.name,
                row.steps,
                row.agents,
                row.wall_time_ms,
                row.total_mass,
                row.max,
                row.coverage,
                row.throughput,
            ));
        }
        csv
    }
}

/// Comparison table across benchmark runs.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonTable {
    pub rows: Vec<ComparisonRow>,
}

/// A single row in the comparison table.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub name: String,
    pub steps: u64,
    pub agents: usize,
    pub wall_time_ms: u64,
    pub total_mass: f64,
    pub max: f64,
    pub coverage: f64,
    pub throughput: f64,
}

impl ComparisonTable {
    /// Print a formatted comparison table to the terminal.
    pub fn print(&self) {
        println!(
            "┌{:─<16}┬{:─<8}┬{:─<8}┬{:─<10}┬{:─<12}┬{:─<10}┬{:─<9}┐",
            "", "", "", "", "", "", ""
        );
        println!(
            "│{:<16}│{:>8}│{:>8}│{:>10}│{:>12}│{:>10}│{:>9}│",
            " Run", " Steps", " Agents", " Time ms", " Mass", " Max", " Cover"
        );
        println!(
            "├{:─<16}┼{:─<8}┼{:─<8}┼{:─<10}┼{:─<12}┼{:─<10}┼{:─<9}┤",
            "", "", "", "", "", "", ""
        );
        for row in &self.rows {
            println!(
                "│{:<16}│{:>8}│{:>8}│{:>10}│{:>12.3}│{:>10.3}│{:>8.1}%│",
                row.name,
                row.steps,
                row.agents,
                row.wall_time_ms,
                row.total_mass,
                row.max,
                row.coverage * 100.0,
            );
        }
        println!(
            "└{:─<16}┴{:─<8}┴{:─<8}┴{:─<10}┴{:─<12}┴{:─<10}┴{:─<9}┘",
            "", "", "", "", "", "", ""
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(name: &str, preset: Preset) -> BenchmarkConfig {
        let mut config = BenchmarkConfig::from_preset(preset, 20, 9).with_stats_interval(5);
        config.name = name.to_string();
        config.simulation.agent_count = 100;
        config
    }

    #[test]
    fn benchmark_run_produces_timeline() {
        let run = run_benchmark(&quick("small", Preset::Small)).unwrap();
        assert_eq!(run.steps, 20);
        let sampled: Vec<Step> = run.stats_timeline.iter().map(|(s, _)| *s).collect();
        assert_eq!(sampled, vec![0, 5, 10, 15, 20]);
        assert!(run.final_stats().unwrap().total > 0.0);
        assert!(run.wall_time_ms < 10_000);
    }

    #[test]
    fn zero_stats_interval_samples_every_step() {
        let mut config = quick("every-step", Preset::Small);
        config.simulation.steps = 4;
        config.stats_interval = 0;
        let run = run_benchmark(&config).unwrap();
        let sampled: Vec<Step> = run.stats_timeline.iter().map(|(s, _)| *s).collect();
        assert_eq!(sampled, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn suite_comparison_works() {
        let mut suite = BenchmarkSuite::new();
        suite.add_run(run_benchmark(&quick("periodic", Preset::Small)).unwrap());

        let mut reflective = quick("reflective", Preset::Small);
        reflective.simulation.boundary = physarum_core::boundary::BoundaryMode::Reflective;
        suite.add_run(run_benchmark(&reflective).unwrap());

        let table = suite.compare();
        assert_eq!(table.rows.len(), 2);
        let csv = suite.to_csv();
        assert!(csv.contains("periodic"));
        assert!(csv.contains("reflective"));
    }
}
