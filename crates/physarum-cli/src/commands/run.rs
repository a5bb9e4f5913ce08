//! Run a simulation.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use physarum::prelude::*;
use std::path::PathBuf;

use crate::config::Config;

/// Command-line overrides on top of physarum.toml.
#[derive(Debug, Default)]
pub struct RunOptions {
    pub preset: Option<String>,
    pub steps: Option<u64>,
    pub agents: Option<usize>,
    pub seed: Option<u64>,
    pub frames: Option<String>,
    pub token: Option<u32>,
    pub export_every: Option<u64>,
    pub summary: Option<String>,
}

impl RunOptions {
    /// Merge the overrides into `config`.
    fn apply(self, mut config: Config) -> Result<Config> {
        if let Some(name) = &self.preset {
            let preset: Preset = name.parse()?;
            config.simulation = SimulationConfig::from_preset(preset);
        }
        let sim = &mut config.simulation;
        if let Some(steps) = self.steps {
            sim.steps = steps;
        }
        if let Some(agents) = self.agents {
            sim.agent_count = agents;
        }
        if let Some(seed) = self.seed {
            sim.seed = Some(seed);
        }
        if let Some(every) = self.export_every {
            sim.export_every = Some(every);
        }
        if self.frames.is_some() {
            config.output.frames_dir = self.frames;
        }
        if let Some(token) = self.token {
            config.output.token = token;
        }
        if self.summary.is_some() {
            config.output.summary = self.summary;
        }
        Ok(config)
    }
}

pub fn run(options: RunOptions, verbose: bool) -> Result<()> {
    let config = options.apply(Config::load()?)?;
    let sim_config = config.simulation.clone();

    let mut builder = SimulationBuilder::new().with_config(sim_config);
    let mut frame_dir: Option<PathBuf> = None;
    if let Some(root) = &config.output.frames_dir {
        if config.simulation.export_every.is_some() {
            let frames = FrameDirectory::open(root, config.output.token)
                .with_context(|| format!("Failed to prepare frame directory under {}", root))?;
            frame_dir = Some(frames.dir().to_path_buf());
            builder = builder.sink(frames);
        } else {
            println!(
                "  {} frames_dir is set but export_every is not; no frames will be written",
                "•".yellow()
            );
        }
    }
    let mut sim = builder.build().context("Invalid simulation configuration")?;

    println!(
        "{} Running {} steps with {} agents on {} (seed {})",
        "→".blue(),
        sim.config().steps.to_string().cyan(),
        sim.population().len().to_string().cyan(),
        sim.config().domain.to_string().cyan(),
        sim.seed().to_string().cyan()
    );

    let pb = ProgressBar::new(sim.config().steps);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} steps ({eta})")?
            .progress_chars("#>-"),
    );

    let summary = sim.run_with(|report| {
        if verbose && report.exported {
            pb.println(format!(
                "  frame at step {} (mass {:.4})",
                report.step, report.total_mass
            ));
        }
        pb.inc(1);
    });
    pb.finish_and_clear();
    let summary = summary.context("Simulation failed")?;

    let stats = &summary.final_stats;
    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!("  Steps:         {}", summary.steps.to_string().green());
    println!("  Wall time:     {} ms", summary.wall_time_ms);
    println!("  Total mass:    {}", format!("{:.4}", stats.total).cyan());
    println!("  Min / max:     {:.6} / {:.6}", stats.min, stats.max);
    println!("  Coverage:      {:.1}%", stats.coverage() * 100.0);
    if summary.total_reflected > 0 || summary.total_dropped_deposits > 0 {
        println!(
            "  Reflections:   {} ({} deposits dropped)",
            summary.total_reflected, summary.total_dropped_deposits
        );
    }
    if let Some(dir) = frame_dir {
        println!(
            "  Frames:        {} in {}",
            summary.snapshots_emitted.to_string().green(),
            dir.display()
        );
    }

    if let Some(path) = &config.output.summary {
        let content = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        std::fs::write(path, content).with_context(|| format!("Failed to write summary: {}", path))?;
        println!("  {} Wrote {}", "✓".green(), path);
    }

    Ok(())
}
