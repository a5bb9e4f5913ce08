//! Time every preset for a few steps and compare.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use physarum::prelude::*;

pub fn run(steps: u64, seed: u64, csv: Option<String>) -> Result<()> {
    println!(
        "{} Benchmarking {} presets for {} steps...",
        "→".blue(),
        Preset::all().len(),
        steps.to_string().cyan()
    );

    let pb = ProgressBar::new(Preset::all().len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut suite = BenchmarkSuite::new();
    for preset in Preset::all() {
        pb.set_message(preset.name());
        let config = BenchmarkConfig::from_preset(preset, steps, seed)
            .with_stats_interval((steps / 10).max(1));
        let run = run_benchmark(&config)
            .with_context(|| format!("Benchmark failed for preset {}", preset))?;
        suite.add_run(run);
        pb.inc(1);
    }
    pb.finish_and_clear();

    suite.compare().print();

    if let Some(path) = csv {
        std::fs::write(&path, suite.to_csv())
            .with_context(|| format!("Failed to write {}", path))?;
        println!("  {} Wrote {}", "✓".green(), path);
    }

    Ok(())
}
