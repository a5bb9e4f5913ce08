//! Show statistics of a dumped frame.

use anyhow::{Context, Result};
use colored::Colorize;
use physarum::prelude::*;

pub fn run(path: &str) -> Result<()> {
    let frame = read_frame(path).with_context(|| format!("Failed to read frame: {}", path))?;
    let stats = frame.stats();

    println!("{}", format!("Frame {}", frame.step).white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!("  Grid:          {}x{}", frame.width, frame.height);
    println!("  Total mass:    {}", format!("{:.4}", stats.total).cyan());
    println!("  Mean:          {:.6}", stats.mean);
    println!("  Min / max:     {:.6} / {:.6}", stats.min, stats.max);
    println!(
        "  Coverage:      {} ({:.1}%)",
        stats.nonzero_cells.to_string().green(),
        stats.coverage() * 100.0
    );

    if let Some((x, y)) = peak(&frame) {
        println!("  Peak cell:     ({}, {})", x, y);
    }
    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}

fn peak(frame: &Frame) -> Option<(usize, usize)> {
    let (idx, _) = frame
        .values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))?;
    Some((idx % frame.width.max(1), idx / frame.width.max(1)))
}
