//! List the built-in presets.

use anyhow::Result;
use colored::Colorize;
use physarum::prelude::*;

pub fn run() -> Result<()> {
    println!("{}", "Physarum Presets".white().bold());
    println!("{}", "═".repeat(40).dimmed());

    for preset in Preset::all() {
        let config = SimulationConfig::from_preset(preset);
        let (width, height) = config.domain.grid_size();
        println!();
        println!("{}  {}", preset.name().blue().bold(), preset.description().dimmed());
        println!("  Domain:        {}", config.domain.to_string().cyan());
        println!("  Grid:          {}x{}", width, height);
        println!("  Steps:         {}", config.steps.to_string().cyan());
        println!("  Agents:        {}", config.agent_count.to_string().cyan());
        println!("  Boundary:      {}", config.boundary);
        println!(
            "  Sensor:        {:.1}° at {:.4}",
            config.sensor.angle.to_degrees(),
            config.sensor.offset
        );
        println!(
            "  Step / turn:   {:.4} / {:.1}°",
            config.step_length,
            config.rotation_angle.to_degrees()
        );
        println!("  Deposit/decay: {} / {}", config.deposit, config.decay);
    }

    println!();
    println!("{}", "═".repeat(40).dimmed());
    Ok(())
}
