//! Write a physarum.toml for a preset.

use anyhow::{Context, Result};
use colored::Colorize;
use physarum::prelude::Preset;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>, preset: &str) -> Result<()> {
    let preset: Preset = preset.parse()?;
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing Physarum project...", "→".blue());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        let mut config = Config::for_preset(preset);
        config.output.frames_dir = Some("frames".to_string());
        config.save(&config_path)?;
        println!(
            "  {} Created {} ({} preset)",
            "✓".green(),
            config_path.display(),
            preset.to_string().cyan()
        );
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    let gitignore_path = base_path.join(".gitignore");
    if !gitignore_path.exists() {
        std::fs::write(&gitignore_path, "frames/\n")
            .with_context(|| format!("Failed to write {}", gitignore_path.display()))?;
        println!("  {} Created {}", "✓".green(), gitignore_path.display());
    }

    println!();
    println!("{} Physarum project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} edit {} to taste", "1.".blue(), CONFIG_FILE);
    println!("  {} physarum run --export-every 50", "2.".blue());
    println!("  {} physarum inspect frames/sim_0/step_0.json", "3.".blue());

    Ok(())
}
