//! Configuration management command
//!
//! Provides CLI interface to view and edit the liftsync configuration.

use crate::config::{self, KEYS};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

/// List all configuration values
pub async fn run_list(path: &Path) -> Result<()> {
    let config = config::load(path)?;

    println!("{}", "liftsync Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), path.display().dimmed());

    let mut section = "";
    for key in KEYS {
        let (prefix, name) = key.split_once('.').unwrap_or(("", key));
        if prefix != section {
            if !section.is_empty() {
                println!();
            }
            println!("{}", format!("[{}]", prefix).yellow());
            section = prefix;
        }
        let value = config.get(key)?;
        let hint = match key {
            "debounce.window_ms" => format!("({}ms quiet period per field)", value),
            "logging.file" if value.is_empty() => "(stderr)".to_string(),
            _ => String::new(),
        };
        println!("  {} = {} {}", name.cyan(), value, hint.dimmed());
    }

    println!("\n{}", "Valid Ranges:".bold());
    println!("  server.timeout_secs: 1-300");
    println!("  debounce.window_ms: 10-10,000");
    println!("  logging.level: trace, debug, info, warn, error");

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(path: &Path, key: &str) -> Result<()> {
    let config = config::load(path)?;
    println!("{}", config.get(key)?);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = config::load(path)?;
    config.set(key, value)?;
    config::save(path, &config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(path: &Path, create: bool) -> Result<()> {
    if create {
        if config::init_if_missing(path).context("Failed to create config file")? {
            println!("{} Created config file at: {}", "✓".green(), path.display());
        } else {
            println!("{}", path.display());
        }
    } else if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{}", path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}
