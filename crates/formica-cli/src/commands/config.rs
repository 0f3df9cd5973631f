//! Print or write the default configuration.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::config::Config;

pub fn run(output: Option<String>) -> Result<()> {
    let config = Config::default();
    let Some(path) = output else {
        print!("{}", config.to_toml()?);
        return Ok(());
    };

    let path = Path::new(&path);
    if path.exists() {
        println!("  {} {} already exists", "•".yellow(), path.display());
        return Ok(());
    }
    config.save(path)?;
    println!("  {} Created {}", "✓".green(), path.display());
    Ok(())
}
