//! List discovered page entries.

use std::path::Path;

use anyhow::{Context, Result};
use portico_config::ProjectConfig;
use portico_entries::discover;
use portico_plan::FilenameTemplate;

/// Run the pages command.
pub fn run(config_path: &Path, json: bool) -> Result<()> {
    let config = ProjectConfig::load(config_path)?;

    let root = std::env::current_dir().context("Failed to resolve current directory")?;
    let pages_root = root.join(&config.paths.pages_root);

    let entries = discover(&pages_root)
        .with_context(|| format!("Failed to discover pages under {}", pages_root.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        tracing::warn!("No page directories under {}", pages_root.display());
        return Ok(());
    }

    let template = FilenameTemplate::parse(&config.output.js_filename)
        .context("Invalid output.js_filename template")?;

    for (name, path) in entries.iter() {
        println!("{:<16} {}", name, path.display());
        println!("{:<16} -> {}", "", template.expand_name(name));
    }

    tracing::info!("{} page entries", entries.len());

    Ok(())
}
