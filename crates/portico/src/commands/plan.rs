//! Assemble and emit the bundler plan.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use portico_config::{Mode, ProjectConfig};
use portico_entries::discover;
use portico_plan::BundlerPlan;

/// Run the plan command.
pub fn run(config_path: &Path, out: Option<PathBuf>, mode: Option<Mode>) -> Result<()> {
    let mut config = ProjectConfig::load(config_path)?;

    if let Some(mode) = mode {
        config.mode = mode;
    }

    let root = std::env::current_dir().context("Failed to resolve current directory")?;
    let pages_root = root.join(&config.paths.pages_root);

    let entries = discover(&pages_root)
        .with_context(|| format!("Failed to discover pages under {}", pages_root.display()))?;

    let plan = BundlerPlan::assemble(&root, &config, entries).context("Failed to assemble plan")?;

    match out {
        Some(path) => {
            plan.write_to(&path)?;
            tracing::info!("Wrote plan to {}", path.display());
        }
        None => {
            println!("{}", plan.to_json()?);
        }
    }

    Ok(())
}
