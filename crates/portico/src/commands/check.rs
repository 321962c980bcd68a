//! Validate the project layout and configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use portico_config::ProjectConfig;
use portico_entries::discover;
use portico_plan::BundlerPlan;

/// Index files the bundler resolves beneath a page directory, in order.
const INDEX_CANDIDATES: &[&str] = &["index.js", "index.jsx", "index.ts", "index.tsx"];

/// Run the check command.
pub fn run(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        tracing::warn!(
            "No config file at {}, checking against defaults",
            config_path.display()
        );
    }

    let config = ProjectConfig::load(config_path)?;

    let root = std::env::current_dir().context("Failed to resolve current directory")?;
    let pages_root = root.join(&config.paths.pages_root);

    let entries = discover(&pages_root)
        .with_context(|| format!("Failed to discover pages under {}", pages_root.display()))?;

    tracing::info!(
        "{} page entries under {}",
        entries.len(),
        pages_root.display()
    );

    let mut warnings = 0;

    for (name, path) in entries.iter() {
        if find_index_file(path).is_none() {
            tracing::warn!(
                "Page '{}' has no index file ({}), the bundler cannot resolve it",
                name,
                INDEX_CANDIDATES.join(", ")
            );
            warnings += 1;
        }
    }

    let html_template = root.join(&config.paths.html_template);
    if !html_template.exists() {
        tracing::warn!("HTML template not found: {}", html_template.display());
        warnings += 1;
    }

    // Template validity and entry coverage are enforced by plan assembly.
    BundlerPlan::assemble(&root, &config, entries).context("Plan assembly failed")?;

    if warnings == 0 {
        tracing::info!("Project checks out");
    } else {
        tracing::warn!("{} warning(s)", warnings);
    }

    Ok(())
}

/// Find the index file the bundler would resolve for a page directory.
fn find_index_file(page: &Path) -> Option<PathBuf> {
    INDEX_CANDIDATES
        .iter()
        .map(|candidate| page.join(candidate))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_the_first_index_candidate() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.tsx"), "export {}").unwrap();

        let found = find_index_file(temp.path()).unwrap();

        assert_eq!(found, temp.path().join("index.tsx"));
    }

    #[test]
    fn prefers_js_over_tsx() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.js"), "").unwrap();
        fs::write(temp.path().join("index.tsx"), "").unwrap();

        let found = find_index_file(temp.path()).unwrap();

        assert_eq!(found, temp.path().join("index.js"));
    }

    #[test]
    fn missing_index_is_none() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("main.js"), "").unwrap();

        assert!(find_index_file(temp.path()).is_none());
    }
}
