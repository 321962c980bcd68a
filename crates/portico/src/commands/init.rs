//! Initialize a multi-page project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing portico...");

    let pages_root = Path::new("src/pages");

    // Check if a pages root already exists
    if pages_root.exists() {
        if !yes {
            tracing::warn!("src/pages/ already exists. Use --yes to scaffold anyway.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(pages_root).context("Failed to create pages root")?;
    }

    // Create default config
    let config_path = Path::new("portico.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write portico.toml")?;
        tracing::info!("Created portico.toml");
    }

    // Create the HTML shell
    let shell_path = Path::new("src/index.html");
    if !shell_path.exists() || yes {
        fs::write(shell_path, DEFAULT_SHELL).context("Failed to write src/index.html")?;
        tracing::info!("Created src/index.html");
    }

    // Create a first page
    let home_dir = pages_root.join("home");
    if !home_dir.exists() {
        fs::create_dir_all(&home_dir).context("Failed to create home page directory")?;
    }

    let home_index = home_dir.join("index.js");
    if !home_index.exists() || yes {
        fs::write(&home_index, DEFAULT_HOME_INDEX)
            .context("Failed to write src/pages/home/index.js")?;
        tracing::info!("Created src/pages/home/index.js");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'portico pages' to see the discovered entries.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Portico Configuration

# Build mode handed to the bundler
mode = "production"

[paths]
# Directory whose subdirectories are the page entries
pages_root = "src/pages"

# Build output directory
output = "dist"

# HTML shell the bundler instantiates per build
html_template = "src/index.html"

[output]
# [name] is the entry name; hash placeholders bust browser caches
js_filename = "static/js/[name].[contenthash:8].js"
css_filename = "static/css/[name].[contenthash:8].css"
asset_filename = "static/media/[name].[hash:8].[ext]"

[assets]
# Images at or below this size (bytes) are inlined
inline_limit = 500

[scripts]
# Directories whose scripts are transpiled
include = ["src"]
presets = ["@babel/preset-env"]

[dev_server]
static_dir = "dist"
host = "127.0.0.1"
port = 8080
"#;

const DEFAULT_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Portico App</title>
</head>
<body>
  <div id="root"></div>
</body>
</html>
"#;

const DEFAULT_HOME_INDEX: &str = r#"const root = document.getElementById("root");
root.textContent = "Hello from the home page";
"#;
