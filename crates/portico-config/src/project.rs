//! Project configuration loaded from portico.toml.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Build mode handed through to the bundler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => f.write_str("development"),
            Mode::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Configuration file structure (portico.toml).
///
/// Every section and field has a default, so a project with no config file
/// builds with the stock layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub scripts: ScriptsConfig,

    #[serde(default)]
    pub dev_server: DevServerConfig,
}

/// Project layout paths, relative to the project root.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Directory whose subdirectories are the page entries
    #[serde(default = "default_pages_root")]
    pub pages_root: PathBuf,

    /// Build output directory
    #[serde(default = "default_output_dir")]
    pub output: PathBuf,

    /// HTML shell the bundler instantiates per build
    #[serde(default = "default_html_template")]
    pub html_template: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            pages_root: default_pages_root(),
            output: default_output_dir(),
            html_template: default_html_template(),
        }
    }
}

/// Output filename templates.
///
/// `[name]` refers to the entry name; `[contenthash:8]` and `[hash:8]` are
/// placeholders the bundler fills in, so fresh builds bust browser caches.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_js_filename")]
    pub js_filename: String,

    #[serde(default = "default_css_filename")]
    pub css_filename: String,

    #[serde(default = "default_asset_filename")]
    pub asset_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            js_filename: default_js_filename(),
            css_filename: default_css_filename(),
            asset_filename: default_asset_filename(),
        }
    }
}

/// Static asset handling.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    /// Images at or below this size (bytes) are inlined instead of emitted
    #[serde(default = "default_inline_limit")]
    pub inline_limit: u64,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            inline_limit: default_inline_limit(),
        }
    }
}

/// Script transpilation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptsConfig {
    /// Directories whose scripts go through the transpiler
    #[serde(default = "default_script_include")]
    pub include: Vec<PathBuf>,

    /// Transpiler presets
    #[serde(default = "default_script_presets")]
    pub presets: Vec<String>,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            include: default_script_include(),
            presets: default_script_presets(),
        }
    }
}

/// Development server settings, passed through to the external server.
#[derive(Debug, Clone, Deserialize)]
pub struct DevServerConfig {
    /// Directory the dev server serves from
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_pages_root() -> PathBuf {
    PathBuf::from("src/pages")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}
fn default_html_template() -> PathBuf {
    PathBuf::from("src/index.html")
}
fn default_js_filename() -> String {
    "static/js/[name].[contenthash:8].js".to_string()
}
fn default_css_filename() -> String {
    "static/css/[name].[contenthash:8].css".to_string()
}
fn default_asset_filename() -> String {
    "static/media/[name].[hash:8].[ext]".to_string()
}
fn default_inline_limit() -> u64 {
    500
}
fn default_script_include() -> Vec<PathBuf> {
    vec![PathBuf::from("src")]
}
fn default_script_presets() -> Vec<String> {
    vec!["@babel/preset-env".to_string()]
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}

impl ProjectConfig {
    /// Load configuration from a portico.toml path.
    ///
    /// Returns defaults if the file does not exist; returns an error if the
    /// file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
