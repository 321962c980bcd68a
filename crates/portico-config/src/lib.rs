//! Declarative build configuration for portico projects.
//!
//! Models the knobs of a multi-page bundler build (mode, layout paths,
//! hashed output filename templates, asset and script handling, dev-server
//! settings) and loads them from `portico.toml` with stock defaults.

pub mod error;
pub mod project;

pub use error::ConfigError;
pub use project::{
    AssetsConfig, DevServerConfig, Mode, OutputConfig, PathsConfig, ProjectConfig, ScriptsConfig,
};
