//! Assembling the normalized bundler plan.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use portico_config::{Mode, ProjectConfig};
use portico_entries::EntryMap;

use crate::rules::{asset_rule, script_rule, stylesheet_rules, ModuleRule};
use crate::template::{FilenameTemplate, TemplateError};

/// Errors raised while assembling or emitting a plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("no entries to build: the pages root has no page directories")]
    NoEntries,

    #[error("invalid {field} template: {source}")]
    Template {
        field: &'static str,
        source: TemplateError,
    },

    #[error("{field} must contain [name] when building {entries} entries, or every bundle would share one filename")]
    AmbiguousFilename {
        field: &'static str,
        entries: usize,
    },

    #[error("failed to serialize plan: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write plan to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where build output lands.
#[derive(Debug, Clone, Serialize)]
pub struct OutputPlan {
    pub filename: FilenameTemplate,
    pub path: PathBuf,
}

/// Settings passed through to the external dev server.
#[derive(Debug, Clone, Serialize)]
pub struct DevServerPlan {
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

/// Loader rules section.
#[derive(Debug, Clone, Serialize)]
pub struct ModulePlan {
    pub rules: Vec<ModuleRule>,
}

/// Declarative plugin instantiations.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum PluginSpec {
    CssExtract { filename: FilenameTemplate },
    HtmlTemplate { template: PathBuf },
}

/// The normalized build plan handed to the external bundler.
///
/// Serializes to the camelCase JSON document the bundler consumes: `entry`,
/// `output`, `module.rules`, `plugins`, `devServer`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerPlan {
    pub mode: Mode,
    pub entry: EntryMap,
    pub output: OutputPlan,
    pub module: ModulePlan,
    pub plugins: Vec<PluginSpec>,
    pub dev_server: DevServerPlan,
}

impl BundlerPlan {
    /// Assemble a plan from project configuration and discovered entries.
    ///
    /// Relative config paths are resolved against `project_root`. An empty
    /// entry map is refused: a plan that builds nothing means every page was
    /// silently dropped somewhere upstream.
    pub fn assemble(
        project_root: &Path,
        config: &ProjectConfig,
        entries: EntryMap,
    ) -> Result<Self, PlanError> {
        if entries.is_empty() {
            return Err(PlanError::NoEntries);
        }

        let js_filename = parse_template("output.js_filename", &config.output.js_filename)?;
        let css_filename = parse_template("output.css_filename", &config.output.css_filename)?;
        let asset_filename =
            parse_template("output.asset_filename", &config.output.asset_filename)?;

        // With several entries, per-entry templates must keep bundles apart.
        for (field, template) in [
            ("output.js_filename", &js_filename),
            ("output.css_filename", &css_filename),
        ] {
            if entries.len() > 1 && !template.mentions_name() {
                return Err(PlanError::AmbiguousFilename {
                    field,
                    entries: entries.len(),
                });
            }
        }

        let include = config
            .scripts
            .include
            .iter()
            .map(|dir| resolve(project_root, dir))
            .collect();

        let mut rules = stylesheet_rules();
        rules.push(asset_rule(config.assets.inline_limit, &asset_filename));
        rules.push(script_rule(include, &config.scripts.presets));

        let plan = Self {
            mode: config.mode,
            entry: entries,
            output: OutputPlan {
                filename: js_filename,
                path: resolve(project_root, &config.paths.output),
            },
            module: ModulePlan { rules },
            plugins: vec![
                PluginSpec::CssExtract {
                    filename: css_filename,
                },
                PluginSpec::HtmlTemplate {
                    template: resolve(project_root, &config.paths.html_template),
                },
            ],
            dev_server: DevServerPlan {
                static_dir: resolve(project_root, &config.dev_server.static_dir),
                host: config.dev_server.host.clone(),
                port: config.dev_server.port,
            },
        };

        tracing::debug!("Assembled plan for {} entries", plan.entry.len());

        Ok(plan)
    }

    /// Predicted JS asset path for one entry, hash placeholders left intact.
    pub fn asset_for(&self, name: &str) -> String {
        self.output.filename.expand_name(name)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the plan JSON to a file.
    pub fn write_to(&self, path: &Path) -> Result<(), PlanError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| PlanError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn parse_template(field: &'static str, raw: &str) -> Result<FilenameTemplate, PlanError> {
    FilenameTemplate::parse(raw).map_err(|source| PlanError::Template { field, source })
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
