//! Normalized bundler plan assembly.
//!
//! Combines project configuration with discovered page entries into a single
//! typed plan (mode, entries, output templates, loader rules, plugins, dev
//! server) serialized as JSON for the external bundler to consume.

pub mod plan;
pub mod rules;
pub mod template;

pub use plan::{BundlerPlan, DevServerPlan, ModulePlan, OutputPlan, PlanError, PluginSpec};
pub use rules::{Loader, ModuleRule};
pub use template::{FilenameTemplate, TemplateError};
