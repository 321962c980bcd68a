//! Declarative loader rules handed to the bundler.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::json;

use crate::template::FilenameTemplate;

/// Loader reference for extracted stylesheets.
const CSS_EXTRACT_LOADER: &str = "mini-css-extract-plugin/loader";

/// A module rule: which files it matches and which loaders run on them.
///
/// Loaders run right-to-left, so extraction comes first in the list and
/// source-level loaders last, matching how the bundler chains them.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRule {
    /// Filename pattern the rule applies to
    pub test: String,

    #[serde(rename = "use")]
    pub loaders: Vec<Loader>,

    /// Restrict the rule to these directories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<PathBuf>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,
}

/// A loader reference, bare or with options.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Loader {
    Name(String),
    WithOptions {
        loader: String,
        options: serde_json::Value,
    },
}

impl Loader {
    fn name(name: &str) -> Self {
        Loader::Name(name.to_string())
    }
}

/// Rules for plain and preprocessed stylesheets.
pub fn stylesheet_rules() -> Vec<ModuleRule> {
    vec![
        ModuleRule {
            test: r"\.css$".to_string(),
            loaders: vec![Loader::name(CSS_EXTRACT_LOADER), Loader::name("css-loader")],
            include: None,
            module_type: None,
        },
        ModuleRule {
            test: r"\.scss$".to_string(),
            loaders: vec![
                Loader::name(CSS_EXTRACT_LOADER),
                Loader::name("css-loader"),
                Loader::name("sass-loader"),
            ],
            include: None,
            module_type: None,
        },
    ]
}

/// Rule for image assets: inline below the size limit, emit under the media
/// filename template otherwise.
pub fn asset_rule(inline_limit: u64, filename: &FilenameTemplate) -> ModuleRule {
    ModuleRule {
        test: r"\.(png|jpg|gif)$".to_string(),
        loaders: vec![Loader::WithOptions {
            loader: "url-loader".to_string(),
            options: json!({
                "limit": inline_limit,
                "name": filename.raw(),
                "esModule": false,
            }),
        }],
        include: None,
        module_type: Some("javascript/auto".to_string()),
    }
}

/// Rule for transpiling JSX sources under the include directories.
pub fn script_rule(include: Vec<PathBuf>, presets: &[String]) -> ModuleRule {
    ModuleRule {
        test: r"\.jsx$".to_string(),
        loaders: vec![Loader::WithOptions {
            loader: "babel-loader".to_string(),
            options: json!({ "presets": presets }),
        }],
        include: Some(include),
        module_type: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stylesheet_rules_chain_extract_first() {
        let rules = stylesheet_rules();

        assert_eq!(rules.len(), 2);
        let scss = &rules[1];
        assert_eq!(scss.test, r"\.scss$");
        assert!(matches!(
            &scss.loaders[0],
            Loader::Name(name) if name == CSS_EXTRACT_LOADER
        ));
        assert!(matches!(
            scss.loaders.last(),
            Some(Loader::Name(name)) if name == "sass-loader"
        ));
    }

    #[test]
    fn asset_rule_carries_limit_and_template() {
        let template = FilenameTemplate::parse("static/media/[name].[hash:8].[ext]").unwrap();
        let rule = asset_rule(500, &template);

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["use"][0]["options"]["limit"], 500);
        assert_eq!(
            value["use"][0]["options"]["name"],
            "static/media/[name].[hash:8].[ext]"
        );
        assert_eq!(value["type"], "javascript/auto");
    }

    #[test]
    fn script_rule_serializes_include_and_presets() {
        let rule = script_rule(
            vec![PathBuf::from("/project/src")],
            &["@babel/preset-env".to_string()],
        );

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["test"], r"\.jsx$");
        assert_eq!(value["include"][0], "/project/src");
        assert_eq!(value["use"][0]["loader"], "babel-loader");
        assert_eq!(value["use"][0]["options"]["presets"][0], "@babel/preset-env");
    }

    #[test]
    fn bare_loader_serializes_as_a_string() {
        let rules = stylesheet_rules();

        let value = serde_json::to_value(&rules[0]).unwrap();
        assert_eq!(value["use"][1], "css-loader");
        // No include key when the rule is unrestricted
        assert!(value.get("include").is_none());
    }
}
