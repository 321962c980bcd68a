//! Output filename templates.

use std::fmt;

use serde::{Serialize, Serializer};

/// Errors raised when parsing a filename template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown placeholder [{0}] in filename template")]
    UnknownPlaceholder(String),

    #[error("unclosed [ in filename template: {0}")]
    Unclosed(String),

    #[error("invalid hash length in [{0}] (expected 1-64)")]
    InvalidHashLength(String),
}

/// One piece of a parsed template: literal text or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Ext,
    Hash(Option<u8>),
    ContentHash(Option<u8>),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Name => f.write_str("[name]"),
            Segment::Ext => f.write_str("[ext]"),
            Segment::Hash(None) => f.write_str("[hash]"),
            Segment::Hash(Some(n)) => write!(f, "[hash:{}]", n),
            Segment::ContentHash(None) => f.write_str("[contenthash]"),
            Segment::ContentHash(Some(n)) => write!(f, "[contenthash:{}]", n),
        }
    }
}

/// Parsed output filename template.
///
/// Supports the placeholders the bundler substitutes at emit time:
/// `[name]` for the entry name, `[ext]` for the source extension, and
/// `[hash]` / `[contenthash]` with an optional length limit such as
/// `[contenthash:8]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl FilenameTemplate {
    /// Parse and validate a template string.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = raw;

        while let Some(open) = rest.find('[') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find(']') else {
                return Err(TemplateError::Unclosed(raw.to_string()));
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }

            segments.push(parse_placeholder(&after[..close])?);
            rest = &after[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The template string as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the template contains `[name]`.
    ///
    /// A template without it produces one fixed filename, which collides as
    /// soon as there is more than one entry.
    pub fn mentions_name(&self) -> bool {
        self.segments.contains(&Segment::Name)
    }

    /// Substitute `[name]`, re-emitting every other placeholder verbatim.
    ///
    /// Hash placeholders are the bundler's to fill in, so the result is a
    /// predicted path like `static/js/home.[contenthash:8].js`.
    pub fn expand_name(&self, name: &str) -> String {
        let mut out = String::with_capacity(self.raw.len() + name.len());
        for segment in &self.segments {
            match segment {
                Segment::Name => out.push_str(name),
                other => out.push_str(&other.to_string()),
            }
        }
        out
    }
}

impl Serialize for FilenameTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

fn parse_placeholder(token: &str) -> Result<Segment, TemplateError> {
    let (kind, length) = match token.split_once(':') {
        Some((kind, length)) => (kind, Some(length)),
        None => (token, None),
    };

    match kind {
        "name" if length.is_none() => Ok(Segment::Name),
        "ext" if length.is_none() => Ok(Segment::Ext),
        "hash" | "contenthash" => {
            let parsed = match length {
                None => None,
                Some(digits) => {
                    let n: u8 = digits
                        .parse()
                        .map_err(|_| TemplateError::InvalidHashLength(token.to_string()))?;
                    if n == 0 || n > 64 {
                        return Err(TemplateError::InvalidHashLength(token.to_string()));
                    }
                    Some(n)
                }
            };

            Ok(match kind {
                "hash" => Segment::Hash(parsed),
                _ => Segment::ContentHash(parsed),
            })
        }
        _ => Err(TemplateError::UnknownPlaceholder(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_the_stock_templates() {
        for raw in [
            "static/js/[name].[contenthash:8].js",
            "static/css/[name].[contenthash:8].css",
            "static/media/[name].[hash:8].[ext]",
        ] {
            let template = FilenameTemplate::parse(raw).unwrap();
            assert_eq!(template.raw(), raw);
            assert!(template.mentions_name());
        }
    }

    #[test]
    fn expands_name_and_keeps_hashes() {
        let template = FilenameTemplate::parse("static/js/[name].[contenthash:8].js").unwrap();

        assert_eq!(
            template.expand_name("home"),
            "static/js/home.[contenthash:8].js"
        );
    }

    #[test]
    fn literal_only_template_is_valid() {
        let template = FilenameTemplate::parse("bundle.js").unwrap();

        assert!(!template.mentions_name());
        assert_eq!(template.expand_name("home"), "bundle.js");
    }

    #[test]
    fn rejects_unknown_placeholders() {
        let result = FilenameTemplate::parse("js/[chunkname].js");

        assert!(matches!(
            result,
            Err(TemplateError::UnknownPlaceholder(token)) if token == "chunkname"
        ));
    }

    #[test]
    fn rejects_unclosed_brackets() {
        let result = FilenameTemplate::parse("js/[name.js");

        assert!(matches!(result, Err(TemplateError::Unclosed(_))));
    }

    #[test]
    fn rejects_bad_hash_lengths() {
        assert!(matches!(
            FilenameTemplate::parse("[hash:0]"),
            Err(TemplateError::InvalidHashLength(_))
        ));
        assert!(matches!(
            FilenameTemplate::parse("[contenthash:65]"),
            Err(TemplateError::InvalidHashLength(_))
        ));
        assert!(matches!(
            FilenameTemplate::parse("[hash:abc]"),
            Err(TemplateError::InvalidHashLength(_))
        ));
    }

    #[test]
    fn length_suffix_only_applies_to_hashes() {
        let result = FilenameTemplate::parse("[name:8].js");

        assert!(matches!(result, Err(TemplateError::UnknownPlaceholder(_))));
    }

    #[test]
    fn serializes_as_the_raw_string() {
        let template = FilenameTemplate::parse("static/js/[name].js").unwrap();

        let json = serde_json::to_string(&template).unwrap();
        assert_eq!(json, "\"static/js/[name].js\"");
    }
}
