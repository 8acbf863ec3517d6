//! Reading recipe files into a [`RecipeTree`]
//!
//! YAML and JSON syntax is handled by `serde_yaml` and `serde_json`; this
//! module only picks the parser and converts the generic value tree.

use std::path::Path;

use tracing::debug;

use super::RecipeTree;
use crate::error::{CompileError, Result};

/// On-disk recipe encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "json" => Some(DocumentFormat::Json),
            _ => None,
        }
    }
}

/// Read and parse a recipe file.
///
/// The document root must be a mapping.
pub fn load_recipe(path: &Path) -> Result<RecipeTree> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| CompileError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| CompileError::io(path, e))?;
    debug!(path = %path.display(), ?format, bytes = content.len(), "read recipe");

    let tree = parse_recipe(&content, format).map_err(|message| CompileError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    if tree.as_mapping().is_none() {
        return Err(CompileError::format(format!(
            "recipe {} must be a mapping at the top level, found a {}",
            path.display(),
            tree.kind()
        )));
    }

    Ok(tree)
}

/// Parse recipe text in the given format.
pub fn parse_recipe(content: &str, format: DocumentFormat) -> Result<RecipeTree, String> {
    match format {
        DocumentFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| e.to_string())?;
            from_yaml(value)
        }
        DocumentFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| e.to_string())?;
            Ok(from_json(value))
        }
    }
}

fn from_yaml(value: serde_yaml::Value) -> Result<RecipeTree, String> {
    use serde_yaml::Value;

    Ok(match value {
        Value::Null => RecipeTree::Scalar(String::new()),
        Value::Bool(b) => RecipeTree::Scalar(b.to_string()),
        Value::Number(n) => RecipeTree::Scalar(n.to_string()),
        Value::String(s) => RecipeTree::Scalar(s),
        Value::Sequence(items) => RecipeTree::Sequence(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<std::result::Result<Vec<_>, _>>()?,
        ),
        Value::Mapping(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    other => return Err(format!("unsupported mapping key: {:?}", other)),
                };
                pairs.push((key, from_yaml(value)?));
            }
            RecipeTree::Mapping(pairs)
        }
        Value::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

fn from_json(value: serde_json::Value) -> RecipeTree {
    use serde_json::Value;

    match value {
        Value::Null => RecipeTree::Scalar(String::new()),
        Value::Bool(b) => RecipeTree::Scalar(b.to_string()),
        Value::Number(n) => RecipeTree::Scalar(n.to_string()),
        Value::String(s) => RecipeTree::Scalar(s),
        Value::Array(items) => RecipeTree::Sequence(items.into_iter().map(from_json).collect()),
        Value::Object(map) => {
            RecipeTree::Mapping(map.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}
