//! Recipe document tree
//!
//! A parsed recipe is a tree of scalars, sequences and mappings. Mapping keys
//! keep the casing they were written with; every lookup compares keys
//! ignoring ASCII case, so `ComponentName` and `componentname` address the
//! same field without copying the document.

use crate::error::{CompileError, Result};

/// A node of a parsed recipe document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeTree {
    Scalar(String),
    Sequence(Vec<RecipeTree>),
    /// Key/value pairs in declaration order.
    Mapping(Vec<(String, RecipeTree)>),
}

impl RecipeTree {
    /// Look up `key` in a mapping, ignoring ASCII case.
    ///
    /// Returns `None` if the key is absent or `self` is not a mapping. When a
    /// mapping holds several keys that differ only in case, the first wins.
    pub fn get(&self, key: &str) -> Option<&RecipeTree> {
        match self {
            RecipeTree::Mapping(pairs) => pairs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Look up `key`, treating an empty scalar (a YAML null) as absent.
    pub fn get_present(&self, key: &str) -> Option<&RecipeTree> {
        self.get(key).filter(|v| !v.is_empty_scalar())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            RecipeTree::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[RecipeTree]> {
        match self {
            RecipeTree::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(String, RecipeTree)]> {
        match self {
            RecipeTree::Mapping(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn is_empty_scalar(&self) -> bool {
        matches!(self, RecipeTree::Scalar(s) if s.is_empty())
    }

    /// Shape name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RecipeTree::Scalar(_) => "scalar",
            RecipeTree::Sequence(_) => "sequence",
            RecipeTree::Mapping(_) => "mapping",
        }
    }

    /// Read this node as a scalar, failing with a format error naming `field`.
    pub fn expect_scalar(&self, field: &str) -> Result<&str> {
        self.as_scalar().ok_or_else(|| self.shape_error(field, "scalar"))
    }

    /// Read this node as a sequence, failing with a format error naming `field`.
    pub fn expect_sequence(&self, field: &str) -> Result<&[RecipeTree]> {
        self.as_sequence()
            .ok_or_else(|| self.shape_error(field, "sequence"))
    }

    /// Read this node as a mapping, failing with a format error naming `field`.
    pub fn expect_mapping(&self, field: &str) -> Result<&[(String, RecipeTree)]> {
        self.as_mapping().ok_or_else(|| self.shape_error(field, "mapping"))
    }

    /// Required, non-empty scalar field.
    pub fn require_str(&self, key: &str) -> Result<&str> {
        let value = self
            .get(key)
            .ok_or_else(|| CompileError::format(format!("missing required field '{}'", key)))?
            .expect_scalar(key)?;
        if value.is_empty() {
            return Err(CompileError::format(format!(
                "required field '{}' is empty",
                key
            )));
        }
        Ok(value)
    }

    /// Optional scalar field; empty values read as absent.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.get_present(key) {
            Some(value) => value.expect_scalar(key).map(Some),
            None => Ok(None),
        }
    }

    /// Copy of this tree with every mapping key ASCII lower-cased, recursively.
    ///
    /// Values are left untouched. The compiler itself looks keys up through
    /// [`RecipeTree::get`] and never needs this; it exists for callers that
    /// want a canonical form to print or compare.
    pub fn normalized(&self) -> RecipeTree {
        match self {
            RecipeTree::Scalar(s) => RecipeTree::Scalar(s.clone()),
            RecipeTree::Sequence(items) => {
                RecipeTree::Sequence(items.iter().map(RecipeTree::normalized).collect())
            }
            RecipeTree::Mapping(pairs) => RecipeTree::Mapping(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_ascii_lowercase(), v.normalized()))
                    .collect(),
            ),
        }
    }

    fn shape_error(&self, field: &str, expected: &str) -> CompileError {
        CompileError::format(format!(
            "'{}' must be a {}, found a {}",
            field,
            expected,
            self.kind()
        ))
    }
}

impl From<&str> for RecipeTree {
    fn from(s: &str) -> Self {
        RecipeTree::Scalar(s.to_string())
    }
}
