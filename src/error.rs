//! Compiler error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::compiler::Phase;

/// Errors that abort a compilation.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid recipe format: {0}")]
    RecipeFormat(String),

    #[error("failed to parse recipe {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported recipe format: {} (expected .yaml, .yml or .json)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    pub fn format(message: impl Into<String>) -> Self {
        Self::RecipeFormat(message.into())
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A phase script that could not be written.
///
/// These are collected into the compilation result rather than aborting,
/// so one failed phase never blocks its sibling.
#[derive(Error, Debug)]
#[error("failed to write {phase} script {}: {source}", .path.display())]
pub struct ScriptWriteError {
    pub phase: Phase,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

pub type Result<T, E = CompileError> = std::result::Result<T, E>;
