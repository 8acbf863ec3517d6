//! Runtime parameters
//!
//! Parameters are handed to the compiler by the supervisor that launches it,
//! as command-line flags and optionally a TOML parameter file. Flags win over
//! the file, field by field. Missing required parameters are reported before
//! any recipe is read or any file is written.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CompileError, Result};

/// Parameters as collected from one source, any of which may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialParameters {
    pub recipe_path: Option<PathBuf>,
    pub recipe_runner_path: Option<PathBuf>,
    pub thing_name: Option<String>,
    pub socket_path: Option<PathBuf>,
    pub aws_region: Option<String>,
    pub ggc_version: Option<String>,
    pub root_ca_path: Option<String>,
    pub auth_token: Option<String>,
    pub credential_url: Option<String>,
}

impl PartialParameters {
    /// Load a TOML parameter file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CompileError::io(path, e))?;
        toml::from_str(&content).map_err(|e| {
            CompileError::Config(format!(
                "failed to parse parameter file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Fill every field missing here from `fallback`.
    pub fn or(self, fallback: PartialParameters) -> PartialParameters {
        PartialParameters {
            recipe_path: self.recipe_path.or(fallback.recipe_path),
            recipe_runner_path: self.recipe_runner_path.or(fallback.recipe_runner_path),
            thing_name: self.thing_name.or(fallback.thing_name),
            socket_path: self.socket_path.or(fallback.socket_path),
            aws_region: self.aws_region.or(fallback.aws_region),
            ggc_version: self.ggc_version.or(fallback.ggc_version),
            root_ca_path: self.root_ca_path.or(fallback.root_ca_path),
            auth_token: self.auth_token.or(fallback.auth_token),
            credential_url: self.credential_url.or(fallback.credential_url),
        }
    }

    /// Check the required subset and produce the final parameters.
    pub fn resolve(self) -> Result<RuntimeParameters> {
        Ok(RuntimeParameters {
            recipe_path: required_path(self.recipe_path, "--recipe-path")?,
            runner_path: required_path(self.recipe_runner_path, "--recipe-runner-path")?,
            thing_name: required(self.thing_name, "--thing-name")?,
            socket_path: required_path(self.socket_path, "--socket-path")?,
            aws_region: optional(self.aws_region),
            ggc_version: optional(self.ggc_version),
            root_ca_path: optional(self.root_ca_path),
            auth_token: optional(self.auth_token),
            credential_url: optional(self.credential_url),
        })
    }
}

/// Validated runtime parameters. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeParameters {
    pub recipe_path: PathBuf,
    pub runner_path: PathBuf,
    pub thing_name: String,
    pub socket_path: PathBuf,
    pub aws_region: Option<String>,
    pub ggc_version: Option<String>,
    pub root_ca_path: Option<String>,
    pub auth_token: Option<String>,
    pub credential_url: Option<String>,
}

fn missing(flag: &str) -> CompileError {
    CompileError::Config(format!("missing required runtime parameter {}", flag))
}

fn required(value: Option<String>, flag: &str) -> Result<String> {
    optional(value).ok_or_else(|| missing(flag))
}

fn required_path(value: Option<PathBuf>, flag: &str) -> Result<PathBuf> {
    value
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| missing(flag))
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
