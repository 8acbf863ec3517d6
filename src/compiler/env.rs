//! Service environment
//!
//! The device identity and the supervisor socket are always exported.
//! Region, version, root CA, auth token and credential URL are exported only
//! when supplied; an absent value produces no line at all.

use std::fmt;

use crate::config::RuntimeParameters;
use crate::error::{CompileError, Result};
use crate::recipe::RecipeTree;

pub const THING_NAME: &str = "AWS_IOT_THING_NAME";
pub const DOMAIN_SOCKET: &str = "AWS_GG_NUCLEUS_DOMAIN_SOCKET_FILEPATH_FOR_COMPONENT";
pub const REGION: &str = "AWS_REGION";
pub const DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const GGC_VERSION: &str = "GGC_VERSION";
pub const ROOT_CA_PATH: &str = "GG_ROOT_CA_PATH";
pub const AUTH_TOKEN: &str = "SVCUID";
pub const CREDENTIALS_URI: &str = "AWS_CONTAINER_CREDENTIALS_FULL_URI";

/// One `Environment=` line of the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvAssignment {
    pub key: String,
    pub value: String,
}

impl EnvAssignment {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for EnvAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Environment=\"{}={}\"",
            escape(&self.key),
            escape(&self.value)
        )
    }
}

/// Escape text for a double-quoted `Environment=` word.
///
/// Quotes and backslashes are backslash-escaped, line breaks become C escapes
/// that systemd decodes, and `%` is doubled so no specifier is expanded.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '%' => out.push_str("%%"),
            _ => out.push(c),
        }
    }
    out
}

/// Assignments derived from the runtime parameters, in fixed order.
pub fn runtime_environment(params: &RuntimeParameters) -> Vec<EnvAssignment> {
    let mut env = vec![
        EnvAssignment::new(THING_NAME, params.thing_name.as_str()),
        EnvAssignment::new(DOMAIN_SOCKET, params.socket_path.to_string_lossy()),
    ];

    if let Some(region) = params.aws_region.as_deref().filter(|r| !r.is_empty()) {
        env.push(EnvAssignment::new(REGION, region));
        env.push(EnvAssignment::new(DEFAULT_REGION, region));
    }

    let optional = [
        (GGC_VERSION, &params.ggc_version),
        (ROOT_CA_PATH, &params.root_ca_path),
        (AUTH_TOKEN, &params.auth_token),
        (CREDENTIALS_URI, &params.credential_url),
    ];
    for (key, value) in optional {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            env.push(EnvAssignment::new(key, value));
        }
    }

    env
}

/// Assignments declared by a recipe `Setenv` mapping, in declaration order.
pub fn recipe_environment(setenv: &RecipeTree) -> Result<Vec<EnvAssignment>> {
    setenv
        .expect_mapping("Setenv")?
        .iter()
        .map(|(key, value)| {
            let field = format!("Setenv.{}", key);
            check_variable_name(&field, key)?;
            let value = value.expect_scalar(&field)?;
            check_no_nul(&field, value)?;
            Ok(EnvAssignment::new(key.as_str(), value))
        })
        .collect()
}

/// Variable names may not contain `=`, whitespace or control characters.
fn check_variable_name(field: &str, key: &str) -> Result<()> {
    let invalid = |c: char| c == '=' || c.is_whitespace() || c.is_control();
    if key.is_empty() || key.chars().any(invalid) {
        return Err(CompileError::format(format!(
            "'{}' is not a valid environment variable name",
            field
        )));
    }
    Ok(())
}

fn check_no_nul(field: &str, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(CompileError::format(format!("'{}' contains a NUL byte", field)));
    }
    Ok(())
}
