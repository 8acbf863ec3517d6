//! Component dependencies as unit ordering directives
//!
//! A `HARD` dependency (compared case-insensitively) becomes `After=`; any
//! other type, or none, becomes `Wants=`. Version requirements and conflicts
//! are parsed but not enforced: systemd has no equivalent, and the compiler
//! says so in the log rather than dropping them silently.

use tracing::warn;

use super::directive::{check_identifier, escape_specifiers};
use crate::error::{CompileError, Result};
use crate::recipe::RecipeTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Hard,
    Soft,
}

/// One entry of `ComponentDependencies`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    pub name: String,
    pub kind: DependencyKind,
    pub version_requirement: Option<String>,
    pub conflicts_with: Vec<String>,
}

impl DependencyDeclaration {
    /// The `[Unit]` line expressing this dependency.
    pub fn ordering_directive(&self) -> String {
        let name = escape_specifiers(&self.name);
        match self.kind {
            DependencyKind::Hard => format!("After={}.service", name),
            DependencyKind::Soft => format!("Wants={}.service", name),
        }
    }
}

/// Read `ComponentDependencies` in declaration order.
///
/// An absent or empty section yields no dependencies.
pub fn parse_dependencies(recipe: &RecipeTree) -> Result<Vec<DependencyDeclaration>> {
    let Some(section) = recipe.get_present("componentdependencies") else {
        return Ok(Vec::new());
    };

    let entries = section.expect_mapping("ComponentDependencies")?;
    entries
        .iter()
        .map(|(name, decl)| parse_declaration(name, decl))
        .collect()
}

fn parse_declaration(name: &str, decl: &RecipeTree) -> Result<DependencyDeclaration> {
    let field = format!("ComponentDependencies.{}", name);
    check_identifier(&field, name)?;

    let mut dependency = DependencyDeclaration {
        name: name.to_string(),
        kind: DependencyKind::Soft,
        version_requirement: None,
        conflicts_with: Vec::new(),
    };

    match decl {
        RecipeTree::Mapping(_) => {}
        RecipeTree::Scalar(_) => return Ok(dependency),
        RecipeTree::Sequence(_) => {
            return Err(CompileError::format(format!(
                "'{}' must be a mapping, found a sequence",
                field
            )));
        }
    }

    if let Some(kind) = decl.get_str("dependencytype")? {
        if kind.eq_ignore_ascii_case("hard") {
            dependency.kind = DependencyKind::Hard;
        }
    }

    dependency.version_requirement = decl.get_str("versionrequirement")?.map(str::to_string);
    if let Some(requirement) = &dependency.version_requirement {
        warn!(
            dependency = name,
            requirement = requirement.as_str(),
            "version requirement is not enforced"
        );
    }

    if let Some(conflicts) = decl.get_present("conflictswith") {
        dependency.conflicts_with = match conflicts {
            RecipeTree::Scalar(s) => vec![s.clone()],
            RecipeTree::Sequence(items) => items
                .iter()
                .map(|c| c.expect_scalar(&format!("{}.ConflictsWith", field)).map(str::to_string))
                .collect::<Result<_>>()?,
            RecipeTree::Mapping(_) => {
                return Err(CompileError::format(format!(
                    "'{}.ConflictsWith' must be a string or a sequence",
                    field
                )));
            }
        };
        warn!(
            dependency = name,
            conflicts = ?dependency.conflicts_with,
            "dependency conflicts are not enforced"
        );
    }

    Ok(dependency)
}
