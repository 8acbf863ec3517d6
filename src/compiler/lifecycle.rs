//! Lifecycle resolution
//!
//! A manifest either carries its lifecycle inline or names it through
//! `Selections`, whose first entry indexes the recipe's top-level
//! `Lifecycle` table. When both are present the inline lifecycle wins.

use std::fmt;

use tracing::{debug, warn};

use crate::error::{CompileError, Result};
use crate::recipe::RecipeTree;

/// Lifecycle phases the compiler understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Install,
    Startup,
    Run,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Install => "install",
            Phase::Startup => "startup",
            Phase::Run => "run",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved lifecycle section of the selected manifest.
#[derive(Debug, Clone, Copy)]
pub struct Lifecycle<'a> {
    section: &'a RecipeTree,
}

impl<'a> Lifecycle<'a> {
    /// Value of a phase; absent and empty phases both read as `None`.
    pub fn phase(&self, phase: Phase) -> Option<&'a RecipeTree> {
        self.section.get_present(phase.as_str())
    }

    /// The phase that runs the service, `startup` if defined, else `run`,
    /// together with its value.
    pub fn run(&self) -> Option<(Phase, &'a RecipeTree)> {
        [Phase::Startup, Phase::Run]
            .into_iter()
            .find_map(|p| self.phase(p).map(|value| (p, value)))
    }

    pub fn run_phase(&self) -> Option<Phase> {
        self.run().map(|(phase, _)| phase)
    }

    /// Lifecycle-wide `Setenv` mapping, if any.
    pub fn setenv(&self) -> Option<&'a RecipeTree> {
        self.section.get_present("setenv")
    }
}

/// Resolve the lifecycle of `manifest`, following a selection if needed.
pub fn extract<'a>(manifest: &'a RecipeTree, recipe: &'a RecipeTree) -> Result<Lifecycle<'a>> {
    if let Some(inline) = manifest.get_present("lifecycle") {
        inline.expect_mapping("Lifecycle")?;
        if manifest.get_present("selections").is_some() {
            warn!("manifest defines both Lifecycle and Selections; Selections are ignored");
        }
        return Ok(Lifecycle { section: inline });
    }

    let selection = manifest
        .get_present("selections")
        .map(|s| s.expect_sequence("Selections"))
        .transpose()?
        .and_then(|s| s.first())
        .ok_or_else(|| CompileError::format("selection or lifecycle required"))?
        .expect_scalar("Selections[0]")?;

    let table = recipe.get_present("lifecycle").ok_or_else(|| {
        CompileError::format(format!(
            "selection '{}' requires a top-level Lifecycle section",
            selection
        ))
    })?;
    table.expect_mapping("Lifecycle")?;

    let section = table.get(selection).ok_or_else(|| {
        CompileError::format(format!(
            "selection '{}' not found in top-level Lifecycle",
            selection
        ))
    })?;
    section.expect_mapping(&format!("Lifecycle.{}", selection))?;

    debug!(selection, "resolved lifecycle through selection");
    Ok(Lifecycle { section })
}
