//! Recipe-to-unit compiler
//!
//! Compilation runs strictly top to bottom:
//! 1. select the manifest for this platform (skip if none applies)
//! 2. resolve its lifecycle, following a selection if needed
//! 3. pick the run phase, `startup` over `run` (skip if neither)
//! 4. resolve install and run commands, raising the privilege flag
//! 5. write the phase scripts
//! 6. compose the unit and write `ggl.<component>.service`
//!
//! A skip is not an error: it yields [`CompilationResult::Skipped`] and
//! writes nothing.

mod context;
mod deps;
mod directive;
mod env;
mod lifecycle;
mod materialize;
mod platform;
mod script;
mod unit;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::RuntimeParameters;
use crate::error::{CompileError, Result, ScriptWriteError};
use crate::recipe::{load_recipe, RecipeTree};

pub use context::CompileContext;
pub use deps::{parse_dependencies, DependencyDeclaration, DependencyKind};
pub use env::{recipe_environment, runtime_environment, EnvAssignment};
pub use lifecycle::{Lifecycle, Phase};
pub use materialize::{script_file_name, MaterializedScript};
pub use platform::{select_manifest, SelectedManifest};
pub use unit::{unit_file_name, WANTED_BY};

/// Why no unit was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoMatchingPlatform,
    NoRunPhase,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoMatchingPlatform => f.write_str("no matching platform"),
            SkipReason::NoRunPhase => f.write_str("no run phase"),
        }
    }
}

/// A generated unit and the files written alongside it.
#[derive(Debug)]
pub struct CompiledUnit {
    pub component_name: String,
    pub unit_path: PathBuf,
    pub text: String,
    pub run_phase: Phase,
    pub requires_privilege: bool,
    /// Scripts written, in phase order (install first).
    pub scripts: Vec<MaterializedScript>,
    /// Scripts that could not be written; the unit was still produced.
    pub script_failures: Vec<ScriptWriteError>,
}

#[derive(Debug)]
pub enum CompilationResult {
    Skipped(SkipReason),
    Unit(CompiledUnit),
}

impl CompilationResult {
    pub fn unit(&self) -> Option<&CompiledUnit> {
        match self {
            CompilationResult::Unit(unit) => Some(unit),
            CompilationResult::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            CompilationResult::Skipped(reason) => Some(*reason),
            CompilationResult::Unit(_) => None,
        }
    }
}

/// Compiles recipes against one set of runtime parameters.
///
/// The compiler holds no per-recipe state; each call builds its own
/// [`CompileContext`], so one compiler can process many recipes.
#[derive(Debug, Clone)]
pub struct Compiler {
    params: RuntimeParameters,
    output_dir: PathBuf,
}

impl Compiler {
    /// Create a compiler writing into `output_dir`, which is made absolute.
    pub fn new(params: RuntimeParameters, output_dir: &Path) -> Result<Self> {
        let output_dir = std::path::absolute(output_dir).map_err(|e| {
            CompileError::Config(format!(
                "invalid output directory '{}': {}",
                output_dir.display(),
                e
            ))
        })?;
        Ok(Self { params, output_dir })
    }

    pub fn params(&self) -> &RuntimeParameters {
        &self.params
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Compile the recipe named by the runtime parameters.
    pub fn compile_configured(&self) -> Result<CompilationResult> {
        self.compile_file(&self.params.recipe_path)
    }

    /// Load and compile a recipe file.
    pub fn compile_file(&self, recipe_path: &Path) -> Result<CompilationResult> {
        let recipe = load_recipe(recipe_path)?;
        self.compile(&recipe)
    }

    /// Compile an already parsed recipe.
    pub fn compile(&self, recipe: &RecipeTree) -> Result<CompilationResult> {
        let component_name = recipe.require_str("ComponentName")?;
        let description = recipe.require_str("ComponentDescription")?;
        let component_version = recipe.get_str("ComponentVersion")?;
        directive::check_identifier("ComponentName", component_name)?;
        directive::check_single_line("ComponentDescription", description)?;
        if let Some(version) = component_version {
            directive::check_identifier("ComponentVersion", version)?;
        }

        let Some(selected) = select_manifest(recipe)? else {
            info!(component = component_name, "no manifest for this platform, skipping");
            return Ok(CompilationResult::Skipped(SkipReason::NoMatchingPlatform));
        };

        let lifecycle = lifecycle::extract(selected.manifest, recipe)?;
        let Some((run_phase, run_value)) = lifecycle.run() else {
            info!(
                component = component_name,
                manifest = selected.index,
                "no startup or run phase, skipping"
            );
            return Ok(CompilationResult::Skipped(SkipReason::NoRunPhase));
        };
        debug!(component = component_name, %run_phase, "selected run phase");

        let mut ctx = CompileContext::new(&self.params, &self.output_dir);

        let mut scripts = Vec::with_capacity(2);
        if let Some(install) = lifecycle.phase(Phase::Install) {
            scripts.push(script::resolve(Phase::Install, install, &mut ctx)?);
        }
        let run_script = script::resolve(run_phase, run_value, &mut ctx)?;

        let mut environment = runtime_environment(ctx.params());
        if let Some(setenv) = run_script.setenv.or_else(|| lifecycle.setenv()) {
            environment.extend(recipe_environment(setenv)?);
        }

        let dependencies = parse_dependencies(recipe)?;
        scripts.push(run_script);

        let materialized = materialize::materialize(ctx.output_dir(), component_name, &scripts);
        let run_script_path = materialize::script_path(ctx.output_dir(), component_name, run_phase);

        let text = unit::compose(
            &unit::UnitFields {
                component_name,
                component_version,
                description,
                dependencies: &dependencies,
                run_phase,
                run_script: &run_script_path,
                environment: &environment,
            },
            &ctx,
        );

        let unit_path = ctx.output_dir().join(unit_file_name(component_name));
        std::fs::write(&unit_path, &text).map_err(|e| CompileError::io(&unit_path, e))?;
        info!(component = component_name, path = %unit_path.display(), "wrote unit");

        Ok(CompilationResult::Unit(CompiledUnit {
            component_name: component_name.to_string(),
            unit_path,
            text,
            run_phase,
            requires_privilege: ctx.requires_privilege(),
            scripts: materialized.written,
            script_failures: materialized.failures,
        }))
    }
}
