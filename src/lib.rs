//! Component recipe to systemd unit compiler
//!
//! Turns a component recipe (YAML or JSON) into a systemd service unit plus
//! the lifecycle scripts it runs, ready for the local supervisor.
//!
//! # Example Recipe
//!
//! ```yaml
//! ComponentName: com.example.HelloWorld
//! ComponentVersion: 1.0.0
//! ComponentDescription: Says hello
//! ComponentDependencies:
//!   aws.greengrass.TokenExchangeService:
//!     DependencyType: HARD
//! Manifests:
//!   - Platform:
//!       os: linux
//!     Lifecycle:
//!       Install: pip3 install --user -r requirements.txt
//!       Run:
//!         Script: python3 -u hello_world.py
//!         RequiresPrivilege: true
//! ```
//!
//! # Outputs
//!
//! - `ggl.<ComponentName>.service` - the unit
//! - `ggl.<ComponentName>.script.install` - install command, when present
//! - `ggl.<ComponentName>.script.<startup|run>` - the command `ExecStart` runs
//!
//! # Rules
//!
//! - The first manifest whose `Platform.os` is `linux`, `*` or unset is used.
//! - `Startup` is preferred over `Run`; with neither, no unit is produced.
//! - `RequiresPrivilege: true` on any written phase runs the unit as root.
//! - `HARD` dependencies become `After=`, everything else `Wants=`.
//!
//! # Example
//!
//! ```no_run
//! use recipe2unit::{CompilationResult, Compiler, PartialParameters};
//! use std::path::Path;
//!
//! let params = PartialParameters {
//!     recipe_path: Some("hello.yaml".into()),
//!     recipe_runner_path: Some("/usr/bin/recipe-runner".into()),
//!     thing_name: Some("my-thing".into()),
//!     socket_path: Some("/run/greengrass/gg-ipc.socket".into()),
//!     ..Default::default()
//! }
//! .resolve()?;
//!
//! let compiler = Compiler::new(params, Path::new("/etc/systemd/system"))?;
//! match compiler.compile_configured()? {
//!     CompilationResult::Unit(unit) => println!("wrote {}", unit.unit_path.display()),
//!     CompilationResult::Skipped(reason) => println!("skipped: {}", reason),
//! }
//! # Ok::<(), recipe2unit::CompileError>(())
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod output;
pub mod recipe;

pub use compiler::{CompilationResult, CompiledUnit, Compiler, Phase, SkipReason};
pub use config::{PartialParameters, RuntimeParameters};
pub use error::{CompileError, Result, ScriptWriteError};
pub use recipe::{load_recipe, RecipeTree};
