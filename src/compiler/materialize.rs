//! Writing phase scripts to disk
//!
//! Each phase gets its own file, `ggl.<component>.script.<phase>`, holding the
//! command text verbatim. Writes are independent: a failure is recorded and
//! the next phase is still written.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::lifecycle::Phase;
use super::script::PhaseScript;
use crate::error::ScriptWriteError;

/// A script file that was written successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedScript {
    pub phase: Phase,
    pub path: PathBuf,
    pub content: String,
}

/// Outcome of writing every resolved phase.
#[derive(Debug, Default)]
pub struct Materialized {
    pub written: Vec<MaterializedScript>,
    pub failures: Vec<ScriptWriteError>,
}

pub fn script_file_name(component_name: &str, phase: Phase) -> String {
    format!("ggl.{}.script.{}", component_name, phase)
}

/// Where a phase script lives; the path is known whether or not the write succeeds.
pub fn script_path(output_dir: &Path, component_name: &str, phase: Phase) -> PathBuf {
    output_dir.join(script_file_name(component_name, phase))
}

/// Write every script into `output_dir`, in the given order.
pub fn materialize(
    output_dir: &Path,
    component_name: &str,
    scripts: &[PhaseScript<'_>],
) -> Materialized {
    let mut result = Materialized::default();

    for script in scripts {
        let path = script_path(output_dir, component_name, script.phase);
        match write_script(&path, script.command) {
            Ok(()) => {
                debug!(phase = %script.phase, path = %path.display(), "wrote script");
                result.written.push(MaterializedScript {
                    phase: script.phase,
                    path,
                    content: script.command.to_string(),
                });
            }
            Err(source) => {
                warn!(
                    phase = %script.phase,
                    path = %path.display(),
                    error = %source,
                    "failed to write script"
                );
                result.failures.push(ScriptWriteError {
                    phase: script.phase,
                    path,
                    source,
                });
            }
        }
    }

    result
}

fn write_script(path: &Path, content: &str) -> std::io::Result<()> {
    std::fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}
