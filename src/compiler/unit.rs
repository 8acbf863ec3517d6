//! Unit text composition
//!
//! Section and directive order is fixed; consumers parse the unit textually.

use std::path::Path;

use super::context::CompileContext;
use super::deps::DependencyDeclaration;
use super::directive::escape_specifiers;
use super::env::EnvAssignment;
use super::lifecycle::Phase;

/// Target every generated unit is installed into.
pub const WANTED_BY: &str = "GreengrassCore.target";

/// Everything the composer needs beyond the compilation context.
#[derive(Debug)]
pub struct UnitFields<'a> {
    pub component_name: &'a str,
    pub component_version: Option<&'a str>,
    pub description: &'a str,
    pub dependencies: &'a [DependencyDeclaration],
    pub run_phase: Phase,
    pub run_script: &'a Path,
    pub environment: &'a [EnvAssignment],
}

pub fn unit_file_name(component_name: &str) -> String {
    format!("ggl.{}.service", component_name)
}

/// Render the complete unit file.
pub fn compose(fields: &UnitFields<'_>, ctx: &CompileContext<'_>) -> String {
    let mut lines = vec![
        "[Unit]".to_string(),
        format!("Description={}", escape_specifiers(fields.description)),
    ];
    lines.extend(fields.dependencies.iter().map(DependencyDeclaration::ordering_directive));

    lines.push(String::new());
    lines.push("[Service]".to_string());
    lines.push(format!(
        "WorkingDirectory=%t/{}",
        escape_specifiers(fields.component_name)
    ));
    lines.push(format!("ExecStart={}", exec_start(fields, ctx.runner_path())));

    if fields.run_phase == Phase::Startup {
        lines.push("Type=oneshot".to_string());
        lines.push("RemainAfterExit=true".to_string());
    } else {
        lines.push("Type=simple".to_string());
    }

    if ctx.requires_privilege() {
        lines.push("User=root".to_string());
        lines.push("Group=root".to_string());
    }

    lines.extend(fields.environment.iter().map(ToString::to_string));

    lines.push(String::new());
    lines.push("[Install]".to_string());
    lines.push(format!("WantedBy={}", WANTED_BY));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn exec_start(fields: &UnitFields<'_>, runner: &Path) -> String {
    let mut cmd = format!(
        "{} -n {}",
        escape_specifiers(&runner.to_string_lossy()),
        escape_specifiers(fields.component_name)
    );
    if let Some(version) = fields.component_version {
        cmd.push_str(&format!(" -v {}", escape_specifiers(version)));
    }
    cmd.push_str(&format!(
        " -p {}",
        escape_specifiers(&fields.run_script.to_string_lossy())
    ));
    cmd
}
