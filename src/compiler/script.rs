//! Phase command and privilege resolution

use tracing::debug;

use super::context::CompileContext;
use super::lifecycle::Phase;
use crate::error::{CompileError, Result};
use crate::recipe::RecipeTree;

/// Command text of one phase, plus any `Setenv` it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseScript<'a> {
    pub phase: Phase,
    pub command: &'a str,
    pub setenv: Option<&'a RecipeTree>,
}

/// Interpret a phase value.
///
/// A bare string is the command itself. A mapping takes its command from
/// `Script` and raises the context's privilege flag when `RequiresPrivilege`
/// is true. The flag is never lowered here.
pub fn resolve<'a>(
    phase: Phase,
    value: &'a RecipeTree,
    ctx: &mut CompileContext<'_>,
) -> Result<PhaseScript<'a>> {
    match value {
        RecipeTree::Scalar(command) => Ok(PhaseScript {
            phase,
            command,
            setenv: None,
        }),
        RecipeTree::Mapping(_) => {
            let command = value
                .get("script")
                .ok_or_else(|| {
                    CompileError::format(format!("lifecycle phase '{}' has no Script", phase))
                })?
                .expect_scalar(&format!("{}.Script", phase))?;

            if let Some(flag) = value.get_present("requiresprivilege") {
                let field = format!("{}.RequiresPrivilege", phase);
                if parse_flag(flag.expect_scalar(&field)?, &field)? {
                    debug!(%phase, "phase requires privilege");
                    ctx.raise_privilege();
                }
            }

            let setenv = value.get_present("setenv");
            if let Some(env) = setenv {
                env.expect_mapping(&format!("{}.Setenv", phase))?;
            }

            Ok(PhaseScript {
                phase,
                command,
                setenv,
            })
        }
        RecipeTree::Sequence(_) => Err(CompileError::format(format!(
            "lifecycle phase '{}' must be a string or a mapping, found a sequence",
            phase
        ))),
    }
}

/// Boolean spellings accepted for a privilege flag, ignoring case.
fn parse_flag(value: &str, field: &str) -> Result<bool> {
    const TRUE: [&str; 4] = ["true", "yes", "on", "1"];
    const FALSE: [&str; 4] = ["false", "no", "off", "0"];

    if TRUE.iter().any(|t| value.eq_ignore_ascii_case(t)) {
        Ok(true)
    } else if FALSE.iter().any(|f| value.eq_ignore_ascii_case(f)) {
        Ok(false)
    } else {
        Err(CompileError::format(format!(
            "'{}' must be a boolean, found '{}'",
            field, value
        )))
    }
}
