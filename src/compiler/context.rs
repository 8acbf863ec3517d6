//! Per-compilation state
//!
//! Everything a pipeline stage may need to read or raise lives here, and a
//! fresh context is created for every recipe. Nothing is process-wide, so
//! several recipes can be compiled in one process, in sequence or from
//! separate threads.

use std::path::Path;

use crate::config::RuntimeParameters;

/// Accumulated state for one compilation.
#[derive(Debug)]
pub struct CompileContext<'a> {
    params: &'a RuntimeParameters,
    output_dir: &'a Path,
    requires_privilege: bool,
}

impl<'a> CompileContext<'a> {
    pub fn new(params: &'a RuntimeParameters, output_dir: &'a Path) -> Self {
        Self {
            params,
            output_dir,
            requires_privilege: false,
        }
    }

    pub fn params(&self) -> &'a RuntimeParameters {
        self.params
    }

    pub fn runner_path(&self) -> &'a Path {
        &self.params.runner_path
    }

    pub fn output_dir(&self) -> &'a Path {
        self.output_dir
    }

    /// Mark the whole unit as running with root privileges. Sticky.
    pub fn raise_privilege(&mut self) {
        self.requires_privilege = true;
    }

    pub fn requires_privilege(&self) -> bool {
        self.requires_privilege
    }
}
