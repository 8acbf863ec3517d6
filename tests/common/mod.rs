//! Common test utilities for compiler integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use recipe2unit::{PartialParameters, RuntimeParameters};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const RUNNER: &str = "/usr/bin/recipe-runner";
pub const SOCKET: &str = "/run/greengrass/gg-ipc.socket";
pub const THING: &str = "test-thing";

/// Create a test environment with a recipes dir and an output dir
pub fn create_test_env() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let recipes = dir.path().join("recipes");
    let out = dir.path().join("out");
    std::fs::create_dir_all(&recipes).unwrap();
    std::fs::create_dir_all(&out).unwrap();
    (dir, recipes, out)
}

/// Write a recipe file and return its path
pub fn write_recipe(recipes_dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = recipes_dir.join(file_name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Minimal complete parameters for `recipe_path`
pub fn params_for(recipe_path: &Path) -> RuntimeParameters {
    PartialParameters {
        recipe_path: Some(recipe_path.to_path_buf()),
        recipe_runner_path: Some(RUNNER.into()),
        thing_name: Some(THING.into()),
        socket_path: Some(SOCKET.into()),
        ..Default::default()
    }
    .resolve()
    .unwrap()
}

/// Names of all entries in a directory, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
