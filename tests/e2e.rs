//! End-to-end tests for the recipe2unit CLI
//!
//! These tests run the actual CLI binary and verify behavior.

mod common;

use common::*;
use std::path::Path;
use std::process::{Command, Output};

fn recipe2unit_bin() -> &'static str {
    env!("CARGO_BIN_EXE_recipe2unit")
}

/// Run the CLI with the required parameters for `recipe` plus `extra` args
fn run_compile(recipe: &Path, out: &Path, extra: &[&str]) -> Output {
    Command::new(recipe2unit_bin())
        .args(["-r", recipe.to_str().unwrap()])
        .args(["-e", RUNNER, "-t", THING, "-s", SOCKET])
        .args(["-o", out.to_str().unwrap()])
        .args(extra)
        .env_remove("RECIPE2UNIT_CONFIG")
        .output()
        .expect("Failed to execute recipe2unit")
}

// =============================================================================
// CLI Help and Version Tests
// =============================================================================

#[test]
fn test_cli_help() {
    let output = Command::new(recipe2unit_bin())
        .arg("--help")
        .output()
        .expect("Failed to run recipe2unit --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--recipe-path"));
    assert!(stdout.contains("--recipe-runner-path"));
    assert!(stdout.contains("--thing-name"));
    assert!(stdout.contains("--socket-path"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(recipe2unit_bin())
        .arg("--version")
        .output()
        .expect("Failed to run recipe2unit --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("recipe2unit"));
}

// =============================================================================
// Parameter Validation Tests
// =============================================================================

#[test]
fn test_missing_thing_name_fails_without_output() {
    let (_dir, recipes, out) = create_test_env();
    let recipe = write_recipe(&recipes, "hello.yaml", HELLO_RECIPE);

    let output = Command::new(recipe2unit_bin())
        .args(["-r", recipe.to_str().unwrap()])
        .args(["-e", RUNNER, "-s", SOCKET])
        .args(["-o", out.to_str().unwrap()])
        .env_remove("RECIPE2UNIT_CONFIG")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--thing-name"), "stderr: {}", stderr);
    assert!(file_names(&out).is_empty());
}

#[test]
fn test_missing_recipe_file_fails() {
    let (_dir, recipes, out) = create_test_env();
    let output = run_compile(&recipes.join("absent.yaml"), &out, &[]);

    assert!(!output.status.success());
    assert!(file_names(&out).is_empty());
}

#[test]
fn test_unsupported_extension_fails() {
    let (_dir, recipes, out) = create_test_env();
    let recipe = write_recipe(&recipes, "hello.txt", HELLO_RECIPE);
    let output = run_compile(&recipe, &out, &[]);

    assert!(!output.status.success());
    assert!(file_names(&out).is_empty());
}

// =============================================================================
// Compilation Tests
// =============================================================================

#[test]
fn test_compile_writes_unit_and_scripts() {
    let (_dir, recipes, out) = create_test_env();
    let recipe = write_recipe(&recipes, "hello.yaml", HELLO_RECIPE);
    let output = run_compile(&recipe, &out, &["--aws-region", "us-east-1"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        file_names(&out),
        [
            "ggl.com.example.HelloWorld.script.install",
            "ggl.com.example.HelloWorld.script.run",
            "ggl.com.example.HelloWorld.service",
        ]
    );

    let unit = std::fs::read_to_string(out.join("ggl.com.example.HelloWorld.service")).unwrap();
    assert!(unit.contains("Environment=\"AWS_REGION=us-east-1\"\n"));
    assert!(unit.contains(
        "ExecStart=/usr/bin/recipe-runner -n com.example.HelloWorld -v 1.0.0 -p "
    ));
}

#[test]
fn test_skipped_recipe_succeeds_without_output() {
    let (_dir, recipes, out) = create_test_env();
    let recipe = write_recipe(&recipes, "windows.yaml", WINDOWS_ONLY_RECIPE);
    let output = run_compile(&recipe, &out, &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no matching platform"), "stdout: {}", stdout);
    assert!(file_names(&out).is_empty());
}

#[test]
fn test_malformed_recipe_fails() {
    let (_dir, recipes, out) = create_test_env();
    let recipe = write_recipe(&recipes, "broken.yaml", NO_LIFECYCLE_RECIPE);
    let output = run_compile(&recipe, &out, &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("selection or lifecycle required"), "stderr: {}", stderr);
}

#[cfg(unix)]
#[test]
fn test_script_failure_exits_nonzero_but_writes_unit() {
    let (_dir, recipes, out) = create_test_env();
    let recipe = write_recipe(&recipes, "hello.yaml", HELLO_RECIPE);
    std::fs::create_dir(out.join("ggl.com.example.HelloWorld.script.install")).unwrap();

    let output = run_compile(&recipe, &out, &[]);

    assert!(!output.status.success());
    assert!(out.join("ggl.com.example.HelloWorld.service").exists());
    assert!(out.join("ggl.com.example.HelloWorld.script.run").exists());
}

// =============================================================================
// Parameter File Tests
// =============================================================================

#[test]
fn test_config_file_supplies_parameters() {
    let (dir, recipes, out) = create_test_env();
    let recipe = write_recipe(&recipes, "startup.yaml", PRIVILEGED_STARTUP_RECIPE);
    let config = dir.path().join("params.toml");
    std::fs::write(
        &config,
        format!(
            "recipe-path = \"{}\"\n\
             recipe-runner-path = \"{}\"\n\
             thing-name = \"from-file\"\n\
             socket-path = \"{}\"\n\
             ggc-version = \"2.13.0\"\n",
            recipe.display(),
            RUNNER,
            SOCKET
        ),
    )
    .unwrap();

    let output = Command::new(recipe2unit_bin())
        .args(["-c", config.to_str().unwrap()])
        .args(["-t", "from-flag"])
        .args(["-o", out.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let unit = std::fs::read_to_string(out.join("ggl.com.example.Startup.service")).unwrap();
    assert!(unit.contains("Environment=\"AWS_IOT_THING_NAME=from-flag\"\n"));
    assert!(unit.contains("Environment=\"GGC_VERSION=2.13.0\"\n"));
    assert!(unit.contains("User=root\n"));
}

#[test]
fn test_invalid_config_file_fails() {
    let (dir, recipes, out) = create_test_env();
    let recipe = write_recipe(&recipes, "hello.yaml", HELLO_RECIPE);
    let config = dir.path().join("params.toml");
    std::fs::write(&config, "no-such-key = 1\n").unwrap();

    let output = run_compile(&recipe, &out, &["-c", config.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(file_names(&out).is_empty());
}
