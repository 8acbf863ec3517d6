//! Test fixtures - sample component recipes.

#![allow(dead_code)]

/// Run-phase service with an install step and mixed dependencies.
pub const HELLO_RECIPE: &str = r#"
RecipeFormatVersion: "2020-01-25"
ComponentName: com.example.HelloWorld
ComponentVersion: 1.0.0
ComponentDescription: My first component
ComponentPublisher: Example
ComponentDependencies:
  com.example.Database:
    VersionRequirement: ">=1.0.0 <2.0.0"
    DependencyType: HARD
  aws.greengrass.Nucleus:
    DependencyType: SOFT
  com.example.Cache:
    DependencyType: hard
Manifests:
  - Platform:
      os: windows
    Lifecycle:
      Run: hello.exe
  - Platform:
      os: linux
    Lifecycle:
      Install: pip3 install --user awsiotsdk
      Run: python3 -u {artifacts:path}/hello_world.py
"#;

/// Startup phase that requires privilege.
pub const PRIVILEGED_STARTUP_RECIPE: &str = r#"
ComponentName: com.example.Startup
ComponentDescription: Oneshot startup task
Manifests:
  - Platform:
      os: "*"
    Lifecycle:
      Startup:
        Script: run.sh
        RequiresPrivilege: true
"#;

/// Lifecycle reached through a named selection.
pub const SELECTION_RECIPE: &str = r#"
ComponentName: com.example.Selected
ComponentDescription: Uses selections
Manifests:
  - Selections: [linux]
Lifecycle:
  linux:
    Setenv:
      LOG_LEVEL: debug
    Run: ./serve --port 8080
"#;

/// Only a Windows manifest.
pub const WINDOWS_ONLY_RECIPE: &str = r#"
ComponentName: com.example.Windows
ComponentDescription: Windows only
Manifests:
  - Platform:
      os: windows
    Lifecycle:
      Run: hello.exe
"#;

/// Linux manifest without startup or run.
pub const INSTALL_ONLY_RECIPE: &str = r#"
ComponentName: com.example.InstallOnly
ComponentDescription: Nothing to run
Manifests:
  - Platform:
      os: linux
    Lifecycle:
      Install: make install
"#;

/// Manifest with neither lifecycle nor selections.
pub const NO_LIFECYCLE_RECIPE: &str = r#"
ComponentName: com.example.Broken
ComponentDescription: Missing lifecycle
Manifests:
  - Platform:
      os: linux
"#;

/// JSON recipe, keys in mixed case.
pub const JSON_RECIPE: &str = r#"{
  "componentName": "com.example.Json",
  "ComponentDescription": "From JSON",
  "ComponentDependencies": {
    "b.Second": { "DependencyType": "SOFT" },
    "a.First": { "DependencyType": "HARD" }
  },
  "Manifests": [
    { "Platform": { "os": "linux" }, "Lifecycle": { "run": "./json-service" } }
  ]
}"#;
