//! recipe2unit - compile a component recipe into a systemd unit
//!
//! Usage:
//!   recipe2unit -r <recipe> -e <runner> -t <thing> -s <socket> [options]
//!
//! Writes `ggl.<component>.service` and its phase scripts into the output
//! directory. Recipes with no Linux manifest or no run phase are skipped
//! without writing anything.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use recipe2unit::{output, CompilationResult, Compiler, PartialParameters};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recipe2unit")]
#[command(about = "Compile a component recipe into a systemd service unit")]
#[command(version)]
struct Cli {
    /// Path to the component recipe (.yaml, .yml or .json)
    #[arg(short = 'r', long)]
    recipe_path: Option<PathBuf>,

    /// Path to the recipe runner executable started by the unit
    #[arg(short = 'e', long)]
    recipe_runner_path: Option<PathBuf>,

    /// Device identity (IoT thing name)
    #[arg(short = 't', long)]
    thing_name: Option<String>,

    /// Domain socket the component uses to reach the supervisor
    #[arg(short = 's', long)]
    socket_path: Option<PathBuf>,

    /// AWS region exported as AWS_REGION and AWS_DEFAULT_REGION
    #[arg(long)]
    aws_region: Option<String>,

    /// Greengrass version exported as GGC_VERSION
    #[arg(long)]
    ggc_version: Option<String>,

    /// Root CA path exported as GG_ROOT_CA_PATH
    #[arg(long)]
    root_ca_path: Option<String>,

    /// Auth token exported as SVCUID
    #[arg(long)]
    auth_token: Option<String>,

    /// Credential provider URL exported as AWS_CONTAINER_CREDENTIALS_FULL_URI
    #[arg(long)]
    credential_url: Option<String>,

    /// TOML file supplying any of the parameters above (flags win)
    #[arg(short = 'c', long, env = "RECIPE2UNIT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory the unit and scripts are written to
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn flag_parameters(&self) -> PartialParameters {
        PartialParameters {
            recipe_path: self.recipe_path.clone(),
            recipe_runner_path: self.recipe_runner_path.clone(),
            thing_name: self.thing_name.clone(),
            socket_path: self.socket_path.clone(),
            aws_region: self.aws_region.clone(),
            ggc_version: self.ggc_version.clone(),
            root_ca_path: self.root_ca_path.clone(),
            auth_token: self.auth_token.clone(),
            credential_url: self.credential_url.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let file_parameters = match &cli.config {
        Some(path) => PartialParameters::from_file(path)
            .with_context(|| format!("Failed to load parameter file: {}", path.display()))?,
        None => PartialParameters::default(),
    };

    // Validated before any recipe is read or any file is written.
    let params = cli.flag_parameters().or(file_parameters).resolve()?;
    let recipe_path = params.recipe_path.clone();

    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", cli.output_dir.display())
    })?;
    let compiler = Compiler::new(params, &cli.output_dir)?;

    output::action(&format!("Compiling {}", recipe_path.display()));
    let result = compiler
        .compile_configured()
        .with_context(|| format!("Failed to compile recipe: {}", recipe_path.display()))?;

    let unit = match result {
        CompilationResult::Unit(unit) => unit,
        CompilationResult::Skipped(reason) => {
            output::skip(&format!(
                "Skipped generating unit for {}: {}",
                recipe_path.display(),
                reason
            ));
            return Ok(());
        }
    };

    for script in &unit.scripts {
        output::detail(&format!("{} script {}", script.phase, script.path.display()));
    }
    for failure in &unit.script_failures {
        output::warning(&failure.to_string());
    }

    output::success(&format!("{} written", unit.unit_path.display()));

    if !unit.script_failures.is_empty() {
        anyhow::bail!(
            "{} script(s) for {} could not be written",
            unit.script_failures.len(),
            unit.component_name
        );
    }

    Ok(())
}
