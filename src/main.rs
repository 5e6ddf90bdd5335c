//! spring-init - generate a Spring Boot project from start.spring.io

use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use spring_init::cli::tui::init::state::ExitStatus;
use spring_init::cli::{tui, Cli};
use spring_init::config::{self, Config};
use spring_init::generator::{Pipeline, ProjectSpec};

/// Exit code when the generate-then-extract pipeline failed
const PIPELINE_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    cli.validate()?;
    initialize_tracing(&cli);

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let result = if cli.yes {
        runtime.block_on(generate_non_interactive(&cli, &config))
    } else {
        runtime
            .block_on(tui::run_init_wizard(&config, &cli))
            .map(|status| report_wizard_exit(&status))
            .map_err(anyhow::Error::from)
    };

    // A quit during generation must not wait for the pipeline task
    runtime.shutdown_background();
    result
}

/// Initialize tracing with CLI flags
///
/// The wizard owns the terminal, so interactive runs log to a file. Runs
/// with --yes log to stderr.
fn initialize_tracing(cli: &Cli) {
    let filter = EnvFilter::new(cli.log_level.to_filter_directive());

    if cli.yes {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let log_path = cli.log_file.clone().or_else(config::default_log_path);
    let log_file = log_path.and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        None => eprintln!("Warning: could not open a log file, logging disabled"),
    }
}

async fn generate_non_interactive(cli: &Cli, config: &Config) -> Result<ExitCode> {
    let mut spec = ProjectSpec::from_input(
        cli.name.as_deref().unwrap_or_default(),
        &config.defaults.group_id,
        cli.artifact_id.as_deref().unwrap_or_default(),
    );
    spec.dependencies = config.resolve_dependencies(&cli.dependencies)?;

    let pipeline = Pipeline::for_service(config.service.clone(), cli.output_dir.clone())?;
    info!("Generating '{}' with dependencies [{}]", spec.project_name, spec.dependencies.join(","));

    println!("Generating {} ({}:{})", spec.project_name, spec.group_id, spec.artifact_id);
    match pipeline.generate(spec, |stage| println!("  {}", stage.describe())).await {
        Ok(project) => {
            println!(
                "✓ Created {} ({} directories, {} files)",
                project.destination.display(),
                project.summary.directories,
                project.summary.files
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{}: {}", e.kind().as_str(), e.detailed_message());
            eprintln!("✗ {}: {}", e.kind().as_str(), e.detailed_message());
            Ok(ExitCode::from(PIPELINE_FAILURE))
        }
    }
}

fn report_wizard_exit(status: &ExitStatus) -> ExitCode {
    match status {
        ExitStatus::Completed(project) => {
            println!("✓ Project created in {}", project.destination.display());
            ExitCode::SUCCESS
        }
        ExitStatus::Quit => ExitCode::SUCCESS,
        ExitStatus::Failed(e) => {
            eprintln!("✗ {}: {}", e.kind().as_str(), e.detailed_message());
            ExitCode::from(PIPELINE_FAILURE)
        }
    }
}
