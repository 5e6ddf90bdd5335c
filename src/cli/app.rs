use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Config;
use crate::error::InitError;
use crate::Result;

/// spring-init: generate a Spring Boot project from start.spring.io
#[derive(Parser, Debug)]
#[command(name = "spring-init")]
#[command(version)]
#[command(about = "Generate a Spring Boot project from start.spring.io")]
#[command(
    long_about = "Walks through the project name, coordinates and dependencies, downloads the generated archive and unpacks it into a new directory."
)]
pub struct Cli {
    /// Project name; pre-fills the wizard, required with --yes
    #[arg(short, long)]
    pub name: Option<String>,

    /// Maven group id
    #[arg(short, long)]
    pub group_id: Option<String>,

    /// Maven artifact id (defaults to the sanitized project name)
    #[arg(short, long)]
    pub artifact_id: Option<String>,

    /// Dependency ids, comma-separated (e.g. web,jpa)
    #[arg(short, long, value_delimiter = ',')]
    pub dependencies: Vec<String>,

    /// Directory the project folder is created in
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Configuration file path (defaults to the per-user config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the generation service URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the Spring Boot version
    #[arg(long)]
    pub boot_version: Option<String>,

    /// Skip the wizard and generate directly
    #[arg(short, long)]
    pub yes: bool,

    /// Set log level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Log file for interactive runs
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Check flag combinations clap cannot express
    pub fn validate(&self) -> Result<()> {
        if self.yes && self.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            return Err(InitError::Cli("--yes requires a non-empty --name".to_string()));
        }
        Ok(())
    }

    /// Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            config.service.base_url = base_url.clone();
        }
        if let Some(boot_version) = &self.boot_version {
            config.service.boot_version = boot_version.clone();
        }
        if let Some(group_id) = &self.group_id {
            config.defaults.group_id = group_id.clone();
        }
        config.validate()
    }
}
