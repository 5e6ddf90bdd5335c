//! Wizard configuration
//!
//! Describes the generation service and the dependency catalog. Values come
//! from a YAML file when one exists; otherwise the built-in defaults target
//! start.spring.io.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::generator::{DependencyOption, DEFAULT_GROUP_ID};
use crate::{InitError, Result};

/// Default generation endpoint
pub const DEFAULT_BASE_URL: &str = "https://start.spring.io/starter.zip";

/// Default config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default log file name inside the data directory
pub const LOG_FILE_NAME: &str = "spring-init.log";

/// Remote generation service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Archive endpoint, e.g. https://start.spring.io/starter.zip
    pub base_url: String,
    /// Build type sent as `type`
    pub project_type: String,
    pub language: String,
    pub boot_version: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            project_type: "gradle-project".to_string(),
            language: "java".to_string(),
            boot_version: "3.3.0".to_string(),
            timeout_secs: 60,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Pre-filled project values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    pub group_id: String,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            group_id: DEFAULT_GROUP_ID.to_string(),
        }
    }
}

/// Complete wizard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub defaults: ProjectDefaults,
    /// Ordered dependency catalog shown in the checklist
    pub dependencies: Vec<DependencyOption>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            defaults: ProjectDefaults::default(),
            dependencies: default_catalog(),
        }
    }
}

/// The built-in dependency catalog
pub fn default_catalog() -> Vec<DependencyOption> {
    vec![
        DependencyOption::new("web", "Spring Web"),
        DependencyOption::new("webflux", "Spring Reactive Web"),
        DependencyOption::new("jpa", "Spring Data JPA"),
        DependencyOption::new("security", "Spring Security"),
        DependencyOption::new("thymeleaf", "Thymeleaf"),
        DependencyOption::new("actuator", "Spring Boot Actuator"),
    ]
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used when present, and the built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::load_from_path(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from_path(&path)?,
                _ => {
                    tracing::debug!("No config file found, using built-in defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific YAML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            InitError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;

        let config: Config = serde_yaml_ng::from_str(&content).map_err(|e| {
            InitError::Config(format!("Failed to parse config {}: {e}", path.display()))
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the values a run depends on
    pub fn validate(&self) -> Result<()> {
        let url = &self.service.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(InitError::Config(format!(
                "Service URL must start with http:// or https:// (got '{url}')"
            )));
        }

        if self.dependencies.is_empty() {
            return Err(InitError::Config(
                "Dependency catalog must contain at least one entry".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for option in &self.dependencies {
            if option.id.trim().is_empty() {
                return Err(InitError::Config(
                    "Dependency ids must not be empty".to_string(),
                ));
            }
            if !seen.insert(option.id.as_str()) {
                return Err(InitError::Config(format!(
                    "Duplicate dependency id '{}' in catalog",
                    option.id
                )));
            }
        }

        Ok(())
    }

    /// Resolve a list of dependency ids against the catalog, keeping order and dropping repeats
    pub fn resolve_dependencies(&self, ids: &[String]) -> Result<Vec<String>> {
        let mut resolved: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
            if !self.dependencies.iter().any(|option| option.id == id) {
                return Err(InitError::Cli(format!(
                    "Unknown dependency '{id}'. Available: {}",
                    self.dependency_ids().join(", ")
                )));
            }
            if !resolved.iter().any(|existing| existing == id) {
                resolved.push(id.to_string());
            }
        }
        Ok(resolved)
    }

    pub fn dependency_ids(&self) -> Vec<&str> {
        self.dependencies.iter().map(|d| d.id.as_str()).collect()
    }
}

/// Directory holding the user config file
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "spring-init", "spring-init")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .or_else(|| dirs::config_dir().map(|d| d.join("spring-init")))
}

/// Path of the per-user config file
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Default location of the log file for interactive runs
pub fn default_log_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "spring-init", "spring-init")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .or_else(|| dirs::data_local_dir().map(|d| d.join("spring-init")))
        .map(|dir| dir.join(LOG_FILE_NAME))
}
