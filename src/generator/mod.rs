//! Project generation - fetch an archive from the generation service and unpack it
//!
//! # Overview
//!
//! A pipeline run is two strictly ordered steps:
//!
//! ```text
//! ProjectSpec
//!     │
//!     ▼
//! ArchiveFetcher   ← HTTP GET starter.zip?type=..&dependencies=web,jpa
//!     │
//!     ▼
//! ArchiveExtractor ← unpack into ./<project-name>/
//!     │
//!     ▼
//! GeneratedProject
//! ```
//!
//! Both steps sit behind traits so the wizard can be exercised without a
//! network or a real archive.

mod error;
mod extractor;
mod fetcher;
mod pipeline;
mod request;

pub use error::{ExtractError, FailureKind, FetchError, PipelineError};
pub use extractor::{ArchiveExtractor, ExtractionSummary, ZipExtractor};
pub use fetcher::{ArchiveFetcher, FetchedArchive, HttpFetcher};
pub use pipeline::{GeneratedProject, Pipeline, PipelineEvent, Stage};
pub use request::GenerationRequest;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Group id used when none is given
pub const DEFAULT_GROUP_ID: &str = "com.example";

static UNSAFE_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("static regex"));

/// Parameters for one generated project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSpec {
    pub group_id: String,
    pub artifact_id: String,
    pub project_name: String,
    /// Selection order is kept so identical choices produce identical requests
    pub dependencies: Vec<String>,
}

impl ProjectSpec {
    /// Build a spec from user-entered values
    ///
    /// Values are trimmed. A blank group id falls back to [`DEFAULT_GROUP_ID`]
    /// and a blank artifact id is the lowercased, sanitized project name.
    pub fn from_input(project_name: &str, group_id: &str, artifact_id: &str) -> Self {
        let project_name = project_name.trim().to_string();
        let group_id = match group_id.trim() {
            "" => DEFAULT_GROUP_ID.to_string(),
            group_id => group_id.to_string(),
        };
        let artifact_id = match artifact_id.trim() {
            "" => sanitize_name(&project_name).to_lowercase(),
            artifact_id => artifact_id.to_string(),
        };

        Self {
            group_id,
            artifact_id,
            project_name,
            dependencies: Vec::new(),
        }
    }

    /// Folder name the archive is unpacked into
    pub fn destination_folder(&self) -> String {
        sanitize_name(&self.project_name)
    }
}

/// A selectable add-on module from the dependency catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyOption {
    /// Identifier sent to the generation service (e.g. "web")
    pub id: String,
    /// Human readable label shown in the checklist
    pub name: String,
}

impl DependencyOption {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Turn a free-form project name into a single safe path component
///
/// Runs of characters outside `[A-Za-z0-9._-]` collapse to one `-`. Leading
/// and trailing dots and dashes are dropped so the result is never hidden or
/// a parent reference.
pub fn sanitize_name(name: &str) -> String {
    let replaced = UNSAFE_NAME_CHARS.replace_all(name.trim(), "-");
    let trimmed = replaced.trim_matches(|c: char| c == '-' || c == '.');

    if trimmed.is_empty() {
        "project".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_fills_defaults() {
        let spec = ProjectSpec::from_input("  My Service ", "", " ");

        assert_eq!(spec.project_name, "My Service");
        assert_eq!(spec.group_id, DEFAULT_GROUP_ID);
        assert_eq!(spec.artifact_id, "my-service");
        assert!(spec.dependencies.is_empty());
    }

    #[test]
    fn test_from_input_keeps_explicit_coordinates() {
        let spec = ProjectSpec::from_input("demo", "org.acme", "demo-app");

        assert_eq!(spec.group_id, "org.acme");
        assert_eq!(spec.artifact_id, "demo-app");
    }

    #[test]
    fn test_sanitize_keeps_plain_names() {
        assert_eq!(sanitize_name("demo"), "demo");
        assert_eq!(sanitize_name("order-service_2.0"), "order-service_2.0");
    }

    #[test]
    fn test_sanitize_replaces_separators_and_spaces() {
        assert_eq!(sanitize_name("  My Cool App  "), "My-Cool-App");
        assert_eq!(sanitize_name("a/b\\c"), "a-b-c");
        assert_eq!(sanitize_name("../../etc"), "etc");
    }

    #[test]
    fn test_sanitize_never_returns_empty() {
        assert_eq!(sanitize_name(""), "project");
        assert_eq!(sanitize_name("///"), "project");
        assert_eq!(sanitize_name(".."), "project");
    }

    #[test]
    fn test_destination_folder_uses_project_name() {
        let spec = ProjectSpec {
            project_name: "Billing API".to_string(),
            ..Default::default()
        };
        assert_eq!(spec.destination_folder(), "Billing-API");
    }
}
