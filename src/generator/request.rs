//! Request building for the generation service

use reqwest::Url;

use super::{FetchError, ProjectSpec};
use crate::config::ServiceConfig;

/// A fully parameterised GET request against the generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    base_url: String,
    params: Vec<(&'static str, String)>,
}

impl GenerationRequest {
    /// Build the request for a project, in the parameter order the service documents
    pub fn new(service: &ServiceConfig, spec: &ProjectSpec) -> Self {
        let params = vec![
            ("type", service.project_type.clone()),
            ("language", service.language.clone()),
            ("bootVersion", service.boot_version.clone()),
            ("groupId", spec.group_id.clone()),
            ("artifactId", spec.artifact_id.clone()),
            ("name", spec.project_name.clone()),
            ("dependencies", spec.dependencies.join(",")),
        ];

        Self {
            base_url: service.base_url.clone(),
            params,
        }
    }

    /// Value of a single query parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    /// The encoded URL
    pub fn url(&self) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.base_url, &self.params).map_err(|e| FetchError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn demo_spec() -> ProjectSpec {
        ProjectSpec {
            group_id: "com.example".to_string(),
            artifact_id: "demo".to_string(),
            project_name: "demo".to_string(),
            dependencies: vec!["web".to_string(), "jpa".to_string()],
        }
    }

    #[test]
    fn test_params_follow_service_config() {
        let request = GenerationRequest::new(&ServiceConfig::default(), &demo_spec());

        assert_eq!(request.param("type"), Some("gradle-project"));
        assert_eq!(request.param("language"), Some("java"));
        assert_eq!(request.param("bootVersion"), Some("3.3.0"));
        assert_eq!(request.param("name"), Some("demo"));
        assert_eq!(request.param("dependencies"), Some("web,jpa"));
        assert_eq!(request.param("missing"), None);
    }

    #[test]
    fn test_url_round_trips_comma_list() {
        let request = GenerationRequest::new(&ServiceConfig::default(), &demo_spec());
        let url = request.url().unwrap();

        assert_eq!(url.path(), "/starter.zip");
        let dependencies = url
            .query_pairs()
            .find(|(key, _)| key == "dependencies")
            .map(|(_, value)| value.into_owned());
        assert_eq!(dependencies.as_deref(), Some("web,jpa"));
    }

    #[test]
    fn test_empty_selection_sends_empty_list() {
        let mut spec = demo_spec();
        spec.dependencies.clear();
        let request = GenerationRequest::new(&ServiceConfig::default(), &spec);

        assert_eq!(request.param("dependencies"), Some(""));
    }

    #[test]
    fn test_invalid_base_url_is_fetch_error() {
        let service = ServiceConfig {
            base_url: "not a url".to_string(),
            ..ServiceConfig::default()
        };
        let request = GenerationRequest::new(&service, &demo_spec());

        assert!(matches!(request.url(), Err(FetchError::InvalidUrl { .. })));
    }
}
