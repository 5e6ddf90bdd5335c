//! Generate-then-extract pipeline
//!
//! One run fetches the archive, then unpacks it. The run reports its
//! progress through discrete [`PipelineEvent`] values so the caller never
//! shares mutable state with the background task.

use std::path::PathBuf;
use std::sync::Arc;

use super::{
    ArchiveExtractor, ArchiveFetcher, ExtractError, ExtractionSummary, HttpFetcher, PipelineError,
    ProjectSpec, ZipExtractor,
};
use crate::config::ServiceConfig;

/// Intermediate milestones of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Request sent, waiting for the archive
    Downloading,
    /// Archive received, unpacking started
    Extracting { bytes: usize },
}

impl Stage {
    pub fn describe(&self) -> String {
        match self {
            Stage::Downloading => "Downloading project archive...".to_string(),
            Stage::Extracting { bytes } => format!("Extracting {} KiB archive...", bytes.div_ceil(1024)),
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    /// Directory the project was unpacked into
    pub destination: PathBuf,
    pub summary: ExtractionSummary,
}

/// Messages a running pipeline posts back to its owner
#[derive(Debug)]
pub enum PipelineEvent {
    Progress(Stage),
    Complete(GeneratedProject),
    Failed(PipelineError),
}

/// Fetcher and extractor wired to an output directory
pub struct Pipeline {
    fetcher: Arc<dyn ArchiveFetcher>,
    extractor: Arc<dyn ArchiveExtractor>,
    output_dir: PathBuf,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn ArchiveFetcher>,
        extractor: Arc<dyn ArchiveExtractor>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            output_dir,
        }
    }

    /// HTTP fetcher plus zip extractor for the configured service
    pub fn for_service(service: ServiceConfig, output_dir: PathBuf) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(service)?;
        Ok(Self::new(Arc::new(fetcher), Arc::new(ZipExtractor), output_dir))
    }

    /// Run fetch then extract, reporting each stage as it starts
    ///
    /// Extraction only begins after the fetch succeeded. A failure in either
    /// step ends the run; nothing is retried or rolled back.
    pub async fn generate(
        &self,
        spec: ProjectSpec,
        mut report: impl FnMut(Stage),
    ) -> Result<GeneratedProject, PipelineError> {
        report(Stage::Downloading);
        let archive = self.fetcher.fetch(&spec).await?;

        let destination = self.output_dir.join(&archive.destination);
        report(Stage::Extracting {
            bytes: archive.bytes.len(),
        });

        let extractor = Arc::clone(&self.extractor);
        let target = destination.clone();
        let summary = tokio::task::spawn_blocking(move || extractor.extract(&archive.bytes, &target))
            .await
            .map_err(|e| ExtractError::Worker(e.to_string()))??;

        Ok(GeneratedProject {
            destination,
            summary,
        })
    }

    /// Start a run on a background task
    ///
    /// Every stage, then exactly one `Complete` or `Failed`, is passed to
    /// `notify` in order.
    pub fn spawn<F>(self: &Arc<Self>, spec: ProjectSpec, notify: F) -> tokio::task::JoinHandle<()>
    where
        F: Fn(PipelineEvent) + Send + Sync + 'static,
    {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            let project_name = spec.project_name.clone();
            let result = pipeline
                .generate(spec, |stage| notify(PipelineEvent::Progress(stage)))
                .await;

            match result {
                Ok(project) => {
                    tracing::info!(
                        "Generated '{}' in {}",
                        project_name,
                        project.destination.display()
                    );
                    notify(PipelineEvent::Complete(project));
                }
                Err(e) => {
                    tracing::error!("Generation of '{}' failed: {}", project_name, e.detailed_message());
                    notify(PipelineEvent::Failed(e));
                }
            }
        })
    }
}
