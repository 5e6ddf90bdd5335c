//! Failure types for the generate-then-extract pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while talking to the generation service
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, connect, timeout)
    #[error("Failed to reach the generation service at {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status code
    #[error("Generation service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The response started but the body could not be read completely
    #[error("Failed to read the archive body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request URL could not be built from the configured base URL
    #[error("Invalid generation service URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors raised while unpacking an archive to disk
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The buffer is not a readable archive
    #[error("Downloaded file is not a valid archive")]
    InvalidArchive(#[from] zip::result::ZipError),

    /// An entry would land outside the destination directory
    #[error("Archive entry '{0}' escapes the destination directory")]
    UnsafePath(String),

    /// A directory or file could not be created or written
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking extraction worker died before reporting back
    #[error("Extraction worker stopped unexpectedly: {0}")]
    Worker(String),
}

/// Which half of the pipeline failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Fetch,
    Extract,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Fetch => "Download failed",
            FailureKind::Extract => "Extraction failed",
        }
    }
}

/// Terminal failure of a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PipelineError::Fetch(_) => FailureKind::Fetch,
            PipelineError::Extract(_) => FailureKind::Extract,
        }
    }

    /// Full message including the chain of underlying causes
    pub fn detailed_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_follows_variant() {
        let fetch = PipelineError::from(FetchError::Status {
            status: 500,
            url: "https://start.spring.io/starter.zip".to_string(),
        });
        assert_eq!(fetch.kind(), FailureKind::Fetch);

        let extract = PipelineError::from(ExtractError::UnsafePath("../evil".to_string()));
        assert_eq!(extract.kind(), FailureKind::Extract);
    }

    #[test]
    fn test_detailed_message_includes_io_cause() {
        let error = PipelineError::from(ExtractError::Write {
            path: PathBuf::from("demo/build.gradle"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume"),
        });

        let message = error.detailed_message();
        assert!(message.contains("demo/build.gradle"));
        assert!(message.contains("read-only volume"));
    }
}
