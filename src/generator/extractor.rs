//! Archive extraction to disk

use std::fs::{File, OpenOptions};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::ExtractError;

/// Counts reported after a successful extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub directories: usize,
    pub files: usize,
    pub bytes_written: u64,
}

impl ExtractionSummary {
    pub fn entries(&self) -> usize {
        self.directories + self.files
    }
}

/// Writes an archive's contents below a destination directory
///
/// Implementations block on disk I/O; the pipeline calls them from a
/// blocking worker.
pub trait ArchiveExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], destination: &Path) -> Result<ExtractionSummary, ExtractError>;
}

/// Extractor for zip archives
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

struct FileEntry {
    index: usize,
    relative: PathBuf,
    mode: Option<u32>,
}

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, bytes: &[u8], destination: &Path) -> Result<ExtractionSummary, ExtractError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        // Resolve every entry up front so an unsafe name aborts before anything is written
        let mut directories = Vec::new();
        let mut files = Vec::new();
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index)?;
            let relative = entry
                .enclosed_name()
                .map(|path| path.to_path_buf())
                .ok_or_else(|| ExtractError::UnsafePath(entry.name().to_string()))?;

            if entry.is_dir() {
                directories.push(relative);
            } else {
                files.push(FileEntry {
                    index,
                    relative,
                    mode: entry.unix_mode(),
                });
            }
        }

        let mut summary = ExtractionSummary::default();
        create_dir(destination)?;

        for relative in &directories {
            create_dir(&destination.join(relative))?;
            tracing::debug!("Created directory {}", relative.display());
            summary.directories += 1;
        }

        for file in files {
            let target = destination.join(&file.relative);
            if let Some(parent) = target.parent() {
                create_dir(parent)?;
            }

            let mut entry = archive.by_index(file.index)?;
            let mut output = open_truncated(&target, file.mode)?;
            let written = std::io::copy(&mut entry, &mut output).map_err(|source| ExtractError::Write {
                path: target.clone(),
                source,
            })?;
            apply_permissions(&target, file.mode)?;

            tracing::debug!("Extracted {} ({} bytes)", file.relative.display(), written);
            summary.files += 1;
            summary.bytes_written += written;
        }

        tracing::info!(
            "Extracted {} directories and {} files into {}",
            summary.directories,
            summary.files,
            destination.display()
        );
        Ok(summary)
    }
}

fn create_dir(path: &Path) -> Result<(), ExtractError> {
    std::fs::create_dir_all(path).map_err(|source| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn open_truncated(path: &Path, mode: Option<u32>) -> Result<File, ExtractError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if let Some(mode) = mode {
            options.mode(mode & 0o777);
        }
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path).map_err(|source| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// The create mode is masked by the umask and ignored for existing files
#[cfg(unix)]
fn apply_permissions(path: &Path, mode: Option<u32>) -> Result<(), ExtractError> {
    use std::os::unix::fs::PermissionsExt;

    let Some(mode) = mode else {
        return Ok(());
    };
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode & 0o777)).map_err(
        |source| ExtractError::Write {
            path: path.to_path_buf(),
            source,
        },
    )
}

#[cfg(not(unix))]
fn apply_permissions(_path: &Path, _mode: Option<u32>) -> Result<(), ExtractError> {
    Ok(())
}
