//! Filesystem-based output service implementation
//!
//! A configured directory is replaced as a unit: the new files are written
//! into a sibling staging directory which is then renamed over the live one,
//! so a failed run never leaves a half-emptied target behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, error, warn};

use crate::generation::{Artifact, GenerationError, OutputService};

/// Output service that writes artifacts to the filesystem
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }

    fn write_artifact(&self, path: &Path, artifact: &Artifact) -> Result<(), GenerationError> {
        let write_err = |source| GenerationError::WriteFile {
            path: artifact.path.clone(),
            source,
        };

        fs::write(path, artifact.content.as_bytes()).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(artifact.permissions))
                .map_err(write_err)?;
        }

        Ok(())
    }

    /// Write into a sibling staging directory, then swap it in by rename
    fn swap_in(
        &self,
        dir: &Path,
        name: &str,
        artifacts: &[Artifact],
    ) -> Result<(), GenerationError> {
        let stage_err = |source| GenerationError::StageDirectory {
            path: dir.to_path_buf(),
            source,
        };
        let reset_err = |source| GenerationError::ResetDirectory {
            path: dir.to_path_buf(),
            source,
        };

        let live_permissions = fs::metadata(dir)
            .map_err(|source| GenerationError::InspectDirectory {
                path: dir.to_path_buf(),
                source,
            })?
            .permissions();
        let parent = parent_dir(dir);

        let staging = sibling_tempdir(&parent, name, "staging").map_err(stage_err)?;
        for artifact in artifacts {
            let file_name = artifact.path.file_name().ok_or_else(|| {
                stage_err(io::Error::other(format!(
                    "artifact path {} has no file name",
                    artifact.path.display()
                )))
            })?;
            self.write_artifact(&staging.path().join(file_name), artifact)?;
        }
        fs::set_permissions(staging.path(), live_permissions).map_err(stage_err)?;

        let graveyard = sibling_tempdir(&parent, name, "previous").map_err(stage_err)?;
        let previous = graveyard.path().join(name);
        fs::rename(dir, &previous).map_err(reset_err)?;

        if let Err(source) = fs::rename(staging.path(), dir) {
            if let Err(restore) = fs::rename(&previous, dir) {
                error!(
                    "Could not restore {} after a failed swap; previous contents are in {}: {restore}",
                    dir.display(),
                    previous.display()
                );
                // keep the old contents on disk for manual recovery
                std::mem::forget(graveyard);
            }
            return Err(reset_err(source));
        }

        if let Err(e) = graveyard.close() {
            warn!("Failed to remove previous contents of {}: {e}", dir.display());
        }
        debug!("Replaced {} with {} file(s)", dir.display(), artifacts.len());
        Ok(())
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputService for FileSystemOutputService {
    fn is_available(&self, dir: &Path) -> Result<bool, GenerationError> {
        match fs::metadata(dir) {
            Ok(metadata) if metadata.is_dir() => Ok(true),
            Ok(_) => Err(GenerationError::InspectDirectory {
                path: dir.to_path_buf(),
                source: io::Error::other("exists but is not a directory"),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(GenerationError::InspectDirectory {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }

    fn replace_contents(&self, dir: &Path, artifacts: &[Artifact]) -> Result<(), GenerationError> {
        match dir.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.swap_in(dir, name, artifacts),
            None => {
                // `.` and friends cannot be renamed; fall back to reset-then-write
                reset_output_dir(dir)?;
                for artifact in artifacts {
                    let file_name = artifact.path.file_name().unwrap_or(artifact.path.as_os_str());
                    self.write_artifact(&dir.join(file_name), artifact)?;
                }
                Ok(())
            }
        }
    }
}

/// Empty an existing directory by removing and recreating it.
///
/// A missing directory is left alone and reported as `Ok(false)`.
pub fn reset_output_dir(dir: &Path) -> Result<bool, GenerationError> {
    match fs::metadata(dir) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(source) => {
            return Err(GenerationError::InspectDirectory {
                path: dir.to_path_buf(),
                source,
            });
        }
    }

    let reset_err = |source| GenerationError::ResetDirectory {
        path: dir.to_path_buf(),
        source,
    };
    fs::remove_dir_all(dir).map_err(reset_err)?;
    fs::create_dir_all(dir).map_err(reset_err)?;
    Ok(true)
}

fn parent_dir(dir: &Path) -> PathBuf {
    match dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn sibling_tempdir(parent: &Path, name: &str, purpose: &str) -> io::Result<TempDir> {
    tempfile::Builder::new()
        .prefix(&format!(".{name}.{purpose}-"))
        .tempdir_in(parent)
}
