//! Error types for the generation domain

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run
///
/// Skips (unbound methods, services without bindings, missing target
/// directories) are not errors and never surface here.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Descriptor error: {0}")]
    Descriptor(String),

    #[error("Render error in template '{template}': {message}")]
    Render { template: String, message: String },

    #[error("Failed to inspect output directory {}: {source}", path.display())]
    InspectDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to reset output directory {}: {source}", path.display())]
    ResetDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stage output for directory {}: {source}", path.display())]
    StageDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
