//! Port interfaces for the generation domain

use std::path::Path;

use crate::generation::{Artifact, GenerationError, RenderJob, ServiceUnit};

/// Turns a service and one render job into file content
pub trait ApiRenderer {
    fn render(&self, unit: &ServiceUnit, job: &RenderJob) -> Result<String, GenerationError>;
}

/// Where generated artifacts end up
pub trait OutputService {
    /// Whether `dir` exists and can take output. A missing directory is
    /// `Ok(false)`, not an error.
    fn is_available(&self, dir: &Path) -> Result<bool, GenerationError>;

    /// Make `dir` contain exactly `artifacts`, discarding whatever was
    /// there before. `artifacts` may be empty.
    fn replace_contents(&self, dir: &Path, artifacts: &[Artifact]) -> Result<(), GenerationError>;
}
