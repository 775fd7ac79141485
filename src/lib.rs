//! protoc plugin that turns services annotated with `google.api.http` into
//! small TypeScript/JavaScript wrapper modules around a shared HTTP client.
//!
//! ```no_run
//! use protoc_gen_webapi::{config::GenerationConfig, descriptor, generate};
//!
//! let bytes = std::fs::read("api.pb").expect("descriptor set");
//! let files = descriptor::load_descriptor_set(&bytes, &[]).expect("valid descriptors");
//! let config = GenerationConfig::parse("service_import=@/api/api,output_paths=src/api");
//! let report = generate(&config, &files).expect("generation");
//! println!("{} file(s) written", report.written.len());
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod descriptor;
pub mod generation;
pub mod infrastructure;

use crate::config::GenerationConfig;
use crate::descriptor::FileDescriptor;
use crate::generation::{GenerationError, GenerationOrchestrator, GenerationReport};
use crate::infrastructure::{FileSystemOutputService, TeraApiRenderer};

/// Run the full pipeline against the real filesystem
pub fn generate(
    config: &GenerationConfig,
    files: &[FileDescriptor],
) -> Result<GenerationReport, GenerationError> {
    let orchestrator = GenerationOrchestrator::new(
        Box::new(TeraApiRenderer::new()?),
        Box::new(FileSystemOutputService::new()),
    );
    orchestrator.generate(config, files)
}
