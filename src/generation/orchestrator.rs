//! Generation orchestration - coordinates the generation workflow

use std::path::{Path, PathBuf};

use crate::config::GenerationConfig;
use crate::descriptor::FileDescriptor;
use crate::generation::binding::bind_methods;
use crate::generation::planner::plan_jobs;
use crate::generation::{
    ApiRenderer, Artifact, GenerationError, GenerationReport, OutputService, ServiceUnit,
};

/// Mode bits for generated files
pub const GENERATED_FILE_MODE: u32 = 0o644;

/// Orchestrates the code generation workflow
pub struct GenerationOrchestrator {
    renderer: Box<dyn ApiRenderer>,
    output: Box<dyn OutputService>,
}

/// Rendered output for one configured directory
struct DirectoryOutput {
    dir: PathBuf,
    available: bool,
    artifacts: Vec<Artifact>,
}

impl GenerationOrchestrator {
    /// Create a new generation orchestrator
    pub fn new(renderer: Box<dyn ApiRenderer>, output: Box<dyn OutputService>) -> Self {
        Self { renderer, output }
    }

    /// Execute the generation workflow.
    ///
    /// Everything is rendered in memory first; directories are only touched
    /// once every service has rendered. Each configured directory that
    /// exists ends up holding exactly the files of this run.
    pub fn generate(
        &self,
        config: &GenerationConfig,
        files: &[FileDescriptor],
    ) -> Result<GenerationReport, GenerationError> {
        let mut report = GenerationReport::default();

        if !config.has_targets() {
            tracing::debug!("No output_paths or output_paths_js configured; nothing to generate");
            return Ok(report);
        }

        // 1. Inspect every distinct target directory once
        let mut outputs = Vec::new();
        for dir in config.distinct_output_dirs() {
            let available = self.output.is_available(&dir)?;
            if !available {
                tracing::debug!("Output directory {} does not exist; skipping", dir.display());
                report.skipped_dirs.push(dir.clone());
            }
            outputs.push(DirectoryOutput {
                dir,
                available,
                artifacts: Vec::new(),
            });
        }

        // 2. Bind, plan and render every service
        for file in files {
            for service in &file.services {
                let bindings = bind_methods(&service.methods);
                if bindings.is_empty() {
                    tracing::debug!(
                        "Service {} in {} has no HTTP-bound methods; skipping",
                        service.name,
                        file.path
                    );
                    report.skipped_services.push(service.name.clone());
                    continue;
                }

                let unit = ServiceUnit::new(&service.name, bindings);
                tracing::debug!(
                    "Rendering {} ({} bound method(s)) from {}",
                    unit.api_name(),
                    unit.bindings.len(),
                    file.path
                );

                for job in plan_jobs(config, &unit) {
                    let Some(output) = find_output(&mut outputs, &job.target_dir) else {
                        continue;
                    };
                    if !output.available {
                        continue;
                    }

                    let content = self.renderer.render(&unit, &job)?;
                    output.artifacts.push(Artifact {
                        path: job.target_dir.join(unit.file_name(job.flavor)),
                        content,
                        permissions: GENERATED_FILE_MODE,
                    });
                }
            }
        }

        // 3. Swap the rendered output into each existing directory
        for output in outputs.iter().filter(|o| o.available) {
            self.output.replace_contents(&output.dir, &output.artifacts)?;
            for artifact in &output.artifacts {
                if !report.written.contains(&artifact.path) {
                    report.written.push(artifact.path.clone());
                }
            }
        }

        tracing::info!(
            "Generated {} file(s), skipped {} missing directories and {} services without HTTP bindings",
            report.written.len(),
            report.skipped_dirs.len(),
            report.skipped_services.len()
        );
        Ok(report)
    }
}

/// `dir` and the entries are both normalized by [`OutputTarget::dir`]
///
/// [`OutputTarget::dir`]: crate::config::OutputTarget::dir
fn find_output<'a>(
    outputs: &'a mut [DirectoryOutput],
    dir: &Path,
) -> Option<&'a mut DirectoryOutput> {
    outputs.iter_mut().find(|o| o.dir == dir)
}
