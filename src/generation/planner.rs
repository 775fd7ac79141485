//! Output planning: which targets a service is rendered into, and how

use crate::config::GenerationConfig;
use crate::generation::imports::resolve_type_imports;
use crate::generation::{Flavor, RenderJob, ServiceUnit, TypeImports};

/// Effective client import for a target: its override, else the flavor default
pub fn resolve_service_import<'a>(flavor_default: &'a str, target_override: &'a str) -> &'a str {
    if target_override.is_empty() {
        flavor_default
    } else {
        target_override
    }
}

/// Render jobs for one service, typed targets first, each list in configured order.
///
/// A flavor without targets contributes no jobs. Whether a target directory
/// exists is decided when writing, not here.
pub fn plan_jobs(config: &GenerationConfig, unit: &ServiceUnit) -> Vec<RenderJob> {
    let mut jobs = Vec::new();

    for flavor in Flavor::all() {
        let targets = config.targets(flavor);
        if targets.is_empty() {
            continue;
        }

        let types = match flavor {
            Flavor::Typed => Some(TypeImports {
                root: config.types_import_path.clone(),
                groups: resolve_type_imports(&unit.bindings),
            }),
            Flavor::Untyped => None,
        };
        let flavor_default = config.default_service_import(flavor);

        for target in targets {
            jobs.push(RenderJob {
                flavor,
                target_dir: target.dir(),
                service_import: resolve_service_import(flavor_default, &target.service_import)
                    .to_string(),
                types: types.clone(),
            });
        }
    }

    jobs
}
