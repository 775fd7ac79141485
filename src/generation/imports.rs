//! Type import resolution for the typed flavor

use std::collections::BTreeMap;

use crate::descriptor::MessageRef;
use crate::generation::utils::logical_import_path;
use crate::generation::{ImportGroup, MethodBinding};

/// Group the request and response types of `bindings` by declaring file.
///
/// Only direct request/response types are collected; nested message fields
/// are resolved by the externally generated type definitions. A type whose
/// declaring file is unknown is left out.
pub fn resolve_type_imports(bindings: &[MethodBinding]) -> ImportGroup {
    let mut group = ImportGroup::default();
    for binding in bindings {
        add_type(&mut group, &binding.request);
        add_type(&mut group, &binding.response);
    }
    warn_on_name_collisions(&group);
    group
}

/// Same simple name from two files becomes two clashing `import type` bindings
fn warn_on_name_collisions(group: &ImportGroup) {
    let mut first_seen: BTreeMap<&str, &str> = BTreeMap::new();
    for (import_path, names) in group.iter() {
        for name in names {
            if let Some(earlier) = first_seen.get(name) {
                tracing::warn!(
                    "Type {name} is imported from both {earlier} and {import_path}; \
                     the generated type imports will collide"
                );
            } else {
                first_seen.insert(name, import_path);
            }
        }
    }
}

fn add_type(group: &mut ImportGroup, message: &MessageRef) {
    let import_path = logical_import_path(&message.file);
    if import_path.is_empty() {
        tracing::debug!("No declaring file for type {}; not importing it", message.name);
        return;
    }
    group.insert(import_path, message.name.as_str());
}
