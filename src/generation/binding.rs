//! HTTP binding extraction

use crate::descriptor::{HttpPattern, HttpRule, MethodDescriptor};
use crate::generation::{Binding, HttpVerb, MethodBinding};

/// Resolve the verb and path a method is exposed on.
///
/// Returns `None` when the method has no annotation, the annotation has no
/// pattern, the pattern is `custom`, or the path is empty. Never fails.
pub fn extract_binding(method: &MethodDescriptor) -> Option<Binding> {
    let rule = method.http.as_ref()?;
    let binding = binding_from_rule(rule);
    if binding.is_none() {
        tracing::warn!(
            "Method {} has an HTTP annotation without a usable verb/path; skipping",
            method.name
        );
    }
    binding
}

fn binding_from_rule(rule: &HttpRule) -> Option<Binding> {
    let (verb, path) = match rule.pattern.as_ref()? {
        HttpPattern::Post(path) => (HttpVerb::Post, path),
        HttpPattern::Get(path) => (HttpVerb::Get, path),
        HttpPattern::Put(path) => (HttpVerb::Put, path),
        HttpPattern::Delete(path) => (HttpVerb::Delete, path),
        HttpPattern::Patch(path) => (HttpVerb::Patch, path),
        HttpPattern::Custom { .. } => return None,
    };

    if path.is_empty() {
        return None;
    }
    Some(Binding {
        verb,
        path: path.clone(),
    })
}

/// Bound methods of a service, in declaration order
pub fn bind_methods(methods: &[MethodDescriptor]) -> Vec<MethodBinding> {
    methods
        .iter()
        .filter_map(|method| {
            let binding = extract_binding(method)?;
            Some(MethodBinding {
                method_name: method.name.clone(),
                verb: binding.verb,
                path: binding.path,
                request: method.input.clone(),
                response: method.output.clone(),
            })
        })
        .collect()
}
