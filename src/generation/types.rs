//! Core types for the generation domain

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use crate::descriptor::MessageRef;
use crate::generation::utils::{lower_first, strip_service_suffix};

/// Suffix appended to the lower-cased service base for object and file names
pub const API_SUFFIX: &str = "Api";

/// Output flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// TypeScript, with type-only imports of externally generated types
    Typed,
    /// JavaScript, no type references
    Untyped,
}

impl Flavor {
    pub fn file_extension(&self) -> &'static str {
        match self {
            Flavor::Typed => "ts",
            Flavor::Untyped => "js",
        }
    }

    pub fn all() -> [Flavor; 2] {
        [Flavor::Typed, Flavor::Untyped]
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Typed => write!(f, "typed"),
            Flavor::Untyped => write!(f, "untyped"),
        }
    }
}

/// HTTP verbs a binding can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpVerb {
    /// Lower-case name, used verbatim as the client method
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Delete => "delete",
            HttpVerb::Patch => "patch",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verb and path template of one bound method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub verb: HttpVerb,
    pub path: String,
}

/// One RPC method's resolved HTTP exposure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBinding {
    /// Source identifier, used verbatim as the property key
    pub method_name: String,
    pub verb: HttpVerb,
    /// Path template, copied verbatim
    pub path: String,
    pub request: MessageRef,
    pub response: MessageRef,
}

/// A service and its bound methods in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnit {
    /// Declared name with the `Service` suffix stripped
    pub name: String,
    pub bindings: Vec<MethodBinding>,
}

impl ServiceUnit {
    pub fn new(declared_name: &str, bindings: Vec<MethodBinding>) -> Self {
        Self {
            name: strip_service_suffix(declared_name).to_string(),
            bindings,
        }
    }

    /// Exported object identifier, e.g. `userApi`
    pub fn api_name(&self) -> String {
        format!("{}{API_SUFFIX}", lower_first(&self.name))
    }

    /// Output file name for a flavor, e.g. `userApi.ts`
    pub fn file_name(&self, flavor: Flavor) -> String {
        format!("{}.{}", self.api_name(), flavor.file_extension())
    }
}

/// Type names grouped by the logical path of their declaring file
///
/// Both levels are ordered so rendering is byte-for-byte reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportGroup {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl ImportGroup {
    pub fn insert(&mut self, import_path: impl Into<String>, type_name: impl Into<String>) {
        self.groups
            .entry(import_path.into())
            .or_default()
            .insert(type_name.into());
    }

    /// Groups sorted by import path, names sorted within each group
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.groups
            .iter()
            .map(|(path, names)| (path.as_str(), names.iter().map(String::as_str).collect()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Type-import plan attached to typed render jobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeImports {
    /// Root prefix, e.g. `@/api/proto-types`
    pub root: String,
    pub groups: ImportGroup,
}

/// One (directory, import, flavor) rendering job for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub flavor: Flavor,
    pub target_dir: PathBuf,
    /// Effective client import after applying the target override
    pub service_import: String,
    /// Present for [`Flavor::Typed`] only
    pub types: Option<TypeImports>,
}

/// Generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    /// Unix mode bits; ignored on other platforms
    pub permissions: u32,
}

/// What a generation run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    /// Configured directories that did not exist and were left alone
    pub skipped_dirs: Vec<PathBuf>,
    /// Services with no bound method
    pub skipped_services: Vec<String>,
}
