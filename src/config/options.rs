//! Plugin option parsing.
//!
//! protoc hands the plugin a single parameter string, e.g.
//!
//! ```text
//! service_import=@/api/api,types_import_path=@/api/proto-types,output_paths=src/api;admin/src/api:@/utils/request
//! ```
//!
//! Pairs are separated by `,`, keys from values by the first `=`. Target
//! lists use `;` between entries and an optional `:` between a directory and
//! its import override. Parsing is permissive: unknown keys and pairs
//! without `=` are skipped, and later duplicates win.
//!
//! # Example
//!
//! ```rust
//! use protoc_gen_webapi::config::GenerationConfig;
//!
//! let config = GenerationConfig::parse("output_paths=src/api;web/api:@/http");
//! assert_eq!(config.output_paths.len(), 2);
//! assert_eq!(config.output_paths[1].service_import, "@/http");
//! ```

use std::path::{Component, Path, PathBuf};

use crate::generation::Flavor;

pub const DEFAULT_SERVICE_IMPORT: &str = "./api";
pub const DEFAULT_TYPES_IMPORT_PATH: &str = "@/api/proto-types";

const PAIR_SEPARATOR: char = ',';
const KEY_VALUE_SEPARATOR: char = '=';
const ENTRY_SEPARATOR: char = ';';
const OVERRIDE_SEPARATOR: char = ':';

/// One configured output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: String,
    /// Import override for this directory; empty means the flavor default
    pub service_import: String,
}

impl OutputTarget {
    pub fn new(path: impl Into<String>, service_import: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            service_import: service_import.into(),
        }
    }

    /// Directory with `.` components and trailing separators removed.
    ///
    /// Two spellings of one directory (`api`, `./api`, `api/`) compare equal.
    pub fn dir(&self) -> PathBuf {
        let dir: PathBuf = Path::new(&self.path)
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect();
        if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir
        }
    }
}

/// Fully parsed configuration for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Client import for the typed flavor, and for untyped when `service_import_js` is unset
    pub service_import: String,
    /// Client import for the untyped flavor
    pub service_import_js: Option<String>,
    /// Root prefix for type-only imports (typed flavor)
    pub types_import_path: String,
    /// Typed (`.ts`) targets
    pub output_paths: Vec<OutputTarget>,
    /// Untyped (`.js`) targets
    pub output_paths_js: Vec<OutputTarget>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            service_import: DEFAULT_SERVICE_IMPORT.to_string(),
            service_import_js: None,
            types_import_path: DEFAULT_TYPES_IMPORT_PATH.to_string(),
            output_paths: Vec::new(),
            output_paths_js: Vec::new(),
        }
    }
}

impl GenerationConfig {
    /// Parse the protoc parameter string. Never fails; see the module docs.
    pub fn parse(param: &str) -> Self {
        let mut config = Self::default();
        if param.is_empty() {
            return config;
        }

        for pair in param.split(PAIR_SEPARATOR) {
            let Some((key, value)) = pair.split_once(KEY_VALUE_SEPARATOR) else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "service_import" => config.service_import = value.to_string(),
                "service_import_js" => config.service_import_js = Some(value.to_string()),
                "types_import_path" => config.types_import_path = value.to_string(),
                "output_paths" => config.output_paths = parse_output_targets(value),
                "output_paths_js" => config.output_paths_js = parse_output_targets(value),
                other => tracing::debug!("Ignoring unknown option '{other}'"),
            }
        }

        config
    }

    /// Targets configured for one flavor, in input order
    pub fn targets(&self, flavor: Flavor) -> &[OutputTarget] {
        match flavor {
            Flavor::Typed => &self.output_paths,
            Flavor::Untyped => &self.output_paths_js,
        }
    }

    /// Default client import for one flavor
    pub fn default_service_import(&self, flavor: Flavor) -> &str {
        match flavor {
            Flavor::Typed => &self.service_import,
            Flavor::Untyped => match self.service_import_js.as_deref() {
                Some(js) if !js.is_empty() => js,
                _ => &self.service_import,
            },
        }
    }

    /// Every configured directory across both flavors, first occurrence order,
    /// compared after [`OutputTarget::dir`] normalization
    pub fn distinct_output_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for target in self.output_paths.iter().chain(&self.output_paths_js) {
            let dir = target.dir();
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        dirs
    }

    pub fn has_targets(&self) -> bool {
        !self.output_paths.is_empty() || !self.output_paths_js.is_empty()
    }
}

/// Parse `dir;dir:override;...`, dropping blank entries
pub fn parse_output_targets(value: &str) -> Vec<OutputTarget> {
    value
        .split(ENTRY_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(OVERRIDE_SEPARATOR) {
            Some((path, service_import)) => OutputTarget::new(path.trim(), service_import.trim()),
            None => OutputTarget::new(entry, ""),
        })
        .filter(|target| !target.path.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_defaults() {
        let config = GenerationConfig::parse("");
        assert_eq!(config, GenerationConfig::default());
        assert_eq!(config.service_import, "./api");
        assert_eq!(config.types_import_path, "@/api/proto-types");
        assert!(config.service_import_js.is_none());
        assert!(!config.has_targets());
    }

    #[test]
    fn test_parse_all_keys() {
        let config = GenerationConfig::parse(
            "service_import=@/api/api, service_import_js = @/api/api.js ,types_import_path=@/types,output_paths=src/api,output_paths_js=src/js",
        );
        assert_eq!(config.service_import, "@/api/api");
        assert_eq!(config.service_import_js.as_deref(), Some("@/api/api.js"));
        assert_eq!(config.types_import_path, "@/types");
        assert_eq!(config.output_paths, vec![OutputTarget::new("src/api", "")]);
        assert_eq!(config.output_paths_js, vec![OutputTarget::new("src/js", "")]);
    }

    #[test]
    fn test_unknown_and_malformed_pairs_are_skipped() {
        let config = GenerationConfig::parse("paths=source_relative,garbage,,service_import=@/x");
        assert_eq!(config.service_import, "@/x");
        assert!(!config.has_targets());
    }

    #[test]
    fn test_later_keys_overwrite_earlier() {
        let config = GenerationConfig::parse("output_paths=a;b,output_paths=c");
        assert_eq!(config.output_paths, vec![OutputTarget::new("c", "")]);
    }

    #[test]
    fn test_value_keeps_text_after_first_equals() {
        let config = GenerationConfig::parse("service_import=@/api?v=2");
        assert_eq!(config.service_import, "@/api?v=2");
    }

    #[test]
    fn test_target_list_with_overrides() {
        let targets = parse_output_targets("a;b:@/x;c");
        assert_eq!(
            targets,
            vec![
                OutputTarget::new("a", ""),
                OutputTarget::new("b", "@/x"),
                OutputTarget::new("c", ""),
            ]
        );
    }

    #[test]
    fn test_target_list_first_colon_wins() {
        let targets = parse_output_targets(" web/api : @/http:client ");
        assert_eq!(targets, vec![OutputTarget::new("web/api", "@/http:client")]);
    }

    #[test]
    fn test_target_list_drops_blank_entries_and_keeps_duplicates() {
        let targets = parse_output_targets("a; ;a;;");
        assert_eq!(
            targets,
            vec![OutputTarget::new("a", ""), OutputTarget::new("a", "")]
        );
        assert!(parse_output_targets("").is_empty());
        assert!(parse_output_targets(":@/only-override").is_empty());
    }

    #[test]
    fn test_untyped_default_falls_back_to_typed() {
        let config = GenerationConfig::parse("service_import=@/api/api");
        assert_eq!(config.default_service_import(Flavor::Untyped), "@/api/api");

        let config = GenerationConfig::parse("service_import=@/api/api,service_import_js=");
        assert_eq!(config.default_service_import(Flavor::Untyped), "@/api/api");

        let config = GenerationConfig::parse("service_import_js=@/api/api.js");
        assert_eq!(config.default_service_import(Flavor::Untyped), "@/api/api.js");
        assert_eq!(config.default_service_import(Flavor::Typed), "./api");
    }

    #[test]
    fn test_target_dir_normalizes_spelling() {
        assert_eq!(OutputTarget::new("api", "").dir(), PathBuf::from("api"));
        assert_eq!(OutputTarget::new("./api", "").dir(), PathBuf::from("api"));
        assert_eq!(OutputTarget::new("api/", "").dir(), PathBuf::from("api"));
        assert_eq!(OutputTarget::new("src/./api/", "").dir(), PathBuf::from("src/api"));
        assert_eq!(OutputTarget::new(".", "").dir(), PathBuf::from("."));
        assert_eq!(OutputTarget::new("./", "").dir(), PathBuf::from("."));
        assert_eq!(OutputTarget::new("/srv/web/", "").dir(), PathBuf::from("/srv/web"));
    }

    #[test]
    fn test_distinct_output_dirs_merges_spellings() {
        let config =
            GenerationConfig::parse("output_paths=api;src/web,output_paths_js=./api;api/;src/web/");
        assert_eq!(
            config.distinct_output_dirs(),
            vec![PathBuf::from("api"), PathBuf::from("src/web")]
        );
    }

    #[test]
    fn test_distinct_output_dirs_spans_both_flavors() {
        let config = GenerationConfig::parse("output_paths=a;b;a,output_paths_js=b;c");
        assert_eq!(
            config.distinct_output_dirs(),
            vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")]
        );
        assert_eq!(config.targets(Flavor::Typed).len(), 3);
        assert_eq!(config.targets(Flavor::Untyped).len(), 2);
    }
}
