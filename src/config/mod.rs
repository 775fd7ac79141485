//! Invocation configuration parsed from the protoc parameter string

pub mod options;

pub use options::{
    DEFAULT_SERVICE_IMPORT, DEFAULT_TYPES_IMPORT_PATH, GenerationConfig, OutputTarget,
    parse_output_targets,
};
