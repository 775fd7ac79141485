//! Descriptor domain - the schema tree the generator consumes
//!
//! The protobuf front end (protoc plus [`loader`]) resolves every reference
//! before the generator sees it; nothing in here validates schema semantics.

pub mod loader;
pub mod types;

pub use loader::{PluginRequest, decode_request, load_descriptor_set};
pub use types::*;
