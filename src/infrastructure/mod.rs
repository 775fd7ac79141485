//! Infrastructure layer - concrete implementations of domain ports

pub mod generation;
pub mod output;

pub use generation::TeraApiRenderer;
pub use output::{FileSystemOutputService, reset_output_dir};
