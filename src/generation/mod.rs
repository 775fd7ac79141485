//! Generation domain module - turns bound services into wrapper source files
//!
//! The pipeline per service is: extract HTTP bindings ([`binding`]), group
//! type imports ([`imports`]), plan one render job per configured target
//! ([`planner`]), then render and hand the artifacts to an
//! [`OutputService`] ([`orchestrator`]).

pub mod binding;
pub mod errors;
pub mod imports;
pub mod orchestrator;
pub mod planner;
pub mod traits;
pub mod types;
pub mod utils;

pub use binding::{bind_methods, extract_binding};
pub use errors::*;
pub use imports::resolve_type_imports;
pub use orchestrator::*;
pub use planner::{plan_jobs, resolve_service_import};
pub use traits::*;
pub use types::*;
