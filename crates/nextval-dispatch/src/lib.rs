//! Tag-driven value generation for entity create pipelines.
//!
//! The engine installs a before-insert hook that resolves each tagged field
//! of a pending entity to a registered generator function and writes the
//! produced value back into the entity before the host persists it.

pub mod engine;
pub mod errors;
pub mod model;
pub mod registry;
pub mod selector;

pub use engine::{DEFAULT_KEY, DispatchEngine};
pub use errors::DispatchError;
pub use model::DispatchReport;
pub use registry::{GenerateError, Generator, GeneratorRegistry};
pub use selector::{FieldSelector, all_fields, primary_field_only};
