//! Core contracts for nextval.
//!
//! This crate defines the field value model, tag annotations, and the
//! schema, statement, and callback interfaces shared between a host
//! persistence pipeline and the dispatch engine.

pub mod callbacks;
pub mod error;
pub mod field;
pub mod schema;
pub mod statement;
pub mod value;

pub use callbacks::{Callbacks, CreateCallbacks, HookFn, Plugin};
pub use error::{Error, Result};
pub use field::{Field, TagSettings};
pub use schema::EntitySchema;
pub use statement::{BoxError, CreateStatement, Target};
pub use value::Value;
