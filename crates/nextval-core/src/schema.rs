use std::any::Any;
use std::sync::Arc;

use crate::field::Field;

/// Schema metadata for one entity type, produced by the host's introspection
/// layer and consumed read-only by the dispatch engine.
pub trait EntitySchema: Send + Sync {
    /// Stable entity name, usually the table name.
    fn name(&self) -> &str;

    /// Field descriptors in declaration order.
    fn fields(&self) -> &[Arc<dyn Field>];

    /// The designated primary identifier field, when the schema has one.
    fn prioritized_primary_field(&self) -> Option<&Arc<dyn Field>>;

    /// Whether `entity` is a composite record of this schema's entity type.
    fn is_instance(&self, entity: &dyn Any) -> bool;
}
