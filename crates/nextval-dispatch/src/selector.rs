use std::sync::Arc;

use nextval_core::{EntitySchema, Field};

/// Policy choosing which schema fields the engine considers, in order.
///
/// Selectors must be deterministic and side-effect-free; the engine may
/// invoke one once per entity in a batch.
pub type FieldSelector = Box<dyn Fn(&dyn EntitySchema) -> Vec<Arc<dyn Field>> + Send + Sync>;

/// Select every field in declaration order. This is the default policy.
pub fn all_fields() -> FieldSelector {
    Box::new(|schema| schema.fields().to_vec())
}

/// Select only the schema's prioritized identity field.
///
/// Schemas without a designated identity field yield no candidates.
pub fn primary_field_only() -> FieldSelector {
    Box::new(|schema| {
        schema
            .prioritized_primary_field()
            .cloned()
            .into_iter()
            .collect()
    })
}
