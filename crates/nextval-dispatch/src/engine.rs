use std::any::Any;
use std::sync::Arc;

use tracing::debug;

use nextval_core::{Callbacks, CreateStatement, EntitySchema, Plugin, Target, Value};

use crate::errors::DispatchError;
use crate::model::DispatchReport;
use crate::registry::{GenerateError, GeneratorRegistry};
use crate::selector::{FieldSelector, all_fields};

/// Tag key searched in field annotations when no custom key is configured.
pub const DEFAULT_KEY: &str = "NEXT";

/// Before-insert dispatch engine for tag-driven value generation.
///
/// The engine has a configure-then-use lifecycle: call [`set_key`],
/// [`set_fields`], and [`register`] during setup, then share it (typically
/// behind an [`Arc`]) with the host pipeline. Nothing synchronizes
/// configuration against dispatch already in flight.
///
/// [`set_key`]: DispatchEngine::set_key
/// [`set_fields`]: DispatchEngine::set_fields
/// [`register`]: DispatchEngine::register
pub struct DispatchEngine {
    key: String,
    registry: GeneratorRegistry,
    fields: FieldSelector,
}

impl Default for DispatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchEngine {
    pub fn new() -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            registry: GeneratorRegistry::new(),
            fields: all_fields(),
        }
    }

    /// Set the tag key searched in field annotations. Keys match upper-cased;
    /// avoid names already claimed by the host framework.
    pub fn set_key(&mut self, key: &str) {
        self.key = key.to_uppercase();
    }

    /// Current tag key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the field-selection policy. The default considers every field
    /// in declaration order.
    pub fn set_fields(&mut self, selector: FieldSelector) {
        self.fields = selector;
    }

    /// Register `func` to generate values for fields tagged with `tag`.
    pub fn register<F>(&mut self, tag: impl Into<String>, func: F)
    where
        F: Fn(bool, bool) -> Result<Value, GenerateError> + Send + Sync + 'static,
    {
        self.registry.register(tag, func);
    }

    /// Read-only view of the registered generators.
    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Dispatch generators for one pending create operation.
    ///
    /// Failures are recorded on the statement, one error per affected field;
    /// the returned report summarizes the run. Absent schema metadata means
    /// the entity type is not managed and the operation is left untouched.
    pub fn dispatch(&self, stmt: &mut CreateStatement<'_>) -> DispatchReport {
        let mut report = DispatchReport::new();
        let Some(schema) = stmt.schema().cloned() else {
            return report;
        };

        let mut errors = Vec::new();
        match stmt.target_mut() {
            Target::Collection(elements) => {
                for element in elements.iter_mut() {
                    // A non-record element aborts the whole remaining batch,
                    // without error. Fields populated so far are kept.
                    if !schema.is_instance(&**element) {
                        debug!(schema = schema.name(), "non-record element in batch");
                        break;
                    }
                    report.record_entity();
                    self.populate(schema.as_ref(), &mut **element, &mut report, &mut errors);
                }
            }
            Target::Record(record) => {
                report.record_entity();
                self.populate(schema.as_ref(), &mut **record, &mut report, &mut errors);
            }
        }

        debug!(
            schema = schema.name(),
            entities = report.entities,
            generated = report.generated,
            skipped = report.skipped,
            unregistered = report.unregistered,
            failed = report.failed,
            "dispatch finished"
        );

        for err in errors {
            stmt.add_error(err);
        }
        report
    }

    fn populate(
        &self,
        schema: &dyn EntitySchema,
        entity: &mut dyn Any,
        report: &mut DispatchReport,
        errors: &mut Vec<DispatchError>,
    ) {
        for field in (self.fields)(schema) {
            let Some(tag) = field.tags().get(&self.key) else {
                continue;
            };
            let Some(generator) = self.registry.lookup(tag) else {
                report.record_unregistered();
                errors.push(DispatchError::UnregisteredTag {
                    tag: tag.to_string(),
                });
                continue;
            };

            let (_, zero) = field.value_of(entity);
            match generator(field.has_default_value(), zero) {
                Ok(value) => {
                    // Best-effort write: a failing setter never aborts the
                    // operation and is not reported to the caller.
                    if let Err(err) = field.set(entity, value) {
                        report.record_set_failure();
                        debug!(field = field.name(), error = %err, "field setter failed");
                    } else {
                        report.record_generated(tag);
                    }
                }
                Err(GenerateError::Skip) => report.record_skip(),
                Err(GenerateError::Failed(source)) => {
                    report.record_failure();
                    errors.push(DispatchError::Invoke {
                        tag: tag.to_string(),
                        source,
                    });
                }
            }
        }
    }
}

impl Plugin for DispatchEngine {
    fn name(&self) -> &'static str {
        "nextval"
    }

    fn initialize(self: Arc<Self>, callbacks: &mut Callbacks) -> nextval_core::Result<()> {
        let engine = Arc::clone(&self);
        callbacks.create().before_insert(
            "nextval:before_create",
            Box::new(move |stmt| {
                engine.dispatch(stmt);
            }),
        )
    }
}
