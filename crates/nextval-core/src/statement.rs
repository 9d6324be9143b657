use std::any::Any;
use std::sync::Arc;

use crate::schema::EntitySchema;

/// Boxed error as accumulated on a create operation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shape of the create target: one record or an ordered batch.
pub enum Target<'a> {
    Record(&'a mut dyn Any),
    Collection(Vec<&'a mut dyn Any>),
}

impl Target<'_> {
    pub fn len(&self) -> usize {
        match self {
            Target::Record(_) => 1,
            Target::Collection(elements) => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// View of a pending create operation handed to before-insert hooks.
///
/// Hooks mutate the target in place and record failures on the statement;
/// after the hooks have run, the host decides whether accumulated errors
/// abort the actual persistence.
pub struct CreateStatement<'a> {
    schema: Option<Arc<dyn EntitySchema>>,
    target: Target<'a>,
    errors: Vec<BoxError>,
}

impl<'a> CreateStatement<'a> {
    pub fn new(schema: Option<Arc<dyn EntitySchema>>, target: Target<'a>) -> Self {
        Self {
            schema,
            target,
            errors: Vec::new(),
        }
    }

    /// Schema metadata for the target entity type. `None` means the type is
    /// not managed by the persistence framework.
    pub fn schema(&self) -> Option<&Arc<dyn EntitySchema>> {
        self.schema.as_ref()
    }

    pub fn target(&self) -> &Target<'a> {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut Target<'a> {
        &mut self.target
    }

    /// Record a failure against this operation.
    pub fn add_error(&mut self, err: impl Into<BoxError>) {
        self.errors.push(err.into());
    }

    /// Failures recorded so far, in the order they were added.
    pub fn errors(&self) -> &[BoxError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Drain the accumulated failures, leaving the statement clean.
    pub fn take_errors(&mut self) -> Vec<BoxError> {
        std::mem::take(&mut self.errors)
    }
}
