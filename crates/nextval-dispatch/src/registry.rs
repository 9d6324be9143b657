use std::collections::HashMap;

use thiserror::Error;

use nextval_core::{BoxError, Value};

/// Error returned by a generator function.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Sentinel: leave the field untouched. Not reported as a failure.
    #[error("skip this field")]
    Skip,
    /// Generation failed; reported against the field's tag.
    #[error("{0}")]
    Failed(#[source] BoxError),
}

impl GenerateError {
    /// Wrap an arbitrary error as a generation failure.
    pub fn failed(err: impl Into<BoxError>) -> Self {
        GenerateError::Failed(err.into())
    }

    /// Build a generation failure from a plain message.
    pub fn message(msg: impl Into<String>) -> Self {
        GenerateError::Failed(msg.into().into())
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, GenerateError::Skip)
    }
}

/// Generator function: maps `(has_default_value, zero)` to the next value
/// for a tagged field.
pub type Generator = Box<dyn Fn(bool, bool) -> Result<Value, GenerateError> + Send + Sync>;

/// Mapping from generator tag to generator function.
///
/// Registration is expected to happen once during setup; the registry is not
/// synchronized against mutation concurrent with dispatch.
#[derive(Default)]
pub struct GeneratorRegistry {
    funcs: HashMap<String, Generator>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `func` under `tag`. The last registration for a tag wins.
    pub fn register<F>(&mut self, tag: impl Into<String>, func: F)
    where
        F: Fn(bool, bool) -> Result<Value, GenerateError> + Send + Sync + 'static,
    {
        self.funcs.insert(tag.into(), Box::new(func));
    }

    /// Look up the generator registered for `tag`. Pure read.
    pub fn lookup(&self, tag: &str) -> Option<&Generator> {
        self.funcs.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.funcs.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.funcs.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_registration_for_a_tag_wins() {
        let mut registry = GeneratorRegistry::new();
        registry.register("seq", |_, _| Ok(Value::Uint(1)));
        registry.register("seq", |_, _| Ok(Value::Uint(2)));
        assert_eq!(registry.len(), 1);

        let generator = registry.lookup("seq").expect("generator registered");
        assert_eq!(generator(false, true).expect("generate"), Value::Uint(2));
    }

    #[test]
    fn lookup_misses_unknown_tags() {
        let registry = GeneratorRegistry::new();
        assert!(registry.lookup("seq").is_none());
        assert!(!registry.contains("seq"));
        assert!(registry.is_empty());
    }

    #[test]
    fn tags_are_sorted() {
        let mut registry = GeneratorRegistry::new();
        registry.register("snowflake", |_, _| Err(GenerateError::Skip));
        registry.register("display_id", |_, _| Err(GenerateError::Skip));
        assert_eq!(registry.tags(), vec!["display_id", "snowflake"]);
    }

    #[test]
    fn failure_helpers_preserve_the_message() {
        let err = GenerateError::message("counter exhausted");
        assert!(!err.is_skip());
        assert_eq!(err.to_string(), "counter exhausted");
    }
}
