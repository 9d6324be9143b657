use std::sync::Arc;

use crate::error::{Error, Result};
use crate::statement::CreateStatement;

/// A named hook run against a pending create operation.
pub type HookFn = Box<dyn Fn(&mut CreateStatement<'_>) + Send + Sync>;

/// Hooks attached to the create pipeline, run immediately before the
/// framework's own insert execution step.
#[derive(Default)]
pub struct CreateCallbacks {
    before_insert: Vec<(String, HookFn)>,
}

impl CreateCallbacks {
    /// Register a named hook. Names are unique across the pipeline.
    pub fn before_insert(&mut self, name: impl Into<String>, hook: HookFn) -> Result<()> {
        let name = name.into();
        if self.before_insert.iter().any(|(existing, _)| *existing == name) {
            return Err(Error::DuplicateCallback(name));
        }
        self.before_insert.push((name, hook));
        Ok(())
    }

    /// Run the registered hooks in registration order.
    pub fn run_before_insert(&self, stmt: &mut CreateStatement<'_>) {
        for (_, hook) in &self.before_insert {
            hook(stmt);
        }
    }

    /// Names of the registered hooks, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.before_insert.iter().map(|(name, _)| name.as_str())
    }
}

/// Callback registry for the host pipeline.
///
/// Only create operations accept hooks; updates and deletes never dispatch
/// generated values.
#[derive(Default)]
pub struct Callbacks {
    create: CreateCallbacks,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook registration surface for create operations.
    pub fn create(&mut self) -> &mut CreateCallbacks {
        &mut self.create
    }

    /// Run the create pipeline's before-insert hooks.
    pub fn run_create(&self, stmt: &mut CreateStatement<'_>) {
        self.create.run_before_insert(stmt);
    }
}

/// Install contract for pipeline extensions.
pub trait Plugin: Send + Sync {
    /// Stable plugin name, used to derive callback names.
    fn name(&self) -> &'static str;

    /// Install the plugin's callbacks into the host pipeline.
    fn initialize(self: Arc<Self>, callbacks: &mut Callbacks) -> Result<()>;
}
