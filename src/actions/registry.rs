//! Registry mapping action names to their effects.

use std::collections::HashMap;
use std::sync::Arc;

use crate::actions::action::{Action, NoopAction};

/// Lookup table of registered actions.
///
/// Names not present resolve to [`NoopAction`], so an empty registry
/// performs every action as a report-only stub.
#[derive(Clone)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
    fallback: Arc<dyn Action>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            fallback: Arc::new(NoopAction),
        }
    }

    /// Register an action under its own name, replacing any previous one.
    pub fn register(&mut self, action: Arc<dyn Action>) {
        let name = action.name().to_string();
        if self.actions.insert(name.clone(), action).is_some() {
            tracing::warn!("Replacing previously registered action: {}", name);
        }
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, action: Arc<dyn Action>) -> Self {
        self.register(action);
        self
    }

    /// Get a registered action by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    /// Resolve an action by name, falling back to the no-op effect.
    pub fn resolve(&self, name: &str) -> Arc<dyn Action> {
        self.get(name).unwrap_or_else(|| Arc::clone(&self.fallback))
    }

    /// Check if an action is registered.
    pub fn has(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered action names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}
