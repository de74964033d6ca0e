//! Delegate registry.
//!
//! Delegates are nullary closures registered under a name and referenced from
//! `func[name]` directives. Every delegate produces a `String`; the delegate
//! engine parses that string into the destination kind, so one delegate can
//! feed string, numeric and boolean fields alike.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A registered generator callback.
pub type Delegate = Arc<dyn Fn() -> String + Send + Sync>;

/// Mapping from name to delegate. Immutable once handed to a `Maker`.
#[derive(Clone, Default)]
pub struct DelegateRegistry {
    delegates: HashMap<String, Delegate>,
}

impl DelegateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a delegate, returning the registry for chaining.
    pub fn with<F>(mut self, name: impl Into<String>, delegate: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.register(name, delegate);
        self
    }

    /// Register a delegate, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, delegate: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.delegates.insert(name.into(), Arc::new(delegate));
    }

    /// Look up a delegate by name.
    pub fn get(&self, name: &str) -> Option<&Delegate> {
        self.delegates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.delegates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.delegates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for DelegateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateRegistry")
            .field("names", &self.names())
            .finish()
    }
}
