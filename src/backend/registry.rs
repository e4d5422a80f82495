//! Registry of available compiler backends, keyed by id.

use rustc_hash::FxHashMap;

use super::CompilerBackend;

/// Holds every backend the playground can switch between. Exactly one is
/// active per session; the registry just owns them.
#[derive(Default)]
pub struct BackendRegistry {
    backends: FxHashMap<String, Box<dyn CompilerBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend under its own id, replacing any previous backend
    /// with the same id.
    pub fn register(&mut self, backend: Box<dyn CompilerBackend>) {
        self.backends.insert(backend.id().to_string(), backend);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.backends.contains_key(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Box<dyn CompilerBackend>> {
        self.backends.get_mut(id)
    }

    pub fn version_of(&self, id: &str) -> Option<String> {
        self.backends.get(id).map(|b| b.version())
    }

    /// Registered backend ids, unordered.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
