use crate::element::element_model::ElementDescriptor;
use crate::resolver::builtin::default_resolvers;
use crate::resolver::resolver_model::{FieldEntry, Resolver};

/// Ordered resolver list. The first resolver to return an entry wins.
///
/// New resolvers are only ever prepended; the relative order of those
/// already registered never changes.
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    /// Chain holding the built-in resolvers.
    pub fn new() -> Self {
        Self {
            resolvers: default_resolvers(),
        }
    }

    pub fn empty() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Register a resolver with the highest priority.
    pub fn register(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.insert(0, resolver);
    }

    /// Resolve `{key: value}` for the element. `None` when no resolver matches.
    pub fn resolve(&self, el: &ElementDescriptor, key: &str) -> Option<FieldEntry> {
        self.resolve_named(el, key).map(|(_, entry)| entry)
    }

    /// Like `resolve`, also reporting which resolver produced the entry.
    pub fn resolve_named(&self, el: &ElementDescriptor, key: &str) -> Option<(&str, FieldEntry)> {
        self.resolvers
            .iter()
            .find_map(|r| r.try_resolve(el, key).map(|entry| (r.name(), entry)))
    }

    /// Resolver names, highest priority first.
    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for ResolverChain {
    fn default() -> Self {
        Self::new()
    }
}
