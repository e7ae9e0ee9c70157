//! Per-container provider registry

use super::{ProviderDefinition, ProviderKind};
use crate::Token;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock}
};

/// Maps tokens to the provider definitions of a single container
///
/// Lookups never leave the container, parent traversal is the resolver's job.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    providers: RwLock<HashMap<Token, Arc<ProviderDefinition>>>
}

impl Registry {
    /// Creates an empty registry
    #[inline]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, replacing any previous one under the same token
    pub(crate) fn register(&self, token: Token, definition: ProviderDefinition) {
        self.providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token, Arc::new(definition));
    }

    /// Local-only lookup
    #[inline]
    pub(crate) fn lookup(&self, token: &str) -> Option<Arc<ProviderDefinition>> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
    }

    /// Returns `true` if a provider is registered under `token`
    #[inline]
    pub(crate) fn contains(&self, token: &str) -> bool {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(token)
    }

    /// Kind of the provider registered under `token`
    #[inline]
    pub(crate) fn kind(&self, token: &str) -> Option<ProviderKind> {
        self.lookup(token).map(|definition| definition.kind())
    }

    /// Number of registered providers
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Registered tokens, in no particular order
    pub(crate) fn tokens(&self) -> Vec<Token> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
