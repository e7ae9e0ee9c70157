//! Resolved dependencies handed over to constructors and factories

use crate::{
    error::Error,
    resolve::Resolved,
    Scope,
    Token
};
use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc
};

/// Positional list of resolved dependencies of a provider
///
/// Slot `i` holds the value resolved for the `i`-th injection token.
/// A slot is empty when the parameter had no recorded token.
pub struct Dependencies {
    token: Token,
    values: Vec<Option<Resolved>>
}

impl Debug for Dependencies {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependencies")
            .field("token", &self.token)
            .field("len", &self.values.len())
            .finish()
    }
}

impl Dependencies {
    #[inline]
    pub(crate) fn new(token: Token, values: Vec<Option<Resolved>>) -> Self {
        Self { token, values }
    }

    /// Token of the provider being constructed
    #[inline]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Number of dependency slots
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the provider declared no dependencies
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the dependency at `index` as a shared pointer
    ///
    /// Fails with [`Error::MissingDependency`] if the slot is empty
    /// and with [`Error::ResolveFailed`] if it holds a value of another type.
    pub fn get<T: Send + Sync + 'static>(&self, index: usize) -> Result<Arc<T>, Error> {
        self.optional(index)?
            .ok_or_else(|| Error::MissingDependency {
                token: self.token.clone(),
                index
            })
    }

    /// Returns a clone of the dependency at `index`
    #[inline]
    pub fn get_cloned<T: Clone + Send + Sync + 'static>(&self, index: usize) -> Result<T, Error> {
        self.get::<T>(index)
            .map(|value| value.as_ref().clone())
    }

    /// Returns the dependency at `index`, or `None` if the slot is empty
    pub fn optional<T: Send + Sync + 'static>(&self, index: usize) -> Result<Option<Arc<T>>, Error> {
        match self.values.get(index) {
            Some(Some(resolved)) => resolved.downcast::<T>(&self.token).map(Some),
            _ => Ok(None)
        }
    }

    /// Effective scope stamped on the dependency at `index`
    ///
    /// Constants and empty slots carry no scope marker.
    #[inline]
    pub fn scope_of(&self, index: usize) -> Option<Scope> {
        self.values
            .get(index)
            .and_then(|slot| slot.as_ref())
            .and_then(|resolved| resolved.scope)
    }
}
