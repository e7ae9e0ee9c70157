//! Resolution engine
//!
//! Turns a token into a fully constructed value:
//! 1. The token is looked up in the container's own registry.
//! 2. If it is missing, the lookup is delegated to the parent container, if any.
//! 3. Class and factory providers resolve their dependencies first, one by one,
//!    starting from the container that owns the provider definition.
//! 4. The effective scope is aggregated from the dependencies, the instance is
//!    constructed, its lifecycle hook awaited and, if it stayed a singleton, cached.

use crate::{
    container::{Container, ContainerId},
    error::Error,
    inject::Dependencies,
    provider::{Constructible, ProviderDefinition},
    scope::{self, Scope},
    Token
};
use futures_util::{future::BoxFuture, FutureExt};
use std::{
    any::Any,
    fmt::{self, Debug, Formatter},
    ops::Deref,
    sync::Arc
};

pub(crate) type ArcService = Arc<
    dyn Any
    + Send
    + Sync
>;

/// A resolved value together with its effective scope marker
///
/// Constants carry no marker.
#[derive(Clone)]
pub(crate) struct Resolved {
    pub(crate) value: ArcService,
    pub(crate) scope: Option<Scope>
}

impl Resolved {
    #[inline]
    pub(crate) fn constant(value: ArcService) -> Self {
        Self { value, scope: None }
    }

    #[inline]
    pub(crate) fn constructed(value: ArcService, scope: Scope) -> Self {
        Self { value, scope: Some(scope) }
    }

    #[inline]
    pub(crate) fn downcast<T: Send + Sync + 'static>(&self, token: &Token) -> Result<Arc<T>, Error> {
        self.value
            .clone()
            .downcast::<T>()
            .map_err(|_| Error::resolve_failed::<T>(token))
    }
}

/// A resolved value along with the effective scope it was stamped with
///
/// `effective_scope` is `None` for constants.
pub struct Resolution<T> {
    value: Arc<T>,
    scope: Option<Scope>
}

impl<T: Debug> Debug for Resolution<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("value", &self.value)
            .field("scope", &self.scope)
            .finish()
    }
}

impl<T> Deref for Resolution<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> Resolution<T> {
    #[inline]
    pub(crate) fn new(value: Arc<T>, scope: Option<Scope>) -> Self {
        Self { value, scope }
    }

    /// Shared pointer to the resolved value
    #[inline]
    pub fn value(&self) -> &Arc<T> {
        &self.value
    }

    /// Effective scope of the resolved value
    #[inline]
    pub fn effective_scope(&self) -> Option<Scope> {
        self.scope
    }

    /// Unwraps the shared pointer
    #[inline]
    pub fn into_inner(self) -> Arc<T> {
        self.value
    }
}

/// Providers currently under construction in a single resolution call chain
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolutionPath(Vec<(ContainerId, Token)>);

impl ResolutionPath {
    /// Extends the path with a provider, failing if it is already being constructed
    pub(crate) fn enter(&self, container: ContainerId, token: &Token) -> Result<Self, Error> {
        let entered = self.0
            .iter()
            .any(|(id, t)| *id == container && t == token);
        if entered {
            let cycle = self.0
                .iter()
                .map(|(_, t)| t.as_str())
                .chain(std::iter::once(token.as_str()))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Error::CircularDependency(cycle));
        }

        let mut path = self.clone();
        path.0.push((container, token.clone()));
        Ok(path)
    }
}

impl Container {
    /// Resolves a token into a value stamped with its effective scope
    pub(crate) fn resolve_instance(
        &self,
        token: Token,
        path: ResolutionPath
    ) -> BoxFuture<'_, Result<Resolved, Error>> {
        async move {
            #[cfg(feature = "tracing")]
            tracing::trace!(%token, container = %self.id(), "resolving provider");

            if let Some(definition) = self.registry().lookup(&token) {
                return self.resolve_definition(token, definition, path).await;
            }

            match self.parent() {
                Some(parent) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(%token, container = %self.id(), parent = %parent.id(), "delegating to parent container");

                    parent.resolve_instance(token, path).await
                },
                None => Err(Error::unregistered(&token))
            }
        }.boxed()
    }

    #[inline]
    async fn resolve_definition(
        &self,
        token: Token,
        definition: Arc<ProviderDefinition>,
        path: ResolutionPath
    ) -> Result<Resolved, Error> {
        match definition.as_ref() {
            ProviderDefinition::Constant(value) => Ok(Resolved::constant(value.clone())),
            ProviderDefinition::Class(provider) |
            ProviderDefinition::Factory(provider) => self.resolve_constructible(token, provider, path).await
        }
    }

    async fn resolve_constructible(
        &self,
        token: Token,
        provider: &Constructible,
        path: ResolutionPath
    ) -> Result<Resolved, Error> {
        // the cache slot is checked before any scope logic
        if let Some(instance) = provider.cached() {
            #[cfg(feature = "tracing")]
            tracing::trace!(%token, container = %self.id(), "returning cached instance");

            return Ok(Resolved::constructed(instance, Scope::Singleton));
        }

        let config = self.config();
        let path = if config.detect_cycles {
            path.enter(self.id(), &token)?
        } else {
            path
        };

        if config.strict_tokens {
            if let Some(index) = provider.tokens.first_missing() {
                return Err(Error::MissingInjectionToken { token, index });
            }
        }

        let mut values = Vec::with_capacity(provider.tokens.len());
        for slot in provider.tokens.iter() {
            let value = match slot {
                Some(dependency) => Some(self.resolve_instance(dependency.clone(), path.clone()).await?),
                None => None
            };
            values.push(value);
        }

        let effective = scope::effective(
            provider.scope,
            values.iter().map(|value| value.as_ref().and_then(|v| v.scope)));

        let cacheable = scope::is_cacheable(provider.scope, effective);

        // the gate is taken only after every dependency is resolved,
        // so it is never held while another gate is awaited
        let _guard = if cacheable && config.single_flight {
            let guard = provider.lock().await;
            if let Some(instance) = provider.cached() {
                return Ok(Resolved::constructed(instance, Scope::Singleton));
            }
            Some(guard)
        } else {
            None
        };

        let instance = provider
            .construct(Dependencies::new(token.clone(), values))
            .await?;

        if cacheable {
            provider.store(&instance);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(%token, container = %self.id(), declared = %provider.scope, %effective, "constructed instance");

        Ok(Resolved::constructed(instance, effective))
    }
}
