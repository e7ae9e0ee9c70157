//! Provider definitions

use crate::{
    error::Error,
    inject::{AfterInit, Dependencies, Inject, InjectionTokens},
    lifecycle,
    resolve::ArcService,
    Scope,
    Token
};
use futures_util::{future::BoxFuture, FutureExt, TryFutureExt};
use tokio::sync::{Mutex, MutexGuard};
use std::{
    fmt::{self, Debug, Display, Formatter},
    future::Future,
    str::FromStr,
    sync::{Arc, OnceLock}
};

pub(crate) use self::registry::Registry;

mod registry;

type ConstructFn = Arc<
    dyn Fn(Dependencies) -> BoxFuture<'static, Result<ArcService, Error>>
    + Send
    + Sync
>;

/// Options accepted when registering a class or factory provider
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProviderOptions {
    /// Declared lifetime of the produced instances
    ///
    /// Default: [`Scope::Singleton`]
    pub scope: Scope
}

impl ProviderOptions {
    /// Creates default provider options
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options declaring a transient provider
    #[inline]
    pub fn transient() -> Self {
        Self { scope: Scope::Transient }
    }

    /// Configures the declared scope
    #[inline]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

/// Kind of a registered provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// A precomputed value
    Constant,
    /// A type implementing [`Inject`]
    Class,
    /// A factory function
    Factory
}

impl Display for ProviderKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Constant => f.write_str("constant"),
            ProviderKind::Class => f.write_str("class"),
            ProviderKind::Factory => f.write_str("factory")
        }
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "constant" => Ok(ProviderKind::Constant),
            "class" => Ok(ProviderKind::Class),
            "factory" => Ok(ProviderKind::Factory),
            _ => Err(Error::UndefinedProviderType(kind.into()))
        }
    }
}

/// A registered provider
pub(crate) enum ProviderDefinition {
    Constant(ArcService),
    Class(Constructible),
    Factory(Constructible)
}

impl Debug for ProviderDefinition {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ProviderDefinition({})", self.kind())
    }
}

impl ProviderDefinition {
    #[inline]
    pub(crate) fn kind(&self) -> ProviderKind {
        match self {
            ProviderDefinition::Constant(_) => ProviderKind::Constant,
            ProviderDefinition::Class(_) => ProviderKind::Class,
            ProviderDefinition::Factory(_) => ProviderKind::Factory
        }
    }
}

/// Shared state of class and factory providers
pub(crate) struct Constructible {
    pub(crate) tokens: InjectionTokens,
    pub(crate) scope: Scope,
    construct: ConstructFn,
    instance: OnceLock<ArcService>,
    gate: Mutex<()>
}

impl Constructible {
    /// Describes a class provider for `T`
    pub(crate) fn class<T: Inject>(scope: Scope) -> Self {
        let construct: ConstructFn = Arc::new(|deps: Dependencies| {
            let token = deps.token().clone();
            hooked(token, T::inject(deps))
        });
        Self::new(T::injection_tokens(), scope, construct)
    }

    /// Describes a factory provider whose values expose no post-construction hook
    pub(crate) fn factory<T, F, Fut>(tokens: InjectionTokens, scope: Scope, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static
    {
        let construct: ConstructFn = Arc::new(move |deps: Dependencies| {
            factory(deps)
                .map_ok(|value| Arc::new(value) as ArcService)
                .boxed()
        });
        Self::new(tokens, scope, construct)
    }

    /// Describes a factory provider whose values run [`AfterInit::after_init`]
    pub(crate) fn hooked_factory<T, F, Fut>(tokens: InjectionTokens, scope: Scope, factory: F) -> Self
    where
        T: AfterInit,
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static
    {
        let construct: ConstructFn = Arc::new(move |deps: Dependencies| {
            let token = deps.token().clone();
            hooked(token, factory(deps))
        });
        Self::new(tokens, scope, construct)
    }

    #[inline]
    fn new(tokens: InjectionTokens, scope: Scope, construct: ConstructFn) -> Self {
        Self {
            tokens,
            scope,
            construct,
            instance: OnceLock::new(),
            gate: Mutex::new(())
        }
    }

    /// Returns the cached instance, if any
    #[inline]
    pub(crate) fn cached(&self) -> Option<ArcService> {
        self.instance.get().cloned()
    }

    /// Writes the cache slot
    ///
    /// The first write wins, a concurrent construction that lost the race
    /// keeps its own instance.
    #[inline]
    pub(crate) fn store(&self, instance: &ArcService) {
        _ = self.instance.set(instance.clone());
    }

    /// Builds a fresh instance from resolved dependencies
    #[inline]
    pub(crate) fn construct(&self, deps: Dependencies) -> BoxFuture<'static, Result<ArcService, Error>> {
        (self.construct)(deps)
    }

    /// Serializes first-time constructions of this provider
    #[inline]
    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }
}

/// Awaits a freshly built value, then its post-construction hook
fn hooked<T, Fut>(token: Token, value: Fut) -> BoxFuture<'static, Result<ArcService, Error>>
where
    T: AfterInit,
    Fut: Future<Output = Result<T, Error>> + Send + 'static
{
    async move {
        let mut instance = value.await?;
        lifecycle::after_construct(&token, &mut instance).await?;
        Ok(Arc::new(instance) as ArcService)
    }.boxed()
}
