//! Dependency Injection container and tools

use crate::{
    config::ContainerConfig,
    error::Error,
    inject::{AfterInit, Dependencies, Inject, InjectionTokens},
    provider::{Constructible, ProviderDefinition, ProviderKind, ProviderOptions, Registry},
    resolve::{Resolution, ResolutionPath},
    Token
};
use tokio::task::JoinHandle;
#[cfg(feature = "tracing")]
use std::sync::atomic::AtomicBool;
use std::{
    fmt::{self, Debug, Display, Formatter},
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
        Weak
    }
};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    #[inline]
    pub(crate) fn next() -> Self {
        Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for ContainerId {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Inner {
    id: ContainerId,
    registry: Registry,
    parent: Option<Weak<Inner>>,
    config: ContainerConfig,
    #[cfg(feature = "tracing")]
    orphan_reported: AtomicBool
}

/// Represents a DI container, a node in a tree of containers
///
/// Tokens are looked up in the container itself first and then in its ancestors.
/// A container never looks into its children. A child only holds a weak
/// reference to its parent, the parent's lifetime is independent of its children.
///
/// Cloning a container is cheap and yields a handle to the same registry.
///
/// # Example
/// ```
/// use arbor_di::{Container, Error};
///
///# #[tokio::main]
///# async fn main() -> Result<(), Error> {
/// let root = Container::new();
/// root.add_constant("greeting", String::from("hi"));
///
/// let child = root.create_child_container();
/// let greeting = child.resolve::<String>("greeting").await?;
///
/// assert_eq!(greeting, "hi");
///# Ok(())
///# }
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<Inner>
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.inner.id)
            .field("providers", &self.inner.registry.len())
            .field("is_root", &self.is_root())
            .finish()
    }
}

impl Default for Container {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Creates a root container with the default configuration
    #[inline]
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// Creates a root container with the specified configuration
    pub fn with_config(config: ContainerConfig) -> Self {
        Self::create(None, config)
    }

    /// Creates a child container wired to `parent`
    ///
    /// The child inherits the parent's configuration.
    pub fn with_parent(parent: &Container) -> Self {
        Self::create(Some(Arc::downgrade(&parent.inner)), parent.inner.config)
    }

    /// Creates a new child container wired to this one
    #[inline]
    pub fn create_child_container(&self) -> Self {
        Self::with_parent(self)
    }

    fn create(parent: Option<Weak<Inner>>, config: ContainerConfig) -> Self {
        let inner = Inner {
            id: ContainerId::next(),
            registry: Registry::new(),
            parent,
            config,
            #[cfg(feature = "tracing")]
            orphan_reported: AtomicBool::new(false)
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(container = %inner.id, root = inner.parent.is_none(), "container created");

        Self { inner: Arc::new(inner) }
    }

    /// Identifier of this container
    #[inline]
    pub fn id(&self) -> ContainerId {
        self.inner.id
    }

    /// Configuration of this container
    #[inline]
    pub fn config(&self) -> ContainerConfig {
        self.inner.config
    }

    /// Returns `true` if the container was created without a parent
    #[inline]
    pub fn is_root(&self) -> bool {
        self.inner.parent.is_none()
    }

    /// Returns the parent container if there is one and it is still alive
    pub fn parent(&self) -> Option<Container> {
        let parent = self.inner.parent.as_ref()?;
        match parent.upgrade() {
            Some(inner) => Some(Self { inner }),
            None => {
                // reported once per container, later lookups stay silent
                #[cfg(feature = "tracing")]
                if !self.inner.orphan_reported.swap(true, Ordering::Relaxed) {
                    tracing::warn!(container = %self.inner.id, "parent container has been dropped; resolving as a root");
                }
                None
            }
        }
    }

    #[inline]
    pub(crate) fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Registers a class provider with the [`Singleton`](crate::Scope::Singleton) scope
    ///
    /// Injection tokens are read from [`Inject::injection_tokens`].
    /// Registering an existing token replaces its previous provider.
    #[inline]
    pub fn add_provider<T: Inject>(&self, token: impl Into<Token>) {
        self.add_provider_with::<T>(token, ProviderOptions::default());
    }

    /// Registers a class provider with the specified options
    ///
    /// # Example
    /// ```
    /// use arbor_di::{Container, ProviderOptions, injectable};
    ///
    /// #[derive(Default)]
    /// struct RequestId;
    ///
    /// injectable! { RequestId };
    ///
    /// let container = Container::new();
    /// container.add_provider_with::<RequestId>("request_id", ProviderOptions::transient());
    /// ```
    pub fn add_provider_with<T: Inject>(&self, token: impl Into<Token>, options: ProviderOptions) {
        let token = token.into();

        #[cfg(feature = "tracing")]
        tracing::debug!(%token, container = %self.inner.id, scope = %options.scope, ty = std::any::type_name::<T>(), "class provider registered");

        let provider = Constructible::class::<T>(options.scope);
        self.registry().register(token, ProviderDefinition::Class(provider));
    }

    /// Registers a constant value
    ///
    /// Constants are resolved as themselves, they are never constructed
    /// and never make a dependent provider transient.
    pub fn add_constant<T: Send + Sync + 'static>(&self, token: impl Into<Token>, value: T) {
        let token = token.into();

        #[cfg(feature = "tracing")]
        tracing::debug!(%token, container = %self.inner.id, ty = std::any::type_name::<T>(), "constant registered");

        self.registry().register(token, ProviderDefinition::Constant(Arc::new(value)));
    }

    /// Registers a factory provider with the [`Singleton`](crate::Scope::Singleton) scope
    ///
    /// The factory receives the values resolved for `dependency_tokens`, in order.
    /// Its values run no post-construction hook,
    /// see [`add_hooked_factory_provider`](Self::add_hooked_factory_provider).
    ///
    /// # Example
    /// ```
    /// use arbor_di::{Container, Dependencies, Error};
    ///
    ///# #[tokio::main]
    ///# async fn main() -> Result<(), Error> {
    /// let container = Container::new();
    /// container.add_constant("host", String::from("localhost"));
    /// container.add_constant("port", 5432u16);
    /// container.add_factory_provider("dsn", ["host", "port"], |deps: Dependencies| async move {
    ///     let host = deps.get::<String>(0)?;
    ///     let port = deps.get::<u16>(1)?;
    ///     Ok::<_, Error>(format!("{host}:{port}"))
    /// });
    ///
    /// let dsn = container.resolve::<String>("dsn").await?;
    /// assert_eq!(dsn, "localhost:5432");
    ///# Ok(())
    ///# }
    /// ```
    #[inline]
    pub fn add_factory_provider<T, F, Fut>(
        &self,
        token: impl Into<Token>,
        dependency_tokens: impl Into<InjectionTokens>,
        factory: F
    )
    where
        T: Send + Sync + 'static,
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static
    {
        self.add_factory_provider_with(token, dependency_tokens, ProviderOptions::default(), factory);
    }

    /// Registers a factory provider with the specified options
    pub fn add_factory_provider_with<T, F, Fut>(
        &self,
        token: impl Into<Token>,
        dependency_tokens: impl Into<InjectionTokens>,
        options: ProviderOptions,
        factory: F
    )
    where
        T: Send + Sync + 'static,
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static
    {
        let token = token.into();

        #[cfg(feature = "tracing")]
        tracing::debug!(%token, container = %self.inner.id, scope = %options.scope, ty = std::any::type_name::<T>(), "factory provider registered");

        let provider = Constructible::factory(dependency_tokens.into(), options.scope, factory);
        self.registry().register(token, ProviderDefinition::Factory(provider));
    }

    /// Registers a factory provider with the [`Singleton`](crate::Scope::Singleton) scope
    /// whose values run their [`AfterInit`] hook after every physical construction
    ///
    /// # Example
    /// ```
    /// use arbor_di::{AfterInit, Container, Error, inject_tokens};
    ///
    /// struct Pool {
    ///     size: usize
    /// }
    ///
    /// impl AfterInit for Pool {
    ///     async fn after_init(&mut self) -> Result<(), Error> {
    ///         self.size *= 2;
    ///         Ok(())
    ///     }
    /// }
    ///
    ///# #[tokio::main]
    ///# async fn main() -> Result<(), Error> {
    /// let container = Container::new();
    /// container.add_hooked_factory_provider("pool", inject_tokens![], |_| async {
    ///     Ok::<_, Error>(Pool { size: 4 })
    /// });
    ///
    /// let pool = container.resolve_provider::<Pool>("pool").await?;
    /// assert_eq!(pool.size, 8);
    ///# Ok(())
    ///# }
    /// ```
    #[inline]
    pub fn add_hooked_factory_provider<T, F, Fut>(
        &self,
        token: impl Into<Token>,
        dependency_tokens: impl Into<InjectionTokens>,
        factory: F
    )
    where
        T: AfterInit,
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static
    {
        self.add_hooked_factory_provider_with(token, dependency_tokens, ProviderOptions::default(), factory);
    }

    /// Registers a hooked factory provider with the specified options
    pub fn add_hooked_factory_provider_with<T, F, Fut>(
        &self,
        token: impl Into<Token>,
        dependency_tokens: impl Into<InjectionTokens>,
        options: ProviderOptions,
        factory: F
    )
    where
        T: AfterInit,
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static
    {
        let token = token.into();

        #[cfg(feature = "tracing")]
        tracing::debug!(%token, container = %self.inner.id, scope = %options.scope, ty = std::any::type_name::<T>(), "hooked factory provider registered");

        let provider = Constructible::hooked_factory(dependency_tokens.into(), options.scope, factory);
        self.registry().register(token, ProviderDefinition::Factory(provider));
    }

    /// Returns `true` if `token` is registered in this container, ancestors are not searched
    #[inline]
    pub fn is_registered(&self, token: &str) -> bool {
        self.registry().contains(token)
    }

    /// Kind of the provider registered under `token` in this container
    #[inline]
    pub fn provider_kind(&self, token: &str) -> Option<ProviderKind> {
        self.registry().kind(token)
    }

    /// Tokens registered in this container, in no particular order
    #[inline]
    pub fn registered_tokens(&self) -> Vec<Token> {
        self.registry().tokens()
    }

    /// Resolves a provider and returns a shared pointer
    ///
    /// Fails with [`Error::UnregisteredToken`] if the token is not registered
    /// in this container nor in any of its ancestors.
    pub async fn resolve_provider<T: Send + Sync + 'static>(&self, token: impl Into<Token>) -> Result<Arc<T>, Error> {
        self.resolve_with_scope::<T>(token)
            .await
            .map(Resolution::into_inner)
    }

    /// Resolves a provider and returns a cloned instance.
    /// `T` must implement [`Clone`] otherwise use [`resolve_provider`](Self::resolve_provider)
    /// method that returns a shared pointer.
    #[inline]
    pub async fn resolve<T: Clone + Send + Sync + 'static>(&self, token: impl Into<Token>) -> Result<T, Error> {
        self.resolve_provider::<T>(token)
            .await
            .map(|value| value.as_ref().clone())
    }

    /// Resolves a provider along with the effective scope it was stamped with
    pub async fn resolve_with_scope<T: Send + Sync + 'static>(&self, token: impl Into<Token>) -> Result<Resolution<T>, Error> {
        let token = token.into();
        let resolved = self
            .resolve_instance(token.clone(), ResolutionPath::default())
            .await?;
        resolved
            .downcast::<T>(&token)
            .map(|value| Resolution::new(value, resolved.scope))
    }

    /// Resolves a provider on the tokio runtime
    ///
    /// Dropping the returned handle does not stop the resolution,
    /// the construction runs to completion and may still populate the cache.
    ///
    /// # Panics
    /// Panics if called outside of a tokio runtime.
    pub fn spawn_resolve<T: Send + Sync + 'static>(&self, token: impl Into<Token>) -> JoinHandle<Result<Arc<T>, Error>> {
        let container = self.clone();
        let token = token.into();
        tokio::spawn(async move {
            container.resolve_provider::<T>(token).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Container;
    use crate::{
        config::ContainerConfig,
        provider::ProviderKind,
        Error,
        Scope,
        Token
    };

    #[test]
    fn it_creates_root_container() {
        let container = Container::new();

        assert!(container.is_root());
        assert!(container.parent().is_none());
        assert_eq!(container.config(), ContainerConfig::default());
    }

    #[test]
    fn it_creates_child_container() {
        let root = Container::new();
        let child = root.create_child_container();

        assert!(!child.is_root());
        assert_eq!(child.parent().unwrap().id(), root.id());
        assert_ne!(child.id(), root.id());
    }

    #[test]
    fn it_inherits_parent_config() {
        let root = Container::with_config(ContainerConfig::new().with_strict_tokens());
        let child = Container::with_parent(&root);

        assert!(child.config().strict_tokens());
    }

    #[test]
    fn it_registers_locally_only() {
        let root = Container::new();
        let child = root.create_child_container();
        child.add_constant("local", 1u8);

        assert!(child.is_registered("local"));
        assert!(!root.is_registered("local"));
        assert_eq!(child.provider_kind("local"), Some(ProviderKind::Constant));
        assert_eq!(child.registered_tokens(), vec![Token::from("local")]);
    }

    #[tokio::test]
    async fn it_resolves_constant() {
        let container = Container::new();
        container.add_constant("greeting", String::from("hi"));

        let greeting = container.resolve::<String>("greeting").await.unwrap();

        assert_eq!(greeting, "hi");
    }

    #[tokio::test]
    async fn it_reports_constants_without_scope() {
        let container = Container::new();
        container.add_constant("answer", 42u32);

        let resolution = container.resolve_with_scope::<u32>("answer").await.unwrap();

        assert_eq!(*resolution, 42);
        assert!(resolution.effective_scope().is_none());
    }

    #[tokio::test]
    async fn it_returns_error_when_resolve_unregistered() {
        let container = Container::new();

        let result = container.resolve_provider::<String>("missing").await;

        assert!(matches!(result, Err(Error::UnregisteredToken(token)) if token == "missing"));
    }

    #[tokio::test]
    async fn it_returns_error_on_type_mismatch() {
        let container = Container::new();
        container.add_constant("answer", 42u32);

        let result = container.resolve_provider::<String>("answer").await;

        assert!(matches!(result, Err(Error::ResolveFailed { .. })));
    }

    #[tokio::test]
    async fn it_resolves_factory_with_scope_marker() {
        let container = Container::new();
        container.add_factory_provider("number", crate::inject_tokens![], |_| async { Ok::<_, Error>(7u8) });

        let resolution = container.resolve_with_scope::<u8>("number").await.unwrap();

        assert_eq!(**resolution.value(), 7);
        assert_eq!(resolution.effective_scope(), Some(Scope::Singleton));
    }

    #[tokio::test]
    async fn it_treats_dropped_parent_as_missing() {
        let child = {
            let root = Container::new();
            root.add_constant("greeting", "hi");
            root.create_child_container()
        };

        let result = child.resolve_provider::<&str>("greeting").await;

        assert!(child.parent().is_none());
        assert!(matches!(result, Err(Error::UnregisteredToken(_))));
    }

    #[tokio::test]
    async fn it_spawns_resolution() {
        let container = Container::new();
        container.add_constant("greeting", String::from("hi"));

        let greeting = container
            .spawn_resolve::<String>("greeting")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(*greeting, "hi");
    }
}
