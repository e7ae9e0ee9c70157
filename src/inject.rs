//! Utilities to declare constructible providers

use crate::error::Error;
use futures_util::future::ok;
use std::future::Future;

pub use self::{
    dependencies::Dependencies,
    tokens::InjectionTokens
};

pub mod dependencies;
pub mod tokens;

/// A trait that makes a type constructible by the DI container
///
/// `injection_tokens` describes which tokens feed the constructor parameters, in order.
/// `inject` receives the resolved values in the same order.
///
/// # Example
/// ```
/// use arbor_di::{AfterInit, Container, Dependencies, Error, Inject, InjectionTokens, inject_tokens};
/// use std::sync::Arc;
///
/// struct Greeter {
///     greeting: Arc<String>
/// }
///
/// impl Inject for Greeter {
///     fn injection_tokens() -> InjectionTokens {
///         inject_tokens!["greeting"]
///     }
///
///     async fn inject(deps: Dependencies) -> Result<Self, Error> {
///         Ok(Self { greeting: deps.get(0)? })
///     }
/// }
///
/// impl AfterInit for Greeter {}
///
///# #[tokio::main]
///# async fn main() -> Result<(), Error> {
/// let container = Container::new();
/// container.add_constant("greeting", String::from("hi"));
/// container.add_provider::<Greeter>("greeter");
///
/// let greeter = container.resolve_provider::<Greeter>("greeter").await?;
/// assert_eq!(*greeter.greeting, "hi");
///# Ok(())
///# }
/// ```
pub trait Inject: AfterInit + Sized {
    /// Ordered injection tokens of the constructor parameters
    ///
    /// Read once, when the provider is registered.
    #[inline]
    fn injection_tokens() -> InjectionTokens {
        InjectionTokens::new()
    }

    /// Constructs the instance from its resolved dependencies
    fn inject(deps: Dependencies) -> impl Future<Output = Result<Self, Error>> + Send;
}

/// Post-construction hook of a provided value
///
/// Every [`Inject`] type implements it, an empty `impl` keeps the no-op default.
/// Factory values run it when registered with
/// [`Container::add_hooked_factory_provider`](crate::Container::add_hooked_factory_provider).
/// The hook runs once per physical construction and is awaited before the instance is shared.
///
/// # Example
/// ```
/// use arbor_di::{AfterInit, Dependencies, Error, Inject};
///
/// struct Pool {
///     warmed_up: bool
/// }
///
/// impl Inject for Pool {
///     async fn inject(_: Dependencies) -> Result<Self, Error> {
///         Ok(Self { warmed_up: false })
///     }
/// }
///
/// impl AfterInit for Pool {
///     async fn after_init(&mut self) -> Result<(), Error> {
///         self.warmed_up = true;
///         Ok(())
///     }
/// }
/// ```
pub trait AfterInit: Send + Sync + 'static {
    /// Runs right after the value is built
    #[inline]
    fn after_init(&mut self) -> impl Future<Output = Result<(), Error>> + Send {
        ok(())
    }
}

/// Builds an [`InjectionTokens`] list from tokens given in parameter order.
///
/// # Example
/// ```
/// use arbor_di::inject_tokens;
///
/// let tokens = inject_tokens!["config", "cache"];
/// assert_eq!(tokens.len(), 2);
///
/// let none = inject_tokens![];
/// assert!(none.is_empty());
/// ```
#[macro_export]
macro_rules! inject_tokens {
    () => {
        $crate::InjectionTokens::new()
    };
    ($($token:expr),+ $(,)?) => {{
        let mut tokens = $crate::InjectionTokens::new();
        $(tokens.push($token);)+
        tokens
    }};
}

/// An `injectable!` macro that implements [`Inject`] for one or more
/// dependency-free types by calling [`Default::default`],
/// along with a no-op [`AfterInit`].
///
/// # Example
/// ```
/// use arbor_di::{Container, injectable};
///
/// #[derive(Default)]
/// struct Clock;
///
/// #[derive(Default)]
/// struct Metrics;
///
/// injectable! {
///     Clock
///     Metrics
/// };
///
/// let container = Container::new();
/// container.add_provider::<Clock>("clock");
/// container.add_provider::<Metrics>("metrics");
/// ```
#[macro_export]
macro_rules! injectable {
    ($($name:ident)*) => {
        $(impl $crate::Inject for $name {
            #[inline]
            async fn inject(_: $crate::Dependencies) -> Result<Self, $crate::Error> {
                Ok(<$name as ::std::default::Default>::default())
            }
        }

        impl $crate::AfterInit for $name {})*
    };
}
