//! # Arbor DI
//!
//! > Hierarchical, token-keyed, async dependency injection built on [Tokio](https://tokio.rs/).
//!
//! ## Features
//! * String tokens mapped to constants, constructible types and async factories
//! * Singleton and transient lifetimes, with transient-ness propagated to dependents
//! * Trees of containers: children shadow and delegate to their parents
//! * Post-construction lifecycle hooks for classes and hooked factories
//! * Cycle detection and at-most-once singleton construction under concurrency
//!
//! ## Example
//! ```toml
//! [dependencies]
//! arbor-di = "0.1.0"
//! tokio = { version = "1", features = ["full"] }
//! ```
//! ```
//! use arbor_di::{AfterInit, Container, Dependencies, Error, Inject, InjectionTokens, inject_tokens};
//! use std::sync::Arc;
//!
//! struct Repository {
//!     url: Arc<String>
//! }
//!
//! impl Inject for Repository {
//!     fn injection_tokens() -> InjectionTokens {
//!         inject_tokens!["database_url"]
//!     }
//!
//!     async fn inject(deps: Dependencies) -> Result<Self, Error> {
//!         Ok(Self { url: deps.get(0)? })
//!     }
//! }
//!
//! impl AfterInit for Repository {}
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let root = Container::new();
//!     root.add_constant("database_url", String::from("postgres://localhost"));
//!     root.add_provider::<Repository>("repository");
//!
//!     let scope = root.create_child_container();
//!     let repository = scope.resolve_provider::<Repository>("repository").await?;
//!
//!     assert_eq!(*repository.url, "postgres://localhost");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(unreachable_pub)]

mod lifecycle;

pub mod config;
pub mod container;
pub mod error;
pub mod inject;
pub mod provider;
pub mod resolve;
pub mod scope;
pub mod token;

pub use crate::{
    config::ContainerConfig,
    container::{Container, ContainerId},
    error::Error,
    inject::{AfterInit, Dependencies, Inject, InjectionTokens},
    provider::{ProviderKind, ProviderOptions},
    resolve::Resolution,
    scope::Scope,
    token::Token
};
