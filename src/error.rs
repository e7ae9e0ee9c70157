//! Describes dependency injection errors

use crate::Token;
use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter}
};

type BoxError = Box<
    dyn StdError
    + Send
    + Sync
>;

/// Errors that can surface while registering or resolving providers
#[derive(Debug)]
pub enum Error {
    /// The token is registered neither in the resolving container nor in any of its ancestors
    UnregisteredToken(Token),

    /// The provider kind name does not match any known provider kind
    UndefinedProviderType(String),

    /// The provider produced a value of a different type than requested
    ResolveFailed {
        token: Token,
        type_name: &'static str
    },

    /// A constructor asked for a dependency slot that holds no value
    MissingDependency {
        token: Token,
        index: usize
    },

    /// A constructor parameter has no recorded injection token (strict mode only)
    MissingInjectionToken {
        token: Token,
        index: usize
    },

    /// Resolution re-entered a provider that is already being constructed
    CircularDependency(String),

    /// An error raised by a constructor, a factory or a lifecycle hook
    Other(BoxError)
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnregisteredToken(token) => write!(f, "DI Error: token `{token}` is not registered in this context"),
            Error::UndefinedProviderType(kind) => write!(f, "DI Error: undefined provider type: {kind}"),
            Error::ResolveFailed { token, type_name } => write!(f, "DI Error: provider `{token}` could not be resolved as {type_name}"),
            Error::MissingDependency { token, index } => write!(f, "DI Error: provider `{token}` has no dependency at position {index}"),
            Error::MissingInjectionToken { token, index } => write!(f, "DI Error: provider `{token}` has no injection token for parameter {index}"),
            Error::CircularDependency(path) => write!(f, "DI Error: circular dependency detected: {path}"),
            Error::Other(err) => write!(f, "{err}")
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Other(err) => Some(err.as_ref()),
            _ => None
        }
    }
}

impl Error {
    /// Wraps an arbitrary error raised by user code
    #[inline]
    pub fn other(err: impl Into<BoxError>) -> Self {
        Self::Other(err.into())
    }

    /// Returns `true` if the error was caused by a token missing from the whole container chain
    #[inline]
    pub fn is_unregistered(&self) -> bool {
        matches!(self, Error::UnregisteredToken(_))
    }

    #[inline]
    pub(crate) fn unregistered(token: &Token) -> Self {
        Self::UnregisteredToken(token.clone())
    }

    #[inline]
    pub(crate) fn resolve_failed<T>(token: &Token) -> Self {
        Self::ResolveFailed {
            token: token.clone(),
            type_name: std::any::type_name::<T>()
        }
    }
}
