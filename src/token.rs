//! Provider tokens

use std::{
    borrow::Borrow,
    fmt::{self, Display, Formatter},
    ops::Deref,
    sync::Arc
};

/// An opaque string key that identifies a provider inside a [`Container`](crate::Container)
///
/// Tokens are unique only within a single container's registry.
/// Cloning a token is cheap, the underlying string is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(Arc<str>);

impl Token {
    /// Creates a new token
    #[inline]
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(Arc::from(token.as_ref()))
    }

    /// Returns the token as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Token {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Token {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Token {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    #[inline]
    fn from(token: &str) -> Self {
        Self(Arc::from(token))
    }
}

impl From<String> for Token {
    #[inline]
    fn from(token: String) -> Self {
        Self(Arc::from(token))
    }
}

impl From<&String> for Token {
    #[inline]
    fn from(token: &String) -> Self {
        Self::new(token)
    }
}

impl From<&Token> for Token {
    #[inline]
    fn from(token: &Token) -> Self {
        token.clone()
    }
}

impl PartialEq<str> for Token {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Token {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
