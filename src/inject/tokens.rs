//! Parameter-token map of a constructible type

use crate::Token;

/// An ordered list of injection tokens, one slot per constructor parameter
///
/// Slots may be left empty, a parameter without a token is resolved
/// to an absent dependency at construction time.
///
/// # Example
/// ```
/// use arbor_di::InjectionTokens;
///
/// // parameter 1 has no recorded token
/// let tokens = InjectionTokens::new()
///     .with(0, "config")
///     .with(2, "cache");
///
/// assert_eq!(tokens.len(), 3);
/// assert!(tokens.get(1).is_none());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InjectionTokens {
    slots: Vec<Option<Token>>
}

impl InjectionTokens {
    /// Creates an empty parameter-token map
    #[inline]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Records the token of the parameter at `index`, overwriting a previous one
    ///
    /// # Panics
    /// Panics if `index + 1` slots cannot be allocated, the same way [`Vec::resize`] does.
    pub fn with(mut self, index: usize, token: impl Into<Token>) -> Self {
        if self.slots.len() <= index {
            self.slots.resize(index.saturating_add(1), None);
        }
        self.slots[index] = Some(token.into());
        self
    }

    /// Appends the token of the next parameter
    pub fn push(&mut self, token: impl Into<Token>) {
        self.slots.push(Some(token.into()));
    }

    /// Number of parameter slots
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no parameter slots were recorded
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the token of the parameter at `index`, if any
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.slots
            .get(index)
            .and_then(Option::as_ref)
    }

    /// Iterates over the parameter slots in declaration order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Option<&Token>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Returns the position of the first parameter without a token
    #[inline]
    pub fn first_missing(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }
}

impl<T: Into<Token>> FromIterator<T> for InjectionTokens {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            slots: iter
                .into_iter()
                .map(|token| Some(token.into()))
                .collect()
        }
    }
}

impl<T: Into<Token>, const N: usize> From<[T; N]> for InjectionTokens {
    #[inline]
    fn from(tokens: [T; N]) -> Self {
        tokens.into_iter().collect()
    }
}

impl<T: Into<Token>> From<Vec<T>> for InjectionTokens {
    #[inline]
    fn from(tokens: Vec<T>) -> Self {
        tokens.into_iter().collect()
    }
}
