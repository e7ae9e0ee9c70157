//! Provider lifetimes and effective scope tracking

use std::fmt::{self, Display, Formatter};

/// Lifetime of the instances produced by a class or factory provider
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// One instance per owning container, created on first resolution
    #[default]
    Singleton,

    /// A new instance on every resolution
    Transient
}

impl Display for Scope {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Singleton => f.write_str("singleton"),
            Scope::Transient => f.write_str("transient")
        }
    }
}

impl Scope {
    /// Returns `true` for [`Scope::Transient`]
    #[inline]
    pub fn is_transient(self) -> bool {
        self == Scope::Transient
    }
}

/// Computes the effective scope of an instance from its declared scope
/// and the scope markers of its resolved dependencies.
///
/// A single transient dependency makes the dependent transient.
/// Dependencies without a marker (constants and absent slots) never do.
#[inline]
pub(crate) fn effective<I>(declared: Scope, markers: I) -> Scope
where
    I: IntoIterator<Item = Option<Scope>>
{
    let infected = markers
        .into_iter()
        .any(|marker| marker == Some(Scope::Transient));
    if infected {
        Scope::Transient
    } else {
        declared
    }
}

/// Only instances that were declared singleton and stayed singleton
/// after propagation are written into the definition's cache slot.
#[inline]
pub(crate) fn is_cacheable(declared: Scope, effective: Scope) -> bool {
    declared == Scope::Singleton && effective == Scope::Singleton
}
