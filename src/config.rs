//! Container configuration

/// Represents a container configuration
///
/// Child containers inherit the configuration of their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Specifies whether a resolution that re-enters a provider
    /// which is still being constructed fails with a circular dependency error
    ///
    /// Default: `true`
    pub(crate) detect_cycles: bool,

    /// Specifies whether concurrent first resolutions of the same singleton
    /// on the same container are serialized, so the provider is constructed at most once
    ///
    /// Default: `true`
    pub(crate) single_flight: bool,

    /// Specifies whether a constructor parameter without an injection token
    /// fails the resolution instead of yielding an absent dependency
    ///
    /// Default: `false`
    pub(crate) strict_tokens: bool,
}

impl Default for ContainerConfig {
    #[inline]
    fn default() -> Self {
        Self {
            detect_cycles: true,
            single_flight: true,
            strict_tokens: false,
        }
    }
}

impl ContainerConfig {
    /// Creates a default container configuration
    ///
    /// Defaults:
    /// - detect_cycles: `true`
    /// - single_flight: `true`
    /// - strict_tokens: `false`
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether circular dependencies are detected
    ///
    /// Default: `true`
    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    /// Configures whether concurrent first resolutions of a singleton are serialized
    ///
    /// Default: `true`
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled;
        self
    }

    /// Configures missing injection tokens to fail the resolution
    ///
    /// Default: `false`
    pub fn with_strict_tokens(mut self) -> Self {
        self.strict_tokens = true;
        self
    }

    /// Returns whether circular dependencies are detected
    #[inline]
    pub fn detect_cycles(&self) -> bool {
        self.detect_cycles
    }

    /// Returns whether concurrent first resolutions of a singleton are serialized
    #[inline]
    pub fn single_flight(&self) -> bool {
        self.single_flight
    }

    /// Returns whether missing injection tokens fail the resolution
    #[inline]
    pub fn strict_tokens(&self) -> bool {
        self.strict_tokens
    }
}
