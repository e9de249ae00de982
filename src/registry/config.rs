//! Registry configuration

const DEFAULT_REGISTRY_NAME: &str = "default";

/// Represents a [`Registry`](crate::Registry) configuration
#[derive(Debug, Clone, Copy)]
pub struct RegistryConfig {
    /// A name reported in log events of the registry
    ///
    /// Default: `default`
    name: &'static str,

    /// Number of dependencies the registry preallocates room for
    ///
    /// Default: `0`
    capacity: usize,
}

impl Default for RegistryConfig {
    #[inline]
    fn default() -> Self {
        Self {
            name: DEFAULT_REGISTRY_NAME,
            capacity: 0,
        }
    }
}

impl RegistryConfig {
    /// Creates a default registry configuration
    ///
    /// Defaults:
    /// - name: `default`
    /// - capacity: `0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the name reported in log events
    ///
    /// Default: `default`
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Configures how many dependencies the registry preallocates room for
    ///
    /// Default: `0`
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns the registry name
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the preallocated capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
