//! Lazily resolved dependencies
//!
//! [`Injected`] and [`InjectedSafe`] resolve a dependency on first access and
//! keep the result, so later changes to the registry do not affect them.

use crate::{error::Error, identifier::Identifier, registry::Registry};
use std::{
    fmt::{self, Debug, Formatter},
    ops::Deref,
    sync::{Arc, OnceLock}
};

/// A dependency that must be resolvable.
///
/// Resolves from [`Registry::standard`] by type unless configured otherwise.
/// If resolution fails, a value supplied with [`Injected::with_default`] is used instead;
/// without a default, the first access panics.
///
/// # Example
/// ```
/// use slight_di::{Identifier, Injected, Registry};
///
/// struct Greeter {
///     greeting: Injected<String>,
/// }
///
/// let registry = Registry::new();
/// registry.register(&Identifier::by_key("greeting"), |_| "hello".to_string());
///
/// let greeter = Greeter {
///     greeting: Injected::<String>::new()
///         .with_identifier(Identifier::by_key("greeting"))
///         .with_registry(registry.clone()),
/// };
///
/// assert_eq!(*greeter.greeting, "hello");
/// ```
pub struct Injected<T> {
    identifier: Identifier<T>,
    registry: Registry,
    default: Option<Arc<T>>,
    value: OnceLock<Arc<T>>,
}

impl<T: Send + Sync + 'static> Default for Injected<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for Injected<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injected")
            .field("identifier", &self.identifier)
            .field("resolved", &self.value.get().is_some())
            .finish()
    }
}

impl<T: Send + Sync + 'static> Injected<T> {
    /// Creates a helper that resolves `T` by type from the standard registry
    #[inline]
    pub fn new() -> Self {
        Self {
            identifier: Identifier::by_type(),
            registry: Registry::standard().clone(),
            default: None,
            value: OnceLock::new(),
        }
    }

    /// Resolves by a specific identifier
    pub fn with_identifier(mut self, identifier: Identifier<T>) -> Self {
        self.identifier = identifier;
        self.value = OnceLock::new();
        self
    }

    /// Resolves from a specific registry
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self.value = OnceLock::new();
        self
    }

    /// Falls back to `value` if the dependency cannot be resolved
    pub fn with_default(mut self, value: T) -> Self {
        self.default = Some(Arc::new(value));
        self
    }

    /// Returns the identifier the dependency is resolved by
    #[inline]
    pub fn identifier(&self) -> &Identifier<T> {
        &self.identifier
    }

    /// Returns `true` if the dependency has been resolved and cached
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }

    /// Returns the dependency, resolving it on first access.
    ///
    /// A failed resolution without a default is not cached, so a later call may succeed.
    pub fn try_get(&self) -> Result<&T, Error> {
        if let Some(value) = self.value.get() {
            return Ok(value.as_ref());
        }

        let value = match self.registry.resolve_shared(&self.identifier) {
            Ok(value) => value,
            Err(err) => match &self.default {
                Some(default) => default.clone(),
                None => return Err(err),
            }
        };

        Ok(self.value.get_or_init(|| value).as_ref())
    }

    /// Returns the dependency, resolving it on first access
    ///
    /// # Panics
    /// Panics if the dependency cannot be resolved and no default value was supplied.
    pub fn get(&self) -> &T {
        match self.try_get() {
            Ok(value) => value,
            Err(err) => panic!("{err}")
        }
    }
}

impl<T: Send + Sync + 'static> Deref for Injected<T> {
    type Target = T;

    /// # Panics
    /// Panics if the dependency cannot be resolved and no default value was supplied.
    #[inline]
    fn deref(&self) -> &T {
        self.get()
    }
}

/// A dependency that may be missing.
///
/// Resolves from [`Registry::standard`] by type unless configured otherwise.
/// The outcome of the first access, found or not, is kept.
pub struct InjectedSafe<T> {
    identifier: Identifier<T>,
    registry: Registry,
    value: OnceLock<Option<Arc<T>>>,
}

impl<T: Send + Sync + 'static> Default for InjectedSafe<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for InjectedSafe<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectedSafe")
            .field("identifier", &self.identifier)
            .field("resolved", &self.value.get().is_some())
            .finish()
    }
}

impl<T: Send + Sync + 'static> InjectedSafe<T> {
    /// Creates a helper that resolves `T` by type from the standard registry
    #[inline]
    pub fn new() -> Self {
        Self {
            identifier: Identifier::by_type(),
            registry: Registry::standard().clone(),
            value: OnceLock::new(),
        }
    }

    /// Resolves by a specific identifier
    pub fn with_identifier(mut self, identifier: Identifier<T>) -> Self {
        self.identifier = identifier;
        self.value = OnceLock::new();
        self
    }

    /// Resolves from a specific registry
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self.value = OnceLock::new();
        self
    }

    /// Returns the identifier the dependency is resolved by
    #[inline]
    pub fn identifier(&self) -> &Identifier<T> {
        &self.identifier
    }

    /// Returns the dependency, or `None` if it could not be resolved on first access
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.value
            .get_or_init(|| self.registry.resolve_shared_safe(&self.identifier))
            .as_deref()
    }
}
