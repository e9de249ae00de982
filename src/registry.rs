//! Dependency registry and tools

use crate::{
    error::{BoxError, Error},
    identifier::{Identifier, Slot},
    inject::{Injected, InjectedSafe}
};
use std::{
    any::Any,
    collections::HashMap,
    fmt::{self, Debug, Formatter},
    sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard}
};

pub use self::config::RegistryConfig;

pub mod config;

const STANDARD_REGISTRY_NAME: &str = "standard";

type ArcService = Arc<
    dyn Any
    + Send
    + Sync
>;

/// Inner HashMap of dependencies
type ServiceMap = HashMap<Slot, ArcService>;

static STANDARD: OnceLock<Registry> = OnceLock::new();

/// A store of dependencies keyed by [`Identifier`].
///
/// `Registry` is a handle: clones share the same dependencies,
/// while every [`Registry::new`] call creates an independent store.
///
/// # Example
/// ```
/// use slight_di::{Identifier, Registry};
///
/// #[derive(Clone)]
/// struct Config { url: String }
///
/// #[derive(Clone)]
/// struct Client { url: String }
///
/// let registry = Registry::new();
/// registry.register(&Identifier::by_type(), |_| Config { url: "localhost".into() });
/// registry.register(&Identifier::by_type(), |r| {
///     let config: Config = r.resolve(&Identifier::by_type()).unwrap();
///     Client { url: config.url }
/// });
///
/// let client: Client = registry.resolve(&Identifier::by_type()).unwrap();
/// assert_eq!(client.url, "localhost");
/// ```
#[derive(Clone)]
pub struct Registry {
    services: Arc<RwLock<ServiceMap>>,
    config: RegistryConfig,
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.config.name())
            .field("len", &self.len())
            .finish()
    }
}

impl Default for Registry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry
    #[inline]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with specific configuration
    #[inline]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            services: Arc::new(RwLock::new(ServiceMap::with_capacity(config.capacity()))),
            config,
        }
    }

    /// Returns the process-wide standard registry.
    ///
    /// Nothing in this crate requires it, except the default of
    /// [`Injected`] and [`InjectedSafe`] helpers.
    #[inline]
    pub fn standard() -> &'static Registry {
        STANDARD.get_or_init(|| {
            Self::with_config(RegistryConfig::new().with_name(STANDARD_REGISTRY_NAME))
        })
    }

    /// Returns the registry configuration
    #[inline]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Calls the `factory` immediately and stores its result under the `identifier`,
    /// replacing a previously stored dependency.
    ///
    /// The factory receives this registry, so it can resolve already registered dependencies.
    pub fn register<T, F>(&self, identifier: &Identifier<T>, factory: F)
    where
        T: Send + Sync + 'static,
        F: FnOnce(&Registry) -> T
    {
        let instance = factory(self);
        self.insert(identifier, instance);
    }

    /// Calls a fallible `factory` immediately and stores its result under the `identifier`.
    ///
    /// If the factory fails, the error is returned as [`Error::FactoryFailed`]
    /// and a previously stored dependency, if any, stays in place.
    pub fn try_register<T, E, F>(&self, identifier: &Identifier<T>, factory: F) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        E: Into<BoxError>,
        F: FnOnce(&Registry) -> Result<T, E>
    {
        match factory(self) {
            Ok(instance) => {
                self.insert(identifier, instance);
                Ok(())
            },
            Err(err) => {
                let err = Error::FactoryFailed {
                    identifier: identifier.to_string(),
                    source: err.into()
                };
                #[cfg(feature = "tracing")]
                tracing::warn!(registry = self.config.name(), "{err}");
                Err(err)
            }
        }
    }

    /// Registers a dependency for the type `T` with an optional key.
    ///
    /// The identifier always carries the type, so the dependency is not reachable
    /// through a key-only [`Identifier::by_key`].
    #[inline]
    pub fn register_by<T, F>(&self, key: Option<&str>, factory: F)
    where
        T: Send + Sync + 'static,
        F: FnOnce(&Registry) -> T
    {
        self.register(&Identifier::by(key), factory);
    }

    /// Registers a dependency for the type `T` with an optional key using a fallible factory.
    ///
    /// Like [`Registry::register_by`], the identifier always carries the type.
    #[inline]
    pub fn try_register_by<T, E, F>(&self, key: Option<&str>, factory: F) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        E: Into<BoxError>,
        F: FnOnce(&Registry) -> Result<T, E>
    {
        self.try_register(&Identifier::by(key), factory)
    }

    /// Stores a ready `instance` under the `identifier`, replacing a previously stored dependency
    pub fn insert<T: Send + Sync + 'static>(&self, identifier: &Identifier<T>, instance: T) {
        let slot = identifier.slot().clone();
        let _previous = self.write().insert(slot, Arc::new(instance));

        #[cfg(feature = "tracing")]
        if _previous.is_some() {
            tracing::debug!(registry = self.config.name(), %identifier, "dependency overwritten");
        } else {
            tracing::debug!(registry = self.config.name(), %identifier, "dependency registered");
        };
    }

    /// Resolves a dependency and returns a cloned instance.
    /// `T` must implement [`Clone`] otherwise use [`Registry::resolve_shared`] method
    /// that returns a shared pointer.
    #[inline]
    pub fn resolve<T: Send + Sync + Clone + 'static>(&self, identifier: &Identifier<T>) -> Result<T, Error> {
        self.resolve_shared(identifier)
            .map(|s| s.as_ref().clone())
    }

    /// Resolves a dependency and returns a shared pointer.
    ///
    /// Fails with [`Error::DependencyNotFound`] if nothing is stored under the `identifier`
    /// or if the stored value is not a `T`.
    pub fn resolve_shared<T: Send + Sync + 'static>(&self, identifier: &Identifier<T>) -> Result<Arc<T>, Error> {
        let service = self.read()
            .get(identifier.slot())
            .cloned();

        service
            .and_then(|service| service.downcast::<T>().ok())
            .ok_or_else(|| {
                #[cfg(feature = "tracing")]
                tracing::trace!(registry = self.config.name(), %identifier, "dependency not found");
                identifier.slot().not_found()
            })
    }

    /// Resolves a dependency for the type `T` with an optional key
    #[inline]
    pub fn resolve_by<T: Send + Sync + Clone + 'static>(&self, key: Option<&str>) -> Result<T, Error> {
        self.resolve(&Identifier::by(key))
    }

    /// Resolves a dependency, returning `None` instead of an error
    #[inline]
    pub fn resolve_safe<T: Send + Sync + Clone + 'static>(&self, identifier: &Identifier<T>) -> Option<T> {
        self.resolve(identifier).ok()
    }

    /// Resolves a shared pointer to a dependency, returning `None` instead of an error
    #[inline]
    pub fn resolve_shared_safe<T: Send + Sync + 'static>(&self, identifier: &Identifier<T>) -> Option<Arc<T>> {
        self.resolve_shared(identifier).ok()
    }

    /// Resolves a dependency for the type `T` with an optional key, returning `None` instead of an error
    #[inline]
    pub fn resolve_safe_by<T: Send + Sync + Clone + 'static>(&self, key: Option<&str>) -> Option<T> {
        self.resolve_by(key).ok()
    }

    /// Removes the dependency stored under the `identifier`, if any
    pub fn remove<T>(&self, identifier: &Identifier<T>) {
        let _removed = self.write().remove(identifier.slot());

        #[cfg(feature = "tracing")]
        if _removed.is_some() {
            tracing::debug!(registry = self.config.name(), %identifier, "dependency removed");
        };
    }

    /// Removes the dependency for the type `T` with an optional key, if any
    #[inline]
    pub fn remove_by<T: 'static>(&self, key: Option<&str>) {
        self.remove(&Identifier::<T>::by(key));
    }

    /// Removes every dependency
    pub fn remove_all_dependencies(&self) {
        self.write().clear();

        #[cfg(feature = "tracing")]
        tracing::debug!(registry = self.config.name(), "all dependencies removed");
    }

    /// Returns `true` if something is stored under the `identifier`
    #[inline]
    pub fn contains<T>(&self, identifier: &Identifier<T>) -> bool {
        self.read().contains_key(identifier.slot())
    }

    /// Returns the number of stored dependencies
    #[inline]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no dependency is stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copies every dependency of `other` into this registry,
    /// replacing dependencies stored under the same identifiers.
    ///
    /// Instances are shared, not cloned.
    pub fn extend_from(&self, other: &Registry) {
        if Arc::ptr_eq(&self.services, &other.services) {
            return;
        }

        let services = other.read()
            .iter()
            .map(|(slot, service)| (slot.clone(), service.clone()))
            .collect::<Vec<_>>();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            registry = self.config.name(),
            source = other.config.name(),
            count = services.len(),
            "dependencies copied"
        );

        self.write().extend(services);
    }

    /// Creates an independent registry that starts with the dependencies of this one
    pub fn fork(&self) -> Registry {
        let services = self.read().clone();
        Self {
            services: Arc::new(RwLock::new(services)),
            config: self.config,
        }
    }

    /// Creates an [`Injected`] helper that resolves `T` by type from this registry
    #[inline]
    pub fn injected<T: Send + Sync + 'static>(&self) -> Injected<T> {
        Injected::<T>::new().with_registry(self.clone())
    }

    /// Creates an [`InjectedSafe`] helper that resolves `T` by type from this registry
    #[inline]
    pub fn injected_safe<T: Send + Sync + 'static>(&self) -> InjectedSafe<T> {
        InjectedSafe::<T>::new().with_registry(self.clone())
    }

    /// Recovers the map from a poisoned lock
    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, ServiceMap> {
        self.services
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, ServiceMap> {
        self.services
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
