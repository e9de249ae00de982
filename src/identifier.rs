//! Identifiers that name dependency slots in a [`Registry`](crate::Registry)

use crate::{error::Error, utils::str::short_type_name};
use std::{
    any::TypeId,
    borrow::Cow,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData
};

/// Identity of a Rust type; only the [`TypeId`] takes part in equality
#[derive(Debug, Clone, Copy)]
pub(crate) struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    #[inline]
    pub(crate) fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>()
        }
    }
}

impl PartialEq for TypeInfo {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Type-erased [`Identifier`], used as the registry map key
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot {
    ty: Option<TypeInfo>,
    key: Option<Cow<'static, str>>,
}

impl Hash for Slot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        if let Some(ty) = &self.ty {
            ty.hash(state);
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Identifier(")?;
        if let Some(ty) = &self.ty {
            write!(f, "type: {}", short_type_name(ty.name))?;
            if self.key.is_some() {
                f.write_str(", ")?;
            }
        }
        if let Some(key) = &self.key {
            write!(f, "key: {key}")?;
        }
        f.write_str(")")
    }
}

impl Slot {
    #[inline]
    pub(crate) fn not_found(&self) -> Error {
        Error::not_found(self.ty.map(|ty| ty.name), self.key.as_deref())
    }
}

/// Names a dependency of type `T`, optionally qualified by a string key.
///
/// Two identifiers are equal when their keys are equal and either both lack a type
/// or both carry the same type. `T` only takes part in equality through the type,
/// so identifiers built with [`Identifier::by_key`] collide regardless of `T`:
///
/// ```
/// use slight_di::{Identifier, Registry};
///
/// let registry = Registry::new();
/// registry.register(&Identifier::<String>::by_key("answer"), |_| "forty-two".to_string());
/// registry.register(&Identifier::<i32>::by_key("answer"), |_| 42);
///
/// // the second registration replaced the first one
/// assert_eq!(registry.len(), 1);
/// assert!(registry.resolve(&Identifier::<String>::by_key("answer")).is_err());
/// assert_eq!(registry.resolve(&Identifier::<i32>::by_key("answer")).unwrap(), 42);
/// ```
pub struct Identifier<T> {
    slot: Slot,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Identifier<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            _marker: PhantomData
        }
    }
}

impl<T> PartialEq for Identifier<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T> Eq for Identifier<T> {}

impl<T> Hash for Identifier<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
    }
}

impl<T> Debug for Identifier<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identifier")
            .field("type", &self.type_name())
            .field("key", &self.key())
            .finish()
    }
}

impl<T> Display for Identifier<T> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.slot, f)
    }
}

impl<T: 'static> Default for Identifier<T> {
    #[inline]
    fn default() -> Self {
        Self::by_type()
    }
}

impl<T: 'static> Identifier<T> {
    #[inline]
    fn from_parts(ty: Option<TypeInfo>, key: Option<Cow<'static, str>>) -> Self {
        Self {
            slot: Slot { ty, key },
            _marker: PhantomData
        }
    }

    /// Creates an identifier with neither a type nor a key
    #[inline]
    pub fn untyped() -> Self {
        Self::from_parts(None, None)
    }

    /// Creates an identifier for the type `T`
    #[inline]
    pub fn by_type() -> Self {
        Self::from_parts(Some(TypeInfo::of::<T>()), None)
    }

    /// Creates an identifier that consists of a key only
    #[inline]
    pub fn by_key(key: impl Into<Cow<'static, str>>) -> Self {
        Self::from_parts(None, Some(key.into()))
    }

    /// Creates an identifier for the type `T` qualified with a key
    #[inline]
    pub fn by_type_and_key(key: impl Into<Cow<'static, str>>) -> Self {
        Self::from_parts(Some(TypeInfo::of::<T>()), Some(key.into()))
    }

    /// Creates an identifier for the type `T` with an optional key
    #[inline]
    pub fn by(key: Option<&str>) -> Self {
        Self::from_parts(
            Some(TypeInfo::of::<T>()),
            key.map(|key| Cow::Owned(key.to_owned()))
        )
    }

    /// Adds the type `T` to this identifier
    #[inline]
    pub fn with_type(mut self) -> Self {
        self.slot.ty = Some(TypeInfo::of::<T>());
        self
    }

    /// Removes the type from this identifier, leaving the key only
    #[inline]
    pub fn without_type(mut self) -> Self {
        self.slot.ty = None;
        self
    }

    /// Replaces the key of this identifier
    #[inline]
    pub fn with_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.slot.key = Some(key.into());
        self
    }
}

impl<T> Identifier<T> {
    /// Returns the key, if any
    #[inline]
    pub fn key(&self) -> Option<&str> {
        self.slot.key.as_deref()
    }

    /// Returns the full name of the type, if the identifier has one
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        self.slot.ty.map(|ty| ty.name)
    }

    /// Returns `true` if the identifier carries a type
    #[inline]
    pub fn has_type(&self) -> bool {
        self.slot.ty.is_some()
    }

    #[inline]
    pub(crate) fn slot(&self) -> &Slot {
        &self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::Identifier;
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher}
    };

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn it_equals_by_type() {
        let a = Identifier::<String>::by_type();
        let b = Identifier::<String>::default();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn it_differs_by_key() {
        let a = Identifier::<String>::by_type_and_key("a");
        let b = Identifier::<String>::by_type_and_key("b");

        assert_ne!(a, b);
    }

    #[test]
    fn it_differs_when_only_one_side_has_type() {
        let typed = Identifier::<String>::by_type_and_key("k");
        let untyped = Identifier::<String>::by_key("k");

        assert_ne!(typed, untyped);
    }

    #[test]
    fn it_collides_for_key_only_identifiers_of_different_types() {
        let a = Identifier::<String>::by_key("k");
        let b = Identifier::<i32>::by_key("k");

        assert_eq!(a.slot(), b.slot());
        assert_eq!(hash_of(a.slot()), hash_of(b.slot()));
    }

    #[test]
    fn it_does_not_collide_for_typed_identifiers_of_different_types() {
        let a = Identifier::<String>::by_type_and_key("k");
        let b = Identifier::<i32>::by_type_and_key("k");

        assert_ne!(a.slot(), b.slot());
    }

    #[test]
    fn it_builds_typed_identifier_with_optional_key() {
        let id = Identifier::<u8>::by(Some("port"));

        assert!(id.has_type());
        assert_eq!(id.key(), Some("port"));
        assert_eq!(id, Identifier::<u8>::by_type_and_key("port"));
        assert_eq!(Identifier::<u8>::by(None), Identifier::<u8>::by_type());
    }

    #[test]
    fn it_adjusts_with_builders() {
        let id = Identifier::<u8>::untyped()
            .with_key("port")
            .with_type();

        assert_eq!(id, Identifier::<u8>::by_type_and_key("port"));
        assert_eq!(id.without_type(), Identifier::<u8>::by_key("port"));
    }

    #[test]
    fn it_displays_type_and_key() {
        assert_eq!(Identifier::<String>::by_type().to_string(), "Identifier(type: String)");
        assert_eq!(Identifier::<String>::by_key("db").to_string(), "Identifier(key: db)");
        assert_eq!(
            Identifier::<Vec<String>>::by_type_and_key("db").to_string(),
            "Identifier(type: Vec<String>, key: db)"
        );
        assert_eq!(Identifier::<String>::untyped().to_string(), "Identifier()");
    }

    #[test]
    fn it_reports_not_found_with_type_and_key() {
        let err = Identifier::<String>::by_type_and_key("db").slot().not_found();

        assert_eq!(err.to_string(), "Could not find dependency for type: String ");
        assert!(err.is_not_found());
    }
}
