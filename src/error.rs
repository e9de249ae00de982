//! Describes dependency injection errors

use crate::utils::str::short_type_name;
use std::{
    error::Error as StdError,
    fmt::{Display, Formatter}
};

/// A boxed error returned by a fallible factory
pub type BoxError = Box<
    dyn StdError
    + Send
    + Sync
>;

const NOT_FOUND_PREFIX: &str = "Could not find dependency for ";

/// Errors produced by the [`Registry`](crate::Registry)
#[derive(Debug)]
pub enum Error {
    /// Nothing is stored under the requested identifier,
    /// or the stored value is of a different type.
    DependencyNotFound {
        /// Full type name of the identifier, if it has a type
        type_name: Option<&'static str>,
        /// Key of the identifier, if any
        key: Option<String>,
    },

    /// A fallible factory returned an error during registration
    FactoryFailed {
        /// Rendered identifier the factory was registered under
        identifier: String,
        /// The error returned by the factory
        source: BoxError,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DependencyNotFound { type_name, key } => {
                f.write_str(NOT_FOUND_PREFIX)?;
                // the type wins over the key when both are known
                if let Some(type_name) = type_name {
                    write!(f, "type: {} ", short_type_name(type_name))
                } else if let Some(key) = key {
                    write!(f, "key: {key}")
                } else {
                    Ok(())
                }
            },
            Error::FactoryFailed { identifier, source } =>
                write!(f, "Failed to register dependency {identifier}: {source}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::FactoryFailed { source, .. } => Some(source.as_ref()),
            _ => None
        }
    }
}

impl Error {
    /// Creates a [`Error::DependencyNotFound`] error
    #[inline]
    pub fn not_found(type_name: Option<&'static str>, key: Option<&str>) -> Self {
        Self::DependencyNotFound {
            type_name,
            key: key.map(str::to_owned)
        }
    }

    /// Returns `true` if this is a [`Error::DependencyNotFound`] error
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::DependencyNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::error::Error as StdError;

    #[test]
    fn it_formats_type_only() {
        let err = Error::not_found(Some(std::any::type_name::<String>()), None);

        assert_eq!(err.to_string(), "Could not find dependency for type: String ");
    }

    #[test]
    fn it_formats_key_only() {
        let err = Error::not_found(None, Some("someKey"));

        assert_eq!(err.to_string(), "Could not find dependency for key: someKey");
    }

    #[test]
    fn it_prefers_type_over_key() {
        let err = Error::not_found(Some(std::any::type_name::<String>()), Some("someKey"));

        assert_eq!(err.to_string(), "Could not find dependency for type: String ");
    }

    #[test]
    fn it_formats_empty_subject() {
        let err = Error::not_found(None, None);

        assert_eq!(err.to_string(), "Could not find dependency for ");
    }

    #[test]
    fn it_formats_generic_type_names() {
        let err = Error::not_found(Some(std::any::type_name::<Option<Vec<String>>>()), None);

        assert_eq!(err.to_string(), "Could not find dependency for type: Option<Vec<String>> ");
    }

    #[test]
    fn it_exposes_factory_error_source() {
        let err = Error::FactoryFailed {
            identifier: "Identifier(key: db)".into(),
            source: "connection refused".into()
        };

        assert_eq!(err.to_string(), "Failed to register dependency Identifier(key: db): connection refused");
        assert_eq!(err.source().unwrap().to_string(), "connection refused");
        assert!(!err.is_not_found());
    }
}
