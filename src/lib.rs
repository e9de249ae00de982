//! # slight-di
//!
//! > A slight dependency injection registry: store factory-produced instances
//! > under a type and/or a string key, and resolve them where they are needed.
//!
//! ## Features
//! * Dependencies keyed by type, by name, or by both
//! * Eager factories that can resolve other dependencies
//! * Independent registries, plus an opt-in process-wide one
//! * Lazily resolved [`Injected`] and [`InjectedSafe`] helpers
//! * Thread-safe: a [`Registry`] is `Send + Sync`
//!
//! ## Example
//! ```
//! use slight_di::{Identifier, Registry};
//!
//! let registry = Registry::new();
//!
//! registry.register(&Identifier::by_type(), |_| 8080_u16);
//! registry.register(&Identifier::by_key("host"), |_| "localhost".to_string());
//! registry.register(&Identifier::by_type(), |r| {
//!     let host: String = r.resolve(&Identifier::by_key("host")).unwrap();
//!     let port: u16 = r.resolve(&Identifier::by_type()).unwrap();
//!     format!("{host}:{port}")
//! });
//!
//! let address: String = registry.resolve(&Identifier::by_type()).unwrap();
//! assert_eq!(address, "localhost:8080");
//!
//! let missing = registry.resolve(&Identifier::<i64>::by_type());
//! assert_eq!(missing.unwrap_err().to_string(), "Could not find dependency for type: i64 ");
//! ```

pub(crate) mod utils;

pub mod error;
pub mod identifier;
pub mod inject;
pub mod registry;

pub use crate::{
    error::Error,
    identifier::Identifier,
    inject::{Injected, InjectedSafe},
    registry::{Registry, RegistryConfig},
};
