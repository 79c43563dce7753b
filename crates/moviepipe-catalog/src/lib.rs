//! CatalogProvider trait and the built-in static catalog.
//!
//! The worker's dispatcher does not care where movie records come from; it
//! is handed a [`CatalogProvider`] capability at construction time, so the
//! data source can be swapped (static list, database, file) without
//! touching the protocol code.

mod builtin;
mod error;
mod provider;

pub use builtin::StaticCatalog;
pub use error::{CatalogError, CatalogResult};
pub use provider::CatalogProvider;
