//! # Kinoteka Catalog
//!
//! TMDB v3 lookups behind the [`kinoteka_core::Catalog`] trait. Requests are
//! blocking; the organizer processes one file at a time and waits on the
//! answer anyway.

pub mod error;
pub mod tmdb;

pub use error::{CatalogError, Result};
pub use tmdb::{TMDB_BASE_URL, TmdbClient};
