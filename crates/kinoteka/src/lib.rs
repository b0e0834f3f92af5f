//! # Kinoteka
//!
//! Sorts downloaded movies and TV episodes into a Jellyfin-style library.
//!
//! The engine lives in [`kinoteka_core`] and is re-exported here unchanged;
//! [`catalog`] adds the TMDB lookup service.
//!
//! ```rust
//! use kinoteka::{ClassificationVerdict, TitleClassifier};
//!
//! let classifier = TitleClassifier::new(&[]).unwrap();
//! assert!(matches!(
//!     classifier.classify("Movie.Title.2010.720p.mkv"),
//!     ClassificationVerdict::Movie
//! ));
//! ```

pub use kinoteka_core::*;

/// TMDB implementation of [`Catalog`].
pub mod catalog {
    pub use kinoteka_catalog::*;
}

pub use kinoteka_catalog::{CatalogError, TmdbClient};
