use crate::error::Result;
use crate::types::{CatalogCandidate, MediaKind};

/// External movie/TV metadata service.
///
/// Implementations report transport and credential failures as
/// `KinotekaError::Catalog`; the resolver turns those into "no match".
pub trait Catalog {
    /// Tag used in canonical names, e.g. `tmdbid`.
    fn id_tag(&self) -> &str;

    fn search_movie(&self, title: &str, year: Option<u16>) -> Result<Vec<CatalogCandidate>>;

    fn search_tv(&self, title: &str, year: Option<u16>) -> Result<Vec<CatalogCandidate>>;

    /// Dispatches on `kind`.
    fn search(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<u16>,
    ) -> Result<Vec<CatalogCandidate>> {
        match kind {
            MediaKind::Movie => self.search_movie(title, year),
            MediaKind::Series => self.search_tv(title, year),
        }
    }
}

impl<C: Catalog + ?Sized> Catalog for Box<C> {
    fn id_tag(&self) -> &str {
        (**self).id_tag()
    }

    fn search_movie(&self, title: &str, year: Option<u16>) -> Result<Vec<CatalogCandidate>> {
        (**self).search_movie(title, year)
    }

    fn search_tv(&self, title: &str, year: Option<u16>) -> Result<Vec<CatalogCandidate>> {
        (**self).search_tv(title, year)
    }
}
