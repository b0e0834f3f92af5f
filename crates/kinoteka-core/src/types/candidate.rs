use std::fmt;

use serde::{Deserialize, Serialize};

/// One catalog search result considered as a match for a local title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCandidate {
    /// Catalog identifier.
    pub id: u64,
    /// Display title (movie title or series name).
    pub title: String,
    /// Release or first-air date as reported by the catalog (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// Catalog popularity; higher is more popular.
    pub popularity: f64,
    /// Short synopsis for interactive selection.
    pub overview: Option<String>,
}

impl CatalogCandidate {
    /// The four-digit year prefix of [`Self::date`], if any.
    #[must_use]
    pub fn year(&self) -> Option<u16> {
        self.date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }
}

impl fmt::Display for CatalogCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year() {
            Some(year) => write!(f, "{} ({year})", self.title),
            None => write!(f, "{} (????)", self.title),
        }
    }
}

/// A catalog identifier rendered as `[<tag>-<id>]` in canonical names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogId {
    /// Provider tag such as `tmdbid`.
    pub tag: String,
    /// Identifier within the provider.
    pub id: u64,
}

impl CatalogId {
    #[must_use]
    pub fn new(tag: impl Into<String>, id: u64) -> Self {
        Self { tag: tag.into(), id }
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.tag, self.id)
    }
}

/// Result of resolving a cleaned title against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolutionOutcome {
    /// A single candidate was chosen automatically or by the user.
    Accepted(CatalogCandidate),
    /// Ranking could not decide and the user skipped the selection.
    Deferred(Vec<CatalogCandidate>),
    /// The catalog returned nothing (or was unreachable).
    NotFound,
    /// Catalog lookups are switched off.
    Disabled,
}

impl ResolutionOutcome {
    /// The accepted candidate, if any.
    #[must_use]
    pub fn accepted(&self) -> Option<&CatalogCandidate> {
        match self {
            Self::Accepted(candidate) => Some(candidate),
            _ => None,
        }
    }
}
