use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::catalog::Catalog;
use super::select::{CandidateSelector, Selection};
use crate::config::ResolveMode;
use crate::error::{KinotekaError, Result};
use crate::types::{CatalogCandidate, MediaKind, ResolutionOutcome};

/// The top candidate is accepted outright when its popularity exceeds the
/// runner-up's by more than this factor.
pub const CONFIDENCE_MARGIN: f64 = 1.5;

type CacheKey = (MediaKind, String, Option<u16>);

/// Filters and ranks catalog candidates, asking the user only when ranking
/// cannot decide. Outcomes are memoised per (kind, title, year) for the
/// lifetime of the resolver.
pub struct CandidateResolver {
    catalog: Option<Box<dyn Catalog>>,
    mode: ResolveMode,
    cache: HashMap<CacheKey, ResolutionOutcome>,
}

impl CandidateResolver {
    pub fn new(catalog: Option<Box<dyn Catalog>>, mode: ResolveMode) -> Self {
        Self {
            catalog,
            mode,
            cache: HashMap::new(),
        }
    }

    /// Resolver with catalog lookups switched off.
    pub fn disabled() -> Self {
        Self::new(None, ResolveMode::Automatic)
    }

    pub fn is_enabled(&self) -> bool {
        self.catalog.is_some()
    }

    /// Tag of the configured catalog, used for `[<tag>-<id>]`.
    pub fn id_tag(&self) -> Option<&str> {
        self.catalog.as_deref().map(|c| c.id_tag())
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Number of memoised lookups.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Resolves `title` against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`KinotekaError::Aborted`] when the user quits at the prompt.
    /// Catalog failures are logged and reported as
    /// [`ResolutionOutcome::NotFound`].
    pub fn resolve(
        &mut self,
        kind: MediaKind,
        title: &str,
        year: Option<u16>,
        file_hint: Option<&str>,
        selector: &mut dyn CandidateSelector,
    ) -> Result<ResolutionOutcome> {
        let Some(catalog) = self.catalog.as_deref() else {
            return Ok(ResolutionOutcome::Disabled);
        };

        let key = (kind, title.to_string(), year);
        if let Some(hit) = self.cache.get(&key) {
            debug!(%kind, title, ?year, "catalog cache hit");
            return Ok(hit.clone());
        }

        let candidates = match catalog.search(kind, title, year) {
            Ok(found) => found,
            Err(e) => {
                warn!(%kind, title, error = %e, "catalog lookup failed");
                Vec::new()
            }
        };

        let outcome = if candidates.is_empty() {
            warn!(%kind, title, ?year, "no catalog match");
            ResolutionOutcome::NotFound
        } else {
            let ranked = rank(&candidates, title, year);
            self.decide(kind, title, ranked, file_hint, selector)?
        };

        if let ResolutionOutcome::Accepted(c) = &outcome {
            info!(%kind, title, id = c.id, matched = %c, "catalog match");
        }
        self.cache.insert(key, outcome.clone());
        Ok(outcome)
    }

    fn decide(
        &self,
        kind: MediaKind,
        title: &str,
        ranked: Vec<CatalogCandidate>,
        file_hint: Option<&str>,
        selector: &mut dyn CandidateSelector,
    ) -> Result<ResolutionOutcome> {
        if is_confident(&ranked) {
            return Ok(accept_top(ranked));
        }

        let prompt = match self.mode {
            ResolveMode::Automatic => false,
            ResolveMode::SemiInteractive => !strictly_ahead(&ranked),
            ResolveMode::Interactive => true,
        };
        if !prompt {
            debug!(title, mode = ?self.mode, "ranking undecided, taking most popular");
            return Ok(accept_top(ranked));
        }

        match selector.select(title, kind, &ranked, file_hint) {
            Selection::Pick(i) if i < ranked.len() => {
                Ok(ResolutionOutcome::Accepted(ranked[i].clone()))
            }
            Selection::Pick(i) => {
                warn!(title, index = i, "selection out of range, skipping");
                Ok(ResolutionOutcome::Deferred(ranked))
            }
            Selection::Skip => {
                info!(title, "catalog selection skipped");
                Ok(ResolutionOutcome::Deferred(ranked))
            }
            Selection::Quit => Err(KinotekaError::Aborted),
        }
    }
}

/// Narrows `candidates` by year, then by case-insensitive exact title, each
/// step applied only when it keeps at least one candidate, and sorts the
/// survivors by popularity (most popular first).
pub fn rank(candidates: &[CatalogCandidate], title: &str, year: Option<u16>) -> Vec<CatalogCandidate> {
    let mut pool: Vec<&CatalogCandidate> = candidates.iter().collect();

    if let Some(year) = year {
        narrow(&mut pool, |c| c.year() == Some(year));
    }
    let wanted = title.to_lowercase();
    narrow(&mut pool, |c| c.title.to_lowercase() == wanted);

    let mut ranked: Vec<CatalogCandidate> = pool.into_iter().cloned().collect();
    ranked.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
    ranked
}

fn narrow(pool: &mut Vec<&CatalogCandidate>, keep: impl Fn(&CatalogCandidate) -> bool) {
    let survivors: Vec<&CatalogCandidate> = pool.iter().copied().filter(|c| keep(*c)).collect();
    if !survivors.is_empty() {
        *pool = survivors;
    }
}

/// One survivor, or a top candidate more than [`CONFIDENCE_MARGIN`] times as
/// popular as the runner-up.
pub fn is_confident(ranked: &[CatalogCandidate]) -> bool {
    match ranked {
        [_] => true,
        [top, second, ..] => top.popularity > second.popularity * CONFIDENCE_MARGIN,
        [] => false,
    }
}

fn strictly_ahead(ranked: &[CatalogCandidate]) -> bool {
    match ranked {
        [top, second, ..] => top.popularity > second.popularity,
        _ => true,
    }
}

fn accept_top(ranked: Vec<CatalogCandidate>) -> ResolutionOutcome {
    match ranked.into_iter().next() {
        Some(top) => ResolutionOutcome::Accepted(top),
        None => ResolutionOutcome::NotFound,
    }
}
