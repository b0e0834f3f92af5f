//! # Media Processors
//!
//! A [`MediaProcessor`] turns one classified filename into a [`FilePlan`]:
//! fields are collected with the shared [`TitleToolkit`], resolved against
//! the catalog and rendered by the [`NameFormatter`]. Planning never touches
//! the filesystem; the organizer carries plans out through a relocator.

pub mod directory;
pub mod movie;
pub mod series;
pub mod toolkit;

pub use directory::{DirectoryPlan, DirectoryProcessor, EpisodePlan};
pub use movie::MovieProcessor;
pub use series::SeriesProcessor;
pub use toolkit::{TitleToolkit, extension_of};

use serde::Serialize;

use crate::error::{KinotekaError, Result};
use crate::format::{MediaFields, NameFormatter};
use crate::resolve::{CandidateResolver, CandidateSelector};
use crate::types::{CanonicalName, CatalogId, MediaKind, ResolutionOutcome};

/// Outcome of planning one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilePlan {
    /// Fields after catalog resolution.
    pub fields: MediaFields,
    pub outcome: ResolutionOutcome,
    pub canonical: CanonicalName,
}

/// Common interface of the movie and series processors.
pub trait MediaProcessor {
    fn kind(&self) -> MediaKind;

    /// Plans the canonical name for `file_name`.
    ///
    /// # Errors
    ///
    /// Returns `KinotekaError::EmptyInput` when no title survives cleaning
    /// and propagates `KinotekaError::Aborted` from the candidate selector.
    fn plan(
        &self,
        file_name: &str,
        resolver: &mut CandidateResolver,
        selector: &mut dyn CandidateSelector,
    ) -> Result<FilePlan>;
}

/// Resolves `fields` and applies the accepted candidate: the catalog id is
/// attached and a missing year is back-filled from the candidate's date.
pub fn resolve_fields(
    kind: MediaKind,
    fields: MediaFields,
    hint: &str,
    resolver: &mut CandidateResolver,
    selector: &mut dyn CandidateSelector,
) -> Result<(MediaFields, ResolutionOutcome)> {
    let outcome = resolver.resolve(kind, &fields.title, fields.year, Some(hint), selector)?;
    let fields = apply_outcome(fields, &outcome, resolver.id_tag());
    Ok((fields, outcome))
}

fn apply_outcome(
    mut fields: MediaFields,
    outcome: &ResolutionOutcome,
    tag: Option<&str>,
) -> MediaFields {
    if let (ResolutionOutcome::Accepted(candidate), Some(tag)) = (outcome, tag) {
        fields.catalog_id = Some(CatalogId::new(tag, candidate.id));
        if fields.year.is_none() {
            fields.year = candidate.year();
        }
    }
    fields
}

/// Refuses fields whose title is blank; the catalog is never asked about them.
fn require_title(fields: &MediaFields) -> Result<()> {
    if fields.title.trim().is_empty() {
        return Err(KinotekaError::EmptyInput);
    }
    Ok(())
}

fn formatter() -> NameFormatter {
    NameFormatter::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogCandidate;

    fn accepted(date: Option<&str>) -> ResolutionOutcome {
        ResolutionOutcome::Accepted(CatalogCandidate {
            id: 42,
            title: "Show".into(),
            date: date.map(Into::into),
            popularity: 1.0,
            overview: None,
        })
    }

    #[test]
    fn accepted_candidate_back_fills_year() {
        let fields = apply_outcome(MediaFields::new("Show"), &accepted(Some("2011-04-17")), Some("tmdbid"));
        assert_eq!(fields.year, Some(2011));
        assert_eq!(fields.catalog_id, Some(CatalogId::new("tmdbid", 42)));
    }

    #[test]
    fn local_year_wins_over_catalog() {
        let fields = apply_outcome(
            MediaFields::new("Show").with_year(Some(2010)),
            &accepted(Some("2011-04-17")),
            Some("tmdbid"),
        );
        assert_eq!(fields.year, Some(2010));
    }

    #[test]
    fn blank_titles_are_refused() {
        assert!(matches!(
            require_title(&MediaFields::new("  ")),
            Err(KinotekaError::EmptyInput)
        ));
        assert!(require_title(&MediaFields::new("Show")).is_ok());
    }

    #[test]
    fn other_outcomes_leave_fields_alone() {
        for outcome in [
            ResolutionOutcome::NotFound,
            ResolutionOutcome::Disabled,
            ResolutionOutcome::Deferred(vec![]),
        ] {
            let fields = apply_outcome(MediaFields::new("Show"), &outcome, Some("tmdbid"));
            assert_eq!(fields, MediaFields::new("Show"));
        }
    }
}
