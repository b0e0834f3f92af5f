use tracing::info;

use super::{FilePlan, MediaProcessor, TitleToolkit, formatter, require_title, resolve_fields};
use crate::error::Result;
use crate::resolve::{CandidateResolver, CandidateSelector};
use crate::types::MediaKind;

/// Plans movie files: `Title (Year) [id] - [Q].ext` under the movie root.
pub struct MovieProcessor<'a> {
    toolkit: &'a TitleToolkit,
}

impl<'a> MovieProcessor<'a> {
    pub fn new(toolkit: &'a TitleToolkit) -> Self {
        Self { toolkit }
    }
}

impl MediaProcessor for MovieProcessor<'_> {
    fn kind(&self) -> MediaKind {
        MediaKind::Movie
    }

    fn plan(
        &self,
        file_name: &str,
        resolver: &mut CandidateResolver,
        selector: &mut dyn CandidateSelector,
    ) -> Result<FilePlan> {
        let fields = self.toolkit.movie_fields(file_name);
        require_title(&fields)?;
        info!(file_name, title = %fields.title, year = ?fields.year, "processing movie");
        let (fields, outcome) =
            resolve_fields(MediaKind::Movie, fields, file_name, resolver, selector)?;
        let canonical = formatter().movie(&fields);
        Ok(FilePlan {
            fields,
            outcome,
            canonical,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::SkipSelector;
    use crate::types::ResolutionOutcome;

    #[test]
    fn plans_movie_without_catalog() {
        let toolkit = TitleToolkit::new().unwrap();
        let processor = MovieProcessor::new(&toolkit);
        let mut resolver = CandidateResolver::disabled();
        let plan = processor
            .plan("Movie.Title.2010.720p.mkv", &mut resolver, &mut SkipSelector)
            .unwrap();
        assert_eq!(processor.kind(), MediaKind::Movie);
        assert_eq!(plan.outcome, ResolutionOutcome::Disabled);
        assert_eq!(plan.canonical.to_string(), "Movie Title (2010) - [720p].mkv");
    }

    #[test]
    fn noise_only_name_has_no_title() {
        let toolkit = TitleToolkit::new().unwrap();
        let processor = MovieProcessor::new(&toolkit);
        let result = processor.plan("[NOOBDL].mkv", &mut CandidateResolver::disabled(), &mut SkipSelector);
        assert!(matches!(result, Err(crate::error::KinotekaError::EmptyInput)));
    }
}
