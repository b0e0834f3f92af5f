use tracing::info;

use super::{FilePlan, MediaProcessor, TitleToolkit, formatter, require_title, resolve_fields};
use crate::error::Result;
use crate::resolve::{CandidateResolver, CandidateSelector};
use crate::types::{MediaKind, SeasonEpisode};

/// Plans one episode file whose season/episode pair is already known.
pub struct SeriesProcessor<'a> {
    toolkit: &'a TitleToolkit,
    episode: SeasonEpisode,
}

impl<'a> SeriesProcessor<'a> {
    pub fn new(toolkit: &'a TitleToolkit, episode: SeasonEpisode) -> Self {
        Self { toolkit, episode }
    }

    pub fn episode(&self) -> SeasonEpisode {
        self.episode
    }
}

impl MediaProcessor for SeriesProcessor<'_> {
    fn kind(&self) -> MediaKind {
        MediaKind::Series
    }

    fn plan(
        &self,
        file_name: &str,
        resolver: &mut CandidateResolver,
        selector: &mut dyn CandidateSelector,
    ) -> Result<FilePlan> {
        let fields = self.toolkit.episode_fields(file_name, &self.episode);
        require_title(&fields)?;
        info!(file_name, series = %fields.title, episode = %self.episode, "processing episode");
        let (fields, outcome) =
            resolve_fields(MediaKind::Series, fields, file_name, resolver, selector)?;
        let canonical = formatter().episode(&fields, &self.episode);
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
    use crate::types::SeasonEpisodeRule;

    #[test]
    fn plans_episode_without_catalog() {
        let toolkit = TitleToolkit::new().unwrap();
        let se = SeasonEpisode::new(2, 5, SeasonEpisodeRule::Standard);
        let processor = SeriesProcessor::new(&toolkit, se);
        let mut resolver = CandidateResolver::disabled();
        let plan = processor
            .plan("Show.Name.S02E05.1080p.mkv", &mut resolver, &mut SkipSelector)
            .unwrap();
        assert_eq!(processor.kind(), MediaKind::Series);
        assert_eq!(processor.episode(), se);
        assert_eq!(
            plan.canonical.to_string(),
            "Show Name/Season 02/Show Name S02E05 - [1080p].mkv"
        );
    }
}
