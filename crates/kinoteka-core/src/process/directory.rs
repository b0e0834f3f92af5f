use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{TitleToolkit, extension_of, formatter, require_title, resolve_fields};
use crate::error::Result;
use crate::format::MediaFields;
use crate::resolve::{CandidateResolver, CandidateSelector};
use crate::types::{CanonicalName, MediaKind, ResolutionOutcome, SeasonEpisode, SeasonEpisodeRule};

/// One episode file inside a series directory.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodePlan {
    pub source: PathBuf,
    pub episode: SeasonEpisode,
    pub canonical: CanonicalName,
}

/// Plan for a whole download directory treated as one series.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryPlan {
    /// Series fields after catalog resolution.
    pub series: MediaFields,
    pub outcome: ResolutionOutcome,
    pub episodes: Vec<EpisodePlan>,
    /// Files without a detectable episode; they stay where they are.
    pub unmatched: Vec<PathBuf>,
}

/// Plans a directory of episode files under a single series heading.
pub struct DirectoryProcessor<'a> {
    toolkit: &'a TitleToolkit,
}

impl<'a> DirectoryProcessor<'a> {
    pub fn new(toolkit: &'a TitleToolkit) -> Self {
        Self { toolkit }
    }

    /// Resolves the directory name once, then places every file.
    ///
    /// Each file's pair comes from its own name; failing that, the
    /// directory's season (default 1) is combined with an episode-only
    /// number from the file name.
    ///
    /// # Errors
    ///
    /// Returns `KinotekaError::EmptyInput` when the directory name yields no
    /// series title and propagates `KinotekaError::Aborted` from the
    /// candidate selector.
    pub fn plan(
        &self,
        dir_name: &str,
        files: &[PathBuf],
        resolver: &mut CandidateResolver,
        selector: &mut dyn CandidateSelector,
    ) -> Result<DirectoryPlan> {
        let fields = self.toolkit.directory_fields(dir_name);
        require_title(&fields)?;
        info!(dir_name, series = %fields.title, year = ?fields.year, "processing series directory");
        let (series, outcome) =
            resolve_fields(MediaKind::Series, fields, dir_name, resolver, selector)?;

        let detectors = self.toolkit.detectors();
        let dir_season = detectors.season_episode.detect_season_only(dir_name);

        let mut episodes = Vec::new();
        let mut unmatched = Vec::new();
        for source in files {
            let Some(file_name) = file_name_of(source) else {
                unmatched.push(source.clone());
                continue;
            };

            let episode = detectors.season_episode.detect(file_name).or_else(|| {
                detectors
                    .season_episode
                    .detect_episode_only(file_name)
                    .map(|e| SeasonEpisode::new(dir_season.unwrap_or(1), e, SeasonEpisodeRule::EpisodeOnly))
            });
            let Some(episode) = episode else {
                warn!(file_name, dir_name, "could not detect an episode pattern");
                unmatched.push(source.clone());
                continue;
            };

            let quality = detectors.quality.detect(file_name).or(series.quality);
            let fields = series
                .clone()
                .with_quality(quality)
                .with_extension(extension_of(file_name));
            episodes.push(EpisodePlan {
                source: source.clone(),
                episode,
                canonical: formatter().episode(&fields, &episode),
            });
        }

        Ok(DirectoryPlan {
            series,
            outcome,
            episodes,
            unmatched,
        })
    }
}

fn file_name_of(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
