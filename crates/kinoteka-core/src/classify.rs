//! # Title Classifier
//!
//! Decides whether a filename is a movie or a series episode:
//!
//! 1. the [`AmbiguityGate`] may skip the file;
//! 2. a definitive `SxxExx` / `NxNN` pattern makes it a series;
//! 3. a movie signature (year followed by a quality tier) makes it a movie;
//! 4. weaker cues (`Episode N` of a known show, a leading year followed by a
//!    season) make it a series unless a movie-exclusion cue (year directly
//!    followed by a quality or source tag) is present;
//! 5. everything else is a movie.
//!
//! A weak series cue that yields no season/episode pair falls back to movie.
//! Bare `SEE` runs never reach the weak cues: the gate skips them unless a
//! movie signature is present, and a movie signature wins in step 3.

use regex::Regex;
use tracing::{debug, warn};

use crate::detect::SeasonEpisodeDetector;
use crate::error::Result;
use crate::gate::AmbiguityGate;
use crate::types::{ClassificationVerdict, SeasonEpisode, SeasonEpisodeRule};

/// A weak series cue, with or without a usable pair.
enum Cue {
    Paired(SeasonEpisode),
    Unpaired(&'static str),
}

pub struct TitleClassifier {
    gate: AmbiguityGate,
    season_episode: SeasonEpisodeDetector,
    known_shows: Vec<String>,
    re_episode_cue: Regex,
    re_year_season: Regex,
    re_movie_exclusion: Regex,
    re_separators: Regex,
}

impl TitleClassifier {
    /// Creates a classifier. `known_shows` feeds the `Episode N` cue and is
    /// matched case-insensitively against the separator-normalised name.
    ///
    /// # Errors
    ///
    /// Returns `KinotekaError::RegexError` if any pattern fails to compile.
    pub fn new(known_shows: &[String]) -> Result<Self> {
        Ok(Self {
            gate: AmbiguityGate::new()?,
            season_episode: SeasonEpisodeDetector::new()?,
            known_shows: known_shows
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            re_episode_cue: Regex::new(r"(?i)\bepisode[ ._-]*\d+")?,
            re_year_season: Regex::new(r"(?i)^\d{4}[ ._-]+s(?:eason)?[ ._-]?(\d{1,2})\b")?,
            re_movie_exclusion: Regex::new(
                r"(?i)(?:^|[^0-9])(?:19\d{2}|20[0-3]\d)[ ._-]+(?:\d{3,4}[pр]|blu-?ray|bdrip|bdremux|web-?dl|webrip|hdrip|dvdrip|hdtv|remux)\b",
            )?,
            re_separators: Regex::new(r"[._\-\s]+")?,
        })
    }

    /// Classifies a bare filename (no directory components).
    pub fn classify(&self, file_name: &str) -> ClassificationVerdict {
        if let Some(reason) = self.gate.should_skip(file_name) {
            return ClassificationVerdict::Skipped { reason };
        }

        if let Some(se) = self.season_episode.detect_definitive(file_name) {
            debug!(file_name, %se, "definitive series pattern");
            return ClassificationVerdict::Series(se);
        }

        if self.gate.is_movie_signature(file_name) {
            debug!(file_name, "movie signature");
            return ClassificationVerdict::Movie;
        }

        let Some(cue) = self.weak_cue(file_name) else {
            return ClassificationVerdict::Movie;
        };

        if self.re_movie_exclusion.is_match(file_name) {
            debug!(file_name, "weak series cue overridden by movie exclusion");
            return ClassificationVerdict::Movie;
        }

        match cue {
            Cue::Paired(se) => {
                debug!(file_name, %se, rule = ?se.rule, "weak series cue");
                ClassificationVerdict::Series(se)
            }
            Cue::Unpaired(cue) => {
                warn!(file_name, cue, "series cue without a season/episode pair, treating as movie");
                ClassificationVerdict::Movie
            }
        }
    }

    /// `true` when the classifier would route the file to the series side.
    pub fn is_series(&self, file_name: &str) -> bool {
        matches!(self.classify(file_name), ClassificationVerdict::Series(_))
    }

    fn weak_cue(&self, file_name: &str) -> Option<Cue> {
        if self.re_episode_cue.is_match(file_name) && self.mentions_known_show(file_name) {
            let season = self.season_episode.detect_season_only(file_name).unwrap_or(1);
            return Some(self.pair_with_episode(file_name, season, "known show episode"));
        }

        if let Some(caps) = self.re_year_season.captures(file_name) {
            let season = caps[1].parse().ok()?;
            return Some(self.pair_with_episode(file_name, season, "year-titled season"));
        }

        None
    }

    fn pair_with_episode(&self, file_name: &str, season: u32, cue: &'static str) -> Cue {
        match self.season_episode.detect_episode_only(file_name) {
            Some(episode) => Cue::Paired(SeasonEpisode::new(
                season,
                episode,
                SeasonEpisodeRule::EpisodeOnly,
            )),
            None => Cue::Unpaired(cue),
        }
    }

    fn mentions_known_show(&self, file_name: &str) -> bool {
        if self.known_shows.is_empty() {
            return false;
        }
        let normalised = self
            .re_separators
            .replace_all(&file_name.to_lowercase(), " ")
            .into_owned();
        self.known_shows.iter().any(|show| normalised.contains(show.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkipReason;

    fn classifier() -> TitleClassifier {
        TitleClassifier::new(&["Doctor Who".to_string(), "The Daily Show".to_string()]).unwrap()
    }

    fn series(verdict: ClassificationVerdict) -> Option<(u32, u32)> {
        match verdict {
            ClassificationVerdict::Series(se) => Some((se.season, se.episode)),
            _ => None,
        }
    }

    #[test]
    fn definitive_patterns_are_series() {
        let c = classifier();
        assert_eq!(series(c.classify("Show.Name.S02E05.1080p.mkv")), Some((2, 5)));
        assert_eq!(series(c.classify("Show.Name.3x07.avi")), Some((3, 7)));
        assert_eq!(series(c.classify("1923.S01E02.720p.mkv")), Some((1, 2)));
        assert!(c.is_series("show.s01e07.mkv"));
    }

    #[test]
    fn plain_names_default_to_movie() {
        let c = classifier();
        assert_eq!(c.classify("Movie.Title.2010.720p.mkv"), ClassificationVerdict::Movie);
        assert_eq!(c.classify("Some Movie.avi"), ClassificationVerdict::Movie);
    }

    #[test]
    fn gate_skips_ambiguous_names() {
        let c = classifier();
        assert_eq!(
            c.classify("Show.Name.308.mkv"),
            ClassificationVerdict::Skipped {
                reason: SkipReason::NumericRun
            }
        );
        assert_eq!(
            c.classify("Episode 5.mkv"),
            ClassificationVerdict::Skipped {
                reason: SkipReason::BareEpisode
            }
        );
    }

    #[test]
    fn numeric_title_with_movie_signature_is_movie() {
        let c = classifier();
        assert_eq!(
            c.classify("Fahrenheit.451.1966.1080p.BluRay.mkv"),
            ClassificationVerdict::Movie
        );
    }

    #[test]
    fn movie_signature_with_tags_between_year_and_quality_is_movie() {
        let c = classifier();
        for name in [
            "Show.308.2019.WEB.720p.mkv",
            "Fahrenheit.451.1966.Remastered.1080p.mkv",
            "Apollo.313.2021.IMAX.2160p.mkv",
        ] {
            assert_eq!(c.classify(name), ClassificationVerdict::Movie, "{name}");
        }
    }

    #[test]
    fn numeric_run_without_movie_signature_is_skipped() {
        let c = classifier();
        // a year without a quality tier, or a quality tier without a year
        for name in ["Show.308.2019.WEB.mkv", "Show.Name.308.720p.mkv"] {
            assert_eq!(
                c.classify(name),
                ClassificationVerdict::Skipped {
                    reason: SkipReason::NumericRun
                },
                "{name}"
            );
        }
    }

    #[test]
    fn known_show_episode_cue() {
        let c = classifier();
        assert_eq!(series(c.classify("Doctor.Who.Episode.5.mkv")), Some((1, 5)));
        assert_eq!(series(c.classify("Doctor Who S02 Episode 7.mkv")), Some((2, 7)));
        // unknown show with an episode cue stays a movie
        assert_eq!(c.classify("Random.Thing.Episode.5.mkv"), ClassificationVerdict::Movie);
    }

    #[test]
    fn leading_year_season_cue() {
        let c = classifier();
        let verdict = c.classify("1883.Season.1.Episode.4.mkv");
        assert_eq!(series(verdict), Some((1, 4)));
        match verdict {
            ClassificationVerdict::Series(se) => assert_eq!(se.rule, SeasonEpisodeRule::EpisodeOnly),
            other => panic!("expected series, got {other:?}"),
        }
    }

    #[test]
    fn series_cue_without_pair_falls_back_to_movie() {
        let c = classifier();
        assert_eq!(
            c.classify("1883.Season.1.Complete.mkv"),
            ClassificationVerdict::Movie
        );
    }

    #[test]
    fn no_known_shows_disables_episode_cue() {
        let c = TitleClassifier::new(&[]).unwrap();
        assert_eq!(c.classify("Doctor.Who.Episode.5.mkv"), ClassificationVerdict::Movie);
    }
}
