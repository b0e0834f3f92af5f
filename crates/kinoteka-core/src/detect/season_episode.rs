use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::types::{SeasonEpisode, SeasonEpisodeRule};

/// Ordered season/episode rules.
///
/// Rule order encodes precedence: `SxxExx` before `NxNN` before the bare
/// three-digit `SEE` heuristic. The first rule that matches wins.
pub struct SeasonEpisodeDetector {
    re_standard: Regex,
    re_cross: Regex,
    re_combined: Regex,
    re_noise: Regex,
    re_season_only: Regex,
    re_episode_marker: Regex,
    re_trailing_number: Regex,
}

impl SeasonEpisodeDetector {
    /// Constructs the detector with pre-compiled rules.
    ///
    /// # Errors
    ///
    /// Returns `KinotekaError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            // S01E02, s1e2, S01.E02, S01E01-E02 (first episode wins)
            re_standard: Regex::new(r"(?i)s(\d{1,2})\.?e(\d{1,2})")?,
            re_cross: Regex::new(r"(?:^|[^0-9])(\d{1,2})[xX](\d{1,2})(?:[^0-9]|$)")?,
            re_combined: Regex::new(r"(?:^|[^0-9])(\d)(\d{2})(?:[^0-9pPiI]|$)")?,
            // Codec names and pixel sizes contain digit runs that are never episodes.
            re_noise: Regex::new(r"(?i)[xh]\.?26[45]|\d{3,4}\s*[x×]\s*\d{3,4}")?,
            re_season_only: Regex::new(r"(?i)(?:\bs|\bseason[ ._-]*)(\d{1,2})\b")?,
            re_episode_marker: Regex::new(
                r"(?i)(?:^|[^a-z])e(?:p(?:isode)?)?[ ._-]*(\d{1,3})(?:[^0-9]|$)",
            )?,
            re_trailing_number: Regex::new(r"(?:^|[^0-9])(\d{1,2})\.[A-Za-z0-9]{2,4}$")?,
        })
    }

    /// Detects a season/episode pair, trying rules in precedence order.
    pub fn detect(&self, input: &str) -> Option<SeasonEpisode> {
        self.detect_standard(input)
            .or_else(|| self.detect_cross(input))
            .or_else(|| self.detect_combined(input))
    }

    /// Detects only the definitive patterns (`SxxExx` and `NxNN`).
    pub fn detect_definitive(&self, input: &str) -> Option<SeasonEpisode> {
        self.detect_standard(input)
            .or_else(|| self.detect_cross(input))
    }

    fn detect_standard(&self, input: &str) -> Option<SeasonEpisode> {
        let caps = self.re_standard.captures(input)?;
        let season = caps[1].parse().ok()?;
        let episode = caps[2].parse().ok()?;
        debug!(input, season, episode, "standard season/episode match");
        Some(SeasonEpisode::new(season, episode, SeasonEpisodeRule::Standard))
    }

    fn detect_cross(&self, input: &str) -> Option<SeasonEpisode> {
        let caps = self.re_cross.captures(input)?;
        let season = caps[1].parse().ok()?;
        let episode = caps[2].parse().ok()?;
        debug!(input, season, episode, "NxNN season/episode match");
        Some(SeasonEpisode::new(season, episode, SeasonEpisodeRule::Cross))
    }

    /// The `SEE` heuristic: `308` → season 3, episode 8.
    ///
    /// Only the first three-digit run is considered, and only for season in
    /// (0, 30) and episode in (0, 100).
    fn detect_combined(&self, input: &str) -> Option<SeasonEpisode> {
        let cleaned = self.re_noise.replace_all(input, " ");
        let caps = self.re_combined.captures(&cleaned)?;
        let season: u32 = caps[1].parse().ok()?;
        let episode: u32 = caps[2].parse().ok()?;
        if season == 0 || season >= 30 || episode == 0 || episode >= 100 {
            return None;
        }
        debug!(input, season, episode, "combined SEE match");
        Some(SeasonEpisode::new(
            season,
            episode,
            SeasonEpisodeRule::Combined,
        ))
    }

    /// Season number alone, as found in directory names (`Show.S02`, `Season 2`).
    pub fn detect_season_only(&self, input: &str) -> Option<u32> {
        self.re_season_only
            .captures(input)
            .and_then(|c| c[1].parse().ok())
    }

    /// Episode number alone (`E05`, `Ep 5`, `Episode.5`, or a trailing number
    /// right before the extension).
    pub fn detect_episode_only(&self, input: &str) -> Option<u32> {
        self.re_episode_marker
            .captures(input)
            .or_else(|| self.re_trailing_number.captures(input))
            .and_then(|c| c[1].parse().ok())
    }
}
