use std::fmt;

use serde::{Deserialize, Serialize};

use super::quality::Resolution;

/// Which season/episode rule produced a match.
///
/// Variants are listed in precedence order; everything before
/// [`SeasonEpisodeRule::Combined`] is considered definitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonEpisodeRule {
    /// `S01E02`, `s1e2`, `S01.E02`, `S01E01-E02`
    Standard,
    /// `3x07`
    Cross,
    /// Bare three-digit run such as `308` (season 3, episode 08).
    Combined,
    /// Episode taken from `Episode 5` / `E05` with a season supplied by context.
    EpisodeOnly,
}

impl SeasonEpisodeRule {
    /// Returns `true` when the rule is strong enough to classify a file as a
    /// series on its own.
    #[must_use]
    pub fn is_definitive(self) -> bool {
        matches!(self, Self::Standard | Self::Cross)
    }
}

/// A season/episode pair extracted from a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonEpisode {
    /// Season number.
    pub season: u32,
    /// Episode number.
    pub episode: u32,
    /// Rule that matched.
    pub rule: SeasonEpisodeRule,
}

impl SeasonEpisode {
    /// Creates a pair tagged with the rule that produced it.
    #[must_use]
    pub fn new(season: u32, episode: u32, rule: SeasonEpisodeRule) -> Self {
        Self {
            season,
            episode,
            rule,
        }
    }
}

impl fmt::Display for SeasonEpisode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}

/// Output of a single pattern detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionResult {
    /// A season/episode pair.
    SeasonEpisode(SeasonEpisode),
    /// A release year.
    Year(u16),
    /// A video resolution tier.
    Quality(Resolution),
}
