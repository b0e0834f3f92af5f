use std::fmt;

use serde::{Deserialize, Serialize};

use super::detection::SeasonEpisode;

/// Broad kind of a media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Movie,
    Series,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
        }
    }
}

/// Why a filename was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// Starts with `Episode N` and carries no title or season.
    BareEpisode,
    /// A three-digit run that could be `SEE` or part of a title.
    NumericRun,
    /// A date stamp (`2023.05.12`, `20230512`).
    DateStamp,
    /// An `E##` marker followed by a four-digit number.
    IrregularEpisodeRun,
    /// Nothing is left of the title once release noise is stripped.
    EmptyTitle,
}

impl SkipReason {
    /// Human-readable reason shown to the user.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::BareEpisode => "bare 'Episode N' without a series title or season",
            Self::NumericRun => "three-digit number that may or may not be a season/episode",
            Self::DateStamp => "date-stamped name (daily show or recording)",
            Self::IrregularEpisodeRun => "irregular episode marker followed by a four-digit number",
            Self::EmptyTitle => "no title left after cleaning the name",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Final decision on what a filename is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassificationVerdict {
    Movie,
    Series(SeasonEpisode),
    Skipped { reason: SkipReason },
}

impl ClassificationVerdict {
    /// The media kind for non-skipped verdicts.
    #[must_use]
    pub fn kind(&self) -> Option<MediaKind> {
        match self {
            Self::Movie => Some(MediaKind::Movie),
            Self::Series(_) => Some(MediaKind::Series),
            Self::Skipped { .. } => None,
        }
    }
}

impl fmt::Display for ClassificationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series(se) => write!(f, "series {se}"),
            Self::Skipped { reason } => write!(f, "skipped ({reason})"),
        }
    }
}
