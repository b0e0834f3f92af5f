pub mod candidate;
pub mod canonical;
pub mod detection;
pub mod quality;
pub mod verdict;

pub use candidate::{CatalogCandidate, CatalogId, ResolutionOutcome};
pub use canonical::CanonicalName;
pub use detection::{DetectionResult, SeasonEpisode, SeasonEpisodeRule};
pub use quality::Resolution;
pub use verdict::{ClassificationVerdict, MediaKind, SkipReason};
