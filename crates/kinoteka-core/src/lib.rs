//! # Kinoteka Core
//!
//! Classification and naming engine for media libraries. Decides whether a
//! downloaded file is a movie or a TV episode, extracts season/episode, year
//! and quality, reconstructs romanised Russian titles, resolves titles
//! against an external catalog and renders Jellyfin-style canonical names.
//!
//! ## Quick Start
//!
//! ```rust
//! use kinoteka_core::{Organizer, OrganizerConfig, Planned, SkipSelector};
//!
//! let config = OrganizerConfig::new()
//!     .with_movies_root("/media/films")
//!     .with_series_root("/media/series");
//! let mut organizer = Organizer::new(config, None).unwrap();
//!
//! match organizer.plan_file("Show.Name.S02E05.1080p.mkv", &mut SkipSelector).unwrap() {
//!     Planned::Place { plan, .. } => assert_eq!(
//!         plan.canonical.to_string(),
//!         "Show Name/Season 02/Show Name S02E05 - [1080p].mkv"
//!     ),
//!     Planned::Skip(reason) => panic!("unexpected skip: {reason}"),
//! }
//! ```
pub mod classify;
pub mod clean;
pub mod config;
pub mod detect;
pub mod error;
pub mod format;
pub mod gate;
pub mod organizer;
pub mod process;
pub mod relocate;
pub mod resolve;
pub mod translit;
pub mod types;

// Re-export primary API
pub use classify::TitleClassifier;
pub use clean::TitleCleaner;
pub use config::{OrganizerConfig, ResolveMode};
pub use detect::{Detectors, QualityDetector, SeasonEpisodeDetector, YearDetector};
pub use error::{KinotekaError, Result};
pub use format::{MediaFields, NameFormatter};
pub use gate::AmbiguityGate;
pub use organizer::{DirectoryReport, FileOutcome, Organizer, Planned, RunStats};
pub use process::{
    DirectoryPlan, DirectoryProcessor, FilePlan, MediaProcessor, MovieProcessor, SeriesProcessor,
    TitleToolkit,
};
pub use relocate::{RecordingRelocator, RelocationAction, Relocator};
pub use resolve::{Catalog, CandidateResolver, CandidateSelector, Selection, SkipSelector};
pub use translit::{CyrillicEngine, TransliterationScore, TransliterationScorer, Transliterator};
pub use types::{
    CanonicalName, CatalogCandidate, CatalogId, ClassificationVerdict, DetectionResult, MediaKind,
    Resolution, ResolutionOutcome, SeasonEpisode, SeasonEpisodeRule, SkipReason,
};
