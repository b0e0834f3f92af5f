//! # Pattern Detectors
//!
//! Stateless regex rule chains that pull structural signals out of a
//! filename. Each detector returns the first match of its ordered rules.

pub mod quality;
pub mod season_episode;
pub mod year;

pub use quality::QualityDetector;
pub use season_episode::SeasonEpisodeDetector;
pub use year::YearDetector;

use crate::error::Result;
use crate::types::DetectionResult;

/// The three detectors, compiled once and shared by the classifier and the
/// title toolkit.
pub struct Detectors {
    pub season_episode: SeasonEpisodeDetector,
    pub year: YearDetector,
    pub quality: QualityDetector,
}

impl Detectors {
    /// # Errors
    ///
    /// Returns `KinotekaError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            season_episode: SeasonEpisodeDetector::new()?,
            year: YearDetector::new()?,
            quality: QualityDetector::new()?,
        })
    }

    /// Runs every detector and collects whatever they found, in
    /// season/episode, year, quality order.
    pub fn detect_all(&self, input: &str) -> Vec<DetectionResult> {
        let mut found = Vec::with_capacity(3);
        if let Some(se) = self.season_episode.detect(input) {
            found.push(DetectionResult::SeasonEpisode(se));
        }
        if let Some(year) = self.year.detect(input) {
            found.push(DetectionResult::Year(year));
        }
        if let Some(res) = self.quality.detect(input) {
            found.push(DetectionResult::Quality(res));
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Resolution, SeasonEpisode, SeasonEpisodeRule};

    #[test]
    fn detect_all_collects_each_signal() {
        let d = Detectors::new().unwrap();
        let found = d.detect_all("Show.2019.S01E02.1080p.mkv");
        assert_eq!(
            found,
            vec![
                DetectionResult::SeasonEpisode(SeasonEpisode::new(
                    1,
                    2,
                    SeasonEpisodeRule::Standard
                )),
                DetectionResult::Year(2019),
                DetectionResult::Quality(Resolution::FHD1080),
            ]
        );
    }

    #[test]
    fn detect_all_empty_for_plain_title() {
        let d = Detectors::new().unwrap();
        assert!(d.detect_all("Plain Title.mkv").is_empty());
    }
}
