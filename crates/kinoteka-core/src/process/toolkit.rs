use std::path::Path;

use tracing::debug;

use crate::clean::TitleCleaner;
use crate::detect::Detectors;
use crate::error::Result;
use crate::format::MediaFields;
use crate::translit::TransliterationScorer;
use crate::types::SeasonEpisode;

/// Cleaning, detection and transliteration shared by the media processors.
pub struct TitleToolkit {
    detectors: Detectors,
    cleaner: TitleCleaner,
    scorer: TransliterationScorer,
}

impl TitleToolkit {
    /// # Errors
    ///
    /// Returns `KinotekaError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            detectors: Detectors::new()?,
            cleaner: TitleCleaner::new()?,
            scorer: TransliterationScorer::new()?,
        })
    }

    pub fn detectors(&self) -> &Detectors {
        &self.detectors
    }

    pub fn cleaner(&self) -> &TitleCleaner {
        &self.cleaner
    }

    pub fn scorer(&self) -> &TransliterationScorer {
        &self.scorer
    }

    /// Title, release year, quality and extension of a movie file.
    ///
    /// The last year token is taken as the release year so that titles
    /// which are themselves years (`1917.2019…`) keep their name.
    pub fn movie_fields(&self, file_name: &str) -> MediaFields {
        let cleaned = self.cleaner.clean_file_name(file_name);
        let year = self.detectors.year.detect_last(file_name);
        let title = match year {
            Some(year) => self.cleaner.strip_movie_year(&cleaned, year),
            None => cleaned,
        };
        MediaFields::new(self.transliterate(&title))
            .with_year(year)
            .with_quality(self.detectors.quality.detect(file_name))
            .with_extension(extension_of(file_name))
    }

    /// Series title, year, quality and extension of an episode file.
    pub fn episode_fields(&self, file_name: &str, se: &SeasonEpisode) -> MediaFields {
        let cleaned = self.cleaner.clean_file_name(file_name);
        let series = self.cleaner.series_name(&cleaned, Some(se));
        let year = self.detectors.year.detect(file_name);
        let title = match year {
            Some(year) => self.cleaner.strip_series_year(&series, year),
            None => series,
        };
        MediaFields::new(self.transliterate(&title))
            .with_year(year)
            .with_quality(self.detectors.quality.detect(file_name))
            .with_extension(extension_of(file_name))
    }

    /// Series title, year and quality of a download directory. The
    /// extension is left empty.
    pub fn directory_fields(&self, dir_name: &str) -> MediaFields {
        let cleaned = self.cleaner.clean_name(dir_name);
        let series = self.cleaner.series_name(&cleaned, None);
        let year = self.detectors.year.detect(dir_name);
        let title = match year {
            Some(year) => self.cleaner.strip_series_year(&series, year),
            None => series,
        };
        MediaFields::new(self.transliterate(&title))
            .with_year(year)
            .with_quality(self.detectors.quality.detect(dir_name))
    }

    fn transliterate(&self, title: &str) -> String {
        let score = self.scorer.evaluate(title);
        if let Some(rebuilt) = &score.reconstructed {
            debug!(title, rebuilt = %rebuilt, "title transliterated");
        }
        score.text().to_string()
    }
}

/// Extension of `file_name` including the dot (`.mkv`), or an empty string.
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}
