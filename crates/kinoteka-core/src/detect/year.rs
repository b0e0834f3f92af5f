use regex::Regex;

use crate::error::Result;

/// Finds a release-year-like token in `[1900, 2039]`.
///
/// The first such token wins; a title that itself is a year (`1917`,
/// `2012`) is indistinguishable from a release year here.
pub struct YearDetector {
    re_year: Regex,
}

impl YearDetector {
    /// # Errors
    ///
    /// Returns `KinotekaError::RegexError` if the pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_year: Regex::new(r"(?:^|[^0-9])(19\d{2}|20[0-3]\d)(?:[^0-9]|$)")?,
        })
    }

    pub fn detect(&self, input: &str) -> Option<u16> {
        self.re_year
            .captures(input)
            .and_then(|c| c[1].parse().ok())
    }

    /// The last year-like token. Movie names such as `1917.2019.1080p` or
    /// `2001.A.Space.Odyssey.1968` carry the release year last.
    pub fn detect_last(&self, input: &str) -> Option<u16> {
        input
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| run.len() == 4)
            .filter_map(|run| run.parse::<u16>().ok())
            .filter(|year| (1900..=2039).contains(year))
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_extraction() {
        let d = YearDetector::new().unwrap();
        assert_eq!(d.detect("Movie.Title.2010.720p.mkv"), Some(2010));
        assert_eq!(d.detect("Old Movie (1954).avi"), Some(1954));
        assert_eq!(d.detect("1923.S01E02.720p.mkv"), Some(1923));
        assert_eq!(d.detect("Future.2039.mkv"), Some(2039));
    }

    #[test]
    fn out_of_range_and_embedded_numbers_ignored() {
        let d = YearDetector::new().unwrap();
        assert_eq!(d.detect("Movie.2040.mkv"), None);
        assert_eq!(d.detect("Movie.1899.mkv"), None);
        assert_eq!(d.detect("Movie.2160p.mkv"), None);
        assert_eq!(d.detect("Movie.120101.mkv"), None);
        assert_eq!(d.detect("Movie Title.mkv"), None);
    }

    #[test]
    fn first_year_token_wins() {
        let d = YearDetector::new().unwrap();
        assert_eq!(d.detect("1917.2019.1080p.mkv"), Some(1917));
        assert_eq!(d.detect_last("1917.2019.1080p.mkv"), Some(2019));
        assert_eq!(d.detect_last("2001.A.Space.Odyssey.1968.mkv"), Some(1968));
        assert_eq!(d.detect_last("Movie.Title.2160p.mkv"), None);
    }
}
