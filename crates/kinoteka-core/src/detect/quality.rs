use regex::Regex;

use crate::error::Result;
use crate::types::Resolution;

/// Known pixel sizes and the tier they map to, in lookup order.
const PIXEL_SIZES: &[((u32, u32), Resolution)] = &[
    ((1920, 1080), Resolution::FHD1080),
    ((1280, 720), Resolution::HD720),
    ((3840, 2160), Resolution::UHD2160),
    ((7680, 4320), Resolution::UHD4320),
    ((720, 480), Resolution::SD480),
    ((2560, 1440), Resolution::QHD1440),
];

/// Resolution tier detection.
///
/// Priority: explicit `NNNp`, Cyrillic `NNNр`, pixel sizes, `SD`, then the
/// named tiers `HD`, `FHD`, `QHD`, `UHD`/`4K`, `8K`.
pub struct QualityDetector {
    re_explicit: Regex,
    re_cyrillic: Regex,
    re_pixels: Regex,
    re_sd: Regex,
    named: Vec<(Regex, Resolution)>,
}

impl QualityDetector {
    /// # Errors
    ///
    /// Returns `KinotekaError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_explicit: Regex::new(r"(?i)(?:^|[^0-9])(480|720|1080|1440|2160|4320)p")?,
            re_cyrillic: Regex::new(r"(?:^|[^0-9])(480|720|1080|1440|2160|4320)[рР]")?,
            re_pixels: Regex::new(r"(\d{3,4})\s*[xX×]\s*(\d{3,4})")?,
            re_sd: Regex::new(r"(?i)\bSD\b")?,
            named: vec![
                (Regex::new(r"(?i)\bHD\b")?, Resolution::HD720),
                (Regex::new(r"(?i)\bFHD\b")?, Resolution::FHD1080),
                (Regex::new(r"(?i)\bQHD\b")?, Resolution::QHD1440),
                (Regex::new(r"(?i)\bUHD\b|\b4K\b")?, Resolution::UHD2160),
                (Regex::new(r"(?i)\b8K\b")?, Resolution::UHD4320),
            ],
        })
    }

    pub fn detect(&self, input: &str) -> Option<Resolution> {
        if let Some(res) = Self::lines_capture(&self.re_explicit, input) {
            return Some(res);
        }

        if let Some(res) = Self::lines_capture(&self.re_cyrillic, input) {
            return Some(res);
        }

        if let Some(res) = self.detect_pixels(input) {
            return Some(res);
        }

        if self.re_sd.is_match(input) {
            return Some(Resolution::SD480);
        }

        self.named
            .iter()
            .find(|(re, _)| re.is_match(input))
            .map(|(_, res)| *res)
    }

    fn lines_capture(re: &Regex, input: &str) -> Option<Resolution> {
        re.captures(input)
            .and_then(|c| c[1].parse().ok())
            .and_then(Resolution::from_lines)
    }

    fn detect_pixels(&self, input: &str) -> Option<Resolution> {
        let found: Vec<(u32, u32)> = self
            .re_pixels
            .captures_iter(input)
            .filter_map(|c| Some((c[1].parse().ok()?, c[2].parse().ok()?)))
            .collect();

        PIXEL_SIZES
            .iter()
            .find(|(size, _)| found.contains(size))
            .map(|(_, res)| *res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(input: &str) -> Option<Resolution> {
        QualityDetector::new().unwrap().detect(input)
    }

    #[test]
    fn explicit_resolutions() {
        assert_eq!(detect("Movie.480p.mkv"), Some(Resolution::SD480));
        assert_eq!(detect("Movie.720p.mkv"), Some(Resolution::HD720));
        assert_eq!(detect("Movie.1080P.mkv"), Some(Resolution::FHD1080));
        assert_eq!(detect("Movie.2160p.mkv"), Some(Resolution::UHD2160));
        assert_eq!(detect("Movie.4320p.mkv"), Some(Resolution::UHD4320));
    }

    #[test]
    fn cyrillic_p_is_normalized() {
        let res = detect("Фильм.1080р.mkv");
        assert_eq!(res, Some(Resolution::FHD1080));
        assert_eq!(res.map(|r| r.tag()), Some("[1080p]".to_string()));
    }

    #[test]
    fn pixel_dimensions() {
        assert_eq!(detect("Movie 1920x1080.mkv"), Some(Resolution::FHD1080));
        assert_eq!(detect("Movie 1280 X 720.mkv"), Some(Resolution::HD720));
        assert_eq!(detect("Movie 3840x2160.mkv"), Some(Resolution::UHD2160));
        assert_eq!(detect("Movie 720x576.mkv"), None);
    }

    #[test]
    fn named_tiers() {
        assert_eq!(detect("Movie.SD.avi"), Some(Resolution::SD480));
        assert_eq!(detect("Movie.HD.mkv"), Some(Resolution::HD720));
        assert_eq!(detect("Movie.FHD.mkv"), Some(Resolution::FHD1080));
        assert_eq!(detect("Movie.QHD.mkv"), Some(Resolution::QHD1440));
        assert_eq!(detect("Movie.UHD.mkv"), Some(Resolution::UHD2160));
        assert_eq!(detect("Movie.4K.mkv"), Some(Resolution::UHD2160));
        assert_eq!(detect("Movie.8K.mkv"), Some(Resolution::UHD4320));
    }

    #[test]
    fn explicit_beats_named_tier() {
        assert_eq!(detect("Movie.UHD.1080p.mkv"), Some(Resolution::FHD1080));
    }

    #[test]
    fn no_quality() {
        assert_eq!(detect("Movie.Title.2010.mkv"), None);
        assert_eq!(detect("Shadow.mkv"), None);
    }
}
