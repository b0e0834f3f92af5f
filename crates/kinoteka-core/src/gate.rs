//! # Ambiguity Gate
//!
//! Decides, before classification, whether a filename is too ambiguous to
//! process automatically. Unambiguous series patterns always pass; a
//! suspicious pattern causes a skip unless the name also looks like a movie
//! release (a year followed by a quality tier).

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::types::SkipReason;

/// Gate over the raw filename.
pub struct AmbiguityGate {
    unambiguous: Vec<(&'static str, Regex)>,
    suspicious: Vec<(Regex, SkipReason)>,
    re_noise: Regex,
    re_movie_signature: Regex,
}

impl AmbiguityGate {
    /// # Errors
    ///
    /// Returns `KinotekaError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            unambiguous: vec![
                ("standard", Regex::new(r"[Ss]\d{1,2}[Ee]\d{1,2}")?),
                ("dotted", Regex::new(r"[Ss]\d{1,2}\.[Ee]\d{1,2}")?),
                ("lowercase", Regex::new(r"\bs\d{1,2}e\d{1,2}\b")?),
                ("multi", Regex::new(r"(?i)s\d{1,2}e\d{1,2}-e?\d{1,2}")?),
                ("cross", Regex::new(r"(?:^|[^0-9])\d{1,2}[xX]\d{1,2}(?:[^0-9]|$)")?),
            ],
            suspicious: vec![
                (
                    Regex::new(r"(?i)^episode[ ._-]*\d+")?,
                    SkipReason::BareEpisode,
                ),
                (
                    Regex::new(
                        r"(?:^|[^0-9])(?:19|20)\d{2}[._-](?:0[1-9]|1[0-2])[._-](?:0[1-9]|[12]\d|3[01])(?:[^0-9]|$)",
                    )?,
                    SkipReason::DateStamp,
                ),
                (
                    Regex::new(
                        r"(?:^|[^0-9])(?:19|20)\d{2}(?:0[1-9]|1[0-2])(?:0[1-9]|[12]\d|3[01])(?:[^0-9]|$)",
                    )?,
                    SkipReason::DateStamp,
                ),
                (
                    Regex::new(r"(?i)(?:^|[^a-z0-9])e\d{2}[^0-9]{0,3}\d{4}(?:[^0-9]|$)")?,
                    SkipReason::IrregularEpisodeRun,
                ),
                (
                    Regex::new(r"(?:^|[^0-9])\d{3}(?:[^0-9pPiI]|$)")?,
                    SkipReason::NumericRun,
                ),
            ],
            re_noise: Regex::new(r"(?i)[xh]\.?26[45]|\d{3,4}\s*[x×]\s*\d{3,4}")?,
            re_movie_signature: Regex::new(
                r"(?i)(?:^|[^0-9])(?:19\d{2}|20[0-3]\d)[^0-9].*?(?:(?:480|720|1080|1440|2160|4320)[pр]|\b(?:4k|8k|uhd|fhd|qhd)\b)",
            )?,
        })
    }

    /// Returns `Some(reason)` when the filename should be skipped.
    pub fn should_skip(&self, file_name: &str) -> Option<SkipReason> {
        if let Some((rule, _)) = self
            .unambiguous
            .iter()
            .find(|(_, re)| re.is_match(file_name))
        {
            debug!(file_name, rule, "unambiguous series pattern, gate open");
            return None;
        }

        let denoised = self.re_noise.replace_all(file_name, " ");
        let reason = self
            .suspicious
            .iter()
            .find(|(re, _)| re.is_match(&denoised))
            .map(|(_, reason)| *reason)?;

        if self.is_movie_signature(file_name) {
            debug!(file_name, ?reason, "suspicious pattern overridden by movie signature");
            return None;
        }

        debug!(file_name, ?reason, "ambiguous filename");
        Some(reason)
    }

    /// `true` for names such as `Title.1999.1080p…` where a year is followed
    /// by a quality tier.
    pub fn is_movie_signature(&self, file_name: &str) -> bool {
        self.re_movie_signature.is_match(file_name)
    }
}
