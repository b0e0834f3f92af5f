//! Title cleaning: turns a release filename or directory name into a bare
//! title suitable for display and catalog search.

use std::path::Path;

use regex::Regex;

use crate::error::Result;
use crate::types::{SeasonEpisode, SeasonEpisodeRule};

/// Regex-driven title cleaner.
pub struct TitleCleaner {
    re_brackets: Regex,
    re_site_suffix: Regex,
    re_parenthesised: Regex,
    re_separators: Regex,
    re_whitespace: Regex,
    re_resolution: Regex,
    re_source_tags: Regex,
    re_codec: Regex,
    re_series_marker: Regex,
}

impl TitleCleaner {
    /// # Errors
    ///
    /// Returns `KinotekaError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_brackets: Regex::new(r"\[[^\]]*\]")?,
            re_site_suffix: Regex::new(r"(?i) ?- ?LostFilm\.TV.*")?,
            re_parenthesised: Regex::new(r" ?\([^)]+\)")?,
            re_separators: Regex::new(r"[._\-]")?,
            re_whitespace: Regex::new(r"\s+")?,
            re_resolution: Regex::new(r"(?i) (?:480|720|1080|1440|2160|4320)[pр]")?,
            // Bare WEB/HDR/SDR only in upper case: "Charlotte's Web" is a title.
            re_source_tags: Regex::new(
                r" (?:WEB|HDR|SDR|(?i:web ?dl|webrip|bdrip|bdremux|blu ?ray|hdtv|hdrip|dvdrip))\b.*",
            )?,
            re_codec: Regex::new(r"(?i) (?:[xh] ?26[45]|hevc)\b.*")?,
            re_series_marker: Regex::new(
                r"(?i)\b(?:s\d{1,2} ?e\d{1,3}|\d{1,2}x\d{1,2}|season ?\d{1,2}|e(?:p|pisode)? ?\d{1,3}|s\d{1,2})\b",
            )?,
        })
    }

    /// Cleans a filename: the extension is removed first.
    pub fn clean_file_name(&self, file_name: &str) -> String {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        self.clean_name(stem)
    }

    /// Cleans a name that has no extension (a directory name).
    ///
    /// Removes bracketed tags, release-site suffixes, parenthesised
    /// alternate titles, separators, resolution tokens and everything from
    /// the first source or codec tag onwards.
    pub fn clean_name(&self, name: &str) -> String {
        let name = self.re_brackets.replace_all(name, "");
        let name = self.re_site_suffix.replace(&name, "");
        let name = self.re_parenthesised.replace_all(&name, "");
        let name = self.re_separators.replace_all(&name, " ").replace('*', "");
        let name = self.re_whitespace.replace_all(&name, " ");
        let name = name.trim();
        let name = self.re_resolution.replace_all(name, "");
        let name = self.re_source_tags.replace(&name, "");
        let name = self.re_codec.replace(&name, "");
        name.trim().to_string()
    }

    /// Cuts a cleaned title before its first season/episode marker.
    ///
    /// For a three-digit `SEE` match the cut is made at that exact run. An
    /// empty result falls back to the whole title.
    pub fn series_name(&self, cleaned: &str, se: Option<&SeasonEpisode>) -> String {
        let cut = match se {
            Some(se) if se.rule == SeasonEpisodeRule::Combined => {
                let run = format!("{}{:02}", se.season, se.episode);
                cleaned
                    .split(' ')
                    .position(|w| w == run)
                    .map(|i| cleaned.split(' ').take(i).collect::<Vec<_>>().join(" "))
            }
            _ => self
                .re_series_marker
                .find(cleaned)
                .map(|m| cleaned[..m.start()].to_string()),
        };

        match cut.map(|c| c.trim().to_string()) {
            Some(c) if !c.is_empty() => c,
            _ => cleaned.to_string(),
        }
    }

    /// Removes a year word from a series title. A title that is only the
    /// year (`1923`) is left alone.
    pub fn strip_series_year(&self, title: &str, year: u16) -> String {
        let year = year.to_string();
        let words: Vec<&str> = title.split(' ').collect();
        if words.iter().all(|w| *w == year) {
            return title.to_string();
        }
        words
            .into_iter()
            .filter(|w| *w != year)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Removes the release year from a movie title, dropping any trailing
    /// edition words after it (`Title 2010 Extended Cut` → `Title`).
    pub fn strip_movie_year(&self, title: &str, year: u16) -> String {
        let year = year.to_string();
        let words: Vec<&str> = title.split(' ').collect();
        match words.iter().rposition(|w| *w == year) {
            Some(0) if words.len() > 1 => words[1..].join(" "),
            Some(0) | None => title.to_string(),
            Some(i) => words[..i].join(" "),
        }
    }
}
