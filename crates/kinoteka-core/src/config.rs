//! Organizer configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KinotekaError, Result};

/// Default video extensions (lowercase, with the dot).
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[".mkv", ".mp4", ".avi", ".m4v", ".mov", ".wmv", ".flv"];

/// How undecided catalog rankings are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveMode {
    /// Ask whenever the confidence margin is not cleared.
    #[default]
    Interactive,
    /// Ask only on exact popularity ties.
    SemiInteractive,
    /// Never ask; take the most popular survivor.
    Automatic,
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interactive => write!(f, "interactive"),
            Self::SemiInteractive => write!(f, "semi-interactive"),
            Self::Automatic => write!(f, "automatic"),
        }
    }
}

/// Configuration for an [`crate::Organizer`] run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizerConfig {
    /// Library root for movies.
    pub movies_root: PathBuf,
    /// Library root for series.
    pub series_root: PathBuf,
    /// How catalog ties are settled.
    pub resolve_mode: ResolveMode,
    /// Shows whose files may be named `Episode N` without a season marker.
    pub known_shows: Vec<String>,
    /// Extensions treated as video files.
    pub video_extensions: Vec<String>,
    /// Download sub-directories with this name are never touched.
    pub ignored_directory: String,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            movies_root: PathBuf::from("films"),
            series_root: PathBuf::from("series"),
            resolve_mode: ResolveMode::default(),
            known_shows: Vec::new(),
            video_extensions: DEFAULT_VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ignored_directory: "incomplete".to_string(),
        }
    }
}

impl OrganizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.movies_root = root.into();
        self
    }

    pub fn with_series_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.series_root = root.into();
        self
    }

    pub fn with_resolve_mode(mut self, mode: ResolveMode) -> Self {
        self.resolve_mode = mode;
        self
    }

    /// Adds shows for the `Episode N` cue.
    pub fn with_known_shows<I, S>(mut self, shows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_shows.extend(shows.into_iter().map(Into::into));
        self
    }

    /// Replaces the video extension list. Entries are normalised to a
    /// lowercase, dot-prefixed form.
    pub fn with_video_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.video_extensions = extensions
            .into_iter()
            .map(|e| {
                let e = e.as_ref().trim().to_lowercase();
                if e.starts_with('.') { e } else { format!(".{e}") }
            })
            .collect();
        self
    }

    /// `true` when `file_name` ends with a configured video extension.
    pub fn is_video_file(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.video_extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
    }

    /// `true` for the download sub-directory that must be left alone.
    pub fn is_ignored_directory(&self, dir: &Path) -> bool {
        dir.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n == self.ignored_directory)
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`KinotekaError::InvalidConfig`] for empty roots, identical
    /// roots or an empty extension list.
    pub fn validate(&self) -> Result<()> {
        if self.movies_root.as_os_str().is_empty() || self.series_root.as_os_str().is_empty() {
            return Err(KinotekaError::InvalidConfig("library roots must not be empty".into()));
        }
        if self.movies_root == self.series_root {
            return Err(KinotekaError::InvalidConfig(format!(
                "movies and series share the same root {}",
                self.movies_root.display()
            )));
        }
        if self.video_extensions.is_empty() {
            return Err(KinotekaError::InvalidConfig("no video extensions configured".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = OrganizerConfig::new()
            .with_movies_root("/data/films")
            .with_series_root("/data/series")
            .with_resolve_mode(ResolveMode::Automatic)
            .with_known_shows(["Doctor Who"]);
        assert_eq!(config.movies_root, PathBuf::from("/data/films"));
        assert_eq!(config.series_root, PathBuf::from("/data/series"));
        assert_eq!(config.resolve_mode, ResolveMode::Automatic);
        assert_eq!(config.known_shows, vec!["Doctor Who".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn video_filter() {
        let config = OrganizerConfig::new();
        assert!(config.is_video_file("Movie.2010.mkv"));
        assert!(config.is_video_file("MOVIE.AVI"));
        assert!(!config.is_video_file("Movie.2010.srt"));
        assert!(!config.is_video_file("mkv"));

        let config = config.with_video_extensions(["TS", ".webm"]);
        assert!(config.is_video_file("clip.ts"));
        assert!(config.is_video_file("clip.webm"));
        assert!(!config.is_video_file("Movie.mkv"));
    }

    #[test]
    fn ignored_directory() {
        let config = OrganizerConfig::new();
        assert!(config.is_ignored_directory(Path::new("/downloads/incomplete")));
        assert!(!config.is_ignored_directory(Path::new("/downloads/Show.S01")));
    }

    #[test]
    fn validation_rejects_shared_root() {
        let config = OrganizerConfig::new()
            .with_movies_root("/media")
            .with_series_root("/media");
        assert!(matches!(config.validate(), Err(KinotekaError::InvalidConfig(_))));
        let config = OrganizerConfig::new().with_video_extensions(Vec::<String>::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: OrganizerConfig =
            serde_json::from_str(r#"{"movies_root":"/m","resolve_mode":"semi-interactive"}"#).unwrap();
        assert_eq!(config.movies_root, PathBuf::from("/m"));
        assert_eq!(config.series_root, PathBuf::from("series"));
        assert_eq!(config.resolve_mode, ResolveMode::SemiInteractive);
        assert_eq!(config.video_extensions.len(), 7);
    }
}
