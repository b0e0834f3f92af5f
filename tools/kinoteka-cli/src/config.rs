//! JSON settings file and command-line overrides.
//!
//! Precedence: defaults < settings file < `TMDB_API_KEY` < flags. Clap
//! folds the environment variable into `--tmdb-api-key`, so applying
//! [`Overrides`] after the file covers the last two steps.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use kinoteka::{OrganizerConfig, ResolveMode};

const DEFAULT_MEDIA_DIR: &str = "/data/media";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub directories: Directories,
    pub permissions: Permissions,
    pub tmdb: TmdbSettings,
    pub logging: LoggingSettings,
    pub options: Options,
}

/// Library layout. Unset sub-directories derive from `media_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Directories {
    pub media_dir: PathBuf,
    pub downloads: Option<PathBuf>,
    pub films: Option<PathBuf>,
    pub series: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub user: String,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbSettings {
    pub api_key: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Prompt when catalog ranking cannot decide.
    pub interactive: bool,
    /// Prompt only on exact popularity ties.
    pub semi_interactive: bool,
    /// Shows whose files may carry a bare `Episode N`.
    pub known_shows: Vec<String>,
    /// Overrides the built-in video extension list when non-empty.
    pub video_extensions: Vec<String>,
}

impl Default for Directories {
    fn default() -> Self {
        Self {
            media_dir: PathBuf::from(DEFAULT_MEDIA_DIR),
            downloads: None,
            films: None,
            series: None,
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            user: "jellyfin".to_string(),
            group: "media".to_string(),
        }
    }
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            enabled: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_file: None,
            verbose: true,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interactive: true,
            semi_interactive: false,
            known_shows: Vec::new(),
            video_extensions: Vec::new(),
        }
    }
}

/// Flags that override the settings file.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Base media directory
    #[arg(long, value_name = "DIR")]
    pub media_dir: Option<PathBuf>,

    /// Downloads directory (default: <media-dir>/downloads)
    #[arg(long, value_name = "DIR")]
    pub downloads: Option<PathBuf>,

    /// Movies library directory (default: <media-dir>/films)
    #[arg(long, value_name = "DIR")]
    pub films: Option<PathBuf>,

    /// TV series library directory (default: <media-dir>/series)
    #[arg(long, value_name = "DIR")]
    pub series: Option<PathBuf>,

    /// Owner of moved files
    #[arg(long)]
    pub user: Option<String>,

    /// Group of moved files
    #[arg(long)]
    pub group: Option<String>,

    /// Log file path
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// TMDB API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub tmdb_api_key: Option<String>,

    /// Disable TMDB lookups
    #[arg(long)]
    pub disable_tmdb: bool,

    /// Never prompt; take the most popular catalog match
    #[arg(long, conflicts_with = "semi_interactive")]
    pub non_interactive: bool,

    /// Prompt only when the top catalog matches are tied
    #[arg(long)]
    pub semi_interactive: bool,

    /// Extra known show for the `Episode N` cue (repeatable)
    #[arg(long = "known-show", value_name = "TITLE")]
    pub known_shows: Vec<String>,
}

impl Settings {
    /// The file written by `init-config`.
    pub fn template() -> Self {
        let media_dir = PathBuf::from(DEFAULT_MEDIA_DIR);
        Self {
            directories: Directories {
                downloads: Some(media_dir.join("downloads")),
                films: Some(media_dir.join("films")),
                series: Some(media_dir.join("series")),
                media_dir,
            },
            logging: LoggingSettings {
                log_file: Some(PathBuf::from("/tmp/kinoteka.log")),
                verbose: true,
            },
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in configuration file {}", path.display()))
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&Self::template())?;
        fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write configuration template {}", path.display()))
    }

    /// Finds the settings file: the explicit path, then the user config
    /// directory, `/etc/kinoteka` and the working directory.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        default_locations().into_iter().find(|p| p.is_file())
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        let directories = &mut self.directories;
        if let Some(media_dir) = &overrides.media_dir {
            directories.media_dir = media_dir.clone();
            // A new base re-derives whatever the flags leave unset.
            directories.downloads = None;
            directories.films = None;
            directories.series = None;
        }
        if let Some(path) = &overrides.downloads {
            directories.downloads = Some(path.clone());
        }
        if let Some(path) = &overrides.films {
            directories.films = Some(path.clone());
        }
        if let Some(path) = &overrides.series {
            directories.series = Some(path.clone());
        }

        if let Some(user) = &overrides.user {
            self.permissions.user = user.clone();
        }
        if let Some(group) = &overrides.group {
            self.permissions.group = group.clone();
        }
        if let Some(log) = &overrides.log {
            self.logging.log_file = Some(log.clone());
        }

        if let Some(key) = overrides.tmdb_api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            self.tmdb.api_key = key.to_string();
        }
        if overrides.disable_tmdb {
            self.tmdb.enabled = false;
        }

        if overrides.non_interactive {
            self.options.interactive = false;
            self.options.semi_interactive = false;
        }
        if overrides.semi_interactive {
            self.options.semi_interactive = true;
        }
        self.options
            .known_shows
            .extend(overrides.known_shows.iter().cloned());
    }

    pub fn downloads(&self) -> PathBuf {
        self.directories
            .downloads
            .clone()
            .unwrap_or_else(|| self.directories.media_dir.join("downloads"))
    }

    pub fn films(&self) -> PathBuf {
        self.directories
            .films
            .clone()
            .unwrap_or_else(|| self.directories.media_dir.join("films"))
    }

    pub fn series(&self) -> PathBuf {
        self.directories
            .series
            .clone()
            .unwrap_or_else(|| self.directories.media_dir.join("series"))
    }

    pub fn resolve_mode(&self) -> ResolveMode {
        if self.options.semi_interactive {
            ResolveMode::SemiInteractive
        } else if self.options.interactive {
            ResolveMode::Interactive
        } else {
            ResolveMode::Automatic
        }
    }

    /// API key to use, `None` when lookups are off or no key is set.
    pub fn tmdb_api_key(&self) -> Option<&str> {
        let key = self.tmdb.api_key.trim();
        (self.tmdb.enabled && !key.is_empty()).then_some(key)
    }

    pub fn organizer_config(&self) -> OrganizerConfig {
        let config = OrganizerConfig::new()
            .with_movies_root(self.films())
            .with_series_root(self.series())
            .with_resolve_mode(self.resolve_mode())
            .with_known_shows(self.options.known_shows.iter().cloned());
        if self.options.video_extensions.is_empty() {
            config
        } else {
            config.with_video_extensions(&self.options.video_extensions)
        }
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("kinoteka").join("config.json"));
    }
    locations.push(PathBuf::from("/etc/kinoteka/config.json"));
    locations.push(PathBuf::from("config.json"));
    locations
}
