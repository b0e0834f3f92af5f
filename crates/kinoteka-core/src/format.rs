//! # Name Formatter
//!
//! Movies: `Title [(Year)] [[tag-id]] [- [Q]]<ext>`
//!
//! Series: `Title [(Year)] [[tag-id]]/Season NN/Title SxxEyy [- [Q]]<ext>`
//!
//! The year is left out when it equals the title (`1923`).

use serde::{Deserialize, Serialize};

use crate::types::{CanonicalName, CatalogId, MediaKind, Resolution, SeasonEpisode};

/// Fields collected for one media item before formatting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaFields {
    /// Cleaned (and possibly reconstructed) title.
    pub title: String,
    pub year: Option<u16>,
    pub quality: Option<Resolution>,
    /// Catalog id of the accepted candidate.
    pub catalog_id: Option<CatalogId>,
    /// Original extension including the dot, case preserved.
    pub extension: String,
}

impl MediaFields {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_year(mut self, year: Option<u16>) -> Self {
        self.year = year;
        self
    }

    pub fn with_quality(mut self, quality: Option<Resolution>) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_catalog_id(mut self, id: Option<CatalogId>) -> Self {
        self.catalog_id = id;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Year to print, `None` when it would just repeat the title.
    fn display_year(&self) -> Option<u16> {
        self.year.filter(|y| y.to_string() != self.title)
    }
}

/// Stateless renderer for canonical names.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameFormatter;

impl NameFormatter {
    pub fn new() -> Self {
        Self
    }

    /// `Title [(Year)] [[tag-id]]`, used for movie stems and series
    /// directories.
    pub fn heading(&self, fields: &MediaFields) -> String {
        let mut out = sanitize(&fields.title);
        if let Some(year) = fields.display_year() {
            out.push_str(&format!(" ({year})"));
        }
        if let Some(id) = &fields.catalog_id {
            out.push_str(&format!(" {id}"));
        }
        out
    }

    pub fn movie(&self, fields: &MediaFields) -> CanonicalName {
        let file_name = format!(
            "{}{}{}",
            self.heading(fields),
            quality_suffix(fields.quality),
            fields.extension
        );
        CanonicalName {
            kind: MediaKind::Movie,
            directories: Vec::new(),
            file_name,
        }
    }

    pub fn episode(&self, fields: &MediaFields, se: &SeasonEpisode) -> CanonicalName {
        let file_name = format!(
            "{} {se}{}{}",
            sanitize(&fields.title),
            quality_suffix(fields.quality),
            fields.extension
        );
        CanonicalName {
            kind: MediaKind::Series,
            directories: vec![self.heading(fields), season_directory(se.season)],
            file_name,
        }
    }
}

/// `Season NN`.
pub fn season_directory(season: u32) -> String {
    format!("Season {season:02}")
}

fn quality_suffix(quality: Option<Resolution>) -> String {
    quality.map(|q| format!(" - {}", q.tag())).unwrap_or_default()
}

fn sanitize(title: &str) -> String {
    title.replace(['/', '\\'], " ").trim().to_string()
}
