use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use kinoteka_core::{Catalog, CatalogCandidate};

use crate::error::{CatalogError, Result};

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ID_TAG: &str = "tmdbid";

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieSearchResult {
    id: u64,
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    popularity: f64,
}

#[derive(Debug, Deserialize)]
struct TmdbTvSearchResult {
    id: u64,
    name: String,
    #[serde(default)]
    first_air_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    popularity: f64,
}

impl From<TmdbMovieSearchResult> for CatalogCandidate {
    fn from(r: TmdbMovieSearchResult) -> Self {
        CatalogCandidate {
            id: r.id,
            title: r.title,
            date: non_empty(r.release_date),
            popularity: r.popularity,
            overview: non_empty(r.overview),
        }
    }
}

impl From<TmdbTvSearchResult> for CatalogCandidate {
    fn from(r: TmdbTvSearchResult) -> Self {
        CatalogCandidate {
            id: r.id,
            title: r.name,
            date: non_empty(r.first_air_date),
            popularity: r.popularity,
            overview: non_empty(r.overview),
        }
    }
}

// TMDB sends "" for unknown dates and overviews.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Blocking TMDB v3 search client.
pub struct TmdbClient {
    http: Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl TmdbClient {
    /// Creates a client for `api_key`.
    ///
    /// # Errors
    ///
    /// `MissingApiKey` for a blank key, `Http` when the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey);
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("kinoteka/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: TMDB_BASE_URL.to_string(),
            language: "en-US".to_string(),
        })
    }

    /// Points the client at another API root (a proxy or a local mock).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the response language, `en-US` by default.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /search/movie`, optionally narrowed by release year.
    pub fn search_movies(&self, title: &str, year: Option<u16>) -> Result<Vec<CatalogCandidate>> {
        let body = self.search("search/movie", title, year.map(|y| ("year", y)))?;
        parse_movies(&body)
    }

    /// `GET /search/tv`, optionally narrowed by first-air year.
    pub fn search_series(&self, title: &str, year: Option<u16>) -> Result<Vec<CatalogCandidate>> {
        let body = self.search("search/tv", title, year.map(|y| ("first_air_date_year", y)))?;
        parse_series(&body)
    }

    fn search(&self, endpoint: &str, title: &str, year: Option<(&str, u16)>) -> Result<String> {
        let mut params: Vec<(&str, String)> = vec![
            ("api_key", self.api_key.clone()),
            ("query", title.to_string()),
            ("include_adult", "false".to_string()),
            ("language", self.language.clone()),
            ("page", "1".to_string()),
        ];
        if let Some((key, year)) = year {
            params.push((key, year.to_string()));
        }

        debug!(endpoint, title, ?year, "querying TMDB");
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self.http.get(&url).query(&params).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }
        Ok(response.text()?)
    }
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl Catalog for TmdbClient {
    fn id_tag(&self) -> &str {
        ID_TAG
    }

    fn search_movie(
        &self,
        title: &str,
        year: Option<u16>,
    ) -> kinoteka_core::Result<Vec<CatalogCandidate>> {
        Ok(self.search_movies(title, year)?)
    }

    fn search_tv(
        &self,
        title: &str,
        year: Option<u16>,
    ) -> kinoteka_core::Result<Vec<CatalogCandidate>> {
        Ok(self.search_series(title, year)?)
    }
}

fn parse_movies(body: &str) -> Result<Vec<CatalogCandidate>> {
    let response: TmdbSearchResponse<TmdbMovieSearchResult> = serde_json::from_str(body)?;
    Ok(response.results.into_iter().map(Into::into).collect())
}

fn parse_series(body: &str) -> Result<Vec<CatalogCandidate>> {
    let response: TmdbSearchResponse<TmdbTvSearchResult> = serde_json::from_str(body)?;
    Ok(response.results.into_iter().map(Into::into).collect())
}
