use thiserror::Error;

use kinoteka_core::KinotekaError;

/// Errors raised while talking to the TMDB API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No API key was configured.
    #[error("TMDB API key is not set")]
    MissingApiKey,

    /// The request could not be sent or the connection failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// TMDB answered with a non-success status.
    #[error("TMDB returned HTTP {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode TMDB response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<CatalogError> for KinotekaError {
    fn from(err: CatalogError) -> Self {
        KinotekaError::Catalog(err.to_string())
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_into_core_catalog_error() {
        let err: KinotekaError = CatalogError::MissingApiKey.into();
        assert!(matches!(err, KinotekaError::Catalog(ref msg) if msg.contains("API key")));
        assert!(!err.is_fatal());
    }

    #[test]
    fn status_message_names_endpoint() {
        let err = CatalogError::Status {
            status: 401,
            endpoint: "search/movie".into(),
        };
        assert_eq!(err.to_string(), "TMDB returned HTTP 401 for search/movie");
    }
}
