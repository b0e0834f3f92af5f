//! TMDB client against a local mock server.
//!
//! The client is blocking, so the mock server runs on its own tokio runtime
//! and the searches are made from the test thread outside of it.

use kinoteka_catalog::{CatalogError, TmdbClient};
use kinoteka_core::{Catalog, KinotekaError};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MOVIE_BODY: &str = r#"{
    "page": 1,
    "results": [
        {"id": 27205, "title": "Inception", "release_date": "2010-07-15", "popularity": 83.9}
    ]
}"#;

const TV_BODY: &str = r#"{
    "page": 1,
    "results": [
        {"id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17", "popularity": 369.5}
    ]
}"#;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap()
}

fn client(server: &MockServer) -> TmdbClient {
    TmdbClient::new("secret").unwrap().with_base_url(server.uri())
}

#[test]
fn movie_search_sends_key_title_and_year() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("api_key", "secret"))
            .and(query_param("query", "Inception"))
            .and(query_param("year", "2010"))
            .and(query_param("include_adult", "false"))
            .and(query_param("language", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOVIE_BODY))
            .expect(1)
            .mount(&server),
    );

    let candidates = client(&server).search_movies("Inception", Some(2010)).unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, 27205);
    assert_eq!(candidates[0].year(), Some(2010));
}

#[test]
fn tv_search_filters_by_first_air_year() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/search/tv"))
            .and(query_param("query", "Game of Thrones"))
            .and(query_param("first_air_date_year", "2011"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TV_BODY))
            .expect(1)
            .mount(&server),
    );

    let candidates = client(&server).search_tv("Game of Thrones", Some(2011)).unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].title, "Game of Thrones");
    assert_eq!(candidates[0].year(), Some(2011));
}

#[test]
fn rejected_key_maps_to_status_error() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/search/tv"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"status_code":7,"status_message":"Invalid API key"}"#),
            )
            .mount(&server),
    );
    let client = client(&server);

    match client.search_series("Show", None) {
        Err(CatalogError::Status { status, endpoint }) => {
            assert_eq!(status, 401);
            assert_eq!(endpoint, "search/tv");
        }
        other => panic!("expected a status error, got {other:?}"),
    }

    match client.search_tv("Show", None) {
        Err(KinotekaError::Catalog(msg)) => assert!(msg.contains("401"), "{msg}"),
        other => panic!("expected a catalog error, got {other:?}"),
    }
}
