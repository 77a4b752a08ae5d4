//! End-to-end tests for screen feeds against a mock catalog server.

use catalog_client::cache::{CacheRegistry, RegistryConfig};
use catalog_client::screens::{load_home_feed, load_movie_page, load_person, load_season_page};
use catalog_client::tmdb::keys;
use catalog_client::{CatalogClient, FetchError, MovieList, TmdbApi};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> TmdbApi {
    let uri = server.uri();
    TmdbApi::new("test_key", "en-US").with_base("http", uri.trim_start_matches("http://"))
}

/// A one-movie page whose movie is named after the list
fn list_page_json(list: &str, id: u64) -> serde_json::Value {
    serde_json::json!({
        "page": 1,
        "results": [{ "id": id, "title": format!("{list} movie") }],
        "total_pages": 1,
        "total_results": 1
    })
}

/// Mounts a list endpoint that answers after `delay_ms`
async fn mount_list(server: &MockServer, list: &str, id: u64, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/3/movie/{list}")))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(list_page_json(list, id))
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

// ── home feed ────────────────────────────────────────────────────────

#[tokio::test]
async fn home_feed_sections_keep_their_positions() {
    let server = MockServer::start().await;
    // Completion order is the reverse of section order
    mount_list(&server, "popular", 1, 300).await;
    mount_list(&server, "now_playing", 2, 200).await;
    mount_list(&server, "top_rated", 3, 100).await;
    mount_list(&server, "upcoming", 4, 0).await;

    let temp_dir = TempDir::new().unwrap();
    let caches = CacheRegistry::new(temp_dir.path(), RegistryConfig::default());

    let feed = load_home_feed(&CatalogClient::new(), &api_for(&server), &caches)
        .await
        .unwrap();

    assert_eq!(feed.popular.results[0].id, 1);
    assert_eq!(feed.now_playing.results[0].id, 2);
    assert_eq!(feed.top_rated.results[0].id, 3);
    assert_eq!(feed.upcoming.results[0].id, 4);

    for list in MovieList::ALL {
        assert!(caches.movie_list.get(&keys::movie_list(list, 1)).is_some());
    }
}

#[tokio::test]
async fn home_feed_second_load_is_served_from_cache() {
    let server = MockServer::start().await;
    for (i, list) in MovieList::ALL.iter().enumerate() {
        mount_list(&server, list.path(), i as u64, 0).await;
    }

    let temp_dir = TempDir::new().unwrap();
    let caches = CacheRegistry::new(temp_dir.path(), RegistryConfig::default());
    let client = CatalogClient::new();
    let api = api_for(&server);

    load_home_feed(&client, &api, &caches).await.unwrap();
    load_home_feed(&client, &api, &caches).await.unwrap();

    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn home_feed_fails_when_one_section_fails() {
    let server = MockServer::start().await;
    mount_list(&server, "popular", 1, 0).await;
    mount_list(&server, "now_playing", 2, 0).await;
    mount_list(&server, "upcoming", 4, 0).await;
    Mock::given(method("GET"))
        .and(path("/3/movie/top_rated"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(100)))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let caches = CacheRegistry::new(temp_dir.path(), RegistryConfig::default());

    let result = load_home_feed(&CatalogClient::new(), &api_for(&server), &caches).await;

    match result {
        Err(FetchError::HttpStatus(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("Expected HTTP 500, got: {other:?}"),
    }
    assert!(caches
        .movie_list
        .get(&keys::movie_list(MovieList::TopRated, 1))
        .is_none());
}

// ── detail pages ─────────────────────────────────────────────────────

#[tokio::test]
async fn movie_page_joins_detail_and_recommendations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "title": "The Answer",
            "credits": { "cast": [{ "id": 9, "name": "Lead Actor" }] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/movie/42/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_page_json("similar", 43)))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let caches = CacheRegistry::new(temp_dir.path(), RegistryConfig::default());
    let client = CatalogClient::new();
    let api = api_for(&server);

    let page = load_movie_page(&client, &api, &caches, 42).await.unwrap();
    assert_eq!(page.detail.title, "The Answer");
    assert_eq!(page.recommendations.results[0].id, 43);

    // Second load comes entirely from cache
    let again = load_movie_page(&client, &api, &caches, 42).await.unwrap();
    assert_eq!(again.detail, page.detail);
}

#[tokio::test]
async fn season_page_joins_show_and_season() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/tv/1399"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1399,
            "name": "Some Show",
            "number_of_seasons": 8
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/tv/1399/season/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 3624,
            "season_number": 1,
            "episodes": [
                { "id": 1, "episode_number": 1, "name": "Pilot" },
                { "id": 2, "episode_number": 2, "name": "Second" }
            ]
        })))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let caches = CacheRegistry::new(temp_dir.path(), RegistryConfig::default());

    let page = load_season_page(&CatalogClient::new(), &api_for(&server), &caches, 1399, 1)
        .await
        .unwrap();

    assert_eq!(page.show.number_of_seasons, 8);
    assert_eq!(page.season.episodes.len(), 2);
    assert!(caches.season_detail.get(&keys::season_detail(1399, 1)).is_some());
    assert!(caches.tv_detail.get(&keys::tv_detail(1399)).is_some());
}

#[tokio::test]
async fn person_is_cached_in_its_own_namespace() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/person/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "name": "Some Person",
            "known_for_department": "Acting"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let caches = CacheRegistry::new(temp_dir.path(), RegistryConfig::default());
    let client = CatalogClient::new();
    let api = api_for(&server);

    let person = load_person(&client, &api, &caches, 7).await.unwrap();
    assert_eq!(person.known_for_department.as_deref(), Some("Acting"));

    load_person(&client, &api, &caches, 7).await.unwrap();
    assert_eq!(caches.person_detail.stats().memory_hits, 1);
    assert_eq!(caches.movie_detail.len_in_memory(), 0);
}
