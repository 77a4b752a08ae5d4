//! Endpoint catalogue for a TMDB-style movie/TV API
//!
//! The API key and locale travel as query parameters on every GET.

use crate::config::ClientConfig;
use catalog_common::{cache_key, Endpoint};

pub const USER_AGENT: &str = "catalog_client/1.0";

/// Curated movie listings shown on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieList {
    Popular,
    NowPlaying,
    TopRated,
    Upcoming,
}

impl MovieList {
    /// Home screen section order
    pub const ALL: [MovieList; 4] = [
        MovieList::Popular,
        MovieList::NowPlaying,
        MovieList::TopRated,
        MovieList::Upcoming,
    ];

    pub fn path(self) -> &'static str {
        match self {
            MovieList::Popular => "popular",
            MovieList::NowPlaying => "now_playing",
            MovieList::TopRated => "top_rated",
            MovieList::Upcoming => "upcoming",
        }
    }
}

/// Builds endpoints and their cache keys
#[derive(Debug, Clone)]
pub struct TmdbApi {
    scheme: String,
    host: String,
    api_key: String,
    locale: String,
}

impl TmdbApi {
    pub fn new(api_key: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            scheme: "https".to_string(),
            host: "api.themoviedb.org".to_string(),
            api_key: api_key.into(),
            locale: locale.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_key.clone(), config.locale.clone())
            .with_base(config.scheme.clone(), config.host.clone())
    }

    /// Point at another server, e.g. a local mock
    pub fn with_base(mut self, scheme: impl Into<String>, host: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self.host = host.into();
        self
    }

    fn get(&self, path: String) -> Endpoint {
        Endpoint::get(self.scheme.clone(), self.host.clone(), path)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .query("api_key", &self.api_key)
            .query("language", &self.locale)
    }

    pub fn movie_detail(&self, id: u64) -> Endpoint {
        self.get(format!("3/movie/{}", id))
            .query("append_to_response", "credits")
    }

    pub fn movie_list(&self, list: MovieList, page: u32) -> Endpoint {
        self.get(format!("3/movie/{}", list.path()))
            .query("page", page)
    }

    pub fn movie_recommendations(&self, id: u64, page: u32) -> Endpoint {
        self.get(format!("3/movie/{}/recommendations", id))
            .query("page", page)
    }

    pub fn search_movies(&self, query: &str, page: u32) -> Endpoint {
        self.get("3/search/movie".to_string())
            .query("query", query)
            .query("page", page)
    }

    pub fn tv_detail(&self, id: u64) -> Endpoint {
        self.get(format!("3/tv/{}", id))
    }

    pub fn season_detail(&self, tv_id: u64, season: u32) -> Endpoint {
        self.get(format!("3/tv/{}/season/{}", tv_id, season))
    }

    pub fn person_detail(&self, id: u64) -> Endpoint {
        self.get(format!("3/person/{}", id))
    }

    /// Submit a rating. POST parameters travel in the JSON body, so the key
    /// goes in an Authorization header instead.
    pub fn rate_movie(&self, id: u64, value: f32) -> Endpoint {
        Endpoint::post(
            self.scheme.clone(),
            self.host.clone(),
            format!("3/movie/{}/rating", id),
        )
        .header("User-Agent", USER_AGENT)
        .header("Authorization", format!("Bearer {}", self.api_key))
        .body("value", value)
    }
}

/// Cache keys, one per (entity, view) pair
pub mod keys {
    use super::*;

    pub fn movie_detail(id: u64) -> String {
        cache_key("movie", id, "detail")
    }

    pub fn movie_list(list: MovieList, page: u32) -> String {
        cache_key("movie_list", list.path(), &format!("page{}", page))
    }

    pub fn movie_recommendations(id: u64, page: u32) -> String {
        cache_key("movie", id, &format!("recommendations{}", page))
    }

    pub fn tv_detail(id: u64) -> String {
        cache_key("tv", id, "detail")
    }

    pub fn season_detail(tv_id: u64, season: u32) -> String {
        cache_key("tv", format!("{}/{}", tv_id, season), "season")
    }

    pub fn person_detail(id: u64) -> String {
        cache_key("person", id, "detail")
    }
}
