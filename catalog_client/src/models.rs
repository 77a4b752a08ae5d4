//! Catalog response types
//!
//! Identifiers and titles are required: a payload without them fails to
//! decode instead of producing a half-empty value. Descriptive fields the
//! API routinely omits default to empty.

use serde::{Deserialize, Serialize};

/// One page of a paged listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Movie as it appears in lists and search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// Full movie record, requested with credits appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub id: u64,
    pub season_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub episode_count: u32,
    #[serde(default)]
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvDetail {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub number_of_seasons: u32,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub episode_number: u32,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub still_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDetail {
    pub id: u64,
    pub season_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetail {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Reply to a rating submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingResponse {
    pub success: bool,
    pub status_code: i32,
    #[serde(default)]
    pub status_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_detail_deserializes_with_credits() {
        let json = r#"{
            "id": 42,
            "title": "The Answer",
            "overview": "A movie about everything.",
            "runtime": 121,
            "genres": [{ "id": 18, "name": "Drama" }],
            "credits": { "cast": [{ "id": 7, "name": "Some Actor", "character": "Lead" }] }
        }"#;

        let movie: MovieDetail = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 42);
        assert_eq!(movie.runtime, Some(121));
        assert_eq!(movie.genres[0].name, "Drama");
        assert_eq!(movie.credits.unwrap().cast[0].character.as_deref(), Some("Lead"));
    }

    #[test]
    fn movie_detail_minimal() {
        let movie: MovieDetail = serde_json::from_str(r#"{ "id": 1, "title": "T" }"#).unwrap();
        assert!(movie.overview.is_empty());
        assert!(movie.genres.is_empty());
        assert!(movie.credits.is_none());
    }

    #[test]
    fn movie_detail_without_title_fails() {
        let result = serde_json::from_str::<MovieDetail>(r#"{ "id": 1 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn page_of_summaries() {
        let json = r#"{
            "page": 2,
            "results": [{ "id": 5, "title": "Five", "vote_average": 7.5 }],
            "total_pages": 10,
            "total_results": 200
        }"#;

        let page: Page<MovieSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.results.len(), 1);
        assert!((page.results[0].vote_average - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn season_with_episodes() {
        let json = r#"{
            "id": 3624,
            "season_number": 1,
            "name": "Season 1",
            "episodes": [{ "id": 63056, "episode_number": 1, "name": "Winter Is Coming" }]
        }"#;

        let season: SeasonDetail = serde_json::from_str(json).unwrap();
        assert_eq!(season.episodes[0].name, "Winter Is Coming");
    }
}
