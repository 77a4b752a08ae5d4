//! Screen feeds assembled from several catalog queries at once

use crate::cache::CacheRegistry;
use crate::fetch::CatalogClient;
use crate::join::{join2, join_all};
use crate::models::{MovieDetail, MovieSummary, Page, PersonDetail, SeasonDetail, TvDetail};
use crate::tmdb::{keys, MovieList, TmdbApi};
use catalog_common::{FetchError, Result};
use serde::Serialize;

/// The four home screen sections, in display order
#[derive(Debug, Clone, Serialize)]
pub struct HomeFeed {
    pub popular: Page<MovieSummary>,
    pub now_playing: Page<MovieSummary>,
    pub top_rated: Page<MovieSummary>,
    pub upcoming: Page<MovieSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    pub detail: MovieDetail,
    pub recommendations: Page<MovieSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonPage {
    pub show: TvDetail,
    pub season: SeasonDetail,
}

/// Fetch all home sections concurrently. Any failing section fails the feed.
pub async fn load_home_feed(
    client: &CatalogClient,
    api: &TmdbApi,
    caches: &CacheRegistry,
) -> Result<HomeFeed> {
    let fetches: Vec<_> = MovieList::ALL
        .iter()
        .map(|&list| {
            client.fetch_cached(
                api.movie_list(list, 1),
                &caches.movie_list,
                keys::movie_list(list, 1),
            )
        })
        .collect();

    let pages = join_all(fetches).await?;
    match <[Page<MovieSummary>; 4]>::try_from(pages) {
        Ok([popular, now_playing, top_rated, upcoming]) => Ok(HomeFeed {
            popular,
            now_playing,
            top_rated,
            upcoming,
        }),
        Err(pages) => Err(FetchError::Join(format!(
            "home feed expected 4 sections, got {}",
            pages.len()
        ))),
    }
}

/// Movie detail plus its first page of recommendations
pub async fn load_movie_page(
    client: &CatalogClient,
    api: &TmdbApi,
    caches: &CacheRegistry,
    id: u64,
) -> Result<MoviePage> {
    let (detail, recommendations) = join2(
        client.fetch_cached(api.movie_detail(id), &caches.movie_detail, keys::movie_detail(id)),
        client.fetch_cached(
            api.movie_recommendations(id, 1),
            &caches.movie_list,
            keys::movie_recommendations(id, 1),
        ),
    )
    .await?;

    Ok(MoviePage {
        detail,
        recommendations,
    })
}

/// Show detail plus one season's episode list
pub async fn load_season_page(
    client: &CatalogClient,
    api: &TmdbApi,
    caches: &CacheRegistry,
    tv_id: u64,
    season: u32,
) -> Result<SeasonPage> {
    let (show, season) = join2(
        client.fetch_cached(api.tv_detail(tv_id), &caches.tv_detail, keys::tv_detail(tv_id)),
        client.fetch_cached(
            api.season_detail(tv_id, season),
            &caches.season_detail,
            keys::season_detail(tv_id, season),
        ),
    )
    .await?;

    Ok(SeasonPage { show, season })
}

pub async fn load_person(
    client: &CatalogClient,
    api: &TmdbApi,
    caches: &CacheRegistry,
    id: u64,
) -> Result<PersonDetail> {
    client
        .fetch_cached(api.person_detail(id), &caches.person_detail, keys::person_detail(id))
        .await
}
