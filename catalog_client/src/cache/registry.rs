//! One cache store per entity kind, built once at start-up

use super::clock::{Clock, SystemClock};
use super::tiered::{CacheStats, TieredCache};
use crate::config::CacheConfig;
use crate::models::{MovieDetail, MovieSummary, Page, PersonDetail, SeasonDetail, TvDetail};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Entity kinds that get their own cache store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    MovieDetail,
    MovieList,
    TvDetail,
    SeasonDetail,
    PersonDetail,
}

impl Namespace {
    pub const ALL: [Namespace; 5] = [
        Namespace::MovieDetail,
        Namespace::MovieList,
        Namespace::TvDetail,
        Namespace::SeasonDetail,
        Namespace::PersonDetail,
    ];

    /// Directory name under the cache root
    pub fn name(self) -> &'static str {
        match self {
            Namespace::MovieDetail => "movie_detail",
            Namespace::MovieList => "movie_list",
            Namespace::TvDetail => "tv_detail",
            Namespace::SeasonDetail => "season_detail",
            Namespace::PersonDetail => "person_detail",
        }
    }
}

/// Per-namespace cache settings
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub default: CacheConfig,
    pub overrides: HashMap<Namespace, CacheConfig>,
}

impl RegistryConfig {
    pub fn new(default: CacheConfig) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, namespace: Namespace, config: CacheConfig) -> Self {
        self.overrides.insert(namespace, config);
        self
    }

    pub fn config_for(&self, namespace: Namespace) -> CacheConfig {
        self.overrides
            .get(&namespace)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}

/// The process-wide set of cache stores.
///
/// Constructed once and passed by reference to whatever fetches; the stores
/// themselves are `Arc`s so each fetch can hold its own handle.
pub struct CacheRegistry {
    root: PathBuf,
    pub movie_detail: Arc<TieredCache<MovieDetail>>,
    pub movie_list: Arc<TieredCache<Page<MovieSummary>>>,
    pub tv_detail: Arc<TieredCache<TvDetail>>,
    pub season_detail: Arc<TieredCache<SeasonDetail>>,
    pub person_detail: Arc<TieredCache<PersonDetail>>,
}

impl CacheRegistry {
    pub fn new(root: &Path, config: RegistryConfig) -> Self {
        Self::with_clock(root, config, Arc::new(SystemClock))
    }

    pub fn with_clock(root: &Path, config: RegistryConfig, clock: Arc<dyn Clock>) -> Self {
        log::info!("Cache root: {:?}", root);

        Self {
            root: root.to_path_buf(),
            movie_detail: open_store(root, &config, &clock, Namespace::MovieDetail),
            movie_list: open_store(root, &config, &clock, Namespace::MovieList),
            tv_detail: open_store(root, &config, &clock, Namespace::TvDetail),
            season_detail: open_store(root, &config, &clock, Namespace::SeasonDetail),
            person_detail: open_store(root, &config, &clock, Namespace::PersonDetail),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Drop every entry in every namespace
    pub fn clear_all(&self) {
        self.movie_detail.clear();
        self.movie_list.clear();
        self.tv_detail.clear();
        self.season_detail.clear();
        self.person_detail.clear();
    }

    pub fn stats(&self) -> Vec<(Namespace, CacheStats)> {
        vec![
            (Namespace::MovieDetail, self.movie_detail.stats()),
            (Namespace::MovieList, self.movie_list.stats()),
            (Namespace::TvDetail, self.tv_detail.stats()),
            (Namespace::SeasonDetail, self.season_detail.stats()),
            (Namespace::PersonDetail, self.person_detail.stats()),
        ]
    }
}

fn open_store<T>(
    root: &Path,
    config: &RegistryConfig,
    clock: &Arc<dyn Clock>,
    namespace: Namespace,
) -> Arc<TieredCache<T>>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    Arc::new(TieredCache::with_clock(
        namespace.name(),
        &root.join(namespace.name()),
        config.config_for(namespace),
        Arc::clone(clock),
    ))
}
