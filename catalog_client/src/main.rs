//! Catalog Client - command line access to the cached fetch pipeline
//!
//! Fetches movie/TV metadata through the same cache and fan-out code the
//! app screens use, and prints the decoded result as JSON.

use catalog_client::cache::{CacheRegistry, RegistryConfig};
use catalog_client::config::{default_cache_dir, CacheConfig, ClientConfig};
use catalog_client::models::{MovieSummary, Page, RatingResponse};
use catalog_client::{screens, CatalogClient, TmdbApi};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Cached movie/TV catalog client
#[derive(Parser, Debug)]
#[command(name = "catalog_client")]
#[command(version, about, long_about = None)]
struct Args {
    /// API key (defaults to the TMDB_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Response language
    #[arg(long, default_value = "en-US")]
    locale: String,

    /// Cache root directory
    #[arg(long, default_value_t = default_cache_dir().to_string_lossy().to_string())]
    cache_dir: String,

    /// Entries kept in memory per cache namespace
    #[arg(long, default_value_t = 50)]
    cache_entries: usize,

    /// Cache entry lifetime in minutes
    #[arg(long, default_value_t = 180)]
    cache_ttl_minutes: u64,

    /// API scheme
    #[arg(long, default_value = "https")]
    scheme: String,

    /// API host (host[:port])
    #[arg(long, default_value = "api.themoviedb.org")]
    host: String,

    /// Clear every cache namespace before running
    #[arg(long, default_value_t = false)]
    clear_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Popular, now playing, top rated and upcoming movies
    Home,
    /// Movie detail with recommendations
    Movie { id: u64 },
    /// TV show detail with one season
    Season { tv_id: u64, season: u32 },
    /// Person detail
    Person { id: u64 },
    /// Search movies by title (not cached)
    Search { query: String },
    /// Rate a movie (0.5 - 10.0)
    Rate { id: u64, value: f32 },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let Some(api_key) = args
        .api_key
        .clone()
        .or_else(|| std::env::var("TMDB_API_KEY").ok())
    else {
        log::error!("No API key: pass --api-key or set TMDB_API_KEY");
        std::process::exit(1);
    };

    let config = ClientConfig {
        locale: args.locale.clone(),
        scheme: args.scheme.clone(),
        host: args.host.clone(),
        cache_dir: PathBuf::from(&args.cache_dir),
        cache: CacheConfig::default()
            .with_memory_count_limit(args.cache_entries)
            .with_ttl_minutes(args.cache_ttl_minutes),
        ..ClientConfig::new(api_key)
    };

    let caches = CacheRegistry::new(&config.cache_dir, RegistryConfig::new(config.cache.clone()));
    if args.clear_cache {
        caches.clear_all();
    }

    let client = CatalogClient::new();
    let api = TmdbApi::from_config(&config);

    let outcome = match args.command {
        Command::Home => screens::load_home_feed(&client, &api, &caches)
            .await
            .map(|feed| print_json(&feed)),
        Command::Movie { id } => screens::load_movie_page(&client, &api, &caches, id)
            .await
            .map(|page| print_json(&page)),
        Command::Season { tv_id, season } => {
            screens::load_season_page(&client, &api, &caches, tv_id, season)
                .await
                .map(|page| print_json(&page))
        }
        Command::Person { id } => screens::load_person(&client, &api, &caches, id)
            .await
            .map(|person| print_json(&person)),
        Command::Search { query } => client
            .fetch_uncached::<Page<MovieSummary>>(api.search_movies(&query, 1))
            .await
            .map(|page| print_json(&page)),
        Command::Rate { id, value } => client
            .fetch_uncached::<RatingResponse>(api.rate_movie(id, value))
            .await
            .map(|reply| print_json(&reply)),
    };

    for (namespace, stats) in caches.stats() {
        log::debug!("{}: {:?}", namespace.name(), stats);
    }

    if let Err(e) = outcome {
        log::error!("Request failed: {}", e);
        std::process::exit(1);
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize output: {}", e),
    }
}
