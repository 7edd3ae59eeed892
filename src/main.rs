//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run the CLI command.
//! No business logic here.

use clap::Parser;
use dotenv::dotenv;
use mastodon_swims::adapters::http::{CachedHttp, ReqwestHttp};
use mastodon_swims::adapters::parser::SentencePattern;
use mastodon_swims::adapters::persistence::SqliteResponseCache;
use mastodon_swims::adapters::ui::{Cli, CliInputPort, prompt_handle};
use mastodon_swims::domain::Handle;
use mastodon_swims::ports::{HttpPort, InputPort, SwimLogParser};
use mastodon_swims::shared::config::AppConfig;
use mastodon_swims::usecases::{FetchService, IdentityResolver, PaginatedFetcher, SwimLogView};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Ok(path) = &env_loaded {
        info!(path = %path.display(), "loaded .env");
    }

    let cli = Cli::parse();
    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config could not be loaded, using defaults");
        AppConfig::default()
    });

    // --- Handle: flag/env, then config, then prompt. Validated before any request. ---
    let raw_handle = match cli.mastodon_user.clone().or_else(|| cfg.user.clone()) {
        Some(h) => h,
        None => prompt_handle().map_err(|e| anyhow::anyhow!("{}", e))?,
    };
    let handle = Handle::parse(&raw_handle).map_err(|e| anyhow::anyhow!("{}", e))?;

    let zone = cfg.reference_zone().map_err(|e| anyhow::anyhow!("{}", e))?;

    // --- Transport, optionally behind the response cache ---
    let live: Arc<dyn HttpPort> = Arc::new(ReqwestHttp::new());
    let http: Arc<dyn HttpPort> = if cfg.is_cache_enabled() && !cli.no_cache {
        let cache_dir = cfg.cache_dir_or_default();
        match SqliteResponseCache::connect(&cache_dir, cfg.cache_ttl()).await {
            Ok(cache) => {
                if let Err(e) = cache.clear_expired().await {
                    warn!(error = %e, "could not purge expired cache entries");
                }
                Arc::new(CachedHttp::new(Arc::clone(&live), Arc::new(cache)))
            }
            Err(e) => {
                warn!(path = %cache_dir.display(), error = %e, "response cache unavailable, running uncached");
                live
            }
        }
    } else {
        info!("response cache disabled");
        live
    };

    // --- Services ---
    let fetcher = Arc::new(PaginatedFetcher::new(
        Arc::clone(&http),
        cfg.page_limit_or_default(),
    ));
    let resolver = Arc::new(IdentityResolver::new(Arc::clone(&http), Arc::clone(&fetcher)));
    let fetch_service = Arc::new(FetchService::new(resolver, fetcher));

    let parser: Arc<dyn SwimLogParser> = Arc::new(SentencePattern::new());
    let swim_log = Arc::new(SwimLogView::new(parser, zone, cfg.goal()));

    let input_port: Arc<dyn InputPort> = Arc::new(CliInputPort::new(
        cli.command,
        handle,
        fetch_service,
        swim_log,
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
