// src/main.rs

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use cinemabot::application::{AppState, Dispatcher, Poller, Presenter};
use cinemabot::config::Config;
use cinemabot::db::{
    create_connection_pool, get_database_stats, initialize_database, verify_database_integrity,
};
use cinemabot::integrations::{FilmixClient, KinopoiskClient, TelegramClient};
use cinemabot::repositories::{SearchHistoryRepository, SqliteSearchHistoryRepository};
use cinemabot::services::{FilmLookupService, HistoryService, LinkResolver, SessionStore};

/// How often idle sessions are swept
const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 0. LOGGING (log records are bridged into tracing)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cinemabot=info")),
        )
        .init();

    // 1. CONFIGURATION
    let config = Config::from_env().context("invalid configuration")?;

    // 2. INFRASTRUCTURE
    let pool = Arc::new(
        create_connection_pool(&config.database_path)
            .with_context(|| format!("cannot open {}", config.database_path.display()))?,
    );
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;

        let stats = get_database_stats(&conn)?;
        info!(
            "Database ready at {} ({} users, {} searches, {} bytes)",
            config.database_path.display(),
            stats.user_count,
            stats.search_count,
            stats.size_bytes
        );
    }

    let kinopoisk = Arc::new(KinopoiskClient::new(&config.kinopoisk_api_key, config.http_timeout)?);
    let filmix = Arc::new(FilmixClient::new(config.http_timeout)?);
    let telegram = Arc::new(TelegramClient::new(&config.bot_token, config.http_timeout)?);

    // 3. REPOSITORIES
    let history_repo: Arc<dyn SearchHistoryRepository> =
        Arc::new(SqliteSearchHistoryRepository::new(pool.clone()));

    // 4. SERVICES
    let sessions = Arc::new(SessionStore::new(config.session_idle));
    let film_lookup = Arc::new(FilmLookupService::new(
        kinopoisk,
        config.movie_cap,
        config.rate_limit_backoff,
    ));
    let history_service = Arc::new(HistoryService::new(history_repo));
    let link_resolver = Arc::new(LinkResolver::new(filmix, config.links_cap));

    let sweeper = sessions.clone().spawn_sweeper(SWEEP_INTERVAL);

    // 5. APPLICATION STATE
    let app_state = Arc::new(AppState {
        sessions,
        film_lookup,
        history_service,
        presenter: Arc::new(Presenter::new(link_resolver)),
    });

    // 6. POLLING
    let dispatcher = Arc::new(Dispatcher::new(app_state, telegram.clone()));
    let poller = Poller::new(telegram, dispatcher);

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Bot stopped");
        }
    }

    sweeper.abort();
    Ok(())
}
