//! # Rusty-Feedback Binary
//!
//! The entry point that assembles the application based on compile-time features.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use rf_api::handlers::AppState;
use rf_api::middleware::{cors_policy, security_headers, standard_middleware};
use rf_auth_simple::Argon2Hasher;
use rf_config::Settings;
use rf_core::{FeedbackService, LedgerPolicy};

#[cfg(feature = "db-sqlite")]
use rf_db_sqlite::SqliteStore;
#[cfg(feature = "db-sqlite")]
use secrecy::ExposeSecret;

#[cfg(not(feature = "db-sqlite"))]
use rf_core::memory::{MemoryAccountStore, MemoryClaimStore, MemoryRatingStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let settings = Settings::load()?;

    // 1. Initialize the store implementation
    #[cfg(feature = "db-sqlite")]
    let service = {
        let store = Arc::new(SqliteStore::new(settings.database.url.expose_secret()).await?);
        FeedbackService::new(
            store.clone(),
            store.clone(),
            store,
            Arc::new(Argon2Hasher::new()),
        )
    };

    #[cfg(not(feature = "db-sqlite"))]
    let service = {
        log::warn!("db-sqlite disabled: ratings and accounts live in memory only");
        FeedbackService::new(
            Arc::new(MemoryRatingStore::new()),
            Arc::new(MemoryClaimStore::new()),
            Arc::new(MemoryAccountStore::new()),
            Arc::new(Argon2Hasher::new()),
        )
    };

    // 2. Apply ledger tunables
    let service = service.with_policy(LedgerPolicy {
        reward_unit: settings.rewards.unit,
        feed_window: settings.rewards.feed_window,
    });

    let state = web::Data::new(AppState { service });
    let bind = (settings.server.host.clone(), settings.server.port);

    log::info!("Rusty-Feedback starting on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(standard_middleware())
            .wrap(security_headers())
            .wrap(cors_policy())
            .configure(rf_api::configure_routes)
    })
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}
