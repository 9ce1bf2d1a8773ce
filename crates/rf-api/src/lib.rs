//! # rf-api
//!
//! The web routing and orchestration layer for Rusty-Feedback.

pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::{web, HttpRequest};
use rf_core::error::AppError;

use crate::error::ApiError;

/// Configures the routes of the feedback API.
///
/// # Developer Note
/// The main binary mounts this at the root; the same config can be mounted
/// under a prefix (e.g., /api/v1/) by wrapping it in a scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Extractor failures use the same `{ success, message }` body as every other error
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError(AppError::validation(err.to_string())).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError(AppError::validation(err.to_string())).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|_err, req| unknown_user(req).into()));

    cfg.route("/health", web::get().to(handlers::health))
        // Legacy mock-server compatible auth endpoints
        .route("/signup", web::post().to(handlers::signup))
        .route("/login", web::post().to(handlers::login))
        .route("/restaurants", web::get().to(handlers::list_restaurants))
        .service(
            web::scope("/users/{user_id}")
                .route("/ratings", web::get().to(handlers::list_ratings))
                .route("/ratings", web::post().to(handlers::submit_rating))
                .route("/points", web::get().to(handlers::points))
                .route("/claims", web::post().to(handlers::claim_rewards))
                .route("/activity", web::get().to(handlers::activity))
                .route("/stats", web::get().to(handlers::stats)),
        );
}

/// A user id that is not even a UUID cannot name an account.
fn unknown_user(req: &HttpRequest) -> ApiError {
    let id = req.match_info().get("user_id").unwrap_or_default();
    ApiError(AppError::not_found("Account", id))
}
