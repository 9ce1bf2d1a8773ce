//! rusty-feedback/crates/rf-api/src/middleware.rs Middleware
//!
//! Custom middleware for security, logging, and cross-origin access.

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};

// Returns the request logger for the Rusty-Feedback API.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent" time
    Logger::default()
}

// The static pages are served from a different origin than the API.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .allow_any_header()
        .max_age(3600)
}

pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
}
