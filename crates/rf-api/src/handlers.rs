//! # rf-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the
//! `FeedbackService`. There is no session layer: the user id travels in the
//! path, the way the legacy pages kept it in local storage.

use actix_web::{web, HttpResponse};
use rf_core::models::{AccountProfile, RatingSubmission};
use rf_core::FeedbackService;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub service: FeedbackService,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: AccountProfile,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

pub async fn signup(
    data: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = body.into_inner();
    let user = data
        .service
        .register(&req.full_name, &req.email, &req.password)
        .await?;
    Ok(HttpResponse::Created().json(AuthResponse { success: true, user }))
}

pub async fn login(
    data: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = data.service.authenticate(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(AuthResponse { success: true, user }))
}

/// Lists the catalog, optionally filtered by `?q=`.
pub async fn list_restaurants(
    data: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    HttpResponse::Ok().json(data.service.restaurants(query.q.as_deref()))
}

pub async fn submit_rating(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<RatingSubmission>,
) -> Result<HttpResponse, ApiError> {
    let record = data
        .service
        .submit_rating(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(record))
}

pub async fn list_ratings(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let records = data.service.ratings_for(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn points(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let summary = data.service.points_summary(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(summary))
}

pub async fn claim_rewards(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let claim = data.service.claim_rewards(path.into_inner()).await?;
    Ok(HttpResponse::Created().json(claim))
}

pub async fn activity(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let feed = data.service.activity(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(feed))
}

pub async fn stats(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let stats = data.service.stats(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(stats))
}
