use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use rf_api::handlers::AppState;
use rf_auth_simple::Argon2Hasher;
use rf_core::memory::{MemoryAccountStore, MemoryClaimStore, MemoryRatingStore};
use rf_core::FeedbackService;
use serde_json::{json, Value};

fn state() -> web::Data<AppState> {
    let service = FeedbackService::new(
        Arc::new(MemoryRatingStore::new()),
        Arc::new(MemoryClaimStore::new()),
        Arc::new(MemoryAccountStore::new()),
        Arc::new(Argon2Hasher::new()),
    );
    web::Data::new(AppState { service })
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(rf_api::configure_routes),
        )
        .await
    };
}

fn signup_body() -> Value {
    json!({ "fullName": "Amina Hassan", "email": "amina@example.com", "password": "pilau-2024" })
}

fn rating_body(stars: u8) -> Value {
    json!({
        "restaurantId": 3,
        "foodRating": stars,
        "serviceRating": stars,
        "cleanlinessRating": stars,
        "ambianceRating": stars,
        "comment": "Friendly staff and good coffee"
    })
}

#[actix_web::test]
async fn signup_login_and_duplicate() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post().uri("/signup").set_json(signup_body()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "amina@example.com");
    assert!(body["user"].get("passwordHash").is_none());

    let req = test::TestRequest::post().uri("/signup").set_json(signup_body()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "amina@example.com", "password": "pilau-2024" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "amina@example.com", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": false, "message": "Invalid credentials" }));
}

#[actix_web::test]
async fn rate_earn_and_claim() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post().uri("/signup").set_json(signup_body()).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri(&format!("/users/{user_id}/ratings"))
            .set_json(rating_body(4))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let record: Value = test::read_body_json(resp).await;
        assert_eq!(record["pointsAwarded"], 40);
        assert_eq!(record["restaurantName"], "Artcaffe Gigiri");
    }

    let req = test::TestRequest::get().uri(&format!("/users/{user_id}/points")).to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(summary["available"], 120);
    assert_eq!(summary["canClaim"], true);

    let req = test::TestRequest::post().uri(&format!("/users/{user_id}/claims")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let claim: Value = test::read_body_json(resp).await;
    assert_eq!(claim["rewardsCount"], 1);
    assert_eq!(claim["pointsValue"], 100);

    let req = test::TestRequest::post().uri(&format!("/users/{user_id}/claims")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::get().uri(&format!("/users/{user_id}/activity")).to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed.as_array().unwrap().len(), 4);

    let req = test::TestRequest::get().uri(&format!("/users/{user_id}/stats")).to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["totalRatings"], 3);
    assert_eq!(stats["totalPoints"], 120);
}

#[actix_web::test]
async fn invalid_rating_is_a_bad_request() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post().uri("/signup").set_json(signup_body()).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let mut short = rating_body(5);
    short["comment"] = json!("meh");
    let req = test::TestRequest::post()
        .uri(&format!("/users/{user_id}/ratings"))
        .set_json(short)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri(&format!("/users/{user_id}/ratings")).to_request();
    let records: Value = test::call_and_read_body_json(&app, req).await;
    assert!(records.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn unknown_user_is_not_found() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/users/0190f0c1-0000-7000-8000-000000000000/points")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn restaurant_search() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/restaurants?q=westgate").to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "KFC Westgate");

    let req = test::TestRequest::get().uri("/restaurants").to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.as_array().unwrap().len(), 6);
}

#[actix_web::test]
async fn malformed_requests_get_json_failure_bodies() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({ "email": "amina@example.com", "password": "pilau-2024" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("fullName"));

    let req = test::TestRequest::post().uri("/signup").set_json(signup_body()).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let mut out_of_range = rating_body(5);
    out_of_range["foodRating"] = json!(300);
    let req = test::TestRequest::post()
        .uri(&format!("/users/{user_id}/ratings"))
        .set_json(out_of_range)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());

    let req = test::TestRequest::post().uri("/users/not-a-uuid/claims").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("not-a-uuid"));
}
