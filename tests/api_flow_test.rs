use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode},
    Router,
};
use chrono::{FixedOffset, TimeZone};
use serde_json::{json, Value};
use tower::ServiceExt;

use pingpong_ladder::api::{create_router, AppState};
use pingpong_ladder::auth::BcryptCredentials;
use pingpong_ladder::clock::FixedClock;
use pingpong_ladder::config::settings::{AppConfig, RatingSettings};
use pingpong_ladder::database;
use pingpong_ladder::services::ladder::LadderService;

const ADMIN_TOKEN: &str = "club-admin";

fn setup() -> Router {
    let now = FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2025, 11, 4, 19, 15, 0)
        .unwrap();
    let ladder = LadderService::new(
        database::create_memory_pool().unwrap(),
        RatingSettings::default(),
        Arc::new(FixedClock(now)),
        Arc::new(BcryptCredentials::new(4)),
    )
    .unwrap();

    let mut config = AppConfig::new();
    config.auth.admin_token = Some(ADMIN_TOKEN.to_string());

    create_router(Arc::new(AppState { ladder, config }))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn as_player(mut request: Request<Body>, player: &str, pin: &str) -> Request<Body> {
    let headers = request.headers_mut();
    headers.insert("x-player", player.parse().unwrap());
    headers.insert("x-pin", pin.parse().unwrap());
    request
}

fn authed_get(uri: &str, player: &str) -> Request<Body> {
    as_player(get(uri), player, "1234")
}

fn authed_post(uri: &str, player: &str, body: Value) -> Request<Body> {
    as_player(post(uri, body), player, "1234")
}

async fn register(app: &Router, name: &str) {
    let (status, _) = send(
        app,
        post(
            "/api/players",
            json!({ "name": name, "pin": "1234", "pinConfirmation": "1234" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn submit(app: &Router, reporter: &str, opponent: &str, score: u32, opponent_score: u32) -> i64 {
    let (status, body) = send(
        app,
        authed_post(
            "/api/matches",
            reporter,
            json!({ "opponent": opponent, "score": score, "opponentScore": opponent_score }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn report_confirm_and_rank() {
    let app = setup();
    register(&app, "anna").await;
    register(&app, "ben").await;

    let id = submit(&app, "anna", "ben", 11, 8).await;

    let (_, anna_pending) = send(&app, authed_get("/api/pending", "anna")).await;
    assert_eq!(anna_pending, json!([]));
    let (_, ben_pending) = send(&app, authed_get("/api/pending", "ben")).await;
    assert_eq!(ben_pending[0]["id"], json!(id));
    assert_eq!(ben_pending[0]["confirmedA"], json!(true));
    assert_eq!(ben_pending[0]["confirmedB"], json!(false));

    let (status, body) = send(
        &app,
        authed_post(&format!("/api/pending/{id}/confirm"), "ben", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("confirmed"));
    assert_eq!(body["match"]["scoreA"], json!(11));

    let (_, players) = send(&app, get("/api/players")).await;
    assert_eq!(players[0]["name"], json!("anna"));
    assert_eq!(players[0]["rating"], json!(1216));
    assert_eq!(players[0]["wins"], json!(1));
    assert_eq!(players[1]["name"], json!("ben"));
    assert_eq!(players[1]["rating"], json!(1184));
    assert_eq!(players[1]["losses"], json!(1));
    assert!(players[0].get("credential").is_none());

    let (_, history) = send(&app, get("/api/player/anna/history")).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["rating"], json!(1216));

    let (_, recent) = send(&app, get("/api/matches/recent")).await;
    assert_eq!(recent.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        authed_post(&format!("/api/pending/{id}/confirm"), "ben", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reject_leaves_ratings_alone() {
    let app = setup();
    register(&app, "anna").await;
    register(&app, "ben").await;

    let id = submit(&app, "ben", "anna", 11, 3).await;

    let (status, removed) = send(
        &app,
        authed_post(&format!("/api/pending/{id}/reject"), "anna", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["id"], json!(id));

    let (_, recent) = send(&app, get("/api/matches/recent")).await;
    assert_eq!(recent, json!([]));
    let (_, players) = send(&app, get("/api/players")).await;
    for player in players.as_array().unwrap() {
        assert_eq!(player["rating"], json!(1200));
        assert_eq!(player["gamesPlayed"], json!(0));
    }
}

#[tokio::test]
async fn reporter_confirming_again_changes_nothing() {
    let app = setup();
    register(&app, "anna").await;
    register(&app, "ben").await;
    let id = submit(&app, "anna", "ben", 11, 9).await;

    let (status, body) = send(
        &app,
        authed_post(&format!("/api/pending/{id}/confirm"), "anna", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("alreadyConfirmed"));
    let (_, ben_pending) = send(&app, authed_get("/api/pending", "ben")).await;
    assert_eq!(ben_pending.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let app = setup();
    register(&app, "anna").await;
    register(&app, "ben").await;
    register(&app, "carl").await;

    let (status, _) = send(
        &app,
        post(
            "/api/players",
            json!({ "name": "anna", "pin": "1", "pinConfirmation": "1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, post("/api/login", json!({ "name": "anna", "pin": "0000" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, post("/api/matches", json!({ "opponent": "ben", "score": 11, "opponentScore": 2 }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        authed_post("/api/matches", "anna", json!({ "opponent": "anna", "score": 11, "opponentScore": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        authed_post("/api/matches", "anna", json!({ "opponent": "ben", "score": 10, "opponentScore": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = submit(&app, "anna", "ben", 11, 2).await;
    let (status, _) = send(
        &app,
        authed_post(&format!("/api/pending/{id}/confirm"), "carl", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, authed_post("/api/pending/999/reject", "ben", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/api/player/ghost/history")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_ascii_player_can_confirm() {
    let app = setup();
    register(&app, "Jürgen").await;
    register(&app, "ben").await;
    let id = submit(&app, "ben", "Jürgen", 11, 7).await;

    let utf8_player = |mut request: Request<Body>| {
        let headers = request.headers_mut();
        headers.insert("x-player", HeaderValue::from_bytes("Jürgen".as_bytes()).unwrap());
        headers.insert("x-pin", HeaderValue::from_static("1234"));
        request
    };

    let (status, pending) = send(&app, utf8_player(get("/api/pending"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending[0]["id"], json!(id));

    let (status, body) = send(
        &app,
        utf8_player(post(&format!("/api/pending/{id}/confirm"), json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("confirmed"));

    let (_, history) = send(&app, get("/api/player/J%C3%BCrgen/history")).await;
    assert_eq!(history[0]["rating"], json!(1184));
}

#[tokio::test]
async fn unknown_opponent_is_not_found() {
    let app = setup();
    register(&app, "anna").await;

    let (status, _) = send(
        &app,
        authed_post("/api/matches", "anna", json!({ "opponent": "ghost", "score": 11, "opponentScore": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_returns_session_player() {
    let app = setup();
    register(&app, "anna").await;

    let (status, body) = send(&app, post("/api/login", json!({ "name": "anna", "pin": "1234" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "player": "anna" }));
}

#[tokio::test]
async fn admin_rebuild_requires_token() {
    let app = setup();
    register(&app, "anna").await;
    register(&app, "ben").await;

    let (status, _) = send(&app, post("/api/admin/rebuild", json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut request = post("/api/admin/rebuild", json!({}));
    request.headers_mut().insert(
        "authorization",
        format!("Bearer {ADMIN_TOKEN}").parse().unwrap(),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["players"], json!(2));
}
