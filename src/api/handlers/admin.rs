use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::RebuildResponse;
use super::{run_blocking, AppState};

pub async fn admin_rebuild(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let auth_header = headers.get("Authorization").and_then(|h| h.to_str().ok());
    let expected = state
        .config
        .auth
        .admin_token
        .as_ref()
        .map(|token| format!("Bearer {token}"));

    if expected.is_none() || auth_header != expected.as_deref() {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    log::info!("Admin triggered rebuild");
    match run_blocking(&state, |ladder| ladder.rebuild()).await {
        Ok(players) => Json(RebuildResponse {
            players: players.len(),
        })
        .into_response(),
        Err(response) => response,
    }
}
