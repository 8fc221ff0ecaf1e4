use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{
    LoginRequest, PlayerListItem, RatingPointItem, RegisterRequest, RegisteredPlayer,
    SessionResponse,
};
use super::{run_blocking, AppState};

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    let registered = run_blocking(&state, move |ladder| {
        ladder.register(&request.name, &request.pin, &request.pin_confirmation)
    })
    .await;

    match registered {
        Ok(player) => (
            StatusCode::CREATED,
            Json(RegisteredPlayer {
                name: player.name,
                rating: player.rating,
            }),
        )
            .into_response(),
        Err(response) => response,
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    match run_blocking(&state, move |ladder| ladder.login(&request.name, &request.pin)).await {
        Ok(session) => Json(SessionResponse {
            player: session.player,
        })
        .into_response(),
        Err(response) => response,
    }
}

pub async fn get_players(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let players = match run_blocking(&state, |ladder| ladder.standings()).await {
        Ok(players) => players,
        Err(response) => return response,
    };

    let items: Vec<PlayerListItem> = players
        .into_iter()
        .enumerate()
        .map(|(i, player)| PlayerListItem::ranked(i + 1, player))
        .collect();

    Json(items).into_response()
}

pub async fn get_rating_history(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match run_blocking(&state, move |ladder| ladder.rating_history(&name)).await {
        Ok(history) => {
            let points: Vec<RatingPointItem> = history.into_iter().map(Into::into).collect();
            Json(points).into_response()
        }
        Err(response) => response,
    }
}
