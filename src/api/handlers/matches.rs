use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{
    ConfirmResponse, ConfirmStatus, MatchItem, PendingMatchItem, SubmitMatchRequest,
};
use crate::domain::PendingId;
use crate::workflow::Confirmation;
use super::{authenticate, run_blocking, AppState, RecentParams};

pub async fn submit_match(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SubmitMatchRequest>,
) -> impl IntoResponse {
    let session = match authenticate(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let submitted = run_blocking(&state, move |ladder| {
        ladder.submit(&session, &request.opponent, request.score, request.opponent_score)
    })
    .await;

    match submitted {
        Ok(pending) => (StatusCode::CREATED, Json(PendingMatchItem::from(pending))).into_response(),
        Err(response) => response,
    }
}

pub async fn get_pending(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let session = match authenticate(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match run_blocking(&state, move |ladder| ladder.pending_for(&session.player)).await {
        Ok(pending) => {
            let items: Vec<PendingMatchItem> = pending.into_iter().map(Into::into).collect();
            Json(items).into_response()
        }
        Err(response) => response,
    }
}

pub async fn confirm_pending(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<PendingId>,
) -> impl IntoResponse {
    let session = match authenticate(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let outcome = match run_blocking(&state, move |ladder| ladder.confirm(&session, id)).await {
        Ok(outcome) => outcome,
        Err(response) => return response,
    };

    let response = match outcome {
        Confirmation::AlreadyConfirmed => ConfirmResponse {
            status: ConfirmStatus::AlreadyConfirmed,
            confirmed_match: None,
        },
        Confirmation::AwaitingOpponent => ConfirmResponse {
            status: ConfirmStatus::AwaitingOpponent,
            confirmed_match: None,
        },
        Confirmation::Promote(game) => ConfirmResponse {
            status: ConfirmStatus::Confirmed,
            confirmed_match: Some(game.into()),
        },
    };

    Json(response).into_response()
}

pub async fn reject_pending(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<PendingId>,
) -> impl IntoResponse {
    let session = match authenticate(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match run_blocking(&state, move |ladder| ladder.reject(&session, id)).await {
        Ok(removed) => Json(PendingMatchItem::from(removed)).into_response(),
        Err(response) => response,
    }
}

pub async fn get_recent_matches(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentParams>,
) -> impl IntoResponse {
    let limit = params
        .limit
        .unwrap_or(state.config.server.recent_matches)
        .clamp(1, 100);

    match run_blocking(&state, move |ladder| ladder.recent_matches(limit)).await {
        Ok(matches) => {
            let items: Vec<MatchItem> = matches.into_iter().map(Into::into).collect();
            Json(items).into_response()
        }
        Err(response) => response,
    }
}
