use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::config::settings::AppConfig;
use crate::domain::Session;
use crate::errors::{as_ladder_error, LadderError};
use crate::services::ladder::LadderService;

pub mod admin;
pub mod matches;
pub mod players;

pub const PLAYER_HEADER: &str = "x-player";
pub const PIN_HEADER: &str = "x-pin";

pub struct AppState {
    pub ladder: LadderService,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

/// Runs a ladder operation on the blocking pool; PIN hashing and SQLite
/// lock waits must not stall the async workers.
pub async fn run_blocking<T, F>(state: &AppState, operation: F) -> Result<T, Response>
where
    F: FnOnce(&LadderService) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let ladder = state.ladder.clone();
    tokio::task::spawn_blocking(move || operation(&ladder))
        .await
        .map_err(|e| error_response(anyhow::Error::new(e).context("Ladder task failed")))?
        .map_err(error_response)
}

/// Builds the request's session from the player/PIN headers.
///
/// Header values are read as UTF-8 so names outside ASCII can log in.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Session, Response> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|h| std::str::from_utf8(h.as_bytes()).ok())
            .map(str::to_owned)
    };

    let (Some(player), Some(pin)) = (header(PLAYER_HEADER), header(PIN_HEADER)) else {
        return Err((StatusCode::UNAUTHORIZED, "Missing player credentials").into_response());
    };

    run_blocking(state, move |ladder| ladder.login(&player, &pin)).await
}

/// Maps domain errors to their status; everything else is a server error.
pub fn error_response(err: anyhow::Error) -> Response {
    let status = match as_ladder_error(&err) {
        Some(LadderError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
        Some(LadderError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        Some(LadderError::Forbidden(_)) => StatusCode::FORBIDDEN,
        Some(LadderError::NotFound(_)) | Some(LadderError::UnknownPlayer(_)) => StatusCode::NOT_FOUND,
        None => {
            log::error!("Request failed: {:#}", err);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error").into_response();
        }
    };

    let message = as_ladder_error(&err).map(ToString::to_string).unwrap_or_default();
    (status, message).into_response()
}
