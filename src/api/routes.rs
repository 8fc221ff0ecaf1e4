use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use crate::api::handlers::{
    admin::admin_rebuild,
    matches::{confirm_pending, get_pending, get_recent_matches, reject_pending, submit_match},
    players::{get_players, get_rating_history, login, register},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(get_players).post(register))
        .route("/api/login", post(login))
        .route("/api/player/:name/history", get(get_rating_history))
        .route("/api/matches", post(submit_match))
        .route("/api/matches/recent", get(get_recent_matches))
        .route("/api/pending", get(get_pending))
        .route("/api/pending/:id/confirm", post(confirm_pending))
        .route("/api/pending/:id/reject", post(reject_pending))
        .route("/api/admin/rebuild", post(admin_rebuild))
        .with_state(state)
}
