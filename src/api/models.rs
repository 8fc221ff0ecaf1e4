use serde::{Deserialize, Serialize};

use crate::domain::{Match, PendingMatch, Player, Timestamp};
use crate::rating::RatingPoint;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub pin: String,
    pub pin_confirmation: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub pin: String,
}

#[derive(Serialize, Deserialize)]
pub struct SessionResponse {
    pub player: String,
}

#[derive(Serialize, Deserialize)]
pub struct RegisteredPlayer {
    pub name: String,
    pub rating: i32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListItem {
    pub rank: usize,
    pub name: String,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
    pub games_played: u32,
}

impl PlayerListItem {
    pub fn ranked(rank: usize, player: Player) -> Self {
        Self {
            rank,
            name: player.name,
            rating: player.rating,
            wins: player.wins,
            losses: player.losses,
            games_played: player.games_played,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMatchRequest {
    pub opponent: String,
    pub score: u32,
    pub opponent_score: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingMatchItem {
    pub id: i64,
    pub reported_at: Timestamp,
    pub player_a: String,
    pub player_b: String,
    pub score_a: u32,
    pub score_b: u32,
    pub confirmed_a: bool,
    pub confirmed_b: bool,
}

impl From<PendingMatch> for PendingMatchItem {
    fn from(p: PendingMatch) -> Self {
        Self {
            id: p.id,
            reported_at: p.reported_at,
            player_a: p.player_a,
            player_b: p.player_b,
            score_a: p.score_a,
            score_b: p.score_b,
            confirmed_a: p.confirmed_a,
            confirmed_b: p.confirmed_b,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchItem {
    pub played_at: Timestamp,
    pub player_a: String,
    pub player_b: String,
    pub score_a: u32,
    pub score_b: u32,
}

impl From<Match> for MatchItem {
    fn from(m: Match) -> Self {
        Self {
            played_at: m.played_at,
            player_a: m.player_a,
            player_b: m.player_b,
            score_a: m.score_a,
            score_b: m.score_b,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConfirmStatus {
    AlreadyConfirmed,
    AwaitingOpponent,
    Confirmed,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub status: ConfirmStatus,
    #[serde(rename = "match")]
    pub confirmed_match: Option<MatchItem>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingPointItem {
    pub played_at: Timestamp,
    pub rating: i32,
}

impl From<RatingPoint> for RatingPointItem {
    fn from(point: RatingPoint) -> Self {
        Self {
            played_at: point.played_at,
            rating: point.rating,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildResponse {
    pub players: usize,
}
