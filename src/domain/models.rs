use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Wall-clock instant in the club's reference timezone.
pub type Timestamp = DateTime<FixedOffset>;

pub type PendingId = i64;

/// Registered player
///
/// Rating and counters are derived data: only the rebuild pass writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
    pub games_played: u32,
    #[serde(skip_serializing)]
    pub credential: String,
}

impl Player {
    pub fn new(name: impl Into<String>, starter_rating: i32, credential: String) -> Self {
        Self {
            name: name.into(),
            rating: starter_rating,
            wins: 0,
            losses: 0,
            games_played: 0,
            credential,
        }
    }

    pub fn reset(&mut self, starter_rating: i32) {
        self.rating = starter_rating;
        self.wins = 0;
        self.losses = 0;
        self.games_played = 0;
    }
}

/// Confirmed match result, part of the authoritative history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub played_at: Timestamp,
    pub player_a: String,
    pub player_b: String,
    pub score_a: u32,
    pub score_b: u32,
}

impl Match {
    /// Tied scores count as a loss for A, matching how historical rows were rated.
    pub fn a_won(&self) -> bool {
        self.score_a > self.score_b
    }
}

/// One of the two participants of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// Reported result waiting for the opponent's consent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingMatch {
    pub id: PendingId,
    pub reported_at: Timestamp,
    pub player_a: String,
    pub player_b: String,
    pub score_a: u32,
    pub score_b: u32,
    pub confirmed_a: bool,
    pub confirmed_b: bool,
}

impl PendingMatch {
    pub fn side_of(&self, player: &str) -> Option<Side> {
        if self.player_a == player {
            Some(Side::A)
        } else if self.player_b == player {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn is_confirmed_by(&self, side: Side) -> bool {
        match side {
            Side::A => self.confirmed_a,
            Side::B => self.confirmed_b,
        }
    }

    pub fn fully_confirmed(&self) -> bool {
        self.confirmed_a && self.confirmed_b
    }

    /// True when `player` takes part and still owes a confirmation.
    pub fn awaits(&self, player: &str) -> bool {
        self.side_of(player)
            .is_some_and(|side| !self.is_confirmed_by(side))
    }

    pub fn to_match(&self) -> Match {
        Match {
            played_at: self.reported_at,
            player_a: self.player_a.clone(),
            player_b: self.player_b.clone(),
            score_a: self.score_a,
            score_b: self.score_b,
        }
    }
}

/// Pending record before the store has assigned it an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewPendingMatch {
    pub reported_at: Timestamp,
    pub player_a: String,
    pub player_b: String,
    pub score_a: u32,
    pub score_b: u32,
    pub confirmed_a: bool,
    pub confirmed_b: bool,
}

/// Authenticated request context: who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub player: String,
}

impl Session {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
        }
    }
}
