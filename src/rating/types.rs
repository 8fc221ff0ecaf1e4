use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::domain::Timestamp;

pub type PlayerName = String;
pub type RatingValue = i32;
pub type RatingMap = HashMap<PlayerName, RatingValue>;

/// Result of a single match from one player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
        }
    }
}

/// A player's rating right after one of their matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingPoint {
    pub played_at: Timestamp,
    pub rating: RatingValue,
}
