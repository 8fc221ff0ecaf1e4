pub mod elo;
pub mod rebuild;
pub mod types;

pub use elo::{calc_rating, expected_score, rate_pair};
pub use rebuild::{rating_history, rebuild, retain_known_participants};
pub use types::{Outcome, RatingPoint};
