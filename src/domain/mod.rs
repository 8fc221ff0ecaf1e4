pub mod models;

pub use models::{Match, NewPendingMatch, PendingId, PendingMatch, Player, Session, Side, Timestamp};
