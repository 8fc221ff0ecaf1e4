pub mod confirmation;

pub use confirmation::{check_can_reject, confirm, report, state, Confirmation, PendingState};
