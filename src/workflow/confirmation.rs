use crate::domain::{Match, NewPendingMatch, PendingMatch, Side, Timestamp};
use crate::errors::LadderError;

/// Lifecycle of a reported result. Rejected records are deleted, so only
/// the two live states are observable on a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingState {
    Reported,
    Confirmed,
}

/// What a confirmation did to the pending record
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    /// The side had already confirmed; nothing changed
    AlreadyConfirmed,
    /// Flag set, the other side still has to confirm
    AwaitingOpponent,
    /// Both sides agree; the result must move into the match history
    Promote(Match),
}

/// Builds the pending record for a freshly reported result.
///
/// The reporter is stored as side A and counts as having confirmed.
pub fn report(
    reporter: &str,
    opponent: &str,
    reporter_score: u32,
    opponent_score: u32,
    reported_at: Timestamp,
) -> Result<NewPendingMatch, LadderError> {
    if opponent.trim().is_empty() {
        return Err(LadderError::invalid("opponent name is required"));
    }
    if reporter == opponent {
        return Err(LadderError::invalid("players cannot report a match against themselves"));
    }
    if reporter_score == opponent_score {
        return Err(LadderError::invalid(format!(
            "a match needs a winner, got {reporter_score}:{opponent_score}"
        )));
    }

    Ok(NewPendingMatch {
        reported_at,
        player_a: reporter.to_string(),
        player_b: opponent.to_string(),
        score_a: reporter_score,
        score_b: opponent_score,
        confirmed_a: true,
        confirmed_b: false,
    })
}

pub fn state(pending: &PendingMatch) -> PendingState {
    if pending.fully_confirmed() {
        PendingState::Confirmed
    } else {
        PendingState::Reported
    }
}

/// Records `player`'s consent on their side of the match.
///
/// Promotion is only returned on the transition into `Confirmed`, so a
/// repeated confirmation can never feed the same result into history twice.
pub fn confirm(pending: &mut PendingMatch, player: &str) -> Result<Confirmation, LadderError> {
    let side = participant_side(pending, player)?;

    if pending.is_confirmed_by(side) {
        return Ok(Confirmation::AlreadyConfirmed);
    }

    match side {
        Side::A => pending.confirmed_a = true,
        Side::B => pending.confirmed_b = true,
    }

    match state(pending) {
        PendingState::Confirmed => Ok(Confirmation::Promote(pending.to_match())),
        PendingState::Reported => Ok(Confirmation::AwaitingOpponent),
    }
}

/// Only the two participants may discard a reported result.
pub fn check_can_reject(pending: &PendingMatch, player: &str) -> Result<(), LadderError> {
    participant_side(pending, player).map(|_| ())
}

fn participant_side(pending: &PendingMatch, player: &str) -> Result<Side, LadderError> {
    pending.side_of(player).ok_or_else(|| {
        LadderError::Forbidden(format!("{player} is not part of match {}", pending.id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn now() -> Timestamp {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 10, 19, 30, 0)
            .unwrap()
    }

    fn stored(new: NewPendingMatch) -> PendingMatch {
        PendingMatch {
            id: 1,
            reported_at: new.reported_at,
            player_a: new.player_a,
            player_b: new.player_b,
            score_a: new.score_a,
            score_b: new.score_b,
            confirmed_a: new.confirmed_a,
            confirmed_b: new.confirmed_b,
        }
    }

    #[test]
    fn test_report_marks_reporter_confirmed() {
        let pending = report("anna", "ben", 11, 8, now()).unwrap();

        assert_eq!(pending.player_a, "anna");
        assert_eq!(pending.player_b, "ben");
        assert!(pending.confirmed_a);
        assert!(!pending.confirmed_b);
        assert_eq!(pending.reported_at, now());
    }

    #[test]
    fn test_report_rejects_self_match() {
        let err = report("anna", "anna", 11, 8, now()).unwrap_err();
        assert!(matches!(err, LadderError::InvalidInput(_)));
    }

    #[test]
    fn test_report_rejects_tie() {
        let err = report("anna", "ben", 10, 10, now()).unwrap_err();
        assert!(matches!(err, LadderError::InvalidInput(_)));
    }

    #[test]
    fn test_report_rejects_blank_opponent() {
        assert!(report("anna", "  ", 11, 3, now()).is_err());
    }

    #[test]
    fn test_opponent_confirmation_promotes() {
        let mut pending = stored(report("anna", "ben", 11, 8, now()).unwrap());
        assert_eq!(state(&pending), PendingState::Reported);

        let outcome = confirm(&mut pending, "ben").unwrap();

        assert_eq!(state(&pending), PendingState::Confirmed);
        match outcome {
            Confirmation::Promote(game) => {
                assert_eq!(game.player_a, "anna");
                assert_eq!((game.score_a, game.score_b), (11, 8));
                assert_eq!(game.played_at, now());
            }
            other => panic!("expected promotion, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_confirmation_is_noop() {
        let mut pending = stored(report("anna", "ben", 11, 8, now()).unwrap());

        assert_eq!(confirm(&mut pending, "anna").unwrap(), Confirmation::AlreadyConfirmed);
        assert!(!pending.confirmed_b);

        assert!(matches!(confirm(&mut pending, "ben").unwrap(), Confirmation::Promote(_)));
        assert_eq!(confirm(&mut pending, "ben").unwrap(), Confirmation::AlreadyConfirmed);
    }

    #[test]
    fn test_one_sided_confirmation_waits() {
        let mut pending = stored(report("anna", "ben", 11, 8, now()).unwrap());
        pending.confirmed_a = false;

        assert_eq!(confirm(&mut pending, "anna").unwrap(), Confirmation::AwaitingOpponent);
        assert_eq!(state(&pending), PendingState::Reported);
    }

    #[test]
    fn test_outsider_cannot_confirm_or_reject() {
        let mut pending = stored(report("anna", "ben", 11, 8, now()).unwrap());

        assert!(matches!(confirm(&mut pending, "carl"), Err(LadderError::Forbidden(_))));
        assert!(check_can_reject(&pending, "carl").is_err());
        assert!(check_can_reject(&pending, "ben").is_ok());
    }

    #[test]
    fn test_awaits_only_unconfirmed_side() {
        let pending = stored(report("anna", "ben", 11, 8, now()).unwrap());

        assert!(pending.awaits("ben"));
        assert!(!pending.awaits("anna"));
        assert!(!pending.awaits("carl"));
    }
}
