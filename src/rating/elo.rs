use super::types::{Outcome, RatingValue};

/// Rating gap at which the stronger player is expected to score 10:1
const ELO_SCALE: f64 = 400.0;

/// Probability that a player rated `rating` beats one rated `opponent`
pub fn expected_score(rating: RatingValue, opponent: RatingValue) -> f64 {
    let exponent = f64::from(opponent - rating) / ELO_SCALE;
    1.0 / (1.0 + 10f64.powf(exponent))
}

/// Classic ELO update for the first player, rounded half-to-even
pub fn calc_rating(
    rating: RatingValue,
    opponent: RatingValue,
    outcome: Outcome,
    k_factor: f64,
) -> RatingValue {
    let expected = expected_score(rating, opponent);
    let updated = f64::from(rating) + k_factor * (outcome.score() - expected);
    updated.round_ties_even() as RatingValue
}

/// Both post-match ratings, computed from the ratings held before the match
pub fn rate_pair(
    rating_a: RatingValue,
    rating_b: RatingValue,
    outcome_a: Outcome,
    k_factor: f64,
) -> (RatingValue, RatingValue) {
    let new_a = calc_rating(rating_a, rating_b, outcome_a, k_factor);
    let new_b = calc_rating(rating_b, rating_a, outcome_a.flipped(), k_factor);
    (new_a, new_b)
}
