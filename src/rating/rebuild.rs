use std::collections::{HashMap, HashSet};
use log::{debug, info, warn};

use super::elo::rate_pair;
use super::types::{Outcome, RatingMap, RatingPoint};
use crate::config::settings::RatingSettings;
use crate::domain::{Match, Player};

/// Recomputes every player's rating and counters from the full match history.
///
/// Stored ratings are discarded: each player restarts at the starter rating
/// and the confirmed matches are replayed oldest first. Matches naming a
/// player who is no longer on the roster are skipped.
pub fn rebuild(players: &[Player], matches: &[Match], config: &RatingSettings) -> Vec<Player> {
    // 1. Reset everybody
    let mut roster: Vec<Player> = players.to_vec();
    for player in &mut roster {
        player.reset(config.starter_rating);
    }

    if matches.is_empty() {
        return roster;
    }

    // 2. Index roster by name
    let index: HashMap<String, usize> = roster
        .iter()
        .enumerate()
        .map(|(idx, player)| (player.name.clone(), idx))
        .collect();

    // 3. Replay in chronological order
    let mut applied = 0;
    let mut skipped = 0;
    for game in chronological(matches) {
        if !is_replayable(game) {
            skipped += 1;
            continue;
        }

        let (Some(&a), Some(&b)) = (index.get(&game.player_a), index.get(&game.player_b)) else {
            warn!(
                "Skipping match {} vs {} at {}: participant no longer registered",
                game.player_a, game.player_b, game.played_at
            );
            skipped += 1;
            continue;
        };

        apply_match(&mut roster, a, b, game, config.k_factor);
        applied += 1;
    }

    info!(
        "Rebuilt {} players from {} matches ({} skipped)",
        roster.len(),
        applied,
        skipped
    );
    roster
}

/// Rating of `player` after each of their matches, oldest first.
///
/// Runs its own replay over `matches`, starting every newly seen name at the
/// starter rating. Feed it [`retain_known_participants`] output to get the
/// same trajectory [`rebuild`] walks through.
pub fn rating_history(player: &str, matches: &[Match], config: &RatingSettings) -> Vec<RatingPoint> {
    let mut ratings = RatingMap::new();
    let mut history = Vec::new();

    for game in chronological(matches) {
        if !is_replayable(game) {
            continue;
        }

        let rating_a = *ratings
            .entry(game.player_a.clone())
            .or_insert(config.starter_rating);
        let rating_b = *ratings
            .entry(game.player_b.clone())
            .or_insert(config.starter_rating);

        let (new_a, new_b) = rate_pair(rating_a, rating_b, outcome_for_a(game), config.k_factor);
        ratings.insert(game.player_a.clone(), new_a);
        ratings.insert(game.player_b.clone(), new_b);

        if game.player_a == player {
            history.push(RatingPoint { played_at: game.played_at, rating: new_a });
        } else if game.player_b == player {
            history.push(RatingPoint { played_at: game.played_at, rating: new_b });
        }
    }

    history
}

/// Matches whose two participants are both on the roster
pub fn retain_known_participants(matches: &[Match], players: &[Player]) -> Vec<Match> {
    let names: HashSet<&str> = players.iter().map(|p| p.name.as_str()).collect();
    matches
        .iter()
        .filter(|m| names.contains(m.player_a.as_str()) && names.contains(m.player_b.as_str()))
        .cloned()
        .collect()
}

/// Ascending by timestamp; equal timestamps keep their input order
fn chronological(matches: &[Match]) -> Vec<&Match> {
    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by_key(|m| m.played_at);
    ordered
}

fn is_replayable(game: &Match) -> bool {
    if game.player_a == game.player_b {
        warn!("Ignoring self-match of {} at {}", game.player_a, game.played_at);
        return false;
    }
    true
}

fn outcome_for_a(game: &Match) -> Outcome {
    if game.a_won() { Outcome::Win } else { Outcome::Loss }
}

fn apply_match(roster: &mut [Player], a: usize, b: usize, game: &Match, k_factor: f64) {
    let outcome_a = outcome_for_a(game);
    let (new_a, new_b) = rate_pair(roster[a].rating, roster[b].rating, outcome_a, k_factor);

    debug!(
        "{} {}:{} {} -> {} / {}",
        game.player_a, game.score_a, game.score_b, game.player_b, new_a, new_b
    );

    record(&mut roster[a], new_a, outcome_a);
    record(&mut roster[b], new_b, outcome_a.flipped());
}

fn record(player: &mut Player, rating: i32, outcome: Outcome) {
    player.rating = rating;
    player.games_played += 1;
    match outcome {
        Outcome::Win => player.wins += 1,
        Outcome::Loss => player.losses += 1,
    }
}
