use colored::Colorize;

use crate::domain::{Match, PendingMatch, Player};
use crate::rating::RatingPoint;

const DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

pub fn print_standings(players: &[Player]) {
    if players.is_empty() {
        println!("No players registered yet.");
        return;
    }

    println!(
        "{}",
        format!("{:>4}  {:<20} {:>6} {:>5} {:>5} {:>5}", "#", "Player", "Rating", "W", "L", "G").bold()
    );
    for (idx, player) in players.iter().enumerate() {
        let line = format!(
            "{:>4}  {:<20} {:>6} {:>5} {:>5} {:>5}",
            idx + 1,
            player.name,
            player.rating,
            player.wins,
            player.losses,
            player.games_played
        );
        if idx == 0 {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
    }
}

pub fn print_pending(pending: &[PendingMatch]) {
    if pending.is_empty() {
        println!("No matches waiting for you.");
        return;
    }

    for p in pending {
        println!(
            "{}  {} {} : {} {}  ({})",
            format!("#{}", p.id).yellow(),
            p.player_a,
            p.score_a,
            p.score_b,
            p.player_b,
            p.reported_at.format(DATE_FORMAT)
        );
    }
}

pub fn print_matches(matches: &[Match]) {
    if matches.is_empty() {
        println!("No matches recorded yet.");
        return;
    }

    for m in matches {
        println!(
            "{}  {} {} : {} {}",
            m.played_at.format(DATE_FORMAT),
            m.player_a,
            m.score_a,
            m.score_b,
            m.player_b
        );
    }
}

pub fn print_history(player: &str, history: &[RatingPoint]) {
    if history.is_empty() {
        println!("{player} has no confirmed matches yet.");
        return;
    }

    println!("{}", format!("Rating history of {player}").bold());
    let mut previous: Option<i32> = None;
    for (idx, point) in history.iter().enumerate() {
        let delta = previous.map(|p| point.rating - p).unwrap_or(0);
        let delta = match delta {
            d if d > 0 => format!("+{d}").green(),
            d if d < 0 => format!("{d}").red(),
            _ => "".normal(),
        };
        println!(
            "{:>3}. {}  {:>5} {}",
            idx + 1,
            point.played_at.format(DATE_FORMAT),
            point.rating,
            delta
        );
        previous = Some(point.rating);
    }
}
