use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::domain::Match;

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        played_at: row.get(0)?,
        player_a: row.get(1)?,
        player_b: row.get(2)?,
        score_a: row.get(3)?,
        score_b: row.get(4)?,
    })
}

/// Confirmed history in insertion order
pub fn list_all(conn: &Connection) -> Result<Vec<Match>> {
    let sql = "SELECT played_at, player_a, player_b, score_a, score_b FROM matches ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list matches")?;

    Ok(rows)
}

pub fn append(conn: &Connection, game: &Match) -> Result<i64> {
    let sql = "INSERT INTO matches (played_at, player_a, player_b, score_a, score_b) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id";

    conn.query_row(
        sql,
        params![game.played_at, game.player_a, game.player_b, game.score_a, game.score_b],
        |row| row.get(0),
    )
    .context("Failed to append match")
}
