use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{NewPendingMatch, PendingId, PendingMatch};

const PENDING_COLUMNS: &str =
    "id, reported_at, player_a, player_b, score_a, score_b, confirmed_a, confirmed_b";

fn parse_pending_row(row: &rusqlite::Row) -> rusqlite::Result<PendingMatch> {
    Ok(PendingMatch {
        id: row.get(0)?,
        reported_at: row.get(1)?,
        player_a: row.get(2)?,
        player_b: row.get(3)?,
        score_a: row.get(4)?,
        score_b: row.get(5)?,
        confirmed_a: row.get(6)?,
        confirmed_b: row.get(7)?,
    })
}

pub fn insert(conn: &Connection, pending: &NewPendingMatch) -> Result<PendingMatch> {
    let sql = format!(
        "INSERT INTO pending_matches (reported_at, player_a, player_b, score_a, score_b, confirmed_a, confirmed_b) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {PENDING_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            pending.reported_at,
            pending.player_a,
            pending.player_b,
            pending.score_a,
            pending.score_b,
            pending.confirmed_a,
            pending.confirmed_b
        ],
        parse_pending_row,
    )
    .context("Failed to insert pending match")
}

/// Records where `player` takes part and has not confirmed yet
pub fn list_awaiting(conn: &Connection, player: &str) -> Result<Vec<PendingMatch>> {
    let sql = format!(
        "SELECT {PENDING_COLUMNS} FROM pending_matches
         WHERE (player_a = ?1 AND confirmed_a = 0) OR (player_b = ?1 AND confirmed_b = 0)
         ORDER BY id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player], parse_pending_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list pending matches for player")?;

    Ok(rows)
}

pub fn find_by_id(conn: &Connection, id: PendingId) -> Result<Option<PendingMatch>> {
    let sql = format!("SELECT {PENDING_COLUMNS} FROM pending_matches WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_pending_row)
        .optional()
        .context("Failed to query pending match by id")
}

pub fn set_confirmation(
    conn: &Connection,
    id: PendingId,
    confirmed_a: bool,
    confirmed_b: bool,
) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE pending_matches SET confirmed_a = ?1, confirmed_b = ?2 WHERE id = ?3",
            params![confirmed_a, confirmed_b, id],
        )
        .context("Failed to update pending confirmation")?;
    Ok(updated > 0)
}

/// Returns false when there was nothing to remove
pub fn remove(conn: &Connection, id: PendingId) -> Result<bool> {
    let removed = conn
        .execute("DELETE FROM pending_matches WHERE id = ?1", params![id])
        .context("Failed to remove pending match")?;
    Ok(removed > 0)
}
