use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::Player;

const PLAYER_COLUMNS: &str = "name, rating, wins, losses, games_played, credential";

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        name: row.get(0)?,
        rating: row.get(1)?,
        wins: row.get(2)?,
        losses: row.get(3)?,
        games_played: row.get(4)?,
        credential: row.get(5)?,
    })
}

/// Roster in registration order
pub fn list_all(conn: &Connection) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY rowid");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list players")?;

    Ok(rows)
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE name = ?1");

    conn.query_row(&sql, params![name], parse_player_row)
        .optional()
        .context("Failed to query player by name")
}

pub fn insert_player(conn: &Connection, player: &Player) -> Result<()> {
    let sql = format!("INSERT INTO players ({PLAYER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)");

    conn.execute(
        &sql,
        params![
            player.name,
            player.rating,
            player.wins,
            player.losses,
            player.games_played,
            player.credential
        ],
    )
    .with_context(|| format!("Failed to insert player {}", player.name))?;
    Ok(())
}

/// Replaces the whole roster with `players`.
///
/// Run inside a transaction: the table is emptied before the rows are written.
pub fn save_all(conn: &Connection, players: &[Player]) -> Result<()> {
    conn.execute("DELETE FROM players", [])
        .context("Failed to clear players")?;

    for player in players {
        insert_player(conn, player)?;
    }

    Ok(())
}

pub fn update_credential(conn: &Connection, name: &str, credential: &str) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE players SET credential = ?1 WHERE name = ?2",
            params![credential, name],
        )
        .context("Failed to update player credential")?;
    Ok(updated > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup::init_database;

    fn open() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_database(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_find() {
        let conn = open();
        insert_player(&conn, &Player::new("anna", 1200, "hash".into())).unwrap();

        let found = find_by_name(&conn, "anna").unwrap().unwrap();
        assert_eq!(found.rating, 1200);
        assert_eq!(found.credential, "hash");
        assert!(find_by_name(&conn, "Anna").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_name_fails() {
        let conn = open();
        insert_player(&conn, &Player::new("anna", 1200, "a".into())).unwrap();

        assert!(insert_player(&conn, &Player::new("anna", 1200, "b".into())).is_err());
    }

    #[test]
    fn test_save_all_replaces_roster() {
        let conn = open();
        insert_player(&conn, &Player::new("anna", 1200, "a".into())).unwrap();
        insert_player(&conn, &Player::new("ben", 1200, "b".into())).unwrap();

        let mut roster = list_all(&conn).unwrap();
        roster[0].rating = 1216;
        roster[0].wins = 1;
        roster[0].games_played = 1;
        save_all(&conn, &roster).unwrap();

        let reloaded = list_all(&conn).unwrap();
        assert_eq!(reloaded, roster);
        assert_eq!(reloaded[0].name, "anna");
    }

    #[test]
    fn test_update_credential() {
        let conn = open();
        insert_player(&conn, &Player::new("anna", 1200, "1234".into())).unwrap();

        assert!(update_credential(&conn, "anna", "$2b$04$hash").unwrap());
        assert!(!update_credential(&conn, "ghost", "x").unwrap());
        assert_eq!(find_by_name(&conn, "anna").unwrap().unwrap().credential, "$2b$04$hash");
    }
}
