use std::sync::Arc;
use anyhow::{bail, Context, Result};
use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};

use crate::auth::{BcryptCredentials, CredentialCheck, Verification};
use crate::clock::{Clock, SystemClock};
use crate::config::settings::{AppConfig, RatingSettings};
use crate::database::{self, DbConn, DbPool};
use crate::domain::{Match, PendingId, PendingMatch, Player, Session};
use crate::errors::LadderError;
use crate::rating::{self, RatingPoint};
use crate::workflow::{self, Confirmation};

/// Entry point for every player-facing operation.
///
/// Writes that touch more than one table, or rewrite the roster, run inside
/// an IMMEDIATE transaction so SQLite serialises them against each other.
#[derive(Clone)]
pub struct LadderService {
    pool: DbPool,
    rating: RatingSettings,
    clock: Arc<dyn Clock>,
    credentials: Arc<dyn CredentialCheck>,
}

impl LadderService {
    pub fn new(
        pool: DbPool,
        rating: RatingSettings,
        clock: Arc<dyn Clock>,
        credentials: Arc<dyn CredentialCheck>,
    ) -> Result<Self> {
        let conn = database::get_connection(&pool)?;
        database::setup::init_database(&conn)?;
        drop(conn);

        Ok(Self {
            pool,
            rating,
            clock,
            credentials,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.storage.database_path)?;
        let clock = SystemClock::new(&config.clock.timezone)?;
        let credentials = BcryptCredentials::new(config.auth.bcrypt_cost);

        Self::new(pool, config.rating.clone(), Arc::new(clock), Arc::new(credentials))
    }

    pub fn register(&self, name: &str, pin: &str, pin_confirmation: &str) -> Result<Player> {
        let name = name.trim();
        if name.is_empty() || pin.trim().is_empty() {
            bail!(LadderError::invalid("name and PIN are required"));
        }
        if pin != pin_confirmation {
            bail!(LadderError::invalid("PINs do not match"));
        }

        let credential = self.credentials.hash(pin)?;
        let player = Player::new(name, self.rating.starter_rating, credential);

        let mut conn = self.connection()?;
        let tx = begin(&mut conn)?;
        if database::players::find_by_name(&tx, name)?.is_some() {
            bail!(LadderError::invalid(format!("player {name} already exists")));
        }
        database::players::insert_player(&tx, &player)?;
        tx.commit().context("Failed to commit registration")?;

        info!("Registered player {}", name);
        Ok(player)
    }

    /// Checks the PIN and opens a session; legacy plaintext PINs are
    /// re-hashed on their first successful use.
    pub fn login(&self, name: &str, pin: &str) -> Result<Session> {
        let mut conn = self.connection()?;

        let Some(player) = database::players::find_by_name(&conn, name)? else {
            warn!("Login attempt for unknown player {}", name);
            bail!(LadderError::InvalidCredentials);
        };

        match self.credentials.verify(pin, &player.credential)? {
            Verification::Invalid => {
                warn!("Wrong PIN for {}", name);
                bail!(LadderError::InvalidCredentials);
            }
            Verification::Valid { needs_upgrade: true } => {
                let hashed = self.credentials.hash(pin)?;
                let tx = begin(&mut conn)?;
                database::players::update_credential(&tx, name, &hashed)?;
                tx.commit().context("Failed to commit credential upgrade")?;
                info!("Upgraded legacy PIN of {} to a hash", name);
            }
            Verification::Valid { needs_upgrade: false } => {}
        }

        Ok(Session::new(name))
    }

    /// Reports a result; it stays pending until the opponent confirms.
    pub fn submit(
        &self,
        session: &Session,
        opponent: &str,
        score: u32,
        opponent_score: u32,
    ) -> Result<PendingMatch> {
        let opponent = opponent.trim();
        let reported = workflow::report(
            &session.player,
            opponent,
            score,
            opponent_score,
            self.clock.now(),
        )?;

        let conn = self.connection()?;
        if database::players::find_by_name(&conn, opponent)?.is_none() {
            bail!(LadderError::UnknownPlayer(opponent.to_string()));
        }
        let pending = database::pending::insert(&conn, &reported)?;

        info!(
            "{} reported {}:{} against {} (pending #{})",
            pending.player_a, pending.score_a, pending.score_b, pending.player_b, pending.id
        );
        Ok(pending)
    }

    /// Confirms the session player's side. When both sides have agreed the
    /// match moves into history and the roster is rebuilt, all in one
    /// transaction.
    pub fn confirm(&self, session: &Session, id: PendingId) -> Result<Confirmation> {
        let mut conn = self.connection()?;
        let tx = begin(&mut conn)?;

        let Some(mut pending) = database::pending::find_by_id(&tx, id)? else {
            warn!("{} tried to confirm missing pending match #{}", session.player, id);
            bail!(LadderError::NotFound(id));
        };

        let outcome = workflow::confirm(&mut pending, &session.player)?;
        match &outcome {
            Confirmation::AlreadyConfirmed => {
                info!("Pending match #{} already confirmed by {}", id, session.player);
            }
            Confirmation::AwaitingOpponent => {
                database::pending::set_confirmation(&tx, id, pending.confirmed_a, pending.confirmed_b)?;
                info!("{} confirmed pending match #{}", session.player, id);
            }
            Confirmation::Promote(game) => {
                database::matches::append(&tx, game)?;
                database::pending::remove(&tx, id)?;
                rebuild_roster(&tx, &self.rating)?;
                info!(
                    "Match #{} confirmed: {} {}:{} {}",
                    id, game.player_a, game.score_a, game.score_b, game.player_b
                );
            }
        }

        tx.commit().context("Failed to commit confirmation")?;
        Ok(outcome)
    }

    /// Discards a reported result; ratings are untouched.
    pub fn reject(&self, session: &Session, id: PendingId) -> Result<PendingMatch> {
        let mut conn = self.connection()?;
        let tx = begin(&mut conn)?;

        let Some(pending) = database::pending::find_by_id(&tx, id)? else {
            warn!("{} tried to reject missing pending match #{}", session.player, id);
            bail!(LadderError::NotFound(id));
        };
        workflow::check_can_reject(&pending, &session.player)?;

        database::pending::remove(&tx, id)?;
        tx.commit().context("Failed to commit rejection")?;

        info!("{} rejected pending match #{}", session.player, id);
        Ok(pending)
    }

    /// Pending results still waiting for `player`'s confirmation
    pub fn pending_for(&self, player: &str) -> Result<Vec<PendingMatch>> {
        let conn = self.connection()?;
        database::pending::list_awaiting(&conn, player)
    }

    /// Leaderboard: best rating first, ties by name
    pub fn standings(&self) -> Result<Vec<Player>> {
        let conn = self.connection()?;
        let mut players = database::players::list_all(&conn)?;
        players.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.name.cmp(&b.name)));
        Ok(players)
    }

    pub fn rating_history(&self, player: &str) -> Result<Vec<RatingPoint>> {
        let conn = self.connection()?;
        let roster = database::players::list_all(&conn)?;
        if !roster.iter().any(|p| p.name == player) {
            bail!(LadderError::UnknownPlayer(player.to_string()));
        }

        let matches = database::matches::list_all(&conn)?;
        let replayable = rating::retain_known_participants(&matches, &roster);
        Ok(rating::rating_history(player, &replayable, &self.rating))
    }

    /// Newest confirmed matches first
    pub fn recent_matches(&self, limit: usize) -> Result<Vec<Match>> {
        let conn = self.connection()?;
        let mut matches = database::matches::list_all(&conn)?;
        // later insertions first among equal timestamps
        matches.reverse();
        matches.sort_by(|a, b| b.played_at.cmp(&a.played_at));
        matches.truncate(limit);
        Ok(matches)
    }

    /// Recomputes the stored roster from the confirmed history.
    pub fn rebuild(&self) -> Result<Vec<Player>> {
        let mut conn = self.connection()?;
        let tx = begin(&mut conn)?;
        let roster = rebuild_roster(&tx, &self.rating)?;
        tx.commit().context("Failed to commit rebuild")?;
        Ok(roster)
    }

    fn connection(&self) -> Result<DbConn> {
        database::get_connection(&self.pool)
    }
}

fn begin(conn: &mut DbConn) -> Result<rusqlite::Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .context("Failed to start transaction")
}

fn rebuild_roster(conn: &Connection, settings: &RatingSettings) -> Result<Vec<Player>> {
    let players = database::players::list_all(conn)?;
    let matches = database::matches::list_all(conn)?;

    let rebuilt = rating::rebuild(&players, &matches, settings);
    database::players::save_all(conn, &rebuilt)?;
    Ok(rebuilt)
}
