pub mod api;
pub mod auth;
pub mod cli;
pub mod clock;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod output;
pub mod rating;
pub mod services;
pub mod workflow;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::{Command, Credentials};
use crate::config::settings::AppConfig;
use crate::domain::PendingId;
use crate::errors::{as_ladder_error, LadderError};
use crate::services::ladder::LadderService;
use crate::services::server::ServerService;
use crate::workflow::Confirmation;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env()?;
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_register(name: &str, pin: &str, pin_confirmation: &str) -> Result<()> {
    let ladder = open_ladder()?;
    let player = ladder.register(name, pin, pin_confirmation)?;
    println!("{} registered. Log in with your PIN to report matches.", player.name);
    Ok(())
}

pub fn handle_submit(
    credentials: &Credentials,
    opponent: &str,
    score: u32,
    opponent_score: u32,
) -> Result<()> {
    let ladder = open_ladder()?;
    let session = ladder.login(&credentials.player, &credentials.pin)?;
    let pending = ladder.submit(&session, opponent, score, opponent_score)?;
    println!(
        "Match #{} saved. It now waits for {} to confirm.",
        pending.id, pending.player_b
    );
    Ok(())
}

pub fn handle_pending(credentials: &Credentials) -> Result<()> {
    let ladder = open_ladder()?;
    let session = ladder.login(&credentials.player, &credentials.pin)?;
    output::print_pending(&ladder.pending_for(&session.player)?);
    Ok(())
}

pub fn handle_confirm(credentials: &Credentials, id: PendingId) -> Result<()> {
    let ladder = open_ladder()?;
    let session = ladder.login(&credentials.player, &credentials.pin)?;

    match not_found_as_notice(ladder.confirm(&session, id))? {
        Some(Confirmation::Promote(game)) => println!(
            "Match confirmed: {} {}:{} {}. Ratings updated.",
            game.player_a, game.score_a, game.score_b, game.player_b
        ),
        Some(Confirmation::AwaitingOpponent) => println!("Confirmed, waiting for the other player."),
        Some(Confirmation::AlreadyConfirmed) => println!("You already confirmed match #{id}."),
        None => {}
    }
    Ok(())
}

pub fn handle_reject(credentials: &Credentials, id: PendingId) -> Result<()> {
    let ladder = open_ladder()?;
    let session = ladder.login(&credentials.player, &credentials.pin)?;

    if not_found_as_notice(ladder.reject(&session, id))?.is_some() {
        println!("Match #{id} rejected and removed.");
    }
    Ok(())
}

pub fn handle_standings() -> Result<()> {
    let ladder = open_ladder()?;
    output::print_standings(&ladder.standings()?);
    Ok(())
}

pub fn handle_history(player: &str) -> Result<()> {
    let ladder = open_ladder()?;
    output::print_history(player, &ladder.rating_history(player)?);
    Ok(())
}

pub fn handle_recent(limit: usize) -> Result<()> {
    let ladder = open_ladder()?;
    output::print_matches(&ladder.recent_matches(limit)?);
    Ok(())
}

pub fn handle_rebuild() -> Result<()> {
    let ladder = open_ladder()?;
    let players = ladder.rebuild()?;
    println!("Rebuilt ratings for {} players.", players.len());
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn open_ladder() -> Result<LadderService> {
    let config = AppConfig::from_env()?;
    LadderService::from_config(&config)
}

/// A pending match that is already gone is reported, not treated as a failure.
fn not_found_as_notice<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => match as_ladder_error(&e) {
            Some(LadderError::NotFound(id)) => {
                println!("Pending match #{id} no longer exists.");
                Ok(None)
            }
            _ => Err(e),
        },
    }
}
