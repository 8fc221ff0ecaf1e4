use anyhow::Result;

use pingpong_ladder::cli::Command;
use pingpong_ladder::{
    handle_completions, handle_confirm, handle_history, handle_pending, handle_rebuild,
    handle_recent, handle_register, handle_reject, handle_serve, handle_standings, handle_submit,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Register {
            name,
            pin,
            pin_confirmation,
        } => handle_register(name, pin, pin_confirmation),
        Command::Submit {
            credentials,
            opponent,
            score,
            opponent_score,
        } => handle_submit(credentials, opponent, *score, *opponent_score),
        Command::Pending { credentials } => handle_pending(credentials),
        Command::Confirm { credentials, id } => handle_confirm(credentials, *id),
        Command::Reject { credentials, id } => handle_reject(credentials, *id),
        Command::Standings => handle_standings(),
        Command::History { player } => handle_history(player),
        Command::Recent { limit } => handle_recent(*limit),
        Command::Rebuild => handle_rebuild(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
