use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "pingpong-ladder club match tracker")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

/// Acting player, checked against the stored PIN
#[derive(Args, Debug, Clone, PartialEq)]
pub struct Credentials {
    /// Your player name
    #[arg(long, env = "LADDER_PLAYER")]
    pub player: String,
    /// Your PIN
    #[arg(long, env = "LADDER_PIN", hide_env_values = true)]
    pub pin: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Register a new player
    Register {
        name: String,
        #[arg(long)]
        pin: String,
        /// Repeat the PIN
        #[arg(long)]
        pin_confirmation: String,
    },
    /// Report a match result; the opponent has to confirm it
    Submit {
        #[command(flatten)]
        credentials: Credentials,
        opponent: String,
        /// Your points
        score: u32,
        /// Opponent's points
        opponent_score: u32,
    },
    /// List results waiting for your confirmation
    Pending {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Confirm a reported result
    Confirm {
        #[command(flatten)]
        credentials: Credentials,
        id: i64,
    },
    /// Reject a reported result
    Reject {
        #[command(flatten)]
        credentials: Credentials,
        id: i64,
    },
    /// Show the leaderboard
    Standings,
    /// Show a player's rating after each match
    History { player: String },
    /// Show the latest confirmed matches
    Recent {
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
    /// Recalculate all ratings from the match history
    Rebuild,
    /// Print shell completions
    Completions { shell: Shell },
}
