//! CLI command definitions for the `graphite` binary.
//!
//! `graphite serve` connects to Discord; `graphite quest ...` runs the same
//! handlers locally against the configured store.

pub mod quest;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Community quest board bot for Discord.
#[derive(Parser)]
#[command(name = "graphite", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory holding config.toml and the default database.
    /// Defaults to $GRAPHITE_DATA_DIR or ~/.graphite.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// SQLite connection URL. Defaults to graphite.db in the data directory.
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Hugging Face Inference API key for /quest suggest.
    #[arg(long, env = "HUGGINGFACE_API_KEY", hide_env_values = true, global = true)]
    pub huggingface_api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Connect to Discord and serve /quest commands until stopped.
    Serve {
        /// Discord bot token.
        #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
        discord_token: Option<String>,
    },

    /// Create or upgrade the database schema, then exit.
    Migrate,

    /// Run one /quest command locally and print the reply.
    Quest {
        #[command(subcommand)]
        action: QuestAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum QuestAction {
    /// Post a new quest.
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        points: i64,

        /// Acting user id.
        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Show one page of quests, newest first.
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        page: Option<i64>,

        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Claim a quest by id.
    Claim {
        /// Quest id as shown by `list` (a leading `#` is accepted).
        quest_id: String,

        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Draft a quest idea for a theme. Nothing is saved.
    Suggest {
        theme: String,

        #[arg(long, default_value = "local")]
        user: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quest_create() {
        let cli = Cli::try_parse_from([
            "graphite",
            "quest",
            "create",
            "--title",
            "Find the Lost Gem",
            "--description",
            "Search the cave",
            "--points",
            "50",
            "--user",
            "u1",
        ])
        .unwrap();

        match cli.command {
            Commands::Quest { action } => assert_eq!(
                action,
                QuestAction::Create {
                    title: "Find the Lost Gem".to_string(),
                    description: "Search the cave".to_string(),
                    points: 50,
                    user: "u1".to_string(),
                }
            ),
            _ => panic!("expected quest command"),
        }
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["graphite", "quest", "list", "--page", "2", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Quest {
                action: QuestAction::List { page, user },
            } => {
                assert_eq!(page, Some(2));
                assert_eq!(user, "local");
            }
            _ => panic!("expected quest list"),
        }
    }

    #[test]
    fn negative_points_reach_the_handler() {
        let cli = Cli::try_parse_from([
            "graphite", "quest", "create", "--title", "t", "--description", "d", "--points=-5",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Quest {
                action: QuestAction::Create { points: -5, .. }
            }
        ));
    }

    #[test]
    fn serve_accepts_token_flag() {
        let cli = Cli::try_parse_from(["graphite", "serve", "--discord-token", "abc"]).unwrap();
        match cli.command {
            Commands::Serve { discord_token } => assert_eq!(discord_token.as_deref(), Some("abc")),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
