//! Slash-command handling, independent of any chat platform.
//!
//! A gateway adapter turns a platform interaction into an [`Invocation`],
//! hands it to [`handler::QuestCommands::dispatch`], and sends back the
//! returned text. Exactly one reply per invocation, and expected failures
//! (bad input, missing quest, claim rule violations) become specific
//! messages rather than errors.

pub mod handler;
pub mod reply;

use std::fmt;

/// Default page for `/quest list` when the option is omitted.
pub const DEFAULT_PAGE: i64 = 1;

/// The user-facing actions, with their parameters as delivered by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestCommand {
    Create {
        title: String,
        description: String,
        points: i64,
    },
    List {
        page: Option<i64>,
    },
    Claim {
        quest_id: String,
    },
    Suggest {
        theme: String,
    },
}

impl QuestCommand {
    /// Subcommand name as registered with the gateway.
    pub fn name(&self) -> &'static str {
        match self {
            QuestCommand::Create { .. } => "create",
            QuestCommand::List { .. } => "list",
            QuestCommand::Claim { .. } => "claim",
            QuestCommand::Suggest { .. } => "suggest",
        }
    }
}

impl fmt::Display for QuestCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/quest {}", self.name())
    }
}

/// One command invocation by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Platform id of the invoking user.
    pub user_id: String,
    pub command: QuestCommand,
}
