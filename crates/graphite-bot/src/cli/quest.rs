//! Local `/quest` commands: same handlers and replies as the gateway.

use anyhow::Result;

use graphite_core::command::{Invocation, QuestCommand};
use graphite_core::identity::RawIdResolver;

use crate::state::AppState;

use super::QuestAction;

/// Translate CLI arguments into the invocation a gateway would deliver.
pub fn invocation(action: QuestAction) -> Invocation {
    let (user_id, command) = match action {
        QuestAction::Create {
            title,
            description,
            points,
            user,
        } => (
            user,
            QuestCommand::Create {
                title,
                description,
                points,
            },
        ),
        QuestAction::List { page, user } => (user, QuestCommand::List { page }),
        QuestAction::Claim { quest_id, user } => (user, QuestCommand::Claim { quest_id }),
        QuestAction::Suggest { theme, user } => (user, QuestCommand::Suggest { theme }),
    };
    Invocation { user_id, command }
}

/// Run one command and print its reply.
pub async fn run(state: &AppState, action: QuestAction) -> Result<()> {
    let invocation = invocation(action);
    tracing::debug!(command = %invocation.command, user = %invocation.user_id, "local invocation");

    let reply = state.commands.dispatch(invocation, &RawIdResolver).await;
    println!("{reply}");
    Ok(())
}
