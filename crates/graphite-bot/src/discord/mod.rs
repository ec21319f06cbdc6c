//! Discord gateway adapter.
//!
//! Registers `/quest`, turns each interaction into an [`Invocation`], and
//! sends back exactly one reply. Every interaction is deferred first so slow
//! store or generation calls never hit Discord's acknowledgement deadline.
//!
//! [`Invocation`]: graphite_core::command::Invocation

pub mod commands;
pub mod identity;

use std::sync::Arc;

use anyhow::Context as _;
use secrecy::{ExposeSecret, SecretString};
use serenity::all::{
    Command, CommandInteraction, Context, CreateInteractionResponseFollowup, EventHandler,
    GatewayIntents, GuildId, Interaction, Ready,
};
use serenity::async_trait;

use graphite_core::command::reply;

use crate::state::{AppState, ConcreteQuestCommands};

use self::commands::{flatten_options, parse_invocation, quest_command, truncate_reply, COMMAND_NAME};
use self::identity::DiscordIdentityResolver;

struct Handler {
    commands: Arc<ConcreteQuestCommands>,
    guild_id: Option<u64>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(user = %ready.user.name, id = %ready.user.id, "connected to Discord");

        let registered = match self.guild_id.filter(|id| *id != 0) {
            Some(guild_id) => GuildId::new(guild_id)
                .set_commands(&ctx.http, vec![quest_command()])
                .await
                .map(|_| format!("guild {guild_id}")),
            None => Command::set_global_commands(&ctx.http, vec![quest_command()])
                .await
                .map(|_| "global".to_string()),
        };

        match registered {
            Ok(scope) => tracing::info!(%scope, "registered /{COMMAND_NAME}"),
            Err(e) => tracing::error!(error = %e, "failed to register /{COMMAND_NAME}"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        if command.data.name != COMMAND_NAME {
            return;
        }
        self.handle(&ctx, &command).await;
    }
}

impl Handler {
    async fn handle(&self, ctx: &Context, command: &CommandInteraction) {
        if let Err(e) = command.defer(&ctx.http).await {
            tracing::warn!(error = %e, "failed to acknowledge interaction");
            return;
        }

        let user_id = command.user.id.to_string();
        let options = command.data.options();
        let invocation = flatten_options(&options)
            .and_then(|(sub, args)| parse_invocation(&user_id, sub, &args));

        let text = match invocation {
            Some(invocation) => {
                let identity = DiscordIdentityResolver::new(ctx.http.clone());
                self.commands.dispatch(invocation, &identity).await
            }
            None => {
                tracing::warn!(user = %user_id, "malformed /{COMMAND_NAME} interaction");
                reply::invalid_input("unrecognized command options")
            }
        };

        let followup = CreateInteractionResponseFollowup::new().content(truncate_reply(&text));
        if let Err(e) = command.create_followup(&ctx.http, followup).await {
            tracing::warn!(error = %e, "failed to send reply");
        }
    }
}

/// Connect to the gateway and serve until Ctrl+C or SIGTERM.
pub async fn serve(state: &AppState, token: Option<SecretString>) -> anyhow::Result<()> {
    let token = token
        .filter(|t| !t.expose_secret().trim().is_empty())
        .context("DISCORD_TOKEN must be set to connect to Discord")?;

    let handler = Handler {
        commands: Arc::clone(&state.commands),
        guild_id: state.config.guild_id,
    };

    let mut client = serenity::Client::builder(token.expose_secret(), GatewayIntents::GUILDS)
        .event_handler(handler)
        .await
        .context("failed to build Discord gateway client")?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        crate::shutdown_signal().await;
        tracing::info!("shutting down gateway");
        shard_manager.shutdown_all().await;
    });

    client
        .start()
        .await
        .context("Discord gateway client stopped unexpectedly")
}
