use std::sync::Arc;

use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::gateway::GatewayError;
use serenity::model::application::{Command, Interaction};
use serenity::model::gateway::Ready;
use serenity::prelude::*;

use dgb_core::{config::Config, domain::Question, handler::QuestionHandler};

use crate::commands;
use crate::InteractionResponder;

struct DiscordHandler {
    handler: Arc<QuestionHandler>,
}

#[serenity::async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("logged in as {} ({})", ready.user.name, ready.user.id);

        // Global sync. Failure is non-fatal: the gateway connection stays up,
        // the command just may not be available everywhere.
        match Command::create_global_command(&ctx.http, commands::register()).await {
            Ok(cmd) => tracing::info!("synced global slash command /{}", cmd.name),
            Err(e) => tracing::warn!(error = %e, "slash command sync failed"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        if command.data.name != commands::COMMAND_NAME {
            tracing::debug!(command = %command.data.name, "ignoring unknown command");
            return;
        }

        let Some(text) = commands::question_option(&command) else {
            // Discord enforces required options; answer malformed payloads
            // instead of panicking.
            let notice = CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content("질문을 입력해주세요.")
                    .ephemeral(true),
            );
            if let Err(e) = command.create_response(&ctx.http, notice).await {
                tracing::error!(error = %e, "failed to answer malformed interaction");
            }
            return;
        };

        let question = Question::new(command.user.name.clone(), text);
        let responder = InteractionResponder::new(ctx.http.clone(), command);
        self.handler.handle(&responder, question).await;
    }
}

/// Connect to the gateway and serve interactions until the process stops.
pub async fn run_gateway(cfg: Arc<Config>, handler: Arc<QuestionHandler>) -> anyhow::Result<()> {
    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&cfg.discord_bot_token, intents)
        .event_handler(DiscordHandler { handler })
        .await
        .map_err(|e| anyhow::anyhow!("discord client build failed: {e}"))?;

    client
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("{}", startup_hint(&e)))?;

    Ok(())
}

/// Attach a diagnostic hint to the connection failures operators actually hit.
fn startup_hint(e: &serenity::Error) -> String {
    match e {
        serenity::Error::Gateway(GatewayError::InvalidAuthentication) => format!(
            "discord gateway error: {e}; check the DISCORD_BOT_TOKEN value"
        ),
        serenity::Error::Gateway(
            GatewayError::DisallowedGatewayIntents | GatewayError::InvalidGatewayIntents,
        ) => format!(
            "discord gateway error: {e}; enable the Message Content intent in the Developer Portal"
        ),
        other => format!("discord client error: {other}"),
    }
}
