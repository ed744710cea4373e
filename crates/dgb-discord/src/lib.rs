//! Discord adapter (serenity).
//!
//! This crate implements the `dgb-core` CommandResponder over Discord's
//! interaction protocol: defer first, then follow-up.

use std::sync::Arc;

use async_trait::async_trait;

use serenity::builder::CreateInteractionResponseFollowup;
use serenity::http::Http;
use serenity::model::application::CommandInteraction;

use dgb_core::{errors::Error, messaging::CommandResponder, Result};

pub mod commands;
pub mod router;

/// Two-phase responder bound to one slash-command interaction.
///
/// `acknowledge` defers the interaction (the "thinking" placeholder) and the
/// deliver methods send follow-ups to it. A follow-up without a prior defer
/// is rejected by Discord, which matches the port's contract.
pub struct InteractionResponder {
    http: Arc<Http>,
    interaction: CommandInteraction,
}

impl InteractionResponder {
    pub fn new(http: Arc<Http>, interaction: CommandInteraction) -> Self {
        Self { http, interaction }
    }

    fn map_err(e: serenity::Error) -> Error {
        Error::Platform(format!("discord error: {e}"))
    }
}

#[async_trait]
impl CommandResponder for InteractionResponder {
    async fn acknowledge(&self) -> Result<()> {
        self.interaction
            .defer(&self.http)
            .await
            .map_err(Self::map_err)
    }

    async fn deliver(&self, text: &str) -> Result<()> {
        self.interaction
            .create_followup(
                &self.http,
                CreateInteractionResponseFollowup::new().content(text),
            )
            .await
            .map(|_| ())
            .map_err(Self::map_err)
    }

    async fn deliver_ephemeral(&self, text: &str) -> Result<()> {
        self.interaction
            .create_followup(
                &self.http,
                CreateInteractionResponseFollowup::new()
                    .content(text)
                    .ephemeral(true),
            )
            .await
            .map(|_| ())
            .map_err(Self::map_err)
    }
}
