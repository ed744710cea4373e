//! Slash-command definition and option extraction.

use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::{CommandInteraction, CommandOptionType, ResolvedValue};

pub const COMMAND_NAME: &str = "gemini";
pub const QUESTION_OPTION: &str = "question";

/// Build the global `/gemini` command with its single required option.
pub fn register() -> CreateCommand {
    CreateCommand::new(COMMAND_NAME)
        .description("Gemini AI에게 질문하고 답변을 받습니다.")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                QUESTION_OPTION,
                "Gemini에게 할 질문을 입력해주세요.",
            )
            .required(true),
        )
}

/// Pull the `question` option out of an interaction.
///
/// Discord enforces required options, so `None` only happens for malformed
/// payloads.
pub fn question_option(interaction: &CommandInteraction) -> Option<String> {
    interaction
        .data
        .options()
        .into_iter()
        .find_map(|opt| match opt.value {
            ResolvedValue::String(s) if opt.name == QUESTION_OPTION => Some(s.to_string()),
            _ => None,
        })
}
