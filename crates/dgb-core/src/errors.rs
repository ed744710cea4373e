/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the bot core
/// can handle failures consistently (fatal startup error vs contained
/// per-command error).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// Any failure in the AI call: transport, auth, provider-side, or a
    /// malformed response. The handler never surfaces this text to the user.
    #[error("generation failed: {0}")]
    Generation(String),

    /// Discord gateway / REST failures.
    #[error("platform error: {0}")]
    Platform(String),
}

pub type Result<T> = std::result::Result<T, Error>;
