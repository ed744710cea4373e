use async_trait::async_trait;

use crate::Result;

/// Hexagonal port for a generative text-completion backend.
///
/// Gemini is the only implementation today (`dgb-gemini`); the contract is a
/// single stateless call so tests can substitute a fake without touching the
/// network.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Run `prompt` against `model` and return the generated text.
    ///
    /// Exactly one outbound call per invocation; no retries, no per-call
    /// state. Every failure shape collapses into [`Error::Generation`].
    ///
    /// [`Error::Generation`]: crate::Error::Generation
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;
}
