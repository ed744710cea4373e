use async_trait::async_trait;

use crate::Result;

/// Outbound port for answering one slash-command invocation.
///
/// Discord's interaction protocol is two-phase: a fast acknowledgement within
/// the platform's response window, then the substantive reply as a follow-up.
/// The port makes that explicit so the handler stays testable and the shape
/// carries over to any platform with a deferred-reply protocol.
#[async_trait]
pub trait CommandResponder: Send + Sync {
    /// Send the non-final "thinking" signal. Must be called before any slow
    /// work; the platform's acknowledgement window is shorter than a model
    /// call.
    async fn acknowledge(&self) -> Result<()>;

    /// Deliver the final reply to the originating conversation.
    async fn deliver(&self, text: &str) -> Result<()>;

    /// Deliver a reply visible only to the requester.
    async fn deliver_ephemeral(&self, text: &str) -> Result<()>;
}
