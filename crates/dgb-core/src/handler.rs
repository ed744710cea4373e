use std::sync::Arc;

use crate::{
    config::Config,
    domain::Question,
    messaging::CommandResponder,
    model::GenerativeClient,
    reply,
};

/// Application-level handler for one `/gemini` invocation.
///
/// Per invocation: acknowledge, build prompt, call the model, compose and
/// clamp the reply, deliver. Failures after the acknowledgement are contained
/// here: the requester gets the fixed generic message and the cause goes to
/// the log, never to the chat.
pub struct QuestionHandler {
    client: Arc<dyn GenerativeClient>,
    model: String,
    message_limit: usize,
    truncate_at: usize,
}

impl QuestionHandler {
    pub fn new(client: Arc<dyn GenerativeClient>, cfg: &Config) -> Self {
        Self {
            client,
            model: cfg.gemini_model.clone(),
            message_limit: cfg.message_limit,
            truncate_at: cfg.truncate_at,
        }
    }

    /// Handle one question end to end. Never propagates per-command errors;
    /// the process and other in-flight commands are unaffected by a failure
    /// here.
    pub async fn handle(&self, responder: &dyn CommandResponder, question: Question) {
        // Acknowledge before the model call; the platform's response window
        // is far shorter than a generation round-trip.
        if let Err(e) = responder.acknowledge().await {
            tracing::error!(error = %e, "failed to acknowledge interaction");
            return;
        }

        let prompt = reply::build_prompt(&question.text);

        match self.client.generate(&self.model, &prompt).await {
            Ok(generated) => {
                let composed = reply::compose(&question, &generated);
                let clamped = reply::clamp(composed, self.message_limit, self.truncate_at);
                if let Err(e) = responder.deliver(clamped.as_str()).await {
                    tracing::error!(error = %e, "failed to deliver reply");
                }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    requester = %question.requester,
                    "generation failed"
                );
                if let Err(e) = responder
                    .deliver_ephemeral(reply::GENERIC_FAILURE_MESSAGE)
                    .await
                {
                    tracing::error!(error = %e, "failed to deliver error message");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Error, Result};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    struct FakeModel {
        response: Result<String>,
    }

    impl FakeModel {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(text.to_string()),
            })
        }

        fn failing(detail: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Err(Error::Generation(detail.to_string())),
            })
        }
    }

    #[async_trait]
    impl GenerativeClient for FakeModel {
        async fn generate(&self, _model: &str, _prompt: &str) -> Result<String> {
            match &self.response {
                Ok(s) => Ok(s.clone()),
                Err(Error::Generation(d)) => Err(Error::Generation(d.clone())),
                Err(_) => unreachable!(),
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Sent {
        Ack,
        Final(String),
        Ephemeral(String),
    }

    #[derive(Default)]
    struct RecordingResponder {
        sent: Mutex<Vec<Sent>>,
        fail_ack: bool,
    }

    impl RecordingResponder {
        async fn log(&self) -> Vec<Sent> {
            self.sent.lock().await.clone()
        }
    }

    #[async_trait]
    impl CommandResponder for RecordingResponder {
        async fn acknowledge(&self) -> Result<()> {
            if self.fail_ack {
                return Err(Error::Platform("interaction expired".to_string()));
            }
            self.sent.lock().await.push(Sent::Ack);
            Ok(())
        }

        async fn deliver(&self, text: &str) -> Result<()> {
            self.sent.lock().await.push(Sent::Final(text.to_string()));
            Ok(())
        }

        async fn deliver_ephemeral(&self, text: &str) -> Result<()> {
            self.sent
                .lock()
                .await
                .push(Sent::Ephemeral(text.to_string()));
            Ok(())
        }
    }

    fn handler(client: Arc<dyn GenerativeClient>) -> QuestionHandler {
        QuestionHandler {
            client,
            model: "gemini-2.5-pro".to_string(),
            message_limit: 2000,
            truncate_at: 1990,
        }
    }

    #[tokio::test]
    async fn answers_with_attributed_reply() {
        let h = handler(FakeModel::ok("4."));
        let responder = RecordingResponder::default();

        h.handle(&responder, Question::new("Alice", "What is 2+2?"))
            .await;

        assert_eq!(
            responder.log().await,
            vec![
                Sent::Ack,
                Sent::Final("**Alice님의 질문:** What is 2+2?\n---\n4.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn clamps_long_answers_to_the_message_limit() {
        let h = handler(FakeModel::ok(&"y".repeat(2500)));
        let responder = RecordingResponder::default();

        h.handle(&responder, Question::new("Bob", "tell me everything"))
            .await;

        let log = responder.log().await;
        assert_eq!(log.len(), 2);
        let Sent::Final(text) = &log[1] else {
            panic!("expected a final reply, got {:?}", log[1]);
        };
        assert_eq!(text.chars().count(), 2000);
        assert!(text.starts_with("**Bob님의 질문:** tell me everything\n---\n"));
        assert!(text.ends_with(reply::TRUNCATION_SUFFIX));
    }

    #[tokio::test]
    async fn generation_failure_yields_ephemeral_generic_message() {
        let h = handler(FakeModel::failing("401 unauthorized from provider"));
        let responder = RecordingResponder::default();

        h.handle(&responder, Question::new("Alice", "What is 2+2?"))
            .await;

        let log = responder.log().await;
        assert_eq!(log[0], Sent::Ack);
        let Sent::Ephemeral(text) = &log[1] else {
            panic!("expected an ephemeral message, got {:?}", log[1]);
        };
        assert_eq!(text, reply::GENERIC_FAILURE_MESSAGE);
        // The raw provider error never reaches the requester.
        assert!(!text.contains("401"));
    }

    #[tokio::test]
    async fn skips_delivery_when_acknowledgement_fails() {
        let h = handler(FakeModel::ok("never sent"));
        let responder = RecordingResponder {
            fail_ack: true,
            ..Default::default()
        };

        h.handle(&responder, Question::new("Alice", "hi")).await;

        assert!(responder.log().await.is_empty());
    }
}
