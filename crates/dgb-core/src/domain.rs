/// A single user-submitted question, created on receipt of a `/gemini`
/// interaction and discarded once the reply is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    /// Display name of the requester, echoed in the reply header.
    pub requester: String,
    /// The literal question text as typed into the slash-command option.
    pub text: String,
}

impl Question {
    pub fn new(requester: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            requester: requester.into(),
            text: text.into(),
        }
    }
}

/// Composed reply text, already clamped to the platform message limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply(pub String);

impl Reply {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
