//! Fixed reply templates and composition/clamping for outgoing messages.
//!
//! Templates keep the original bot's Korean wording. Lengths are counted in
//! Unicode scalar values (`char`), so a clamp can never split a scalar value.

use crate::domain::{Question, Reply};

/// Instruction template wrapped around the raw question before the model call.
pub const PROMPT_TEMPLATE_PREFIX: &str = "질문에 대해 답변해 주세요: ";

/// Appended when a composed reply had to be cut down to the message limit.
/// 10 chars, so the default 1990-char cut lands exactly on the 2000 limit.
pub const TRUNCATION_SUFFIX: &str = "\n\n...(잘렸음)";

/// Generic per-command failure message, shown only to the requester.
/// Never carries the underlying error text.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "죄송합니다, AI 응답 처리 중 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";

/// Build the model prompt for a question.
pub fn build_prompt(question: &str) -> String {
    format!("{PROMPT_TEMPLATE_PREFIX}{question}")
}

/// Compose the untruncated reply: attribution header (bolded requester name,
/// literal question), separator line, then the generated text verbatim.
pub fn compose(question: &Question, generated: &str) -> String {
    format!(
        "**{}님의 질문:** {}\n---\n{}",
        question.requester, question.text, generated
    )
}

/// Clamp a composed reply to `limit` chars.
///
/// Replies at or under the limit pass through untouched. Over-long replies
/// keep their first `truncate_at` chars and gain [`TRUNCATION_SUFFIX`].
/// The cut point is capped so that kept text plus suffix never exceeds
/// `limit`, whatever `truncate_at` was configured to.
pub fn clamp(composed: String, limit: usize, truncate_at: usize) -> Reply {
    if composed.chars().count() <= limit {
        return Reply(composed);
    }

    let cut = truncate_at.min(limit.saturating_sub(TRUNCATION_SUFFIX.chars().count()));
    let mut out: String = composed.chars().take(cut).collect();
    out.push_str(TRUNCATION_SUFFIX);
    Reply(out)
}
