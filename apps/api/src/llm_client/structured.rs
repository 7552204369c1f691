//! Structured output: turns untrusted completion text into a validated `T`.
//!
//! Schema failures (text does not parse) and contract failures (parses, but the
//! stage validator rejects it) are retried the same way. Transport errors are
//! not retried here: `LlmClient` already retried them.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::TextJudge;

/// Extra attempts after the first when output fails to parse or validate.
pub const MAX_SCHEMA_RETRIES: u32 = 2;

enum Rejection {
    Schema(String),
    Invariant(String),
}

/// Calls the judge, parses the reply as JSON into `T`, and runs `validate` on it.
///
/// `validate` may normalize the value in place before checking it; the value
/// returned is the normalized one.
pub async fn evaluate<T, F>(
    judge: &dyn TextJudge,
    stage: &'static str,
    prompt: &str,
    system: &str,
    mut validate: F,
) -> Result<T, AppError>
where
    T: DeserializeOwned,
    F: FnMut(&mut T) -> Result<(), String>,
{
    let attempts = MAX_SCHEMA_RETRIES + 1;
    let mut last: Option<Rejection> = None;

    for attempt in 1..=attempts {
        let text = judge.complete(prompt, system).await?;

        let rejection = match serde_json::from_str::<T>(strip_json_fences(&text)) {
            Ok(mut value) => match validate(&mut value) {
                Ok(()) => return Ok(value),
                Err(reason) => Rejection::Invariant(reason),
            },
            Err(e) => Rejection::Schema(e.to_string()),
        };

        match &rejection {
            Rejection::Schema(reason) => warn!(
                "{stage} attempt {attempt}/{attempts}: output did not parse ({reason})"
            ),
            Rejection::Invariant(reason) => warn!(
                "{stage} attempt {attempt}/{attempts}: output violated contract ({reason})"
            ),
        }
        last = Some(rejection);
    }

    Err(match last {
        Some(Rejection::Invariant(message)) => AppError::Invariant {
            stage,
            attempts,
            message,
        },
        Some(Rejection::Schema(message)) => AppError::Schema {
            stage,
            attempts,
            message,
        },
        None => AppError::Schema {
            stage,
            attempts,
            message: "no attempts were made".to_string(),
        },
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeJudge;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Scored {
        score: u32,
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[tokio::test]
    async fn test_evaluate_parses_fenced_reply() {
        let judge = FakeJudge::new().respond("SCORE", "```json\n{\"score\": 42}\n```");
        let value: Scored = evaluate(&judge, "scoring", "SCORE please", "sys", |_| Ok(()))
            .await
            .unwrap();
        assert_eq!(value.score, 42);
        assert_eq!(judge.calls(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_retries_malformed_then_succeeds() {
        let judge = FakeJudge::new().respond_sequence(
            "SCORE",
            vec!["not json at all", "{\"score\": \"high\"}", "{\"score\": 7}"],
        );
        let value: Scored = evaluate(&judge, "scoring", "SCORE", "sys", |_| Ok(()))
            .await
            .unwrap();
        assert_eq!(value.score, 7);
        assert_eq!(judge.calls(), 3);
    }

    #[tokio::test]
    async fn test_evaluate_gives_up_after_bounded_attempts() {
        let judge = FakeJudge::new().respond("SCORE", "{oops");
        let err = evaluate::<Scored, _>(&judge, "scoring", "SCORE", "sys", |_| Ok(()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Schema { attempts: 3, .. }));
        assert_eq!(judge.calls(), (MAX_SCHEMA_RETRIES + 1) as usize);
    }

    #[tokio::test]
    async fn test_evaluate_treats_contract_violation_like_schema_failure() {
        let judge = FakeJudge::new().respond("SCORE", "{\"score\": 250}");
        let err = evaluate::<Scored, _>(&judge, "scoring", "SCORE", "sys", |s| {
            if s.score > 100 {
                Err(format!("score {} out of range", s.score))
            } else {
                Ok(())
            }
        })
        .await
        .unwrap_err();
        match err {
            AppError::Invariant { stage, message, .. } => {
                assert_eq!(stage, "scoring");
                assert!(message.contains("250"));
            }
            other => panic!("expected invariant error, got {other:?}"),
        }
        assert_eq!(judge.calls(), 3);
    }

    #[tokio::test]
    async fn test_evaluate_does_not_retry_transport_errors() {
        let judge = FakeJudge::new().unavailable("SCORE");
        let err = evaluate::<Scored, _>(&judge, "scoring", "SCORE", "sys", |_| Ok(()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
        assert_eq!(judge.calls(), 1);
    }
}
