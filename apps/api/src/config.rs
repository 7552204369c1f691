use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{LlmConfig, Provider};

/// Service configuration loaded from environment variables.
/// Resolved once in `main`; components receive their slice of it at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    /// Wrap the model-backed keyword extractor with the dictionary fallback.
    pub keyword_fallback: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider = parse_provider(&require_env("LLM_PROVIDER")?)?;

        let model = optional_env("LLM_MODEL")
            .unwrap_or_else(|| provider.default_model().to_string());

        let timeout_secs = match optional_env("LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 120,
        };

        Ok(Config {
            llm: LlmConfig {
                provider,
                api_key: require_env("LLM_API_KEY")?,
                model,
                base_url: optional_env("LLM_BASE_URL"),
                timeout: Duration::from_secs(timeout_secs),
            },
            keyword_fallback: match optional_env("KEYWORD_FALLBACK") {
                Some(raw) => parse_flag(&raw).context("KEYWORD_FALLBACK must be true or false")?,
                None => false,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_provider(raw: &str) -> Result<Provider> {
    raw.parse::<Provider>()
        .context("LLM_PROVIDER must be 'anthropic' or 'openai'")
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized flag value '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("off").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_parse_provider_reports_unknown_value() {
        assert_eq!(parse_provider(" OpenAI ").unwrap(), Provider::OpenAi);
        let err = parse_provider("cohere").unwrap_err();
        assert_eq!(err.to_string(), "LLM_PROVIDER must be 'anthropic' or 'openai'");
        assert_eq!(err.root_cause().to_string(), "unknown LLM provider 'cohere'");
    }
}
