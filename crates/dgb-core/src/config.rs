use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed configuration for the bot, loaded from process environment.
///
/// Both credentials are required; `load()` fails before any network
/// connection is attempted if either is missing.
#[derive(Clone, Debug)]
pub struct Config {
    // Credentials
    pub discord_bot_token: String,
    pub gemini_api_key: String,

    // Model selection (static, one model per process)
    pub gemini_model: String,

    // Discord message limits
    pub message_limit: usize,
    pub truncate_at: usize,

    // Gemini HTTP client timeout
    pub request_timeout: Duration,
}

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";

/// Discord rejects messages longer than 2000 characters.
pub const DEFAULT_MESSAGE_LIMIT: usize = 2000;

/// Cut point for over-long replies, leaving room for the truncation suffix.
pub const DEFAULT_TRUNCATE_AT: usize = 1990;

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `load()` passes the
    /// process environment; tests pass a closure.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let discord_bot_token = get("DISCORD_BOT_TOKEN").and_then(non_empty);
        let gemini_api_key = get("GEMINI_API_KEY").and_then(non_empty);

        let Some(discord_bot_token) = discord_bot_token else {
            return Err(Error::Config(
                "DISCORD_BOT_TOKEN environment variable is required".to_string(),
            ));
        };
        let Some(gemini_api_key) = gemini_api_key else {
            return Err(Error::Config(
                "GEMINI_API_KEY environment variable is required".to_string(),
            ));
        };

        let gemini_model = get("GEMINI_MODEL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let message_limit =
            parse_usize(get("DISCORD_MESSAGE_LIMIT")).unwrap_or(DEFAULT_MESSAGE_LIMIT);
        let truncate_at = parse_usize(get("DISCORD_TRUNCATE_AT"))
            .unwrap_or(DEFAULT_TRUNCATE_AT)
            .min(message_limit);

        let request_timeout =
            Duration::from_millis(parse_u64(get("REQUEST_TIMEOUT_MS")).unwrap_or(120_000));

        Ok(Self {
            discord_bot_token,
            gemini_api_key,
            gemini_model,
            message_limit,
            truncate_at,
            request_timeout,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn parse_u64(v: Option<String>) -> Option<u64> {
    v.and_then(|s| s.trim().parse::<u64>().ok())
}

fn parse_usize(v: Option<String>) -> Option<usize> {
    v.and_then(|s| s.trim().parse::<usize>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
