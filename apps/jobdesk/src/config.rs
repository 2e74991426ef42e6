use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::chat::responder::DEFAULT_INTERVAL;
use crate::cv::avatar::DEFAULT_AVATAR_BASE_URL;
use crate::models::chat::ConversationId;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file holding the persisted chat summaries.
    pub chat_store_path: PathBuf,
    /// Conversation the chat widget writes its summary under.
    pub conversation_id: ConversationId,
    /// Display name stored in the chat summary record.
    pub partner_name: String,
    pub auto_reply_interval: Duration,
    pub avatar_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let interval_secs: u64 =
            parse_env("AUTO_REPLY_INTERVAL_SECS", DEFAULT_INTERVAL.as_secs())?;
        if interval_secs == 0 {
            anyhow::bail!("AUTO_REPLY_INTERVAL_SECS must be greater than zero");
        }

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            chat_store_path: PathBuf::from(env_or("CHAT_STORE_PATH", "data/chat_summaries.json")),
            conversation_id: parse_env("CHAT_CONVERSATION_ID", 1)?,
            partner_name: env_or("CHAT_PARTNER_NAME", "İK Uzmanı"),
            auto_reply_interval: Duration::from_secs(interval_secs),
            avatar_base_url: env_or("AVATAR_BASE_URL", DEFAULT_AVATAR_BASE_URL),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
