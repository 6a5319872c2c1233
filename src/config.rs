// src/config.rs
//! Engine configuration loaded from config/engine.json.
//!
//! JSON shape:
//! {
//!   "vision": { "enabled": true, "provider": "openai", "apiKey": "ENV",
//!               "model": "gpt-4o-mini" },
//!   "search": { "enabled": true, "apiKey": "ENV", "timeoutSecs": 5 },
//!   "historyCapacity": 2000
//! }
//!
//! "ENV" as an api key means: read OPENAI_API_KEY / SERPAPI_KEY at load time.

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

fn default_timeout_secs() -> u64 {
    5
}
fn default_history_capacity() -> usize {
    2000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionConfig {
    pub enabled: bool,
    /// "openai" (case-insensitive)
    pub provider: String,
    pub api_key: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    pub enabled: bool,
    pub api_key: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bounded wait for the whole probe, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub vision: VisionConfig,
    pub search: SearchConfig,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: EngineConfig = serde_json::from_str(&data)?;

        cfg.vision.provider = cfg.vision.provider.to_lowercase();

        // Resolve api keys if "ENV". A disabled section never errors.
        if cfg.vision.enabled && cfg.vision.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.vision.api_key = match cfg.vision.provider.as_str() {
                "openai" => env::var("OPENAI_API_KEY")
                    .map_err(|_| anyhow::anyhow!("Missing OPENAI_API_KEY env var"))?,
                other => anyhow::bail!("Unsupported vision provider in config: {other}"),
            };
        }
        if cfg.search.enabled && cfg.search.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.search.api_key = env::var("SERPAPI_KEY")
                .map_err(|_| anyhow::anyhow!("Missing SERPAPI_KEY env var"))?;
        }

        // Sanitize the probe budget; 0 would make every probe time out.
        if cfg.search.timeout_secs == 0 || cfg.search.timeout_secs > 30 {
            cfg.search.timeout_secs = default_timeout_secs();
        }

        Ok(cfg)
    }
}
