//! Session and engine configuration (JSON, camelCase).

use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::disambiguate::DeleteGate;

const DEFAULT_MIN_TICK_INTERVAL_MS: u64 = 25;
const MAX_MIN_TICK_INTERVAL_MS: u64 = 1_000;
const DEFAULT_FRAME_QUEUE_CAPACITY: usize = 64;
const DEFAULT_PIPELINE_POLL_MS: u64 = 5;

/// Per-session knobs. Recognition constants are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct SessionConfig {
    /// Ticks closer together than this are skipped. 0 disables the governor.
    pub min_tick_interval_ms: u64,
    pub delete_gate: DeleteGate,
    /// Run dictionary lookups on a worker thread instead of inline.
    pub background_suggestions: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_tick_interval_ms: DEFAULT_MIN_TICK_INTERVAL_MS,
            delete_gate: DeleteGate::default(),
            background_suggestions: false,
        }
    }
}

impl SessionConfig {
    pub fn normalize(&mut self) {
        self.min_tick_interval_ms = self.min_tick_interval_ms.min(MAX_MIN_TICK_INTERVAL_MS);
    }

    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct EngineConfig {
    pub session: SessionConfig,
    /// Frames waiting for the pipeline before `send` blocks.
    pub frame_queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            frame_queue_capacity: DEFAULT_FRAME_QUEUE_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn normalize(&mut self) {
        self.session.normalize();
        self.frame_queue_capacity = self.frame_queue_capacity.clamp(1, 4_096);
    }
}

/// Read an [`EngineConfig`] from `path`. Missing or unparsable files fall
/// back to defaults; the result is always normalized.
pub fn load_config(path: &Path) -> EngineConfig {
    let mut config = match fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str::<EngineConfig>(&raw).unwrap_or_else(|e| {
            warn!(path = %path.display(), "config unparsable, using defaults: {e}");
            EngineConfig::default()
        }),
        Err(_) => EngineConfig::default(),
    };
    config.normalize();
    config
}

pub fn save_config(path: &Path, config: &EngineConfig) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;
    fs::write(path, json)
}

/// How long the engine pipeline waits on an empty frame queue before
/// re-checking its running flag. `SIGNSCRIBE_PIPELINE_POLL_MS`, 1..=50.
pub fn pipeline_poll_ms() -> u64 {
    static POLL_MS: OnceLock<u64> = OnceLock::new();
    *POLL_MS.get_or_init(|| {
        std::env::var("SIGNSCRIBE_PIPELINE_POLL_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(|v| v.clamp(1, 50))
            .unwrap_or(DEFAULT_PIPELINE_POLL_MS)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{"session":{"deleteGate":"always"}}"#).expect("parse");
        assert_eq!(cfg.session.delete_gate, DeleteGate::Always);
        assert_eq!(cfg.session.min_tick_interval_ms, 25);
        assert!(!cfg.session.background_suggestions);
        assert_eq!(cfg.frame_queue_capacity, 64);
    }

    #[test]
    fn normalize_clamps_numeric_fields() {
        let mut cfg = EngineConfig {
            session: SessionConfig {
                min_tick_interval_ms: 60_000,
                ..SessionConfig::default()
            },
            frame_queue_capacity: 0,
        };
        cfg.normalize();
        assert_eq!(cfg.session.min_tick_interval_ms, 1_000);
        assert_eq!(cfg.frame_queue_capacity, 1);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(EngineConfig::default()).expect("serialize");
        assert_eq!(json["frameQueueCapacity"], 64);
        assert_eq!(json["session"]["minTickIntervalMs"], 25);
        assert_eq!(json["session"]["deleteGate"], "restricted");
        assert_eq!(json["session"]["backgroundSuggestions"], false);
    }

    #[test]
    fn load_falls_back_on_missing_or_bad_file() {
        let dir = std::env::temp_dir();
        let missing = dir.join("signscribe-no-such-config.json");
        assert_eq!(load_config(&missing), EngineConfig::default());

        let bad = dir.join(format!("signscribe-bad-config-{}.json", std::process::id()));
        fs::write(&bad, "{ not json").expect("write config");
        let cfg = load_config(&bad);
        let _ = fs::remove_file(&bad);
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = std::env::temp_dir().join(format!(
            "signscribe-config-{}/engine.json",
            std::process::id()
        ));
        let mut cfg = EngineConfig::default();
        cfg.session.min_tick_interval_ms = 0;
        cfg.session.background_suggestions = true;
        save_config(&path, &cfg).expect("save config");
        let loaded = load_config(&path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir_all(parent);
        }
        assert_eq!(loaded, cfg);
    }
}
