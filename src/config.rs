// src/config.rs
// Process configuration, loaded once at startup and passed into the state.
// Precedence: $FIREWATCH_CONFIG_PATH -> config/firewatch.toml -> built-in
// defaults, then NASA_MAP_KEY / PORT env overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use anyhow::{anyhow, Context, Result};

use crate::ingest::providers::eonet::EONET_EVENTS_URL;

pub const ENV_CONFIG_PATH: &str = "FIREWATCH_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/firewatch.toml";
const ENV_MAP_KEY: &str = "NASA_MAP_KEY";
const ENV_PORT: &str = "PORT";

/// FIRMS ships this literal in its URL examples; treat it as unset.
const KEY_PLACEHOLDER: &str = "YOUR_MAP_KEY";

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// FIRMS map key; the detection feed is disabled without one.
    pub firms_map_key: Option<String>,
    pub firms_server: String,
    pub firms_product: String,
    pub firms_region: String,
    pub firms_day_range: u32,
    pub eonet_events_url: String,
    /// Per-request upstream timeout, seconds.
    pub request_timeout_secs: u64,
    pub port: u16,
    /// Presentation thresholds for map clients; the pipeline itself does
    /// not consume them.
    pub confidence_high: u32,
    pub confidence_normal: u32,
    /// How often clients are expected to poll, milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            firms_map_key: None,
            firms_server: "https://firms.modaps.eosdis.nasa.gov".to_string(),
            firms_product: "VIIRS_SNPP_NRT".to_string(),
            firms_region: "world".to_string(),
            firms_day_range: 1,
            eonet_events_url: EONET_EVENTS_URL.to_string(),
            request_timeout_secs: 10,
            port: 5000,
            confidence_high: 80,
            confidence_normal: 60,
            poll_interval_ms: 120_000,
        }
    }
}

impl AppConfig {
    /// Load using env var + fallbacks:
    /// 1) $FIREWATCH_CONFIG_PATH
    /// 2) config/firewatch.toml
    /// 3) built-in defaults
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("FIREWATCH_CONFIG_PATH points to non-existent path"));
            }
            Self::from_file(&pb)?
        } else {
            let pb = PathBuf::from(DEFAULT_CONFIG_PATH);
            if pb.exists() {
                Self::from_file(&pb)?
            } else {
                Self::default()
            }
        };

        if let Ok(key) = env::var(ENV_MAP_KEY) {
            if !key.trim().is_empty() {
                cfg.firms_map_key = Some(key);
            }
        }
        if let Ok(port) = env::var(ENV_PORT) {
            cfg.port = port.parse().context("parsing PORT")?;
        }
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config from {}", path.display()))
    }

    /// Area-CSV feed URL, or None when no usable map key is configured.
    pub fn firms_csv_url(&self) -> Option<String> {
        let key = self.firms_map_key.as_deref()?.trim();
        if key.is_empty() || key == KEY_PLACEHOLDER {
            return None;
        }
        Some(format!(
            "{}/api/area/csv/{}/{}/{}/{}",
            self.firms_server.trim_end_matches('/'),
            key,
            self.firms_product,
            self.firms_region,
            self.firms_day_range
        ))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
