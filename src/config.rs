use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::Weekday;
use dayplanner_model::StoreFormat;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_WEEK_PREVIEW: usize = 3;

/// Server settings, read from `DAYPLANNER_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub bind: SocketAddr,
    pub store_format: StoreFormat,
    pub week_start: Weekday,
    /// Tasks shown per day in the week view.
    pub week_preview: usize,
    pub prioritizer_latency: Duration,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = var("DAYPLANNER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let bind = var("DAYPLANNER_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse()
            .context("DAYPLANNER_BIND must be a socket address like 127.0.0.1:3000")?;

        let store_format = match var("DAYPLANNER_STORE_FORMAT") {
            Some(value) => value
                .parse()
                .map_err(|e: String| anyhow!(e))
                .context("invalid DAYPLANNER_STORE_FORMAT")?,
            None => StoreFormat::default(),
        };

        let week_start = match var("DAYPLANNER_WEEK_START") {
            Some(value) => value
                .trim()
                .parse::<Weekday>()
                .map_err(|_| anyhow!("DAYPLANNER_WEEK_START must be a weekday, got '{value}'"))?,
            None => Weekday::Sun,
        };

        let week_preview = match var("DAYPLANNER_WEEK_PREVIEW") {
            Some(value) => value
                .trim()
                .parse()
                .context("DAYPLANNER_WEEK_PREVIEW must be a non-negative integer")?,
            None => DEFAULT_WEEK_PREVIEW,
        };

        let latency_ms: u64 = match var("DAYPLANNER_PRIORITIZER_LATENCY_MS") {
            Some(value) => value
                .trim()
                .parse()
                .context("DAYPLANNER_PRIORITIZER_LATENCY_MS must be milliseconds")?,
            None => 0,
        };

        let cors_origin =
            var("DAYPLANNER_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Self {
            data_dir,
            bind,
            store_format,
            week_start,
            week_preview,
            prioritizer_latency: Duration::from_millis(latency_ms),
            cors_origin,
        })
    }
}
