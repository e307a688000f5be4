//! Storefront configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use printshop_checkout::CheckoutConfig;

pub const DATA_DIR_VAR: &str = "PRINTSHOP_DATA_DIR";
pub const LOG_VAR: &str = "PRINTSHOP_LOG";
pub const CHECKOUT_DELAY_VAR: &str = "PRINTSHOP_CHECKOUT_DELAY_MS";
pub const CLOSE_DELAY_VAR: &str = "PRINTSHOP_CLOSE_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Directory for the file-backed durable store.
    pub data_dir: PathBuf,
    /// Default tracing directive when `RUST_LOG` is unset.
    pub log_filter: String,
    pub checkout: CheckoutConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_filter: "info".to_string(),
            checkout: CheckoutConfig::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(filter) = lookup(LOG_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter.trim().to_string();
        }
        if let Some(delay) = millis(&lookup, CHECKOUT_DELAY_VAR) {
            config.checkout.processing_delay = delay;
        }
        if let Some(delay) = millis(&lookup, CLOSE_DELAY_VAR) {
            config.checkout.close_delay = delay;
        }

        config
    }
}

fn millis<F>(lookup: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable delay; using default");
            None
        }
    }
}

/// `{app_data_dir}/printshop`, falling back to `~/.local/share/printshop`.
fn default_data_dir() -> PathBuf {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("printshop")
}
