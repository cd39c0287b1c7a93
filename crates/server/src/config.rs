use std::{collections::HashMap, fs, net::SocketAddr};

use anyhow::{bail, Context};
use chrono::Duration;
use serde::Deserialize;

const SETTINGS_FILE: &str = "server.toml";

/// Upper bound for how long an unread success message is kept: one week.
pub const MAX_TEMP_DATA_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub temp_data_ttl_seconds: i64,
    pub max_body_bytes: usize,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            temp_data_ttl_seconds: 600,
            max_body_bytes: 64 * 1024,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server_bind
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.server_bind))
    }

    pub fn temp_data_ttl(&self) -> anyhow::Result<Duration> {
        let seconds = self.temp_data_ttl_seconds;
        if !(1..=MAX_TEMP_DATA_TTL_SECONDS).contains(&seconds) {
            bail!(
                "temp data ttl must be between 1 and {MAX_TEMP_DATA_TTL_SECONDS} seconds, got {seconds}"
            );
        }
        Duration::try_seconds(seconds)
            .with_context(|| format!("temp data ttl of {seconds} seconds is out of range"))
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

/// Applies a flat `key = value` table. Unknown keys are ignored and a file
/// that does not parse leaves the settings untouched.
fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(table) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };
    let file_cfg: HashMap<String, String> = table
        .into_iter()
        .filter_map(|(key, value)| match value {
            toml::Value::String(v) => Some((key, v)),
            toml::Value::Integer(v) => Some((key, v.to_string())),
            _ => None,
        })
        .collect();

    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("temp_data_ttl_seconds") {
        set_ttl(&mut settings.temp_data_ttl_seconds, v);
    }
    if let Some(v) = file_cfg.get("max_body_bytes") {
        set_parsed(&mut settings.max_body_bytes, v);
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("APP__TEMP_DATA_TTL_SECONDS") {
        set_ttl(&mut settings.temp_data_ttl_seconds, &v);
    }
    if let Some(v) = var("APP__MAX_BODY_BYTES") {
        set_parsed(&mut settings.max_body_bytes, &v);
    }

    if let Some(v) = var("RUST_LOG") {
        settings.log_filter = v;
    }
}

/// Out-of-range values are ignored like unparsable ones.
fn set_ttl(slot: &mut i64, raw: &str) {
    if let Ok(seconds) = raw.trim().parse::<i64>() {
        if (1..=MAX_TEMP_DATA_TTL_SECONDS).contains(&seconds) {
            *slot = seconds;
        }
    }
}

fn set_parsed<T: std::str::FromStr>(slot: &mut T, raw: &str) {
    if let Ok(parsed) = raw.trim().parse::<T>() {
        *slot = parsed;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
