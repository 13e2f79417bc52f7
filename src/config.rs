// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as keys, DEFAULT_RETRY_INTERVAL_MS};
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Wait between two attempts of an atomic modify that lost a write race
    pub retry_interval: Duration,
    /// Upper bound for a whole atomic modify, unbounded when `None`
    pub modify_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            retry_interval: Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS),
            modify_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup(keys::RETRY_INTERVAL_MS) {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of milliseconds, got {:?}", keys::RETRY_INTERVAL_MS, raw))?;
            config.retry_interval = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(keys::MODIFY_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of seconds, got {:?}", keys::MODIFY_TIMEOUT_SECS, raw))?;
            config.modify_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
