//! Environment configuration

use crate::state_machine::{FlowOptions, UserId};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENV_PORT: &str = "ORDER_DESK_PORT";
pub const ENV_DISPATCHER_ID: &str = "ORDER_DESK_DISPATCHER_ID";
pub const ENV_ASK_QUANTITY: &str = "ORDER_DESK_ASK_QUANTITY";
pub const ENV_SESSION_IDLE_SECS: &str = "ORDER_DESK_SESSION_IDLE_SECS";
pub const ENV_PRICE_LIST_PATH: &str = "ORDER_DESK_PRICE_LIST_PATH";

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: invalid value {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDeskConfig {
    pub port: u16,
    /// Chat id that receives order notifications
    pub dispatcher: Option<UserId>,
    pub flow: FlowOptions,
    /// Evict sessions idle this long; `None` keeps them forever
    pub session_idle_timeout: Option<Duration>,
    pub price_list_path: Option<PathBuf>,
}

impl Default for OrderDeskConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            dispatcher: None,
            flow: FlowOptions::default(),
            session_idle_timeout: None,
            price_list_path: None,
        }
    }
}

impl OrderDeskConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Invalid values are logged and replaced by
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            port: read(ENV_PORT)
                .and_then(|raw| or_warn(parse_port(&raw)))
                .unwrap_or(defaults.port),
            dispatcher: read(ENV_DISPATCHER_ID)
                .and_then(|raw| or_warn(parse_dispatcher(&raw)))
                .flatten(),
            flow: FlowOptions {
                ask_quantity: read(ENV_ASK_QUANTITY)
                    .and_then(|raw| or_warn(parse_flag(ENV_ASK_QUANTITY, &raw)))
                    .unwrap_or(defaults.flow.ask_quantity),
            },
            session_idle_timeout: read(ENV_SESSION_IDLE_SECS)
                .and_then(|raw| or_warn(parse_idle_timeout(&raw)))
                .flatten(),
            price_list_path: read(ENV_PRICE_LIST_PATH).map(PathBuf::from),
        }
    }
}

fn or_warn<T>(result: Result<T, ConfigError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring invalid setting");
            None
        }
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.parse().map_err(|e| ConfigError::invalid(ENV_PORT, raw, e))
}

/// `0` means "no dispatcher", same as leaving it unset
fn parse_dispatcher(raw: &str) -> Result<Option<UserId>, ConfigError> {
    let id: i64 = raw
        .parse()
        .map_err(|e| ConfigError::invalid(ENV_DISPATCHER_ID, raw, e))?;
    Ok((id != 0).then_some(UserId(id)))
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, raw, "expected true or false")),
    }
}

/// `0` disables eviction
fn parse_idle_timeout(raw: &str) -> Result<Option<Duration>, ConfigError> {
    let secs: u64 = raw
        .parse()
        .map_err(|e| ConfigError::invalid(ENV_SESSION_IDLE_SECS, raw, e))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}
