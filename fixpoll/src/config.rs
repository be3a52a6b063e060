/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Client configuration from `FIX_*` environment variables.
//!
//! | Variable             | Default         |
//! |----------------------|-----------------|
//! | `FIX_BEGIN_STRING`   | `FIX.4.4`       |
//! | `FIX_SENDER`         | `CLIENT`        |
//! | `FIX_TARGET`         | `SERVER`        |
//! | `FIX_HEARTBEAT_SECS` | `30`            |
//! | `FIX_POLL_SECS`      | `10`            |
//! | `FIX_ACCOUNT`        | `17018382`      |
//! | `FIX_SYMBOL`         | `X.US.OREURUSD` |
//! | `FIX_SENDER_SUB_ID`  | `Test FIX`      |
//! | `FIX_PASSWORD`       | `pass`          |

use crate::dispatch::DEFAULT_POLL_INTERVAL;
use crate::handler::LogonCredentials;
use crate::request::OrderDefaults;
use fixpoll_core::types::CompId;
use fixpoll_engine::SessionConfig;
use fixpoll_engine::config::DEFAULT_BEGIN_STRING;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_SENDER: &str = "CLIENT";
const DEFAULT_TARGET: &str = "SERVER";
const DEFAULT_HEARTBEAT_SECS: u64 = 30;

/// Errors raised while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidVar {
        /// Variable name.
        name: String,
        /// The offending value.
        value: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A CompID is empty or longer than 32 bytes.
    #[error("invalid comp id '{value}' for {name}: must be 1 to 32 bytes")]
    InvalidCompId {
        /// Variable name.
        name: String,
        /// The offending value.
        value: String,
    },
}

/// Everything the client binary needs to start.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Session the initiator opens.
    pub session: SessionConfig,
    /// Wait between dispatch ticks.
    pub poll_interval: Duration,
    /// Order parameters stamped on requests.
    pub order: OrderDefaults,
    /// Values injected into the Logon.
    pub credentials: LogonCredentials,
}

impl ClientConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ClientError::Config` if a variable is set to an unusable
    /// value.
    pub fn from_env() -> crate::Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::load(&vars)
    }

    fn load(vars: &HashMap<String, String>) -> crate::Result<Self> {
        Ok(Self::from_env_map(vars)?)
    }

    /// Reads the configuration from `vars`, falling back to defaults for
    /// anything unset.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let lookup = |name: &str, default: &str| -> String {
            vars.get(name)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        let sender = comp_id("FIX_SENDER", &lookup("FIX_SENDER", DEFAULT_SENDER))?;
        let target = comp_id("FIX_TARGET", &lookup("FIX_TARGET", DEFAULT_TARGET))?;
        let begin_string = lookup("FIX_BEGIN_STRING", DEFAULT_BEGIN_STRING);
        if begin_string.is_empty() {
            return Err(invalid("FIX_BEGIN_STRING", &begin_string, "must not be empty"));
        }
        let heartbeat = seconds(vars, "FIX_HEARTBEAT_SECS", DEFAULT_HEARTBEAT_SECS)?;
        let poll = seconds(vars, "FIX_POLL_SECS", DEFAULT_POLL_INTERVAL.as_secs())?;

        let defaults = OrderDefaults::default();
        let order = OrderDefaults {
            account: lookup("FIX_ACCOUNT", &defaults.account),
            symbol: lookup("FIX_SYMBOL", &defaults.symbol),
            ..defaults
        };

        let credentials_default = LogonCredentials::default();
        let credentials = LogonCredentials {
            sender_sub_id: lookup("FIX_SENDER_SUB_ID", &credentials_default.sender_sub_id),
            password: lookup("FIX_PASSWORD", &credentials_default.password),
        };

        Ok(Self {
            session: SessionConfig::new(sender, target, begin_string)
                .with_heartbeat_interval(heartbeat),
            poll_interval: poll,
            order,
            credentials,
        })
    }
}

fn comp_id(name: &str, value: &str) -> Result<CompId, ConfigError> {
    CompId::new(value).ok_or_else(|| ConfigError::InvalidCompId {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn seconds(
    vars: &HashMap<String, String>,
    name: &str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let Some(raw) = vars.get(name) else {
        return Ok(Duration::from_secs(default));
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid(name, raw, &e.to_string()))?;
    if secs == 0 {
        return Err(invalid(name, raw, "must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

fn invalid(name: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
