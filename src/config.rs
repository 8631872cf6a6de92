use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::error::{config::ConfigError, AppError};

const DEFAULT_CHANNELS_CONFIG_PATH: &str = "./config/channels.json";
const DEFAULT_ADMIN_CONFIG_PATH: &str = "./config/admin.json";
const DEFAULT_STATUS_INTERVAL_SECS: u64 = 35;

/// What to do at startup with temporary channels persisted by a previous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Leave the persisted temporary set untouched.
    #[default]
    Ignore,
    /// Drop ids whose channel is gone; keep the rest for the normal exit path.
    Adopt,
    /// Adopt, then delete leftover temporary channels that are already empty.
    Sweep,
}

impl FromStr for OrphanPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "adopt" => Ok(Self::Adopt),
            "sweep" => Ok(Self::Sweep),
            _ => Err(ConfigError::InvalidEnvVar {
                name: "ORPHAN_POLICY".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

pub struct Config {
    pub discord_bot_token: String,

    pub channels_config_path: PathBuf,
    pub admin_config_path: PathBuf,

    pub orphan_policy: OrphanPolicy,
    pub status_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let orphan_policy = match std::env::var("ORPHAN_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => OrphanPolicy::default(),
        };

        let status_interval_secs = match std::env::var("STATUS_INTERVAL_SECS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidEnvVar {
                    name: "STATUS_INTERVAL_SECS".to_string(),
                    value,
                })?,
            Err(_) => DEFAULT_STATUS_INTERVAL_SECS,
        };

        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            channels_config_path: std::env::var("CHANNELS_CONFIG_PATH")
                .unwrap_or_else(|_| DEFAULT_CHANNELS_CONFIG_PATH.to_string())
                .into(),
            admin_config_path: std::env::var("ADMIN_CONFIG_PATH")
                .unwrap_or_else(|_| DEFAULT_ADMIN_CONFIG_PATH.to_string())
                .into(),
            orphan_policy,
            status_interval: Duration::from_secs(status_interval_secs),
        })
    }
}
