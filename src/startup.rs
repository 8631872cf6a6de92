use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::AppError, state::BotState};

/// Fallback location of the environment file, next to the JSON documents.
const CONFIG_DIR_ENV_FILE: &str = "./config/.env";

/// Loads environment variables from `.env`, falling back to `./config/.env`.
///
/// Variables already present in the process environment take precedence.
pub fn load_env() {
    if dotenvy::dotenv().is_err() {
        dotenvy::from_path(CONFIG_DIR_ENV_FILE).ok();
    }
}

/// Installs the global tracing subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the shared bot state and checks that both config documents are readable.
///
/// Reading the documents up front makes a malformed file fail at startup instead of on the
/// first voice event.
///
/// # Arguments
/// - `config` - Application configuration containing the document paths
///
/// # Returns
/// - `Ok(BotState)` - State ready to be shared with the event handler
/// - `Err(AppError)` - A document exists but could not be read or parsed
pub async fn build_state(config: &Config) -> Result<BotState, AppError> {
    let state = BotState::from_config(config);

    let channels = state.channels.load().await?;
    let admins = state.admins.load().await?;

    tracing::info!(
        "Loaded {} base channels and {} temporary channels from {}",
        channels.base_channels.len(),
        channels.temporary_channels.len(),
        state.channels.path().display()
    );

    if admins.admins.is_empty() && admins.bot_owner.is_empty() {
        tracing::warn!(
            "No bot owner or admin configured in {}, admin commands are unusable",
            state.admins.path().display()
        );
    }

    Ok(state)
}
