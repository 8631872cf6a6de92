mod bot;
mod config;
mod data;
mod error;
mod model;
mod platform;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use crate::{config::Config, error::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    startup::load_env();
    startup::init_tracing();

    let config = Config::from_env()?;
    let state = Arc::new(startup::build_state(&config).await?);

    tracing::info!("Orphan policy: {:?}", config.orphan_policy);

    bot::start::start_bot(&config, state).await
}
