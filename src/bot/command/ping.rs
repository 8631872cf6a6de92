use std::time::Instant;

use serenity::all::{Context, CreateCommand};

use crate::error::AppError;

pub const NAME: &str = "ping";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Checks whether the bot is alive.")
}

/// Replies with the round-trip latency of a REST call.
pub async fn run(ctx: &Context) -> Result<String, AppError> {
    let started = Instant::now();
    ctx.http.get_current_user().await?;

    Ok(format!("Pong! Latency: `{}ms`", started.elapsed().as_millis()))
}
