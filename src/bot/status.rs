use std::time::Duration;

use serenity::all::{ActivityData, Context};

use crate::util::phrase::status_phrase;

/// Spawns the task rotating the bot's "watching" activity every `interval`.
pub fn spawn_status_cycle(ctx: Context, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            ctx.set_activity(Some(ActivityData::watching(status_phrase())));
        }
    });
}
