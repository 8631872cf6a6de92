//! Ready and cache-ready event handlers.
//!
//! `ready` fires after every gateway (re)connection: it registers the slash commands and
//! starts the status cycle once. `cache_ready` fires when the guild cache is filled, which
//! is the first point where channel occupancy can be trusted, so startup reconciliation of
//! leftover temporary channels runs there.

use std::sync::atomic::{AtomicBool, Ordering};

use serenity::all::{Command, Context, GuildId, Ready};

use crate::{
    bot::{command, status::spawn_status_cycle},
    platform::discord::DiscordPlatform,
    service::reconcile::ReconcileService,
    state::BotState,
};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared bot state, for the status interval
/// - `status_started` - Guard so reconnects do not spawn a second status task
/// - `ctx` - Discord context for command registration and activity updates
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(
    state: &BotState,
    status_started: &AtomicBool,
    ctx: Context,
    ready: Ready,
) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    match Command::set_global_commands(&ctx.http, command::commands()).await {
        Ok(commands) => tracing::info!("Registered {} slash commands", commands.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {:?}", e),
    }

    if !status_started.swap(true, Ordering::SeqCst) {
        spawn_status_cycle(ctx, state.status_interval);
    }
}

/// Handles the cache ready event by reconciling leftover temporary channels.
pub async fn handle_cache_ready(state: &BotState, ctx: Context, guilds: Vec<GuildId>) {
    tracing::debug!("Cache ready for {} guilds", guilds.len());

    let platform = DiscordPlatform::new(&ctx);
    if let Err(e) = ReconcileService::new(state, &platform)
        .reconcile(state.orphan_policy)
        .await
    {
        tracing::error!("Failed to reconcile temporary channels: {}", e);
    }
}
