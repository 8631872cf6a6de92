use std::sync::{atomic::AtomicBool, Arc};

use serenity::all::{Context, EventHandler, GuildId, Interaction, Member, Ready, VoiceState};
use serenity::async_trait;

use crate::state::BotState;

pub mod interaction;
pub mod member;
pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub state: Arc<BotState>,
    /// Set once the status cycle task runs; `ready` fires again on every reconnect.
    status_started: AtomicBool,
}

impl Handler {
    pub fn new(state: Arc<BotState>) -> Self {
        Self {
            state,
            status_started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.state, &self.status_started, ctx, ready).await;
    }

    /// Called once every guild of the session is in the cache
    async fn cache_ready(&self, ctx: Context, guilds: Vec<GuildId>) {
        ready::handle_cache_ready(&self.state, ctx, guilds).await;
    }

    /// Called when a member joins, leaves or moves between voice channels
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(&self.state, ctx, old, new).await;
    }

    /// Called for slash commands, panel components and modal submissions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.state, ctx, interaction).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.state, ctx, new_member).await;
    }
}
