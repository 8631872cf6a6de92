//! Platform capability interface consumed by the room lifecycle.
//!
//! Every call here is a suspension point: while one handler awaits the platform, another
//! handler may run and observe or mutate shared state. The lifecycle and panel services
//! only talk to Discord through this trait, which keeps them runnable against the
//! in-memory implementation used in tests.

pub mod discord;


use serenity::async_trait;

use crate::{
    error::AppError,
    model::{
        channel::{
            ChannelSnapshot, NewChannel, Overwrite, OverwriteTarget, VoiceChannelEdit,
            VoiceStateEdit,
        },
        panel::PanelView,
        presence::VoiceMember,
    },
};

#[async_trait]
pub trait Platform: Send + Sync {
    /// User id of the bot account.
    fn bot_user_id(&self) -> u64;

    /// Looks up a channel.
    ///
    /// # Returns
    /// - `Some(ChannelSnapshot)` - Channel exists; `occupants` counts connected members
    /// - `None` - Channel no longer exists (or is not visible to the bot)
    async fn channel(&self, channel_id: u64) -> Option<ChannelSnapshot>;

    /// Looks up a guild member.
    ///
    /// # Returns
    /// - `Some(VoiceMember)` - Member is still in the guild
    /// - `None` - Member left or cannot be resolved
    async fn member(&self, guild_id: u64, user_id: u64) -> Option<VoiceMember>;

    /// Creates a channel and returns its id.
    async fn create_channel(&self, guild_id: u64, channel: NewChannel) -> Result<u64, AppError>;

    /// Edits a voice channel's name, user limit and overwrites in place.
    async fn edit_voice_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
        edit: VoiceChannelEdit,
    ) -> Result<(), AppError>;

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError>;

    /// Creates or replaces a permission overwrite on a channel.
    async fn set_overwrite(
        &self,
        guild_id: u64,
        channel_id: u64,
        overwrite: Overwrite,
    ) -> Result<(), AppError>;

    /// Removes a permission overwrite from a channel.
    async fn clear_overwrite(
        &self,
        guild_id: u64,
        channel_id: u64,
        target: OverwriteTarget,
    ) -> Result<(), AppError>;

    /// Moves a member to a voice channel, or disconnects them when `channel_id` is `None`.
    async fn move_member(
        &self,
        guild_id: u64,
        user_id: u64,
        channel_id: Option<u64>,
    ) -> Result<(), AppError>;

    /// Applies a server mute/deafen change to a member.
    async fn edit_voice_state(
        &self,
        guild_id: u64,
        user_id: u64,
        edit: VoiceStateEdit,
    ) -> Result<(), AppError>;

    /// Posts a room's control panel message into a text channel.
    async fn send_panel(&self, channel_id: u64, panel: PanelView) -> Result<(), AppError>;
}
