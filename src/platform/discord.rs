//! Serenity-backed platform implementation.
//!
//! Occupancy and member lookups read the gateway cache first and fall back to the REST
//! API. All mutations go through the HTTP client shared with the rest of the bot.

use std::sync::Arc;

use serenity::{
    all::{
        Cache, Channel, ChannelId, ChannelType, Context, CreateChannel, EditChannel, EditMember,
        GuildChannel, GuildId, Member, PermissionOverwrite, PermissionOverwriteType, RoleId,
        UserId,
    },
    async_trait,
    http::Http,
};

use crate::{
    bot::panel::panel_message,
    error::AppError,
    model::{
        channel::{
            ChannelKind, ChannelSnapshot, NewChannel, Overwrite, OverwriteTarget,
            VoiceChannelEdit, VoiceStateEdit,
        },
        panel::PanelView,
        presence::VoiceMember,
    },
    platform::Platform,
};

/// Platform implementation talking to Discord through serenity.
///
/// Cheap to construct: it only clones the two `Arc`s held by the event context, so
/// handlers build one per event.
pub struct DiscordPlatform {
    /// Discord HTTP client for API requests.
    http: Arc<Http>,
    /// Gateway cache used for occupancy and member lookups.
    cache: Arc<Cache>,
}

impl DiscordPlatform {
    pub fn new(ctx: &Context) -> Self {
        Self {
            http: ctx.http.clone(),
            cache: ctx.cache.clone(),
        }
    }

    /// Snapshot of a channel from the gateway cache, including voice occupancy.
    ///
    /// Channels are only cached inside their guild, so every cached guild is searched.
    fn cached_channel(&self, channel_id: ChannelId) -> Option<ChannelSnapshot> {
        self.cache.guilds().into_iter().find_map(|guild_id| {
            let guild = self.cache.guild(guild_id)?;
            let channel = guild.channels.get(&channel_id)?;
            let occupants = guild
                .voice_states
                .values()
                .filter(|state| state.channel_id == Some(channel_id))
                .count();
            let snapshot = snapshot_of(channel, occupants);
            Some(snapshot)
        })
    }
}

fn snapshot_of(channel: &GuildChannel, occupants: usize) -> ChannelSnapshot {
    let kind = match channel.kind {
        ChannelType::Voice | ChannelType::Stage => ChannelKind::Voice,
        ChannelType::Category => ChannelKind::Category,
        _ => ChannelKind::Text,
    };

    ChannelSnapshot {
        channel_id: channel.id.get(),
        guild_id: channel.guild_id.get(),
        name: channel.name.clone(),
        kind,
        parent_id: channel.parent_id.map(|id| id.get()),
        occupants,
    }
}

/// Converts a gateway member into the lifecycle's member view.
pub fn voice_member(member: &Member) -> VoiceMember {
    VoiceMember {
        user_id: member.user.id.get(),
        guild_id: member.guild_id.get(),
        display_name: member.display_name().to_string(),
        username: member.user.name.clone(),
        bot: member.user.bot,
    }
}

/// Maps an overwrite target to serenity's overwrite kind; @everyone shares the guild's id.
fn overwrite_kind(guild_id: u64, target: OverwriteTarget) -> PermissionOverwriteType {
    match target {
        OverwriteTarget::Everyone => PermissionOverwriteType::Role(RoleId::new(guild_id)),
        OverwriteTarget::Member(user_id) => PermissionOverwriteType::Member(UserId::new(user_id)),
    }
}

fn to_serenity(guild_id: u64, overwrite: Overwrite) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: overwrite.allow,
        deny: overwrite.deny,
        kind: overwrite_kind(guild_id, overwrite.target),
    }
}

#[async_trait]
impl Platform for DiscordPlatform {
    fn bot_user_id(&self) -> u64 {
        self.cache.current_user().id.get()
    }

    async fn channel(&self, channel_id: u64) -> Option<ChannelSnapshot> {
        let id = ChannelId::new(channel_id);
        if let Some(snapshot) = self.cached_channel(id) {
            return Some(snapshot);
        }

        match id.to_channel(&self.http).await {
            Ok(Channel::Guild(channel)) => Some(snapshot_of(&channel, 0)),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Channel {} could not be fetched: {}", channel_id, e);
                None
            }
        }
    }

    async fn member(&self, guild_id: u64, user_id: u64) -> Option<VoiceMember> {
        let guild_id = GuildId::new(guild_id);
        let user_id = UserId::new(user_id);

        let cached = self
            .cache
            .guild(guild_id)
            .and_then(|guild| guild.members.get(&user_id).map(voice_member));
        if cached.is_some() {
            return cached;
        }

        match guild_id.member(&self.http, user_id).await {
            Ok(member) => Some(voice_member(&member)),
            Err(e) => {
                tracing::debug!(
                    "Member {} could not be fetched from guild {}: {}",
                    user_id,
                    guild_id,
                    e
                );
                None
            }
        }
    }

    async fn create_channel(&self, guild_id: u64, channel: NewChannel) -> Result<u64, AppError> {
        let kind = match channel.kind {
            ChannelKind::Voice => ChannelType::Voice,
            ChannelKind::Text => ChannelType::Text,
            ChannelKind::Category => ChannelType::Category,
        };

        let overwrites: Vec<PermissionOverwrite> = channel
            .overwrites
            .into_iter()
            .map(|overwrite| to_serenity(guild_id, overwrite))
            .collect();

        let mut builder = CreateChannel::new(channel.name)
            .kind(kind)
            .permissions(overwrites);
        if let Some(parent_id) = channel.parent_id {
            builder = builder.category(ChannelId::new(parent_id));
        }
        if channel.kind == ChannelKind::Voice {
            builder = builder.user_limit(channel.user_limit);
        }

        let created = GuildId::new(guild_id)
            .create_channel(&self.http, builder)
            .await?;

        Ok(created.id.get())
    }

    async fn edit_voice_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
        edit: VoiceChannelEdit,
    ) -> Result<(), AppError> {
        let overwrites: Vec<PermissionOverwrite> = edit
            .overwrites
            .into_iter()
            .map(|overwrite| to_serenity(guild_id, overwrite))
            .collect();

        ChannelId::new(channel_id)
            .edit(
                &self.http,
                EditChannel::new()
                    .name(edit.name)
                    .user_limit(edit.user_limit)
                    .permissions(overwrites),
            )
            .await?;

        Ok(())
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id).delete(&self.http).await?;
        Ok(())
    }

    async fn set_overwrite(
        &self,
        guild_id: u64,
        channel_id: u64,
        overwrite: Overwrite,
    ) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .create_permission(&self.http, to_serenity(guild_id, overwrite))
            .await?;
        Ok(())
    }

    async fn clear_overwrite(
        &self,
        guild_id: u64,
        channel_id: u64,
        target: OverwriteTarget,
    ) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .delete_permission(&self.http, overwrite_kind(guild_id, target))
            .await?;
        Ok(())
    }

    async fn move_member(
        &self,
        guild_id: u64,
        user_id: u64,
        channel_id: Option<u64>,
    ) -> Result<(), AppError> {
        let guild_id = GuildId::new(guild_id);
        let user_id = UserId::new(user_id);

        match channel_id {
            Some(channel_id) => {
                guild_id
                    .move_member(&self.http, user_id, ChannelId::new(channel_id))
                    .await?;
            }
            None => {
                guild_id.disconnect_member(&self.http, user_id).await?;
            }
        }

        Ok(())
    }

    async fn edit_voice_state(
        &self,
        guild_id: u64,
        user_id: u64,
        edit: VoiceStateEdit,
    ) -> Result<(), AppError> {
        let mut builder = EditMember::new();
        if let Some(mute) = edit.mute {
            builder = builder.mute(mute);
        }
        if let Some(deafen) = edit.deafen {
            builder = builder.deafen(deafen);
        }

        GuildId::new(guild_id)
            .edit_member(&self.http, UserId::new(user_id), builder)
            .await?;

        Ok(())
    }

    async fn send_panel(&self, channel_id: u64, panel: PanelView) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .send_message(&self.http, panel_message(&panel))
            .await?;
        Ok(())
    }
}
