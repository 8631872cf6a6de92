//! Room lifecycle: provisioning on entry, teardown on exit.
//!
//! Presence events for different members are handled concurrently and interleave at every
//! platform call. Provisioning needs no lock since each entry creates its own channels.
//! Teardown is serialized behind the teardown lock and re-checks both tracking and
//! occupancy once the lock is held, so two members leaving the same room at once delete
//! it exactly once.

use chrono::Utc;

use crate::{
    data::channel_config::ChannelConfigRepository,
    error::AppError,
    model::{
        channel::{ChannelKind, NewChannel, Overwrite},
        document::{BaseChannel, BaseChannelConfig},
        panel::PanelView,
        presence::{PresenceChange, VoiceMember},
        room::{
            panel_channel_name, render_name, Room, RoomKey, RoomKind, DEFAULT_NAME_TEMPLATE,
            MAX_SLOT_LIMIT,
        },
    },
    platform::Platform,
    state::BotState,
};

/// Text channel prefix of a locked template room's control panel.
const TEMPLATE_PANEL_PREFIX: &str = "panel";

/// Text channel prefix of a custom session's control panel.
const CUSTOM_PANEL_PREFIX: &str = "voice-config";

pub struct RoomLifecycleService<'a, P: Platform> {
    state: &'a BotState,
    platform: &'a P,
}

impl<'a, P: Platform> RoomLifecycleService<'a, P> {
    pub fn new(state: &'a BotState, platform: &'a P) -> Self {
        Self { state, platform }
    }

    fn channels(&self) -> ChannelConfigRepository<'a> {
        ChannelConfigRepository::new(&self.state.channels)
    }

    /// Reacts to a member moving between voice channels.
    ///
    /// Entering a base channel provisions a room; leaving a tracked temporary channel tears
    /// it down once empty. A failed provisioning never prevents the exit side from running,
    /// since a member moving from one room straight into a base channel produces both.
    ///
    /// # Arguments
    /// - `change` - The presence transition reported by the gateway
    ///
    /// # Returns
    /// - `Ok(())` - Event processed (including the no-op cases)
    /// - `Err(AppError)` - The config store could not be read or written during teardown
    pub async fn handle_presence_change(&self, change: PresenceChange) -> Result<(), AppError> {
        if change.member.bot || !change.is_move() {
            return Ok(());
        }

        if let Some(next) = change.next_channel {
            if let Err(e) = self.handle_entry(&change.member, next).await {
                tracing::error!(
                    "Failed to provision room for {} entering {}: {}",
                    change.member.user_id,
                    next,
                    e
                );
            }
        }

        if let Some(previous) = change.previous_channel {
            self.teardown_if_empty(previous, "temporary channel emptied")
                .await?;
        }

        Ok(())
    }

    async fn handle_entry(&self, member: &VoiceMember, channel_id: u64) -> Result<(), AppError> {
        match self.channels().find_base_channel(channel_id).await? {
            Some(BaseChannel::Template(config)) => {
                self.provision_template_room(member, channel_id, config)
                    .await?;
            }
            Some(BaseChannel::Custom { category_id }) => {
                self.start_custom_session(member, category_id).await?;
            }
            None => {}
        }

        Ok(())
    }

    /// Creates a temporary room from a base channel's template and moves the member into it.
    ///
    /// The room name comes from the template, falling back to the base channel's own name,
    /// with every `{user}` replaced by the member's display name. Locked rooms deny default
    /// access and get a companion panel channel.
    ///
    /// # Returns
    /// - `Ok(Some(voice_channel_id))` - Room provisioned
    /// - `Ok(None)` - The platform refused to create the voice channel; member stays put
    /// - `Err(AppError)` - The temporary set could not be persisted
    pub async fn provision_template_room(
        &self,
        member: &VoiceMember,
        base_channel_id: u64,
        config: BaseChannelConfig,
    ) -> Result<Option<RoomKey>, AppError> {
        let base = self.platform.channel(base_channel_id).await;

        let name_template = config
            .name_template
            .filter(|template| !template.trim().is_empty())
            .or_else(|| base.as_ref().map(|channel| channel.name.clone()))
            .unwrap_or_else(|| DEFAULT_NAME_TEMPLATE.to_string());
        let category_id = config
            .category
            .or_else(|| base.as_ref().and_then(|channel| channel.parent_id));
        let slot_limit = config.slots.min(MAX_SLOT_LIMIT);
        let bot_id = self.platform.bot_user_id();

        let overwrites = if config.locked {
            vec![
                Overwrite::voice_default(true),
                Overwrite::voice_guest(member.user_id),
                Overwrite::voice_bot(bot_id),
            ]
        } else {
            Vec::new()
        };

        let voice_channel_id = match self
            .platform
            .create_channel(
                member.guild_id,
                NewChannel {
                    name: render_name(&name_template, &member.display_name),
                    kind: ChannelKind::Voice,
                    parent_id: category_id,
                    user_limit: slot_limit,
                    overwrites,
                },
            )
            .await
        {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(
                    "Could not create temporary room for {} from base {}: {}",
                    member.user_id,
                    base_channel_id,
                    e
                );
                return Ok(None);
            }
        };

        let text_channel_id = if config.locked {
            self.create_panel_channel(member, category_id, TEMPLATE_PANEL_PREFIX)
                .await
        } else {
            None
        };

        self.channels()
            .register_temporary(voice_channel_id, text_channel_id)
            .await?;

        let room = Room::template(
            member.user_id,
            member.guild_id,
            category_id,
            voice_channel_id,
            text_channel_id,
            name_template,
            slot_limit,
            config.locked,
        );
        let view = PanelView::from_room(&room, &member.display_name);
        self.state.rooms.write().await.insert(room);

        tracing::info!(
            "Created temporary room {} for {} from base {}",
            voice_channel_id,
            member.user_id,
            base_channel_id
        );

        if let Some(text_channel_id) = text_channel_id {
            if let Err(e) = self.platform.send_panel(text_channel_id, view).await {
                tracing::warn!("Failed to post panel in {}: {}", text_channel_id, e);
            }
        }

        if let Err(e) = self
            .platform
            .move_member(member.guild_id, member.user_id, Some(voice_channel_id))
            .await
        {
            tracing::warn!(
                "Could not move {} into room {}: {}",
                member.user_id,
                voice_channel_id,
                e
            );
            self.teardown_if_empty(voice_channel_id, "owner could not be moved in")
                .await?;
        }

        Ok(Some(voice_channel_id))
    }

    /// Opens a custom session: a panel channel whose voice room is created on first
    /// configuration.
    ///
    /// An owner holds at most one custom session; an open one is closed first. The whole
    /// check, close, create and insert sequence runs under the session lock, so concurrent
    /// entries by the same owner open their sessions one after the other.
    ///
    /// # Returns
    /// - `Ok(Some(text_channel_id))` - Session opened, keyed by its panel channel
    /// - `Ok(None)` - The platform refused to create the panel channel
    pub async fn start_custom_session(
        &self,
        member: &VoiceMember,
        category_id: u64,
    ) -> Result<Option<RoomKey>, AppError> {
        let _guard = self.state.rooms.lock_sessions().await;

        let existing = self
            .state
            .rooms
            .read()
            .await
            .find_by_owner(member.user_id, RoomKind::Custom)
            .map(Room::key);
        if let Some(key) = existing {
            self.close_room(key, "superseded by new session").await?;
        }

        let Some(text_channel_id) = self
            .create_panel_channel(member, Some(category_id), CUSTOM_PANEL_PREFIX)
            .await
        else {
            return Ok(None);
        };

        let room = Room::custom(
            member.user_id,
            member.guild_id,
            category_id,
            text_channel_id,
        );
        let view = PanelView::from_room(&room, &member.display_name);
        self.state.rooms.write().await.insert(room);

        tracing::info!(
            "Opened custom session {} for {} in category {}",
            text_channel_id,
            member.user_id,
            category_id
        );

        if let Err(e) = self.platform.send_panel(text_channel_id, view).await {
            tracing::warn!("Failed to post panel in {}: {}", text_channel_id, e);
        }

        Ok(Some(text_channel_id))
    }

    /// Creates a read-only control panel channel visible to the owner and the bot only.
    async fn create_panel_channel(
        &self,
        member: &VoiceMember,
        category_id: Option<u64>,
        prefix: &str,
    ) -> Option<u64> {
        let bot_id = self.platform.bot_user_id();
        let channel = NewChannel {
            name: panel_channel_name(prefix, &member.username),
            kind: ChannelKind::Text,
            parent_id: category_id,
            user_limit: 0,
            overwrites: vec![
                Overwrite::panel_hidden(),
                Overwrite::panel_reader(member.user_id),
                Overwrite::panel_bot(bot_id),
            ],
        };

        match self.platform.create_channel(member.guild_id, channel).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(
                    "Could not create panel channel for {}: {}",
                    member.user_id,
                    e
                );
                None
            }
        }
    }

    /// Tears a temporary room down if nobody is connected to it anymore.
    ///
    /// Untracked channels are ignored. Emptiness is checked once without the lock to keep
    /// the common case cheap, then again under the teardown lock together with tracking;
    /// a member who joined in between, or a concurrent teardown that already ran, aborts
    /// this one with no state change.
    ///
    /// # Returns
    /// - `Ok(true)` - This call removed the room
    /// - `Ok(false)` - Channel untracked, occupied, or already torn down
    pub async fn teardown_if_empty(&self, channel_id: u64, reason: &str) -> Result<bool, AppError> {
        if !self.is_tracked(channel_id).await? || self.occupants(channel_id).await > 0 {
            return Ok(false);
        }

        let _guard = self.state.rooms.lock_teardown().await;

        if !self.is_tracked(channel_id).await? || self.occupants(channel_id).await > 0 {
            tracing::debug!("Teardown of {} aborted after re-check", channel_id);
            return Ok(false);
        }

        self.destroy(channel_id, reason).await
    }

    /// Closes a room regardless of occupancy, as requested by its owner.
    ///
    /// # Returns
    /// - `Ok(true)` - Room removed
    /// - `Ok(false)` - Nothing was tracked under `key`
    ///
    /// `key` may be a custom session's provisional key even if its voice channel was created
    /// since; it is resolved under the lock.
    pub async fn close_room(&self, key: RoomKey, reason: &str) -> Result<bool, AppError> {
        let _guard = self.state.rooms.lock_teardown().await;
        let key = self.state.rooms.read().await.resolve(key).unwrap_or(key);
        self.destroy(key, reason).await
    }

    async fn is_tracked(&self, channel_id: u64) -> Result<bool, AppError> {
        if self.state.rooms.read().await.contains(channel_id) {
            return Ok(true);
        }
        self.channels().is_temporary(channel_id).await
    }

    /// Connected members; a channel that no longer exists counts as empty.
    async fn occupants(&self, channel_id: u64) -> usize {
        self.platform
            .channel(channel_id)
            .await
            .map(|channel| channel.occupants)
            .unwrap_or(0)
    }

    /// Deletes a room's channels and forgets it. Callers hold the teardown lock.
    ///
    /// Delete failures are logged and ignored: the channel may already be gone, and the
    /// registry and temporary set entries are removed regardless.
    async fn destroy(&self, key: RoomKey, reason: &str) -> Result<bool, AppError> {
        let repo = self.channels();
        let room = self.state.rooms.write().await.remove(key);

        let (voice_channel_id, text_channel_id) = match &room {
            Some(room) => (room.voice_channel_id, room.text_channel_id),
            None => {
                if !repo.is_temporary(key).await? {
                    return Ok(false);
                }
                (Some(key), repo.temporary_panel(key).await?)
            }
        };

        for channel_id in voice_channel_id.into_iter().chain(text_channel_id) {
            if let Err(e) = self.platform.delete_channel(channel_id).await {
                tracing::warn!("Failed to delete channel {}: {}", channel_id, e);
            }
        }

        if let Some(voice_channel_id) = voice_channel_id {
            repo.release_temporary(voice_channel_id).await?;
        }

        match room {
            Some(room) => tracing::info!(
                "Tore down room {} ({}) after {}s",
                key,
                reason,
                (Utc::now() - room.created_at).num_seconds()
            ),
            None => tracing::info!("Tore down leftover room {} ({})", key, reason),
        }

        Ok(true)
    }
}
