//! Owner-scoped control panel actions.
//!
//! Every action resolves the room from the panel channel the interaction came from and
//! rejects anyone but the owner before touching the platform. The room is copied out of the
//! registry first; updates are written back afterwards under the room's current key, and are
//! dropped if the room was closed in the meantime.

use crate::{
    data::channel_config::ChannelConfigRepository,
    error::{auth::AuthError, room::RoomError, AppError},
    model::{
        channel::{
            ChannelKind, NewChannel, Overwrite, OverwriteTarget, VoiceChannelEdit,
            VoiceStateEdit,
        },
        panel::{GuestAction, PanelAction, PanelOutcome, RoomSettings},
        room::{Room, RoomKind},
    },
    platform::Platform,
    service::lifecycle::RoomLifecycleService,
    state::BotState,
};

pub struct ControlPanelService<'a, P: Platform> {
    state: &'a BotState,
    platform: &'a P,
}

impl<'a, P: Platform> ControlPanelService<'a, P> {
    pub fn new(state: &'a BotState, platform: &'a P) -> Self {
        Self { state, platform }
    }

    /// Resolves the room behind a panel channel and checks the actor owns it.
    ///
    /// # Returns
    /// - `Ok(Room)` - Snapshot of the actor's room
    /// - `Err(RoomError::RoomNotFound)` - No live room uses this panel channel
    /// - `Err(AuthError::NotRoomOwner)` - Actor is not the room owner
    pub async fn owned_room(&self, actor_id: u64, text_channel_id: u64) -> Result<Room, AppError> {
        let room = self
            .state
            .rooms
            .read()
            .await
            .find_by_text_channel(text_channel_id)
            .cloned()
            .ok_or(RoomError::RoomNotFound {
                channel_id: text_channel_id,
            })?;

        if !room.is_owner(actor_id) {
            return Err(AuthError::NotRoomOwner { actor_id }.into());
        }

        Ok(room)
    }

    /// Runs a panel action on behalf of `actor_id`.
    ///
    /// # Arguments
    /// - `actor_id` - Member who pressed the button or submitted the form
    /// - `text_channel_id` - Panel channel the interaction came from
    /// - `action` - Decoded action
    pub async fn dispatch(
        &self,
        actor_id: u64,
        text_channel_id: u64,
        action: PanelAction,
    ) -> Result<PanelOutcome, AppError> {
        let room = self.owned_room(actor_id, text_channel_id).await?;

        match action {
            PanelAction::Invite(guests) => self.invite(&room, guests).await,
            PanelAction::ToggleLock => self.toggle_lock(&room).await,
            PanelAction::Reconfigure(settings) => self.reconfigure(room, settings).await,
            PanelAction::GuestAction { action, targets } => {
                self.guest_action(&room, action, targets).await
            }
            PanelAction::Close => {
                RoomLifecycleService::new(self.state, self.platform)
                    .close_room(room.key(), "closed by owner")
                    .await?;
                Ok(PanelOutcome::Closed)
            }
        }
    }

    /// Grants each guest access to the voice room and read access to the panel.
    async fn invite(&self, room: &Room, guests: Vec<u64>) -> Result<PanelOutcome, AppError> {
        let mut invited = Vec::new();

        for guest in guests {
            if room.is_owner(guest) || invited.contains(&guest) {
                continue;
            }

            if let Some(voice_channel_id) = room.voice_channel_id {
                if let Err(e) = self
                    .platform
                    .set_overwrite(
                        room.guild_id,
                        voice_channel_id,
                        Overwrite::voice_guest(guest),
                    )
                    .await
                {
                    tracing::warn!(
                        "Failed to grant {} access to {}: {}",
                        guest,
                        voice_channel_id,
                        e
                    );
                    continue;
                }
            }

            if let Some(text_channel_id) = room.text_channel_id {
                if let Err(e) = self
                    .platform
                    .set_overwrite(
                        room.guild_id,
                        text_channel_id,
                        Overwrite::panel_reader(guest),
                    )
                    .await
                {
                    tracing::warn!(
                        "Failed to grant {} access to {}: {}",
                        guest,
                        text_channel_id,
                        e
                    );
                }
            }

            invited.push(guest);
        }

        if let Some(live) = self.state.rooms.write().await.resolve_mut(room.key()) {
            live.invited_guests.extend(invited.iter().copied());
        }

        Ok(PanelOutcome::Invited { guests: invited })
    }

    /// Flips the default access of the voice room.
    ///
    /// A custom session without a voice channel only records the new state; it is applied
    /// when the channel is created.
    async fn toggle_lock(&self, room: &Room) -> Result<PanelOutcome, AppError> {
        let locked = !room.locked;

        if let Some(voice_channel_id) = room.voice_channel_id {
            if let Err(e) = self
                .platform
                .set_overwrite(
                    room.guild_id,
                    voice_channel_id,
                    Overwrite::voice_default(locked),
                )
                .await
            {
                tracing::warn!("Failed to update lock of {}: {}", voice_channel_id, e);
            }
        }

        if let Some(live) = self.state.rooms.write().await.resolve_mut(room.key()) {
            live.locked = locked;
        }

        Ok(PanelOutcome::LockToggled { locked })
    }

    /// Applies new settings to a custom room, creating its voice channel on first use.
    ///
    /// Runs under the teardown lock and works on the room as re-read under it, so a
    /// concurrent close or a second submission either finishes before this one starts or
    /// sees its result: a closed room is reported gone and an already materialized room is
    /// edited in place.
    async fn reconfigure(
        &self,
        room: Room,
        settings: RoomSettings,
    ) -> Result<PanelOutcome, AppError> {
        if room.kind != RoomKind::Custom {
            return Err(RoomError::NotCustomRoom {
                room_key: room.key(),
            }
            .into());
        }

        let _guard = self.state.rooms.lock_teardown().await;

        let current = {
            let registry = self.state.rooms.read().await;
            registry
                .resolve(room.key())
                .and_then(|key| registry.get(key))
                .cloned()
        };
        let mut room = current.ok_or(RoomError::RoomNotFound {
            channel_id: room.key(),
        })?;
        let key = room.key();

        if let Some(name_template) = settings.name_template {
            room.name_template = name_template;
        }
        if let Some(slot_limit) = settings.slot_limit {
            room.slot_limit = slot_limit;
        }
        if let Some(locked) = settings.locked {
            room.locked = locked;
        }

        let display_name = self
            .platform
            .member(room.guild_id, room.owner_id)
            .await
            .map(|member| member.display_name)
            .unwrap_or_else(|| room.owner_id.to_string());
        let name = room.display_name(&display_name);
        let overwrites = self.voice_overwrites(&room);

        let existing = match room.voice_channel_id {
            Some(voice_channel_id) => self
                .platform
                .channel(voice_channel_id)
                .await
                .map(|channel| channel.channel_id),
            None => None,
        };

        if let Some(voice_channel_id) = existing {
            if let Err(e) = self
                .platform
                .edit_voice_channel(
                    room.guild_id,
                    voice_channel_id,
                    VoiceChannelEdit {
                        name,
                        user_limit: room.slot_limit,
                        overwrites,
                    },
                )
                .await
            {
                tracing::warn!("Failed to edit custom room {}: {}", voice_channel_id, e);
            }

            self.store_settings(key, &room).await;

            return Ok(PanelOutcome::Reconfigured { created: false });
        }

        let voice_channel_id = self
            .platform
            .create_channel(
                room.guild_id,
                NewChannel {
                    name,
                    kind: ChannelKind::Voice,
                    parent_id: room.category_id,
                    user_limit: room.slot_limit,
                    overwrites,
                },
            )
            .await
            .map_err(|e| {
                tracing::warn!("Failed to create voice channel for room {}: {}", key, e);
                RoomError::ChannelUnavailable { room_key: key }
            })?;

        let repo = ChannelConfigRepository::new(&self.state.channels);
        if let Some(stale) = room.voice_channel_id {
            repo.release_temporary(stale).await?;
        }
        repo.register_temporary(voice_channel_id, room.text_channel_id)
            .await?;

        let materialized = {
            let mut registry = self.state.rooms.write().await;
            match registry.materialize(key, voice_channel_id) {
                Some(live) => {
                    live.name_template = room.name_template.clone();
                    live.slot_limit = room.slot_limit;
                    live.locked = room.locked;
                    true
                }
                None => false,
            }
        };

        if !materialized {
            tracing::warn!(
                "Room {} vanished while its voice channel {} was created",
                key,
                voice_channel_id
            );
            if let Err(e) = self.platform.delete_channel(voice_channel_id).await {
                tracing::warn!("Failed to delete channel {}: {}", voice_channel_id, e);
            }
            repo.release_temporary(voice_channel_id).await?;
            return Err(RoomError::RoomNotFound { channel_id: key }.into());
        }

        tracing::info!(
            "Created custom room {} for {}",
            voice_channel_id,
            room.owner_id
        );

        if let Err(e) = self
            .platform
            .move_member(room.guild_id, room.owner_id, Some(voice_channel_id))
            .await
        {
            tracing::warn!(
                "Could not move {} into custom room {}: {}",
                room.owner_id,
                voice_channel_id,
                e
            );
        }

        Ok(PanelOutcome::Reconfigured { created: true })
    }

    /// Overwrites of a custom room's voice channel. Locked rooms also deny default access.
    fn voice_overwrites(&self, room: &Room) -> Vec<Overwrite> {
        let mut overwrites = vec![
            Overwrite::voice_guest(room.owner_id),
            Overwrite::voice_bot(self.platform.bot_user_id()),
        ];
        overwrites.extend(
            room.invited_guests
                .iter()
                .map(|guest| Overwrite::voice_guest(*guest)),
        );
        if room.locked {
            overwrites.push(Overwrite::voice_default(true));
        }
        overwrites
    }

    async fn store_settings(&self, key: u64, room: &Room) {
        if let Some(live) = self.state.rooms.write().await.get_mut(key) {
            live.name_template = room.name_template.clone();
            live.slot_limit = room.slot_limit;
            live.locked = room.locked;
        }
    }

    /// Applies a voice moderation action to invited guests.
    ///
    /// Targets that are not invited, or no longer guild members, are skipped. Only members
    /// the platform accepted the change for are reported.
    async fn guest_action(
        &self,
        room: &Room,
        action: GuestAction,
        targets: Vec<u64>,
    ) -> Result<PanelOutcome, AppError> {
        if targets.is_empty() {
            return Err(RoomError::NoGuestsSelected.into());
        }

        let mut affected = Vec::new();

        for target in targets {
            if !room.invited_guests.contains(&target) || affected.contains(&target) {
                continue;
            }
            if self.platform.member(room.guild_id, target).await.is_none() {
                tracing::debug!("Skipping guest {} who left guild {}", target, room.guild_id);
                continue;
            }

            let result = match action {
                GuestAction::Mute => self.edit_voice_state(room, target, Some(true), None).await,
                GuestAction::Unmute => self.edit_voice_state(room, target, Some(false), None).await,
                GuestAction::Deafen => self.edit_voice_state(room, target, None, Some(true)).await,
                GuestAction::Undeafen => {
                    self.edit_voice_state(room, target, None, Some(false)).await
                }
                GuestAction::Kick => {
                    self.kick(room, target).await;
                    Ok(())
                }
            };

            match result {
                Ok(()) => affected.push(target),
                Err(e) => tracing::warn!("Failed to {} guest {}: {}", action, target, e),
            }
        }

        if action == GuestAction::Kick && !affected.is_empty() {
            if let Some(live) = self.state.rooms.write().await.resolve_mut(room.key()) {
                for guest in &affected {
                    live.invited_guests.remove(guest);
                }
            }
        }

        Ok(PanelOutcome::GuestsAffected {
            action,
            members: affected,
        })
    }

    async fn edit_voice_state(
        &self,
        room: &Room,
        target: u64,
        mute: Option<bool>,
        deafen: Option<bool>,
    ) -> Result<(), AppError> {
        self.platform
            .edit_voice_state(room.guild_id, target, VoiceStateEdit { mute, deafen })
            .await
    }

    /// Disconnects a guest and strips their explicit access to both channels.
    async fn kick(&self, room: &Room, target: u64) {
        if let Err(e) = self.platform.move_member(room.guild_id, target, None).await {
            tracing::debug!("Guest {} was not disconnected: {}", target, e);
        }

        for channel_id in room.voice_channel_id.into_iter().chain(room.text_channel_id) {
            if let Err(e) = self
                .platform
                .clear_overwrite(room.guild_id, channel_id, OverwriteTarget::Member(target))
                .await
            {
                tracing::warn!(
                    "Failed to clear access of {} on {}: {}",
                    target,
                    channel_id,
                    e
                );
            }
        }
    }
}

