//! Voice state update handler feeding the room lifecycle.

use serenity::all::{Context, VoiceState};

use crate::{
    model::presence::{PresenceChange, VoiceMember},
    platform::{
        discord::{voice_member, DiscordPlatform},
        Platform,
    },
    service::lifecycle::RoomLifecycleService,
    state::BotState,
};

/// Builds the presence transition reported by a voice state update.
///
/// `old` is the cached previous state; it is `None` when the member was not in voice, or
/// when the cache had no record of them.
pub fn presence_change(
    old: Option<&VoiceState>,
    new: &VoiceState,
    member: VoiceMember,
) -> PresenceChange {
    PresenceChange {
        member,
        previous_channel: old.and_then(|state| state.channel_id).map(|id| id.get()),
        next_channel: new.channel_id.map(|id| id.get()),
    }
}

/// Handles the voice_state_update event.
pub async fn handle_voice_state_update(
    state: &BotState,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(guild_id) = new.guild_id else {
        return;
    };

    let previous_channel = old.as_ref().and_then(|state| state.channel_id);
    if previous_channel == new.channel_id {
        return;
    }

    let platform = DiscordPlatform::new(&ctx);

    let member = match new.member.as_ref() {
        Some(member) => Some(voice_member(member)),
        None => platform.member(guild_id.get(), new.user_id.get()).await,
    };
    let Some(member) = member else {
        tracing::debug!(
            "Ignoring voice update of unresolvable member {} in guild {}",
            new.user_id,
            guild_id
        );
        return;
    };

    let change = presence_change(old.as_ref(), &new, member);

    if let Err(e) = RoomLifecycleService::new(state, &platform)
        .handle_presence_change(change)
        .await
    {
        tracing::error!(
            "Failed to handle voice update of {} in guild {}: {}",
            new.user_id,
            guild_id,
            e
        );
    }
}
