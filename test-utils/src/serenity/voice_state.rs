//! Test factory for creating Serenity VoiceState objects.

use serde_json::{json, Value};
use serenity::all::{Member, VoiceState};

use super::member::member_json;

/// Creates a test Serenity VoiceState.
///
/// # Arguments
/// - `guild_id` - Guild of the voice state
/// - `user_id` - Member the state belongs to
/// - `channel_id` - Connected voice channel, `None` when disconnected
/// - `member` - Member payload attached by the gateway, if any
///
/// # Returns
/// - `VoiceState` - A valid Serenity VoiceState struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a VoiceState (indicates invalid test data)
pub fn create_test_voice_state(
    guild_id: u64,
    user_id: u64,
    channel_id: Option<u64>,
    member: Option<&Member>,
) -> VoiceState {
    let member: Value = match member {
        Some(member) => member_json(
            guild_id,
            member.user.id.get(),
            &member.user.name,
            member.nick.as_deref(),
            member.user.bot,
        ),
        None => Value::Null,
    };

    serde_json::from_value(json!({
        "guild_id": guild_id.to_string(),
        "channel_id": channel_id.map(|id| id.to_string()),
        "user_id": user_id.to_string(),
        "member": member,
        "session_id": "test-session",
        "deaf": false,
        "mute": false,
        "self_deaf": false,
        "self_mute": false,
        "self_stream": null,
        "self_video": false,
        "suppress": false,
        "request_to_speak_timestamp": null,
    }))
    .expect("Failed to create test voice state")
}
