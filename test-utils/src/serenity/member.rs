//! Test factory for creating Serenity Member objects.

use serde_json::{json, Value};
use serenity::all::Member;

/// Builds the raw gateway JSON of a guild member.
pub fn member_json(
    guild_id: u64,
    user_id: u64,
    username: &str,
    nick: Option<&str>,
    bot: bool,
) -> Value {
    json!({
        "user": {
            "id": user_id.to_string(),
            "username": username,
            "global_name": null,
            "avatar": null,
            "bot": bot,
        },
        "nick": nick,
        "avatar": null,
        "roles": [],
        "joined_at": "2024-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "permissions": null,
        "communication_disabled_until": null,
        "guild_id": guild_id.to_string(),
    })
}

/// Creates a test Serenity Member with customizable fields.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Account username
/// - `nick` - Optional guild nickname
/// - `bot` - Whether the account is a bot
///
/// # Returns
/// - `Member` - A valid Serenity Member struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(
    guild_id: u64,
    user_id: u64,
    username: &str,
    nick: Option<&str>,
    bot: bool,
) -> Member {
    serde_json::from_value(member_json(guild_id, user_id, username, nick, bot))
        .expect("Failed to create test member")
}
