//! Temporary room domain model.
//!
//! A `Room` is the in-memory record of one temporary voice room: who owns it, which
//! channels back it and who was invited. Rooms live only for the lifetime of the process;
//! the channel document's temporary list is the durable mirror.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

/// Registry key of a room.
///
/// The voice channel id once the room has one. Custom sessions are keyed provisionally by
/// their companion text channel id until their voice channel is materialized.
pub type RoomKey = u64;

/// Placeholder replaced by the owner's display name in name templates.
pub const USER_PLACEHOLDER: &str = "{user}";

/// Name template used when neither the base config nor the owner provided one.
pub const DEFAULT_NAME_TEMPLATE: &str = "{user}'s room";

/// Discord's maximum voice channel user limit.
pub const MAX_SLOT_LIMIT: u32 = 99;

/// How a room was provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    /// Created from a base channel's fixed template on join.
    Template,
    /// Configured interactively by its owner; voice channel created lazily.
    Custom,
}

/// Live temporary room.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Member who triggered provisioning.
    pub owner_id: u64,
    /// Guild containing the room.
    pub guild_id: u64,
    /// Category the room's channels are created in.
    pub category_id: Option<u64>,
    pub kind: RoomKind,
    /// Provisioned voice channel; `None` for custom sessions not configured yet.
    pub voice_channel_id: Option<u64>,
    /// Companion control panel channel; `None` for unlocked template rooms.
    pub text_channel_id: Option<u64>,
    /// Members granted explicit access through the panel.
    pub invited_guests: BTreeSet<u64>,
    /// Whether default access to the voice channel is denied.
    pub locked: bool,
    pub name_template: String,
    /// Maximum occupancy, 0 meaning unlimited.
    pub slot_limit: u32,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Creates the record for a room provisioned from a base channel template.
    #[allow(clippy::too_many_arguments)]
    pub fn template(
        owner_id: u64,
        guild_id: u64,
        category_id: Option<u64>,
        voice_channel_id: u64,
        text_channel_id: Option<u64>,
        name_template: String,
        slot_limit: u32,
        locked: bool,
    ) -> Self {
        Self {
            owner_id,
            guild_id,
            category_id,
            kind: RoomKind::Template,
            voice_channel_id: Some(voice_channel_id),
            text_channel_id,
            invited_guests: BTreeSet::new(),
            locked,
            name_template,
            slot_limit,
            created_at: Utc::now(),
        }
    }

    /// Creates the record for a custom session whose voice channel does not exist yet.
    pub fn custom(owner_id: u64, guild_id: u64, category_id: u64, text_channel_id: u64) -> Self {
        Self {
            owner_id,
            guild_id,
            category_id: Some(category_id),
            kind: RoomKind::Custom,
            voice_channel_id: None,
            text_channel_id: Some(text_channel_id),
            invited_guests: BTreeSet::new(),
            locked: false,
            name_template: DEFAULT_NAME_TEMPLATE.to_string(),
            slot_limit: 0,
            created_at: Utc::now(),
        }
    }

    /// Registry key: the voice channel id, or the text channel id while provisional.
    pub fn key(&self) -> RoomKey {
        self.voice_channel_id
            .or(self.text_channel_id)
            .unwrap_or_default()
    }

    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_id == user_id
    }

    /// Resolves the room's display name for the given owner display name.
    pub fn display_name(&self, owner_display_name: &str) -> String {
        render_name(&self.name_template, owner_display_name)
    }
}

/// Substitutes every `{user}` placeholder in `template` with `display_name`.
pub fn render_name(template: &str, display_name: &str) -> String {
    template.replace(USER_PLACEHOLDER, display_name)
}

/// Builds a Discord-safe text channel name such as `panel-some-user`.
pub fn panel_channel_name(prefix: &str, username: &str) -> String {
    format!("{}-{}", prefix, username)
        .replace(' ', "-")
        .to_lowercase()
}
