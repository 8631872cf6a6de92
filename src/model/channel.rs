//! Channel and permission value types exchanged with the platform.

use serenity::all::Permissions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Voice,
    Text,
    Category,
}

/// Point-in-time view of a guild channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub channel_id: u64,
    pub guild_id: u64,
    pub name: String,
    pub kind: ChannelKind,
    /// Parent category.
    pub parent_id: Option<u64>,
    /// Members currently connected, for voice channels.
    pub occupants: usize,
}

/// Who a permission overwrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverwriteTarget {
    /// The guild's @everyone role.
    Everyone,
    Member(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overwrite {
    pub target: OverwriteTarget,
    pub allow: Permissions,
    pub deny: Permissions,
}

impl Overwrite {
    pub fn allow(target: OverwriteTarget, allow: Permissions) -> Self {
        Self {
            target,
            allow,
            deny: Permissions::empty(),
        }
    }

    pub fn deny(target: OverwriteTarget, deny: Permissions) -> Self {
        Self {
            target,
            allow: Permissions::empty(),
            deny,
        }
    }

    /// Access granted to the owner and invited guests of a voice room.
    pub fn voice_guest(user_id: u64) -> Self {
        Self::allow(
            OverwriteTarget::Member(user_id),
            Permissions::VIEW_CHANNEL | Permissions::CONNECT | Permissions::SPEAK,
        )
    }

    /// Access of the bot itself to a voice room.
    pub fn voice_bot(bot_id: u64) -> Self {
        Self::allow(
            OverwriteTarget::Member(bot_id),
            Permissions::VIEW_CHANNEL
                | Permissions::CONNECT
                | Permissions::SPEAK
                | Permissions::MOVE_MEMBERS,
        )
    }

    /// Default access of a voice room: denied when locked, allowed otherwise.
    pub fn voice_default(locked: bool) -> Self {
        let access = Permissions::VIEW_CHANNEL | Permissions::CONNECT;
        if locked {
            Self::deny(OverwriteTarget::Everyone, access)
        } else {
            Self::allow(OverwriteTarget::Everyone, access)
        }
    }

    /// Read-only access to a panel channel: can read, cannot send.
    pub fn panel_reader(user_id: u64) -> Self {
        Self {
            target: OverwriteTarget::Member(user_id),
            allow: Permissions::VIEW_CHANNEL | Permissions::READ_MESSAGE_HISTORY,
            deny: Permissions::SEND_MESSAGES,
        }
    }

    /// Full access of the bot to a panel channel.
    pub fn panel_bot(bot_id: u64) -> Self {
        Self::allow(
            OverwriteTarget::Member(bot_id),
            Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::READ_MESSAGE_HISTORY,
        )
    }

    /// Hides a panel channel from everyone not explicitly granted.
    pub fn panel_hidden() -> Self {
        Self::deny(OverwriteTarget::Everyone, Permissions::VIEW_CHANNEL)
    }
}

/// Parameters of a channel to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChannel {
    pub name: String,
    pub kind: ChannelKind,
    pub parent_id: Option<u64>,
    /// Voice user limit, 0 meaning unlimited.
    pub user_limit: u32,
    pub overwrites: Vec<Overwrite>,
}

/// In-place edit of an existing voice channel. Overwrites replace the current set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceChannelEdit {
    pub name: String,
    pub user_limit: u32,
    pub overwrites: Vec<Overwrite>,
}

/// Server-side voice state change applied to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoiceStateEdit {
    pub mute: Option<bool>,
    pub deafen: Option<bool>,
}
