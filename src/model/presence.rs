//! Voice presence transitions delivered by the gateway.

/// Guild member as seen by the room lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMember {
    pub user_id: u64,
    pub guild_id: u64,
    /// Nickname, global name or username, in that order.
    pub display_name: String,
    pub username: String,
    pub bot: bool,
}

/// A member moving between voice channels (or joining/leaving voice entirely).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceChange {
    pub member: VoiceMember,
    pub previous_channel: Option<u64>,
    pub next_channel: Option<u64>,
}

impl PresenceChange {
    /// Whether the member actually changed channel.
    ///
    /// Mute, deafen and stream toggles are reported as presence updates with the
    /// same channel on both sides; those never provision or tear down rooms.
    pub fn is_move(&self) -> bool {
        self.previous_channel != self.next_channel
    }
}
