use thiserror::Error;

/// Preconditions of the room lifecycle and control panel that were not met.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RoomError {
    /// No live room is attached to the channel the interaction came from.
    #[error("No room is registered for channel {channel_id}")]
    RoomNotFound { channel_id: u64 },

    /// Reconfiguration was requested on a template room.
    #[error("Room {room_key} is not a custom room")]
    NotCustomRoom { room_key: u64 },

    /// A category already has its custom base channel.
    #[error("Category {category_id} already has a custom base channel")]
    CustomBaseExists { category_id: u64 },

    /// The channel id does not match any configured base channel.
    #[error("Channel {channel_id} is not a registered base channel")]
    UnknownBaseChannel { channel_id: u64 },

    /// The platform refused to provide the channel the room needs.
    #[error("Voice channel for room {room_key} could not be created")]
    ChannelUnavailable { room_key: u64 },

    /// A guest action was requested without any target.
    #[error("No guests were selected")]
    NoGuestsSelected,
}

impl RoomError {
    /// Reply text shown to the member that triggered the failing action.
    pub fn reply(&self) -> &'static str {
        match self {
            Self::RoomNotFound { .. } => "Room not found, it may already be closed.",
            Self::NotCustomRoom { .. } => "Only custom rooms can be reconfigured.",
            Self::CustomBaseExists { .. } => "This category already has a custom base channel.",
            Self::UnknownBaseChannel { .. } => "That ID does not match any registered base channel.",
            Self::ChannelUnavailable { .. } => "The voice channel could not be created right now.",
            Self::NoGuestsSelected => "No guests selected.",
        }
    }
}
