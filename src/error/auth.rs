use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Acting member does not own the room whose panel they used.
    #[error("Member {actor_id} is not the owner of this room")]
    NotRoomOwner {
        /// The member that attempted the action
        actor_id: u64,
    },

    /// Acting member is neither a bot admin nor a bot owner.
    #[error("Member {actor_id} is not a bot admin")]
    NotBotAdmin {
        /// The member that attempted the action
        actor_id: u64,
    },
}

impl AuthError {
    /// Reply text shown to the rejected member.
    pub fn reply(&self) -> &'static str {
        match self {
            Self::NotRoomOwner { .. } => "Only the room owner can use this panel.",
            Self::NotBotAdmin { .. } => "You are not allowed to do that.",
        }
    }
}
