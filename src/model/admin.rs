//! Admin allow-list document.

use serde::{Deserialize, Serialize};

/// Bot owner entry, stored either as a single id or a list of ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BotOwner {
    One(u64),
    Many(Vec<u64>),
}

impl Default for BotOwner {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl BotOwner {
    pub fn contains(&self, user_id: u64) -> bool {
        match self {
            Self::One(owner) => *owner == user_id,
            Self::Many(owners) => owners.contains(&user_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Many(owners) if owners.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AdminDocument {
    #[serde(default)]
    pub bot_owner: BotOwner,
    #[serde(default)]
    pub admins: Vec<u64>,
}

impl AdminDocument {
    /// Whether `user_id` is a bot owner or listed admin.
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.bot_owner.contains(user_id) || self.admins.contains(&user_id)
    }
}
