//! Bot state shared across all event handlers.
//!
//! `BotState` is built once at startup and handed to the serenity handler inside an `Arc`.
//! It owns the two config stores and the live room state; services borrow it per event.

use std::{path::PathBuf, time::Duration};

use crate::{
    config::{Config, OrphanPolicy},
    data::store::JsonStore,
    model::{admin::AdminDocument, document::ChannelsDocument},
    service::registry::RoomState,
};

pub struct BotState {
    /// Channel configuration document (base channels, temporary set, text assignments).
    pub channels: JsonStore<ChannelsDocument>,
    /// Admin allow-list document.
    pub admins: JsonStore<AdminDocument>,
    /// Live rooms and the teardown lock.
    pub rooms: RoomState,
    pub orphan_policy: OrphanPolicy,
    /// Delay between two status activity changes.
    pub status_interval: Duration,
}

impl BotState {
    pub fn new(
        channels_path: impl Into<PathBuf>,
        admins_path: impl Into<PathBuf>,
        orphan_policy: OrphanPolicy,
        status_interval: Duration,
    ) -> Self {
        Self {
            channels: JsonStore::new(channels_path),
            admins: JsonStore::new(admins_path),
            rooms: RoomState::new(),
            orphan_policy,
            status_interval,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.channels_config_path.clone(),
            config.admin_config_path.clone(),
            config.orphan_policy,
            config.status_interval,
        )
    }
}
