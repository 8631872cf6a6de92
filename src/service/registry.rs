//! In-memory registry of live rooms.
//!
//! Rebuilt empty on every start. The registry is never held across a platform call: callers
//! take a short read or write guard, copy what they need and release it before awaiting.

use std::collections::HashMap;

use tokio::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::room::{Room, RoomKey, RoomKind};

#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomKey, Room>,
}

impl RoomRegistry {
    /// Inserts a room under its current key, returning the record it replaced.
    pub fn insert(&mut self, room: Room) -> Option<Room> {
        self.rooms.insert(room.key(), room)
    }

    pub fn get(&self, key: RoomKey) -> Option<&Room> {
        self.rooms.get(&key)
    }

    pub fn get_mut(&mut self, key: RoomKey) -> Option<&mut Room> {
        self.rooms.get_mut(&key)
    }

    pub fn remove(&mut self, key: RoomKey) -> Option<Room> {
        self.rooms.remove(&key)
    }

    pub fn contains(&self, key: RoomKey) -> bool {
        self.rooms.contains_key(&key)
    }

    /// Finds the room of the given kind owned by `owner_id`.
    pub fn find_by_owner(&self, owner_id: u64, kind: RoomKind) -> Option<&Room> {
        self.rooms
            .values()
            .find(|room| room.kind == kind && room.is_owner(owner_id))
    }

    /// Finds the room whose control panel lives in `text_channel_id`.
    pub fn find_by_text_channel(&self, text_channel_id: u64) -> Option<&Room> {
        self.rooms
            .values()
            .find(|room| room.text_channel_id == Some(text_channel_id))
    }

    /// Current key of the room stored under `key`, following a provisional key to the voice
    /// channel the room was materialized under.
    pub fn resolve(&self, key: RoomKey) -> Option<RoomKey> {
        if self.rooms.contains_key(&key) {
            return Some(key);
        }
        self.find_by_text_channel(key).map(Room::key)
    }

    pub fn resolve_mut(&mut self, key: RoomKey) -> Option<&mut Room> {
        let key = self.resolve(key)?;
        self.rooms.get_mut(&key)
    }

    /// Re-keys a provisional room under its newly created voice channel.
    ///
    /// # Returns
    /// - `Some(&mut Room)` - Room now stored under `voice_channel_id`
    /// - `None` - No room was stored under `provisional_key`
    pub fn materialize(
        &mut self,
        provisional_key: RoomKey,
        voice_channel_id: u64,
    ) -> Option<&mut Room> {
        let mut room = self.rooms.remove(&provisional_key)?;
        room.voice_channel_id = Some(voice_channel_id);
        self.rooms.insert(voice_channel_id, room);
        self.rooms.get_mut(&voice_channel_id)
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn keys(&self) -> Vec<RoomKey> {
        self.rooms.keys().copied().collect()
    }
}

/// Room registry plus the locks serializing structural changes to it.
///
/// A single process-wide teardown lock is shared by all guilds. Teardowns are rare and
/// short, so unrelated guilds waiting on each other is acceptable at this scale.
///
/// Lock order: `sessions` before `teardown`.
#[derive(Debug, Default)]
pub struct RoomState {
    registry: RwLock<RoomRegistry>,
    /// Held by every teardown and while a custom room's settings are applied.
    teardown: Mutex<()>,
    /// Held while a custom session is superseded and opened.
    sessions: Mutex<()>,
}

impl RoomState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, RoomRegistry> {
        self.registry.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, RoomRegistry> {
        self.registry.write().await
    }

    /// Waits for exclusive access to the teardown section.
    pub async fn lock_teardown(&self) -> MutexGuard<'_, ()> {
        self.teardown.lock().await
    }

    /// Waits for exclusive access to opening custom sessions.
    pub async fn lock_sessions(&self) -> MutexGuard<'_, ()> {
        self.sessions.lock().await
    }
}
