//! Room persistence for PDFRooms.

use std::sync::Arc;

use crate::storage::{self, Storage};
use crate::Result;

use super::types::Room;

/// Storage key for the room collection.
const ROOMS_KEY: &str = "rooms";

/// Repository for room operations.
#[derive(Clone)]
pub struct RoomRepository {
    storage: Arc<dyn Storage>,
}

impl RoomRepository {
    /// Create a new RoomRepository over the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// List all rooms.
    pub fn list(&self) -> Result<Vec<Room>> {
        storage::read_collection(self.storage.as_ref(), ROOMS_KEY)
    }

    /// Get a room by ID.
    pub fn get(&self, room_id: &str) -> Result<Option<Room>> {
        let rooms = self.list()?;
        Ok(rooms.into_iter().find(|r| r.id == room_id))
    }

    /// Find a room by its passkey (exact match on the stored value).
    pub fn find_by_passkey(&self, passkey: &str) -> Result<Option<Room>> {
        let rooms = self.list()?;
        Ok(rooms.into_iter().find(|r| r.passkey == passkey))
    }

    /// Persist a room, replacing any existing entry with the same ID.
    pub fn save(&self, room: &Room) -> Result<()> {
        let mut rooms = self.list()?;
        match rooms.iter_mut().find(|r| r.id == room.id) {
            Some(existing) => *existing = room.clone(),
            None => rooms.push(room.clone()),
        }
        storage::write_collection(self.storage.as_ref(), ROOMS_KEY, &rooms)
    }

    /// Delete a room by ID.
    ///
    /// Returns true if a room was removed.
    pub fn delete(&self, room_id: &str) -> Result<bool> {
        let rooms = self.list()?;
        let before = rooms.len();
        let remaining: Vec<Room> = rooms.into_iter().filter(|r| r.id != room_id).collect();
        let removed = remaining.len() != before;
        if removed {
            storage::write_collection(self.storage.as_ref(), ROOMS_KEY, &remaining)?;
        }
        Ok(removed)
    }
}
