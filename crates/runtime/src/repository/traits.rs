//! Repository contract for persisting save games.

use super::Result;
use crate::save::SaveGame;

/// Storage for named save slots.
///
/// Implementations must be shareable across the runtime worker and callers,
/// so every method takes `&self`.
pub trait SaveRepository: Send + Sync {
    /// Writes `save` to `slot`, replacing any previous save there.
    fn save(&self, slot: &str, save: &SaveGame) -> Result<()>;

    /// Reads the save in `slot`, `None` when the slot is empty.
    fn load(&self, slot: &str) -> Result<Option<SaveGame>>;

    fn exists(&self, slot: &str) -> bool;

    /// Removes a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// All occupied slots in name order.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
