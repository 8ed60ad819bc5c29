//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{RepositoryError, Result, SaveRepository, validate_slot};
use crate::save::SaveGame;

/// Keeps saves in a map; nothing survives the process.
#[derive(Default)]
pub struct InMemorySaveRepository {
    saves: RwLock<HashMap<String, SaveGame>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, save: &SaveGame) -> Result<()> {
        validate_slot(slot)?;
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(slot.to_owned(), save.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveGame>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut slots: Vec<String> = saves.keys().cloned().collect();
        slots.sort_unstable();
        Ok(slots)
    }
}
