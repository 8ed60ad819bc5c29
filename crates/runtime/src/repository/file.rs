//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::{RepositoryError, Result, SaveRepository, validate_slot};
use crate::save::SaveGame;

/// On-disk encoding of a save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveFormat {
    /// Human-readable, `{slot}.json`.
    #[default]
    Json,
    /// Compact, `{slot}.sav`.
    Bincode,
}

impl SaveFormat {
    fn extension(self) -> &'static str {
        match self {
            SaveFormat::Json => "json",
            SaveFormat::Bincode => "sav",
        }
    }

    fn encode(self, save: &SaveGame) -> Result<Vec<u8>> {
        match self {
            SaveFormat::Json => {
                serde_json::to_vec_pretty(save).map_err(|e| RepositoryError::Json(e.to_string()))
            }
            SaveFormat::Bincode => bincode::serialize(save)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<SaveGame> {
        match self {
            SaveFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| RepositoryError::CorruptedData(e.to_string())),
            SaveFormat::Bincode => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::CorruptedData(e.to_string())),
        }
    }
}

/// Stores each slot as one file under `base_dir`.
///
/// Writes go to a temporary file first and are renamed into place, so a crash
/// mid-save never leaves a truncated slot behind.
pub struct FileSaveRepository {
    base_dir: PathBuf,
    format: SaveFormat,
}

impl FileSaveRepository {
    pub fn new(base_dir: impl AsRef<Path>, format: SaveFormat) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir, format })
    }

    /// Platform data directory for save games, if the platform has one.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("org", "geoscape", "campaign").map(|dirs| dirs.data_dir().join("saves"))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir
            .join(format!("{slot}.{}", self.format.extension()))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, save: &SaveGame) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("tmp");

        let bytes = self.format.encode(save)?;
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved slot '{}' to {}", slot, path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveGame>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let save = self.format.decode(&bytes)?;

        tracing::debug!("Loaded slot '{}' from {}", slot, path.display());
        Ok(Some(save))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted slot '{}'", slot);
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let suffix = format!(".{}", self.format.extension());
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)? {
            let path = entry.map_err(RepositoryError::Io)?.path();
            let Some(filename) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(slot) = filename.strip_suffix(&suffix) {
                if validate_slot(slot).is_ok() {
                    slots.push(slot.to_owned());
                }
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
