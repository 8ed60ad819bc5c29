//! Save-slot repositories.
//!
//! A repository stores complete [`SaveGame`](crate::save::SaveGame)s under
//! player-chosen slot names. Static content (species, items) is served by the
//! oracles and never saved here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileSaveRepository, SaveFormat};
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;

/// Slot names double as file stems, so only a conservative character set is allowed.
pub(crate) fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot.len() <= 64
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_owned()))
    }
}
