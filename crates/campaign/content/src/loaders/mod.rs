//! Content loaders that turn RON/TOML files into oracle snapshots.

pub mod config;
pub mod factory;
pub mod item;
pub mod research;
pub mod species;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::{ItemLoader, ItemSpec};
pub use research::ResearchLoader;
pub use species::{SpeciesLoader, SpeciesSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
