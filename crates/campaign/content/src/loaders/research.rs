//! Research progress loader.

use std::path::Path;

use campaign_core::ResearchSnapshot;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Default, Deserialize)]
struct ResearchFile {
    #[serde(default)]
    researched: Vec<String>,
}

/// Loads completed research topics from a TOML file with a `researched` list.
pub struct ResearchLoader;

impl ResearchLoader {
    pub fn load(path: &Path) -> LoadResult<ResearchSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ResearchSnapshot> {
        let file: ResearchFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse research TOML: {}", e))?;
        Ok(ResearchSnapshot::with_researched(file.researched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::ResearchOracle;

    #[test]
    fn lists_researched_topics() {
        let research = ResearchLoader::parse("researched = [\"rs_alien_breathing\"]\n").unwrap();
        assert!(research.is_researched("rs_alien_breathing"));
        assert!(!research.is_researched("rs_laser"));
    }

    #[test]
    fn empty_file_means_nothing_researched() {
        let research = ResearchLoader::parse("").unwrap();
        assert!(!research.is_researched("rs_alien_breathing"));
    }
}
