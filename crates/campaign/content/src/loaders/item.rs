//! Item catalog loader.

use std::path::Path;

use campaign_core::{ItemDefinition, ItemId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn stored() -> bool {
    true
}

/// One item as written in `items.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub key: String,
    pub size: u32,
    #[serde(default = "stored")]
    pub stored_in_base: bool,
    #[serde(default)]
    pub antimatter: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemSpec>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        if catalog.items.iter().filter(|item| item.antimatter).count() > 1 {
            anyhow::bail!("Item catalog defines more than one antimatter item");
        }
        catalog
            .items
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                let id = u16::try_from(index)
                    .map_err(|_| anyhow::anyhow!("Item catalog exceeds {} entries", u16::MAX))?;
                Ok(ItemDefinition {
                    id: ItemId(id),
                    key: spec.key,
                    size: spec.size,
                    stored_in_base: spec.stored_in_base,
                    antimatter: spec.antimatter,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let items = ItemLoader::parse(
            r#"(items: [
                (key: "medikit", size: 1),
                (key: "antimatter", size: 1, antimatter: true),
                (key: "ufo_wreck", size: 0, stored_in_base: false),
            ])"#,
        )
        .unwrap();
        assert!(items[0].stored_in_base);
        assert!(!items[0].antimatter);
        assert!(items[1].antimatter);
        assert!(!items[2].stored_in_base);
    }
}
