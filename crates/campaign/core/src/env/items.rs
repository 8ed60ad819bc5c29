use crate::state::ItemId;

pub trait ItemOracle: Send + Sync {
    fn definition(&self, item: ItemId) -> Option<ItemDefinition>;

    /// Interned id for an item key, `None` when unknown.
    fn resolve(&self, key: &str) -> Option<ItemId>;

    /// The antimatter item, if the catalog defines one.
    fn antimatter(&self) -> Option<ItemId>;
}

/// Storage-relevant facts about an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub key: String,
    /// Storage units one piece occupies.
    pub size: u32,
    /// Whether the item occupies base storage at all.
    pub stored_in_base: bool,
    /// Antimatter is kept in its own storage building and ledger entry.
    pub antimatter: bool,
}

impl ItemDefinition {
    pub fn new(id: ItemId, key: impl Into<String>, size: u32) -> Self {
        Self {
            id,
            key: key.into(),
            size,
            stored_in_base: true,
            antimatter: false,
        }
    }

    pub fn antimatter(mut self) -> Self {
        self.antimatter = true;
        self
    }

    pub fn virtual_item(mut self) -> Self {
        self.stored_in_base = false;
        self
    }
}
