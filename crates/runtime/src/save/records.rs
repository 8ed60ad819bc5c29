//! Persisted record shapes.
//!
//! Species and items are stored by key so saves survive catalog reordering.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use campaign_core::{AircraftId, BaseId, CampaignDate, EmployeeId, EmployeeKind, TransferId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlienRecord {
    pub species: String,
    pub alive: u32,
    pub dead: u32,
}

/// Alien counts in either the current keyed shape or the legacy flat shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlienRecords {
    Keyed(Vec<AlienRecord>),
    /// Parallel arrays indexed by global alien index (position among alien
    /// species in catalog order).
    Indexed { alive: Vec<u32>, dead: Vec<u32> },
    /// `(global alien index, alive, dead)` triples from old transfer records.
    Triples(Vec<(u32, u32, u32)>),
}

impl AlienRecords {
    pub fn is_empty(&self) -> bool {
        match self {
            AlienRecords::Keyed(records) => records.is_empty(),
            AlienRecords::Indexed { alive, dead } => {
                alive.iter().chain(dead.iter()).all(|amount| *amount == 0)
            }
            AlienRecords::Triples(triples) => {
                triples.iter().all(|(_, alive, dead)| *alive == 0 && *dead == 0)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainmentRecord {
    pub base: BaseId,
    pub aliens: AlienRecords,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainmentSection {
    pub breathing_mail_sent: bool,
    pub bases: Vec<ContainmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftCargoRecord {
    pub aircraft: AircraftId,
    pub aliens: AlienRecords,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item: String,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: TransferId,
    pub source: Option<BaseId>,
    pub destination: BaseId,
    pub arrival: CampaignDate,
    pub items: Vec<ItemRecord>,
    pub employees: BTreeMap<EmployeeKind, BTreeSet<EmployeeId>>,
    pub aliens: Option<AlienRecords>,
    pub aircraft: Vec<AircraftId>,
}
