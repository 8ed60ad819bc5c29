//! Read-only views rendered by clients.

use std::fmt;

use serde::{Deserialize, Serialize};

use campaign_core::{
    AlienCargoEntry, BaseId, CampaignDate, Capacity, EmployeeId, EmployeeKind, TransferId,
};

/// Specimens of one species, named by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCount {
    pub species: String,
    pub alive: u32,
    pub dead: u32,
}

impl SpeciesCount {
    pub(crate) fn from_entry(entry: &AlienCargoEntry, key: Option<String>) -> Self {
        Self {
            species: key.unwrap_or_else(|| entry.species.to_string()),
            alive: entry.alive,
            dead: entry.dead,
        }
    }
}

/// Aggregate containment numbers for the base summary screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSummary {
    pub id: BaseId,
    pub name: String,
    pub has_containment: bool,
    pub alive: u32,
    pub dead: u32,
    pub capacity: Capacity,
    pub species: Vec<SpeciesCount>,
    pub incoming_transfers: usize,
}

impl fmt::Display for BaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.id)?;
        if !self.has_containment {
            writeln!(f, "  no alien containment")?;
        } else {
            writeln!(
                f,
                "  containment {}/{} alive, {} dead",
                self.capacity.current, self.capacity.max, self.dead
            )?;
            for count in &self.species {
                writeln!(f, "    {:<16} alive {:>3}  dead {:>3}", count.species, count.alive, count.dead)?;
            }
        }
        write!(f, "  incoming transfers: {}", self.incoming_transfers)
    }
}

/// One in-flight transfer with its full payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferListing {
    pub id: TransferId,
    /// `None` for mission cargo.
    pub source: Option<String>,
    pub destination: String,
    pub arrival: CampaignDate,
    pub items: Vec<(String, u32)>,
    pub employees: Vec<(EmployeeKind, EmployeeId)>,
    pub aliens: Vec<SpeciesCount>,
    pub aircraft: Vec<String>,
}

impl fmt::Display for TransferListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} -> {}, arrives {}",
            self.id,
            self.source.as_deref().unwrap_or("mission"),
            self.destination,
            self.arrival
        )?;
        for (item, amount) in &self.items {
            writeln!(f, "  item     {item} x{amount}")?;
        }
        for (kind, employee) in &self.employees {
            writeln!(f, "  employee {employee} ({kind})")?;
        }
        for count in &self.aliens {
            writeln!(f, "  alien    {} alive {} dead {}", count.species, count.alive, count.dead)?;
        }
        for aircraft in &self.aircraft {
            writeln!(f, "  aircraft {aircraft}")?;
        }
        Ok(())
    }
}
