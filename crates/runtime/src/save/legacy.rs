//! Decoding of the per-alien-index layouts written by older saves.
//!
//! Both layouts address species by global alien index, the position of the
//! species among alien species in catalog order.

use campaign_core::{AlienCargo, SpeciesOracle};

use super::LoadReport;

/// Builds a cargo from parallel alive/dead arrays indexed by global alien index.
///
/// Indices with no matching alien species are skipped and reported.
pub(crate) fn decode_indexed(
    alive: &[u32],
    dead: &[u32],
    species: &dyn SpeciesOracle,
    report: &mut LoadReport,
    context: &str,
) -> AlienCargo {
    let aliens = species.aliens();
    let mut cargo = AlienCargo::new();
    for index in 0..alive.len().max(dead.len()) {
        let amount_alive = alive.get(index).copied().unwrap_or(0);
        let amount_dead = dead.get(index).copied().unwrap_or(0);
        if amount_alive == 0 && amount_dead == 0 {
            continue;
        }
        let Some(&id) = aliens.get(index) else {
            report.skip(format!("{context}: no alien species at index {index}"));
            continue;
        };
        let added = cargo.add(
            id,
            i32::try_from(amount_alive).unwrap_or(i32::MAX),
            i32::try_from(amount_dead).unwrap_or(i32::MAX),
        );
        if let Err(err) = added {
            report.skip(format!("{context}: alien index {index}: {err}"));
        }
    }
    cargo
}

/// Builds a cargo from `(index, alive, dead)` triples. Repeated indices accumulate.
pub(crate) fn decode_triples(
    triples: &[(u32, u32, u32)],
    species: &dyn SpeciesOracle,
    report: &mut LoadReport,
    context: &str,
) -> AlienCargo {
    let aliens = species.aliens();
    let mut cargo = AlienCargo::new();
    for &(index, alive, dead) in triples {
        let Some(&id) = usize::try_from(index).ok().and_then(|i| aliens.get(i)) else {
            report.skip(format!("{context}: no alien species at index {index}"));
            continue;
        };
        let added = cargo.add(
            id,
            i32::try_from(alive).unwrap_or(i32::MAX),
            i32::try_from(dead).unwrap_or(i32::MAX),
        );
        if let Err(err) = added {
            report.skip(format!("{context}: alien index {index}: {err}"));
        }
    }
    cargo
}
