//! Save games for the containment, cargo and transfer subsystem.
//!
//! [`encode`] splits the campaign into the plain state plus species-keyed
//! records for every containment, aircraft cargo and in-flight transfer.
//! [`decode`] rebuilds the state against the current catalogs. Individual
//! records that no longer make sense are skipped and reported in a
//! [`LoadReport`]; only an unsupported version aborts a load.

mod legacy;
mod records;

pub use records::{
    AircraftCargoRecord, AlienRecord, AlienRecords, ContainmentRecord, ContainmentSection,
    ItemRecord, TransferRecord,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use campaign_core::{
    AlienCargo, AlienContainment, BuildingFlags, CampaignState, CapacityKind, ItemOracle,
    OracleSnapshot, SpeciesOracle, Transfer, TransferPayload,
};

/// Current save layout. Version 1 saves used the indexed alien arrays.
pub const SAVE_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("save version {found} is not supported (newest is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    /// Campaign state without containments, aircraft cargo or pending transfers.
    pub campaign: CampaignState,
    pub containment: ContainmentSection,
    pub aircraft_cargo: Vec<AircraftCargoRecord>,
    pub transfers: Vec<TransferRecord>,
}

/// Diagnostics collected while decoding a save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub warnings: Vec<String>,
    /// Records or entries ignored because they no longer resolve.
    pub skipped: usize,
    /// Transfers dropped because their destination base is absent.
    pub dropped_transfers: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub(crate) fn skip(&mut self, message: String) {
        warn!(target: "runtime::save", "{message}");
        self.skipped += 1;
        self.warnings.push(message);
    }

    fn drop_transfer(&mut self, message: String) {
        warn!(target: "runtime::save", "{message}");
        self.dropped_transfers += 1;
        self.warnings.push(message);
    }
}

pub fn encode(state: &CampaignState, oracles: &OracleSnapshot) -> SaveGame {
    let mut campaign = state.clone();
    let species = &oracles.species;

    let mut containment = ContainmentSection {
        breathing_mail_sent: state.breathing_mail_sent,
        bases: Vec::new(),
    };
    for base in &mut campaign.bases {
        if let Some(held) = base.containment.take() {
            containment.bases.push(ContainmentRecord {
                base: base.id,
                aliens: keyed(held.cargo(), species),
            });
        }
    }

    let aircraft_cargo = campaign
        .aircraft
        .values_mut()
        .filter_map(|craft| {
            let cargo = craft.alien_cargo.take()?;
            (!cargo.is_empty()).then(|| AircraftCargoRecord {
                aircraft: craft.id,
                aliens: keyed(&cargo, species),
            })
        })
        .collect();

    let transfers = campaign
        .transfers
        .drain()
        .into_iter()
        .map(|transfer| TransferRecord {
            id: transfer.id,
            source: transfer.source,
            destination: transfer.destination,
            arrival: transfer.arrival,
            items: transfer
                .payload
                .items
                .iter()
                .filter_map(|(item, amount)| {
                    let key = oracles.items.definition(*item)?.key;
                    Some(ItemRecord {
                        item: key,
                        amount: *amount,
                    })
                })
                .collect(),
            employees: transfer.payload.employees.clone(),
            aliens: transfer
                .payload
                .aliens
                .as_ref()
                .filter(|cargo| !cargo.is_empty())
                .map(|cargo| keyed(cargo, species)),
            aircraft: transfer.payload.aircraft.clone(),
        })
        .collect();

    SaveGame {
        version: SAVE_VERSION,
        campaign,
        containment,
        aircraft_cargo,
        transfers,
    }
}

/// Rebuilds campaign state from a save.
///
/// Every founded base with a containment building gets an empty containment
/// before records are applied, so a base whose record is missing still holds
/// aliens afterwards.
///
/// # Errors
///
/// Fails only for save versions newer than [`SAVE_VERSION`].
pub fn decode(
    save: SaveGame,
    oracles: &OracleSnapshot,
) -> Result<(CampaignState, LoadReport), SaveError> {
    if save.version == 0 || save.version > SAVE_VERSION {
        return Err(SaveError::UnsupportedVersion {
            found: save.version,
            supported: SAVE_VERSION,
        });
    }
    let SaveGame {
        campaign: mut state,
        containment,
        aircraft_cargo,
        transfers,
        ..
    } = save;
    let mut report = LoadReport::default();
    let species: &dyn SpeciesOracle = &oracles.species;
    let dead_capacity = oracles.config.dead_body_capacity;

    state.breathing_mail_sent = containment.breathing_mail_sent;
    for base in &mut state.bases {
        base.containment = (base.founded && base.has(BuildingFlags::ALIEN_CONTAINMENT))
            .then(|| AlienContainment::new(dead_capacity));
        base.capacities.set_current(CapacityKind::Aliens, 0);
    }

    for record in containment.bases {
        let context = record.base.to_string();
        let Some(base) = state
            .base_mut(record.base)
            .filter(|base| base.containment.is_some())
        else {
            report.skip(format!("{context}: no alien containment, record ignored"));
            continue;
        };
        let mut cargo = base
            .containment
            .take()
            .map(|held| held.cargo().clone())
            .unwrap_or_default();
        let loaded = decode_aliens(&record.aliens, species, &mut report, &context);
        if let Err(err) = cargo.merge(&loaded) {
            report.skip(format!("{context}: {err}"));
        }
        let alive = i32::try_from(cargo.total_alive()).unwrap_or(i32::MAX);
        base.containment = Some(AlienContainment::restore(cargo, dead_capacity));
        base.capacities.set_current(CapacityKind::Aliens, alive);
    }

    for record in aircraft_cargo {
        let context = record.aircraft.to_string();
        let cargo = decode_aliens(&record.aliens, species, &mut report, &context);
        match state.aircraft.get_mut(&record.aircraft) {
            Some(craft) if !cargo.is_empty() => craft.alien_cargo = Some(cargo),
            Some(_) => {}
            None => report.skip(format!("{context}: unknown aircraft, cargo ignored")),
        }
    }

    for record in transfers {
        let context = record.id.to_string();
        if state.base(record.destination).is_none() {
            report.drop_transfer(format!(
                "{context}: destination {} is absent, transfer dropped",
                record.destination
            ));
            continue;
        }
        let source = match record.source {
            Some(source) if state.base(source).is_none() => {
                report.skip(format!("{context}: source {source} is absent"));
                None
            }
            other => other,
        };

        let mut payload = TransferPayload::new();
        for item in &record.items {
            match oracles.items.resolve(&item.item) {
                Some(id) => payload.add_item(id, item.amount),
                None => report.skip(format!("{context}: unknown item '{}'", item.item)),
            }
        }
        for (&kind, ids) in &record.employees {
            for &id in ids {
                if state.employees.contains_key(&id) {
                    payload.add_employee(kind, id);
                } else {
                    report.skip(format!("{context}: unknown employee {id}"));
                }
            }
        }
        if let Some(aliens) = &record.aliens {
            let cargo = decode_aliens(aliens, species, &mut report, &context);
            if !cargo.is_empty() {
                payload.aliens = Some(cargo);
            }
        }
        for &aircraft in &record.aircraft {
            if state.aircraft.contains_key(&aircraft) {
                payload.add_aircraft(aircraft);
            } else {
                report.skip(format!("{context}: unknown aircraft {aircraft}"));
            }
        }

        state.transfers.restore(Transfer {
            id: record.id,
            source,
            destination: record.destination,
            arrival: record.arrival,
            payload,
        });
    }

    Ok((state, report))
}

fn keyed(cargo: &AlienCargo, species: &dyn SpeciesOracle) -> AlienRecords {
    AlienRecords::Keyed(
        cargo
            .iter()
            .map(|entry| AlienRecord {
                species: species
                    .key(entry.species)
                    .unwrap_or_else(|| entry.species.to_string()),
                alive: entry.alive,
                dead: entry.dead,
            })
            .collect(),
    )
}

fn decode_aliens(
    records: &AlienRecords,
    species: &dyn SpeciesOracle,
    report: &mut LoadReport,
    context: &str,
) -> AlienCargo {
    let records = match records {
        AlienRecords::Keyed(records) => records,
        AlienRecords::Indexed { alive, dead } => {
            return legacy::decode_indexed(alive, dead, species, report, context);
        }
        AlienRecords::Triples(triples) => {
            return legacy::decode_triples(triples, species, report, context);
        }
    };
    let mut cargo = AlienCargo::new();
    for record in records {
        let Some(id) = species.resolve(&record.species) else {
            report.skip(format!("{context}: unknown species '{}'", record.species));
            continue;
        };
        let added = cargo.add(
            id,
            i32::try_from(record.alive).unwrap_or(i32::MAX),
            i32::try_from(record.dead).unwrap_or(i32::MAX),
        );
        if let Err(err) = added {
            report.skip(format!("{context}: {err}"));
        }
    }
    cargo
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::{
        Aircraft, AircraftId, AircraftSize, BaseId, CampaignConfig, CampaignEngine, GeoPosition,
        ItemDefinition, ItemId, ItemsSnapshot, ResearchSnapshot, SpeciesDefinition, SpeciesId,
        SpeciesSnapshot, SpeciesTraits,
    };

    const TAMAN: SpeciesId = SpeciesId(0);
    const ORTNOK: SpeciesId = SpeciesId(1);

    fn oracles() -> OracleSnapshot {
        OracleSnapshot::new(
            SpeciesSnapshot::new(vec![
                SpeciesDefinition::new(TAMAN, "taman", SpeciesTraits::ALIEN),
                SpeciesDefinition::new(ORTNOK, "ortnok", SpeciesTraits::ALIEN),
            ]),
            ItemsSnapshot::new(vec![ItemDefinition::new(ItemId(0), "medikit", 1)]),
            ResearchSnapshot::with_researched([CampaignConfig::DEFAULT_BREATHING_TECH]),
            CampaignConfig::new(),
        )
    }

    fn campaign(oracles: &OracleSnapshot) -> CampaignState {
        let mut state = CampaignState::new();
        let alpha = state.found_base("Alpha", Some(GeoPosition::new(0.0, 0.0)));
        state.found_base("Bravo", Some(GeoPosition::new(90.0, 0.0)));
        let env = oracles.env();
        let mut engine = CampaignEngine::new(&mut state);
        engine.complete_containment_building(&env, alpha, 10).unwrap();
        engine.add_alien_to_container(alpha, ORTNOK, false).unwrap();
        engine.add_alien_to_container(alpha, ORTNOK, true).unwrap();
        engine.add_alien_to_container(alpha, TAMAN, true).unwrap();
        state
    }

    fn json_round_trip(save: &SaveGame) -> SaveGame {
        let text = serde_json::to_string(save).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn containment_survives_a_round_trip() {
        let oracles = oracles();
        let mut state = campaign(&oracles);
        state.breathing_mail_sent = true;

        let save = json_round_trip(&encode(&state, &oracles));
        let (loaded, report) = decode(save, &oracles).unwrap();
        assert!(report.is_clean());

        let original = state.base(BaseId(0)).unwrap();
        let restored = loaded.base(BaseId(0)).unwrap();
        let mut before = original.containment.as_ref().unwrap().list();
        let mut after = restored.containment.as_ref().unwrap().list();
        before.sort_by_key(|entry| entry.species);
        after.sort_by_key(|entry| entry.species);
        assert_eq!(before, after);
        assert_eq!(restored.capacities.current(CapacityKind::Aliens), 1);
        assert!(loaded.breathing_mail_sent);
    }

    #[test]
    fn records_for_bases_without_containment_are_skipped() {
        let oracles = oracles();
        let state = campaign(&oracles);
        let mut save = encode(&state, &oracles);
        save.containment.bases.push(ContainmentRecord {
            base: BaseId(1),
            aliens: AlienRecords::Keyed(vec![AlienRecord {
                species: "taman".into(),
                alive: 1,
                dead: 0,
            }]),
        });
        save.containment.bases[0].aliens = AlienRecords::Keyed(vec![
            AlienRecord {
                species: "muton".into(),
                alive: 2,
                dead: 0,
            },
            AlienRecord {
                species: "ortnok".into(),
                alive: 1,
                dead: 0,
            },
        ]);

        let (loaded, report) = decode(save, &oracles).unwrap();
        assert_eq!(report.skipped, 2);
        assert!(loaded.base(BaseId(1)).unwrap().containment.is_none());
        let alpha = loaded.base(BaseId(0)).unwrap().containment.as_ref().unwrap();
        assert_eq!(alpha.alive(), 1);
        assert_eq!(alpha.dead(), 0);
    }

    #[test]
    fn legacy_indexed_records_are_accepted() {
        let oracles = oracles();
        let state = campaign(&oracles);
        let mut save = encode(&state, &oracles);
        save.version = 1;
        save.containment.bases[0].aliens = AlienRecords::Indexed {
            alive: vec![2, 0],
            dead: vec![0, 5],
        };

        let (loaded, report) = decode(save, &oracles).unwrap();
        assert!(report.is_clean());
        let alpha = loaded.base(BaseId(0)).unwrap();
        let containment = alpha.containment.as_ref().unwrap();
        assert_eq!(containment.alive_of(TAMAN), 2);
        assert_eq!(containment.dead_of(ORTNOK), 5);
        assert_eq!(alpha.capacities.current(CapacityKind::Aliens), 2);
    }

    #[test]
    fn legacy_triples_in_transfers_are_accepted() {
        let oracles = oracles();
        let mut state = campaign(&oracles);
        let env = oracles.env();
        let mut aliens = AlienCargo::new();
        aliens.add(ORTNOK, 1, 0).unwrap();
        CampaignEngine::new(&mut state)
            .start_transfer(
                &env,
                BaseId(0),
                BaseId(1),
                TransferPayload::new().with_aliens(aliens),
            )
            .unwrap()
            .unwrap();

        let mut save = json_round_trip(&encode(&state, &oracles));
        save.version = 1;
        save.transfers[0].aliens = Some(AlienRecords::Triples(vec![
            (0, 2, 0),
            (1, 0, 3),
            (1, 0, 2),
            (4, 1, 1),
        ]));

        let (loaded, report) = decode(save, &oracles).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.dropped_transfers, 0);
        let transfer = loaded.transfers.iter().next().unwrap();
        let cargo = transfer.payload.aliens.as_ref().unwrap();
        assert_eq!(cargo.alive(TAMAN), 2);
        assert_eq!(cargo.dead(ORTNOK), 5);
        assert_eq!(cargo.alive(ORTNOK), 0);
        assert_eq!(cargo.total_alive(), 2);
    }

    #[test]
    fn transfers_without_destination_are_dropped() {
        let oracles = oracles();
        let mut state = campaign(&oracles);
        let env = oracles.env();
        let mut aliens = AlienCargo::new();
        aliens.add(ORTNOK, 1, 1).unwrap();
        CampaignEngine::new(&mut state)
            .start_transfer(
                &env,
                BaseId(0),
                BaseId(1),
                TransferPayload::new().with_aliens(aliens),
            )
            .unwrap()
            .unwrap();

        let mut save = json_round_trip(&encode(&state, &oracles));
        assert_eq!(save.transfers.len(), 1);
        let mut orphan = save.transfers[0].clone();
        orphan.id = campaign_core::TransferId(9);
        orphan.destination = BaseId(7);
        save.transfers.push(orphan);

        let (loaded, report) = decode(save, &oracles).unwrap();
        assert_eq!(report.dropped_transfers, 1);
        assert_eq!(loaded.transfers.len(), 1);
        let transfer = loaded.transfers.iter().next().unwrap();
        let cargo = transfer.payload.aliens.as_ref().unwrap();
        assert_eq!(cargo.alive(ORTNOK), 1);
        assert_eq!(cargo.dead(ORTNOK), 1);
    }

    #[test]
    fn aircraft_cargo_is_kept() {
        let oracles = oracles();
        let mut state = campaign(&oracles);
        let craft = AircraftId(4);
        state.add_aircraft(Aircraft::new(craft, "Stiletto", AircraftSize::Small, BaseId(0)));
        CampaignEngine::new(&mut state)
            .collect_alien_from_battlefield(&oracles.env(), craft, TAMAN, 2, 0)
            .unwrap();

        let (loaded, _) = decode(json_round_trip(&encode(&state, &oracles)), &oracles).unwrap();
        let cargo = loaded.aircraft[&craft].alien_cargo.as_ref().unwrap();
        assert_eq!(cargo.alive(TAMAN), 2);
    }

    #[test]
    fn future_versions_are_rejected() {
        let oracles = oracles();
        let mut save = encode(&CampaignState::new(), &oracles);
        save.version = SAVE_VERSION + 1;
        assert!(matches!(
            decode(save, &oracles),
            Err(SaveError::UnsupportedVersion { .. })
        ));
    }
}
