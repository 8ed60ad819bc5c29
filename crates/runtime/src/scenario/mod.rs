//! Starter campaign used when no initial state or save is supplied.
//!
//! Two founded bases: a headquarters with every facility, including alien
//! containment, and an outpost with only storage, quarters and a hangar.
//! Content-dependent stock (items) is placed only when the catalog knows it.

use campaign_core::{
    Aircraft, AircraftId, AircraftSize, BaseId, BuildingFlags, CampaignEngine, CampaignState,
    ContainmentError, Employee, EmployeeId, EmployeeKind, GeoPosition, ItemOracle, OracleSnapshot,
};

pub const HEADQUARTERS: &str = "Headquarters";
pub const OUTPOST: &str = "Outpost";

const HEADQUARTERS_BUILDINGS: [(BuildingFlags, u32); 6] = [
    (BuildingFlags::ALIEN_CONTAINMENT, 10),
    (BuildingFlags::STORAGE, 200),
    (BuildingFlags::LIVING_QUARTERS, 20),
    (BuildingFlags::ANTIMATTER, 100),
    (BuildingFlags::SMALL_HANGAR, 2),
    (BuildingFlags::BIG_HANGAR, 1),
];

const OUTPOST_BUILDINGS: [(BuildingFlags, u32); 3] = [
    (BuildingFlags::STORAGE, 100),
    (BuildingFlags::LIVING_QUARTERS, 10),
    (BuildingFlags::SMALL_HANGAR, 2),
];

const STARTING_STOCK: [(&str, i32); 2] = [("medikit", 8), ("assault_rifle", 6)];

const STARTING_STAFF: [(EmployeeKind, u32); 4] = [
    (EmployeeKind::Soldier, 4),
    (EmployeeKind::Scientist, 2),
    (EmployeeKind::Worker, 2),
    (EmployeeKind::Pilot, 1),
];

/// Builds the starter campaign.
///
/// # Errors
///
/// Only fails if a building cannot be completed, which means the oracle
/// bundle is missing its configuration.
pub fn starter_campaign(oracles: &OracleSnapshot) -> Result<CampaignState, ContainmentError> {
    let mut state = CampaignState::new();
    let hq = state.found_base(HEADQUARTERS, Some(GeoPosition::new(-75.0, 40.0)));
    let outpost = state.found_base(OUTPOST, Some(GeoPosition::new(15.0, 50.0)));

    let env = oracles.env();
    {
        let mut engine = CampaignEngine::new(&mut state);
        for (building, capacity) in HEADQUARTERS_BUILDINGS {
            engine.complete_building(&env, hq, building, capacity)?;
        }
        for (building, capacity) in OUTPOST_BUILDINGS {
            engine.complete_building(&env, outpost, building, capacity)?;
        }
    }

    stock(&mut state, oracles, hq);
    staff(&mut state, hq);
    state.add_aircraft(Aircraft::new(AircraftId(0), "Stingray", AircraftSize::Small, hq));

    tracing::debug!(
        "Starter campaign created with {} bases and {} employees",
        state.bases.len(),
        state.employees.len()
    );
    Ok(state)
}

fn stock(state: &mut CampaignState, oracles: &OracleSnapshot, base: BaseId) {
    let Some(base) = state.founded_base_mut(base) else {
        return;
    };
    for (key, amount) in STARTING_STOCK {
        let Some(item) = oracles
            .items
            .resolve(key)
            .and_then(|id| oracles.items.definition(id))
        else {
            continue;
        };
        if let Err(err) = base.add_item(&item, amount) {
            tracing::warn!("Starter stock of '{}' rejected: {}", key, err);
        }
    }
}

fn staff(state: &mut CampaignState, base: BaseId) {
    let mut next = 0;
    for (kind, count) in STARTING_STAFF {
        for _ in 0..count {
            state.hire(Employee::hired(EmployeeId(next), kind, base));
            next += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::{CapacityKind, ItemDefinition, ItemId, ItemsSnapshot};

    #[test]
    fn headquarters_is_ready_for_aliens() {
        let oracles = OracleSnapshot {
            items: ItemsSnapshot::new(vec![ItemDefinition::new(ItemId(0), "medikit", 1)]),
            ..OracleSnapshot::default()
        };
        let state = starter_campaign(&oracles).unwrap();

        let hq = state.founded_base(BaseId(0)).unwrap();
        assert!(hq.containment.is_some());
        assert_eq!(hq.capacities.max(CapacityKind::Aliens), 10);
        assert_eq!(hq.item_count(ItemId(0)), 8);
        assert_eq!(hq.capacities.current(CapacityKind::Items), 8);
        assert_eq!(hq.capacities.current(CapacityKind::Employees), 9);
        assert_eq!(hq.capacities.current(CapacityKind::SmallAircraft), 1);

        let outpost = state.founded_base(BaseId(1)).unwrap();
        assert!(outpost.containment.is_none());
        assert!(!outpost.has(BuildingFlags::ALIEN_CONTAINMENT));
    }
}
