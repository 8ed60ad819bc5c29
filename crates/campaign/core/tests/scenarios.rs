//! End-to-end campaign flows across containment and transfers.

use campaign_core::{
    Aircraft, AircraftId, AircraftSize, AlienCargo, AlienContainment, BaseId, BuildingFlags,
    CampaignConfig, CampaignDate, CampaignEngine, CampaignEvent, CampaignState, CapacityKind,
    Employee, EmployeeId, EmployeeKind, GeoPosition, ItemDefinition, ItemId, ItemsSnapshot,
    MessageCategory, OracleSnapshot, ResearchSnapshot, SpeciesDefinition, SpeciesId,
    SpeciesSnapshot, SpeciesTraits, TransferPayload,
};

const SECTOID: SpeciesId = SpeciesId(0);
const ORTNOK: SpeciesId = SpeciesId(1);
const MEDIKIT: ItemId = ItemId(0);

fn oracles() -> OracleSnapshot {
    oracles_with(CampaignConfig::new())
}

fn oracles_with(config: CampaignConfig) -> OracleSnapshot {
    let species = SpeciesSnapshot::new(vec![
        SpeciesDefinition::new(SECTOID, "sectoid", SpeciesTraits::ALIEN),
        SpeciesDefinition::new(ORTNOK, "ortnok", SpeciesTraits::ALIEN),
    ]);
    let items = ItemsSnapshot::new(vec![ItemDefinition::new(MEDIKIT, "medikit", 1)]);
    let research = ResearchSnapshot::with_researched([CampaignConfig::DEFAULT_BREATHING_TECH]);
    OracleSnapshot::new(species, items, research, config)
}

/// Two bases 45 degrees apart: half a day of travel.
fn two_bases() -> (CampaignState, BaseId, BaseId) {
    let mut state = CampaignState::new();
    let a = state.found_base("Alpha", Some(GeoPosition::new(0.0, 0.0)));
    let b = state.found_base("Bravo", Some(GeoPosition::new(45.0, 0.0)));
    (state, a, b)
}

fn medikit() -> ItemDefinition {
    ItemDefinition::new(MEDIKIT, "medikit", 1)
}

#[test]
fn admission_fills_then_converts_overflow_to_dead() {
    let mut state = CampaignState::new();
    let base = state.found_base("Alpha", None);
    let base = state.base_mut(base).unwrap();
    base.containment = Some(AlienContainment::default());
    base.capacities.set_max(CapacityKind::Aliens, 5);

    let mut view = base.containment_mut().unwrap();
    let first = view.add(SECTOID, 3, 0, true).unwrap();
    assert_eq!(first.admitted, 3);
    assert_eq!(view.get().alive_of(SECTOID), 3);
    assert_eq!(view.free(), 2);

    let second = view.add(SECTOID, 4, 0, true).unwrap();
    assert_eq!(second.admitted, 2);
    assert_eq!(second.overflow_killed, 2);
    assert_eq!(view.get().alive_of(SECTOID), 5);
    assert_eq!(view.get().dead_of(SECTOID), 2);

    assert_eq!(base.capacities.current(CapacityKind::Aliens), 5);
    assert_eq!(base.capacities.max(CapacityKind::Aliens), 5);
}

#[test]
fn admitting_exactly_the_free_space_keeps_everyone_alive() {
    let mut state = CampaignState::new();
    let base = state.found_base("Alpha", None);
    let base = state.base_mut(base).unwrap();
    base.containment = Some(AlienContainment::default());
    base.capacities.set_max(CapacityKind::Aliens, 4);

    let admission = base.containment_mut().unwrap().add(ORTNOK, 4, 0, true).unwrap();
    assert_eq!(admission.admitted, 4);
    assert_eq!(admission.total_dead(), 0);
    assert_eq!(base.capacities.free(CapacityKind::Aliens), 0);
}

#[test]
fn dead_bodies_added_then_removed_leave_no_entry() {
    let mut cargo = AlienCargo::new();
    cargo.add(ORTNOK, 0, 2).unwrap();
    cargo.add(ORTNOK, 0, -2).unwrap();
    assert!(cargo.list().iter().all(|entry| entry.species != ORTNOK));
    assert_eq!(cargo.total_dead(), 0);
}

#[test]
fn item_transfer_arrives_after_half_a_day() {
    let oracles = oracles();
    let env = oracles.env();
    let (mut state, a, b) = two_bases();
    state.base_mut(a).unwrap().add_item(&medikit(), 4).unwrap();

    let mut engine = CampaignEngine::new(&mut state);
    engine
        .complete_building(&env, b, BuildingFlags::STORAGE, 100)
        .unwrap();
    let id = engine
        .start_transfer(&env, a, b, TransferPayload::new().with_item(MEDIKIT, 4))
        .unwrap()
        .expect("non-empty payload creates a transfer");

    let transfer = engine.state().transfers.get(id).unwrap().clone();
    assert_eq!(transfer.arrival, CampaignDate::new(0, 43_200));
    assert_eq!(engine.state().base(a).unwrap().item_count(MEDIKIT), 0);
    assert_eq!(
        engine.state().base(a).unwrap().capacities.current(CapacityKind::Items),
        0
    );

    let early = engine.advance_time(&env, 43_199).unwrap();
    assert!(early.advanced);
    assert!(early.resolved.is_none());
    assert_eq!(engine.state().transfers.len(), 1);

    let arrival = engine.advance_time(&env, 1).unwrap();
    let outcome = arrival.resolved.expect("due transfer resolves");
    assert!(outcome.delivered);
    assert_eq!(outcome.destination, b);
    assert!(engine.state().transfers.is_empty());
    assert_eq!(engine.state().base(b).unwrap().item_count(MEDIKIT), 4);
    assert!(engine.events().iter().any(|event| event.text()
        == Some("Transport mission ended, unloading cargo in Bravo")));
}

#[test]
fn aliens_shipped_to_a_base_without_containment_are_lost() {
    let oracles = oracles();
    let env = oracles.env();
    let (mut state, a, b) = two_bases();
    let mut engine = CampaignEngine::new(&mut state);
    engine.complete_containment_building(&env, a, 10).unwrap();
    engine.add_alien_to_container(a, SECTOID, false).unwrap();
    engine.add_alien_to_container(a, SECTOID, false).unwrap();

    let mut aliens = AlienCargo::new();
    aliens.add(SECTOID, 2, 0).unwrap();
    engine
        .start_transfer(&env, a, b, TransferPayload::new().with_aliens(aliens))
        .unwrap()
        .unwrap();
    assert_eq!(
        engine.state().base(a).unwrap().capacities.current(CapacityKind::Aliens),
        0
    );

    engine.advance_time(&env, 86_400).unwrap();
    assert!(engine.state().transfers.is_empty());
    assert!(engine.state().base(b).unwrap().containment.is_none());
    assert!(engine.events().iter().any(|event| matches!(
        event,
        CampaignEvent::Message { category: MessageCategory::CargoLost, text }
            if text == "Bravo does not have Alien Containment, Aliens are removed!"
    )));
    assert!(!engine.events().iter().any(|event| event
        .text()
        .is_some_and(|text| text.starts_with("You cannot process aliens yet"))));
}

#[test]
fn empty_payload_creates_nothing() {
    let oracles = oracles();
    let env = oracles.env();
    let (mut state, a, b) = two_bases();
    let before = state.base(a).unwrap().capacities.clone();
    let mut engine = CampaignEngine::new(&mut state);

    let created = engine
        .start_transfer(&env, a, b, TransferPayload::new())
        .unwrap();
    assert!(created.is_none());
    assert!(engine.state().transfers.is_empty());
    assert!(engine.events().is_empty());
    assert_eq!(engine.state().base(a).unwrap().capacities, before);
}

#[test]
fn rejected_transfer_debits_nothing() {
    let oracles = oracles();
    let env = oracles.env();
    let (mut state, a, b) = two_bases();
    state.base_mut(a).unwrap().add_item(&medikit(), 2).unwrap();
    let mut engine = CampaignEngine::new(&mut state);

    let err = engine
        .start_transfer(&env, a, b, TransferPayload::new().with_item(MEDIKIT, 3))
        .unwrap_err();
    assert!(matches!(
        err,
        campaign_core::TransferError::InsufficientItems { present: 2, requested: 3, .. }
    ));
    assert_eq!(engine.state().base(a).unwrap().item_count(MEDIKIT), 2);
    assert!(engine.state().transfers.is_empty());
}

#[test]
fn destroyed_destination_discards_cargo_and_drops_the_transfer() {
    let oracles = oracles();
    let env = oracles.env();
    let (mut state, a, b) = two_bases();
    state.base_mut(a).unwrap().add_item(&medikit(), 6).unwrap();
    let mut engine = CampaignEngine::new(&mut state);
    engine
        .complete_building(&env, a, BuildingFlags::STORAGE, 100)
        .unwrap();
    engine
        .start_transfer(&env, a, b, TransferPayload::new().with_item(MEDIKIT, 2))
        .unwrap();
    engine
        .start_transfer(&env, a, b, TransferPayload::new().with_item(MEDIKIT, 3))
        .unwrap();
    assert_eq!(engine.state().transfers.len(), 2);

    assert!(engine.lose_base(b));
    let tick = engine.advance_time(&env, 86_400).unwrap();
    let outcome = tick.resolved.unwrap();
    assert!(!outcome.delivered);
    assert_eq!(engine.state().transfers.len(), 1);
    assert!(engine.events().iter().any(|event| event.text()
        == Some(
            "The destination base no longer exists! Transfer cargo was lost, personnel has been discharged."
        )));

    // one resolution per tick
    engine.advance_time(&env, 1).unwrap();
    assert!(engine.state().transfers.is_empty());
    assert_eq!(engine.state().base(a).unwrap().item_count(MEDIKIT), 1);
}

#[test]
fn mission_cargo_is_captured_on_arrival() {
    let oracles = oracles();
    let env = oracles.env();
    let (mut state, _a, b) = two_bases();
    let craft = campaign_core::AircraftId(7);
    state.add_aircraft(campaign_core::Aircraft::new(
        craft,
        "Interceptor",
        campaign_core::AircraftSize::Small,
        b,
    ));
    state.aircraft.get_mut(&craft).unwrap().position = Some(GeoPosition::new(90.0, 0.0));

    let mut engine = CampaignEngine::new(&mut state);
    engine.complete_containment_building(&env, b, 10).unwrap();
    engine
        .complete_building(&env, b, BuildingFlags::SMALL_HANGAR, 2)
        .unwrap();
    engine
        .collect_alien_from_battlefield(&env, craft, ORTNOK, 1, 2)
        .unwrap();
    let id = engine
        .start_transfer_from_mission(&env, craft, b)
        .unwrap()
        .unwrap();
    assert_eq!(engine.state().transfers.get(id).unwrap().source, None);
    assert!(engine.state().aircraft[&craft].alien_cargo.is_none());

    engine.advance_time(&env, 43_200).unwrap();
    let containment = engine.state().base(b).unwrap().containment.as_ref().unwrap();
    assert_eq!(containment.alive_of(ORTNOK), 1);
    assert_eq!(containment.dead_of(ORTNOK), 2);
    assert_eq!(engine.state().stats.captured_aliens, 1);
}

#[test]
fn full_body_storage_never_costs_live_aliens() {
    let oracles = oracles_with(CampaignConfig::new().with_dead_body_capacity(1));
    let env = oracles.env();
    let (mut state, a, b) = two_bases();
    let mut engine = CampaignEngine::new(&mut state);
    engine.complete_containment_building(&env, a, 10).unwrap();
    engine.complete_containment_building(&env, b, 10).unwrap();
    engine.add_alien_to_container(a, SECTOID, false).unwrap();
    engine.add_alien_to_container(a, SECTOID, true).unwrap();
    engine.add_alien_to_container(b, SECTOID, true).unwrap();

    let mut aliens = AlienCargo::new();
    aliens.add(SECTOID, 1, 1).unwrap();
    engine
        .start_transfer(&env, a, b, TransferPayload::new().with_aliens(aliens))
        .unwrap()
        .unwrap();
    engine.advance_time(&env, 86_400).unwrap();

    let bravo = engine.state().base(b).unwrap();
    let containment = bravo.containment.as_ref().unwrap();
    assert_eq!(containment.alive_of(SECTOID), 1);
    assert_eq!(containment.dead_of(SECTOID), 1);
    assert_eq!(bravo.capacities.current(CapacityKind::Aliens), 1);
    assert!(engine.events().iter().any(|event| event.text()
        == Some("Not enough room for dead aliens in Alien Containment. Some bodies were discarded.")));
    assert!(!engine.events().iter().any(|event| event
        .text()
        .is_some_and(|text| text.contains("Aliens are removed"))));
}

#[test]
fn lost_destination_discharges_staff_and_destroys_aircraft_in_flight() {
    let oracles = oracles();
    let env = oracles.env();
    let (mut state, a, b) = two_bases();
    let soldier = EmployeeId(1);
    let craft = AircraftId(3);
    state.hire(Employee::hired(soldier, EmployeeKind::Soldier, a));
    state.add_aircraft(Aircraft::new(craft, "Skyranger", AircraftSize::Small, a));

    let mut engine = CampaignEngine::new(&mut state);
    engine
        .start_transfer(
            &env,
            a,
            b,
            TransferPayload::new()
                .with_employee(EmployeeKind::Soldier, soldier)
                .with_aircraft(craft),
        )
        .unwrap()
        .unwrap();
    let alpha = engine.state().base(a).unwrap();
    assert_eq!(alpha.capacities.current(CapacityKind::Employees), 0);
    assert_eq!(alpha.capacities.current(CapacityKind::SmallAircraft), 0);
    assert_eq!(
        engine.state().base(b).unwrap().capacities.current(CapacityKind::SmallAircraft),
        1
    );

    assert!(engine.lose_base(b));
    // travelling staff and aircraft survive the base loss itself
    assert!(engine.state().employees[&soldier].hired);
    assert!(engine.state().aircraft.contains_key(&craft));

    let outcome = engine.advance_time(&env, 86_400).unwrap().resolved.unwrap();
    assert!(!outcome.delivered);
    let employee = &engine.state().employees[&soldier];
    assert!(!employee.hired);
    assert_eq!(employee.base, None);
    assert!(!employee.in_transfer);
    assert!(!engine.state().aircraft.contains_key(&craft));
    assert!(engine.state().transfers.is_empty());
}

#[test]
fn staff_without_living_quarters_are_unhired_on_arrival() {
    let oracles = oracles();
    let env = oracles.env();
    let (mut state, a, b) = two_bases();
    let scientist = EmployeeId(2);
    let worker = EmployeeId(3);
    state.hire(Employee::hired(scientist, EmployeeKind::Scientist, a));
    state.hire(Employee::hired(worker, EmployeeKind::Worker, a));

    let mut engine = CampaignEngine::new(&mut state);
    engine
        .start_transfer(
            &env,
            a,
            b,
            TransferPayload::new().with_employee(EmployeeKind::Scientist, scientist),
        )
        .unwrap()
        .unwrap();
    engine.advance_time(&env, 86_400).unwrap();

    let moved = &engine.state().employees[&scientist];
    assert!(!moved.hired);
    assert_eq!(moved.base, None);
    assert!(engine.state().employees[&worker].is_available_at(a));
    assert_eq!(
        engine.state().base(a).unwrap().capacities.current(CapacityKind::Employees),
        1
    );
    assert_eq!(
        engine.state().base(b).unwrap().capacities.current(CapacityKind::Employees),
        0
    );
    assert!(engine.events().iter().any(|event| event.text()
        == Some("Bravo does not have Living Quarters, employees got unhired!")));
}
