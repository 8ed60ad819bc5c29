//! Console-level controller for containment and transfer commands.
//!
//! Every command resolves its string references first. A reference that does
//! not resolve is logged and rejected before any state is touched; otherwise
//! the command is delegated to [`CampaignEngine`] and the engine's events are
//! collected for the caller to publish.

mod commands;
mod views;

pub use commands::{
    ContainmentCommand, ContainmentReply, TransferCommand, TransferReply, TransferRequest,
};
pub use views::{BaseSummary, SpeciesCount, TransferListing};

use thiserror::Error;
use tracing::warn;

use campaign_core::{
    AlienCargo, BaseId, CampaignEngine, CampaignEnv, CampaignError, CampaignEvent, CampaignState,
    CapacityKind, CargoError, ContainmentError, EmployeeId, ErrorSeverity, ItemOracle,
    OracleSnapshot, SpeciesId, SpeciesOracle, TransferError, TransferPayload,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("no base named '{0}'")]
    UnknownBase(String),

    #[error("no species named '{0}'")]
    UnknownSpecies(String),

    #[error("no item named '{0}'")]
    UnknownItem(String),

    #[error("{0} does not exist")]
    UnknownEmployee(EmployeeId),

    #[error(transparent)]
    Cargo(#[from] CargoError),

    #[error(transparent)]
    Containment(#[from] ContainmentError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl CampaignError for ControllerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ControllerError::UnknownBase(_)
            | ControllerError::UnknownSpecies(_)
            | ControllerError::UnknownItem(_)
            | ControllerError::UnknownEmployee(_) => ErrorSeverity::Validation,
            ControllerError::Cargo(err) => err.severity(),
            ControllerError::Containment(err) => err.severity(),
            ControllerError::Transfer(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ControllerError::UnknownBase(_) => "CONTROLLER_UNKNOWN_BASE",
            ControllerError::UnknownSpecies(_) => "CONTROLLER_UNKNOWN_SPECIES",
            ControllerError::UnknownItem(_) => "CONTROLLER_UNKNOWN_ITEM",
            ControllerError::UnknownEmployee(_) => "CONTROLLER_UNKNOWN_EMPLOYEE",
            ControllerError::Cargo(err) => err.error_code(),
            ControllerError::Containment(err) => err.error_code(),
            ControllerError::Transfer(err) => err.error_code(),
        }
    }
}

pub type ControllerResult<T> = std::result::Result<T, ControllerError>;

/// Dispatches typed commands against one campaign.
pub struct Controller<'a> {
    state: &'a mut CampaignState,
    oracles: &'a OracleSnapshot,
    events: Vec<CampaignEvent>,
}

impl<'a> Controller<'a> {
    pub fn new(state: &'a mut CampaignState, oracles: &'a OracleSnapshot) -> Self {
        Self {
            state,
            oracles,
            events: Vec::new(),
        }
    }

    /// Events raised so far, including those of commands that failed part-way.
    pub fn into_events(self) -> Vec<CampaignEvent> {
        self.events
    }

    pub fn containment(&mut self, command: ContainmentCommand) -> ControllerResult<ContainmentReply> {
        match command {
            ContainmentCommand::AddOne {
                base,
                species,
                dead,
            } => {
                let base = self.resolve_base(&base)?;
                let species = self.resolve_species(&species)?;
                self.run(|engine, _| engine.add_alien_to_container(base, species, dead))?;
                Ok(ContainmentReply::Added)
            }
            ContainmentCommand::KillAll { base } => {
                let base = self.resolve_base(&base)?;
                let killed = self.run(|engine, _| engine.kill_all_aliens(base))?;
                Ok(ContainmentReply::Killed(killed))
            }
            ContainmentCommand::KillOne { base, species } => {
                let base = self.resolve_base(&base)?;
                let species = self.resolve_species(&species)?;
                self.run(|engine, _| engine.kill_one_alien(base, species))?;
                Ok(ContainmentReply::Killed(1))
            }
            ContainmentCommand::Collect {
                aircraft,
                species,
                alive,
                dead,
            } => {
                let species = self.resolve_species(&species)?;
                self.run(|engine, env| {
                    engine.collect_alien_from_battlefield(env, aircraft, species, alive, dead)
                })?;
                Ok(ContainmentReply::Collected)
            }
            ContainmentCommand::Settle { aircraft } => {
                let report = self.run(|engine, env| engine.settle_aircraft_cargo(env, aircraft))?;
                Ok(ContainmentReply::Settled(report))
            }
            ContainmentCommand::ConsumeForResearch { base, amount } => {
                let base = self.resolve_base(&base)?;
                let used = self.run(|engine, _| engine.consume_aliens_for_research(base, amount))?;
                Ok(ContainmentReply::Consumed(
                    used.into_iter().map(|species| self.species_key(species)).collect(),
                ))
            }
        }
    }

    pub fn transfer(&mut self, command: TransferCommand) -> ControllerResult<TransferReply> {
        let started = match command {
            TransferCommand::Start {
                source,
                destination,
                request,
            } => {
                let source = self.resolve_base(&source)?;
                let destination = self.resolve_base(&destination)?;
                let payload = self.build_payload(&request)?;
                self.run(|engine, env| engine.start_transfer(env, source, destination, payload))?
            }
            TransferCommand::FromMission {
                aircraft,
                destination,
            } => {
                let destination = self.resolve_base(&destination)?;
                self.run(|engine, env| {
                    engine.start_transfer_from_mission(env, aircraft, destination)
                })?
            }
        };
        Ok(started.map_or(TransferReply::Empty, TransferReply::Started))
    }

    pub fn base_summary(&self, base: &str) -> ControllerResult<BaseSummary> {
        let id = self.resolve_base(base)?;
        let base = self
            .state
            .founded_base(id)
            .ok_or_else(|| ControllerError::UnknownBase(id.to_string()))?;
        let containment = base.containment.as_ref();
        Ok(BaseSummary {
            id,
            name: base.name.clone(),
            has_containment: containment.is_some(),
            alive: containment.map_or(0, |c| c.alive()),
            dead: containment.map_or(0, |c| c.dead()),
            capacity: base.capacities.get(CapacityKind::Aliens),
            species: containment
                .map(|c| c.cargo().iter().map(|entry| self.count(entry)).collect())
                .unwrap_or_default(),
            incoming_transfers: self
                .state
                .transfers
                .iter()
                .filter(|transfer| transfer.destination == id)
                .count(),
        })
    }

    /// Every in-flight transfer with its payload, in roster order.
    pub fn list_transfers(&self) -> Vec<TransferListing> {
        self.state
            .transfers
            .iter()
            .map(|transfer| {
                let payload = &transfer.payload;
                TransferListing {
                    id: transfer.id,
                    source: transfer.source.map(|base| self.base_name(base)),
                    destination: self.base_name(transfer.destination),
                    arrival: transfer.arrival,
                    items: payload
                        .items
                        .iter()
                        .map(|(item, amount)| {
                            let key = self
                                .oracles
                                .items
                                .definition(*item)
                                .map_or_else(|| item.to_string(), |def| def.key);
                            (key, *amount)
                        })
                        .collect(),
                    employees: payload
                        .employees
                        .iter()
                        .flat_map(|(kind, ids)| ids.iter().map(move |id| (*kind, *id)))
                        .collect(),
                    aliens: payload
                        .aliens
                        .iter()
                        .flat_map(|cargo| cargo.iter())
                        .map(|entry| self.count(entry))
                        .collect(),
                    aircraft: payload
                        .aircraft
                        .iter()
                        .map(|id| {
                            self.state
                                .aircraft
                                .get(id)
                                .map_or_else(|| id.to_string(), |craft| craft.name.clone())
                        })
                        .collect(),
                }
            })
            .collect()
    }

    fn run<T, E>(
        &mut self,
        op: impl FnOnce(&mut CampaignEngine<'_>, &CampaignEnv<'_>) -> Result<T, E>,
    ) -> ControllerResult<T>
    where
        ControllerError: From<E>,
    {
        let env = self.oracles.env();
        let mut engine = CampaignEngine::new(self.state);
        let result = op(&mut engine, &env);
        self.events.extend(engine.into_events());
        result.map_err(ControllerError::from)
    }

    fn build_payload(&self, request: &TransferRequest) -> ControllerResult<TransferPayload> {
        let mut payload = TransferPayload::new();
        for (key, amount) in &request.items {
            let item = self.oracles.items.resolve(key).ok_or_else(|| {
                warn!(target: "runtime::controller", item = %key, "unknown item");
                ControllerError::UnknownItem(key.clone())
            })?;
            payload.add_item(item, *amount);
        }
        for &id in &request.employees {
            let employee = self
                .state
                .employees
                .get(&id)
                .ok_or(ControllerError::UnknownEmployee(id))?;
            payload.add_employee(employee.kind, id);
        }
        if !request.aliens.is_empty() {
            let mut cargo = AlienCargo::new();
            for (key, alive, dead) in &request.aliens {
                let species = self.resolve_species(key)?;
                let alive = i32::try_from(*alive).unwrap_or(i32::MAX);
                let dead = i32::try_from(*dead).unwrap_or(i32::MAX);
                cargo.add(species, alive, dead)?;
            }
            payload.aliens = Some(cargo);
        }
        for &aircraft in &request.aircraft {
            payload.add_aircraft(aircraft);
        }
        Ok(payload)
    }

    /// Accepts a base index or a case-insensitive base name.
    fn resolve_base(&self, reference: &str) -> ControllerResult<BaseId> {
        let reference = reference.trim();
        let found = match reference.parse::<u16>() {
            Ok(index) => self.state.founded_base(BaseId(index)).map(|base| base.id),
            Err(_) => self
                .state
                .founded_bases()
                .find(|base| base.name.eq_ignore_ascii_case(reference))
                .map(|base| base.id),
        };
        found.ok_or_else(|| {
            warn!(target: "runtime::controller", base = %reference, "unknown base");
            ControllerError::UnknownBase(reference.to_owned())
        })
    }

    fn resolve_species(&self, key: &str) -> ControllerResult<SpeciesId> {
        self.oracles.species.resolve(key.trim()).ok_or_else(|| {
            warn!(target: "runtime::controller", species = %key, "unknown species");
            ControllerError::UnknownSpecies(key.to_owned())
        })
    }

    fn species_key(&self, species: SpeciesId) -> String {
        self.oracles
            .species
            .key(species)
            .unwrap_or_else(|| species.to_string())
    }

    fn base_name(&self, base: BaseId) -> String {
        self.state
            .base(base)
            .map_or_else(|| base.to_string(), |base| base.name.clone())
    }

    fn count(&self, entry: &campaign_core::AlienCargoEntry) -> SpeciesCount {
        SpeciesCount::from_entry(entry, self.oracles.species.key(entry.species))
    }
}
