//! Campaign worker that owns the authoritative [`CampaignState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), runs them
//! through the controller or the engine, and publishes the resulting events
//! to the [`EventBus`].

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use campaign_core::{CampaignEngine, CampaignEvent, CampaignState, OracleSnapshot, TickReport};

use crate::api::{Result, RuntimeError};
use crate::controller::{
    BaseSummary, ContainmentCommand, ContainmentReply, Controller, TransferCommand,
    TransferListing, TransferReply,
};
use crate::events::{ClockEvent, Event, EventBus};
use crate::repository::SaveRepository;
use crate::save::{self, LoadReport};

/// Commands that can be sent to the campaign worker.
pub enum Command {
    Containment {
        command: ContainmentCommand,
        reply: oneshot::Sender<Result<ContainmentReply>>,
    },
    Transfer {
        command: TransferCommand,
        reply: oneshot::Sender<Result<TransferReply>>,
    },
    /// Advance the campaign clock by a number of game seconds.
    Advance {
        seconds: u64,
        reply: oneshot::Sender<Result<TickReport>>,
    },
    ResumeTime {
        reply: oneshot::Sender<()>,
    },
    BaseSummary {
        base: String,
        reply: oneshot::Sender<Result<BaseSummary>>,
    },
    ListTransfers {
        reply: oneshot::Sender<Vec<TransferListing>>,
    },
    /// Query the current campaign state (read-only clone).
    QueryState {
        reply: oneshot::Sender<CampaignState>,
    },
    /// Research completed outside this subsystem.
    MarkResearched {
        tech: String,
        reply: oneshot::Sender<bool>,
    },
    Save {
        slot: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Load {
        slot: String,
        reply: oneshot::Sender<Result<LoadReport>>,
    },
}

/// Background task that processes campaign commands.
pub struct CampaignWorker {
    state: CampaignState,
    oracles: OracleSnapshot,
    repository: Option<Arc<dyn SaveRepository>>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl CampaignWorker {
    pub fn new(
        state: CampaignState,
        oracles: OracleSnapshot,
        repository: Option<Arc<dyn SaveRepository>>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            "CampaignWorker initialized with {} bases, {} pending transfers",
            state.founded_bases().count(),
            state.transfers.len()
        );

        Self {
            state,
            oracles,
            repository,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("CampaignWorker command channel closed, stopping");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Containment { command, reply } => {
                let result = self.with_controller(|controller| controller.containment(command));
                if reply.send(result).is_err() {
                    debug!("Containment reply channel closed (caller dropped)");
                }
            }
            Command::Transfer { command, reply } => {
                let result = self.with_controller(|controller| controller.transfer(command));
                if reply.send(result).is_err() {
                    debug!("Transfer reply channel closed (caller dropped)");
                }
            }
            Command::Advance { seconds, reply } => {
                let result = self.handle_advance(seconds);
                if reply.send(result).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::ResumeTime { reply } => {
                CampaignEngine::new(&mut self.state).resume_time();
                self.event_bus.publish(Event::Clock(ClockEvent::Resumed {
                    date: self.state.date,
                }));
                if reply.send(()).is_err() {
                    debug!("ResumeTime reply channel closed (caller dropped)");
                }
            }
            Command::BaseSummary { base, reply } => {
                let result = Controller::new(&mut self.state, &self.oracles)
                    .base_summary(&base)
                    .map_err(RuntimeError::from);
                if reply.send(result).is_err() {
                    debug!("BaseSummary reply channel closed (caller dropped)");
                }
            }
            Command::ListTransfers { reply } => {
                let listings = Controller::new(&mut self.state, &self.oracles).list_transfers();
                if reply.send(listings).is_err() {
                    debug!("ListTransfers reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::MarkResearched { tech, reply } => {
                let added = self.oracles.research.mark_researched(tech);
                if reply.send(added).is_err() {
                    debug!("MarkResearched reply channel closed (caller dropped)");
                }
            }
            Command::Save { slot, reply } => {
                let result = self.handle_save(&slot);
                if reply.send(result).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
            }
            Command::Load { slot, reply } => {
                let result = self.handle_load(&slot);
                if reply.send(result).is_err() {
                    debug!("Load reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Runs one controller command and publishes its events, even on failure.
    fn with_controller<T, E>(
        &mut self,
        op: impl FnOnce(&mut Controller<'_>) -> std::result::Result<T, E>,
    ) -> Result<T>
    where
        RuntimeError: From<E>,
    {
        let mut controller = Controller::new(&mut self.state, &self.oracles);
        let result = op(&mut controller);
        let events = controller.into_events();
        self.publish(events);
        result.map_err(RuntimeError::from)
    }

    fn handle_advance(&mut self, seconds: u64) -> Result<TickReport> {
        let env = self.oracles.env();
        let mut engine = CampaignEngine::new(&mut self.state);
        let result = engine.advance_time(&env, seconds);
        let events = engine.into_events();
        self.publish(events);

        let report = result?;
        if report.advanced {
            self.event_bus.publish(Event::Clock(ClockEvent::Advanced {
                date: report.date,
                resolved: report.resolved,
                overflows: report.overflows.clone(),
            }));
        }
        Ok(report)
    }

    fn handle_save(&self, slot: &str) -> Result<()> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::NoRepository)?;
        let save = save::encode(&self.state, &self.oracles);
        repository.save(slot, &save)?;
        info!("Campaign saved to slot '{}' at {}", slot, self.state.date);
        Ok(())
    }

    fn handle_load(&mut self, slot: &str) -> Result<LoadReport> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::NoRepository)?;
        let save = repository
            .load(slot)?
            .ok_or_else(|| RuntimeError::SaveNotFound(slot.to_owned()))?;
        let (state, report) = save::decode(save, &self.oracles)?;
        self.state = state;

        if !report.is_clean() {
            warn!(
                "Slot '{}' loaded with {} warnings ({} skipped, {} transfers dropped)",
                slot,
                report.warnings.len(),
                report.skipped,
                report.dropped_transfers
            );
        }
        info!("Campaign loaded from slot '{}' at {}", slot, self.state.date);
        self.event_bus.publish(Event::Clock(ClockEvent::Loaded {
            date: self.state.date,
            warnings: report.warnings.len(),
        }));
        Ok(report)
    }

    /// Publishes engine events and logs their player-facing text.
    fn publish(&self, events: Vec<CampaignEvent>) {
        for event in events {
            if let Some(text) = event.text() {
                info!(target: "runtime::messages", "{text}");
            }
            self.event_bus.publish(Event::Campaign(event));
        }
    }
}
