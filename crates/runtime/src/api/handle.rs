//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! containment and transfer commands, the campaign clock, save slots, and
//! streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use campaign_core::{AircraftId, CampaignState, TickReport};

use super::errors::{Result, RuntimeError};
use crate::controller::{
    BaseSummary, ContainmentCommand, ContainmentReply, TransferCommand, TransferListing,
    TransferReply, TransferRequest,
};
use crate::events::{Event, EventBus, Topic};
use crate::save::LoadReport;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the reply.
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub async fn containment(&self, command: ContainmentCommand) -> Result<ContainmentReply> {
        self.request(|reply| Command::Containment { command, reply })
            .await?
    }

    /// Starts a base-to-base transfer. Bases, items and species are named as the player sees them.
    pub async fn start_transfer(
        &self,
        source: impl Into<String>,
        destination: impl Into<String>,
        request: TransferRequest,
    ) -> Result<TransferReply> {
        let command = TransferCommand::Start {
            source: source.into(),
            destination: destination.into(),
            request,
        };
        self.request(|reply| Command::Transfer { command, reply })
            .await?
    }

    /// Ships an aircraft's recovered aliens from the mission site.
    pub async fn transfer_from_mission(
        &self,
        aircraft: AircraftId,
        destination: impl Into<String>,
    ) -> Result<TransferReply> {
        let command = TransferCommand::FromMission {
            aircraft,
            destination: destination.into(),
        };
        self.request(|reply| Command::Transfer { command, reply })
            .await?
    }

    /// Advances campaign time by `seconds` game seconds.
    pub async fn advance(&self, seconds: u64) -> Result<TickReport> {
        self.request(|reply| Command::Advance { seconds, reply })
            .await?
    }

    pub async fn resume_time(&self) -> Result<()> {
        self.request(|reply| Command::ResumeTime { reply }).await
    }

    /// Summary of one base, by name or index.
    pub async fn base_summary(&self, base: impl Into<String>) -> Result<BaseSummary> {
        let base = base.into();
        self.request(|reply| Command::BaseSummary { base, reply })
            .await?
    }

    pub async fn list_transfers(&self) -> Result<Vec<TransferListing>> {
        self.request(|reply| Command::ListTransfers { reply }).await
    }

    /// Returns `true` if the technology was not researched before.
    pub async fn mark_researched(&self, tech: impl Into<String>) -> Result<bool> {
        let tech = tech.into();
        self.request(|reply| Command::MarkResearched { tech, reply })
            .await
    }

    pub async fn save(&self, slot: impl Into<String>) -> Result<()> {
        let slot = slot.into();
        self.request(|reply| Command::Save { slot, reply }).await?
    }

    /// Replaces the campaign with the save in `slot`.
    pub async fn load(&self, slot: impl Into<String>) -> Result<LoadReport> {
        let slot = slot.into();
        self.request(|reply| Command::Load { slot, reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Campaign` - Containment messages, mails and triggers
    /// - `Topic::Transfer` - Transfers started and resolved
    /// - `Topic::Clock` - Ticks, time stops and loads
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut transfers = handle.subscribe(Topic::Transfer);
    /// while let Ok(event) = transfers.recv().await {
    ///     // Handle transfer events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Query the current campaign state (read-only snapshot)
    pub async fn query_state(&self) -> Result<CampaignState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
