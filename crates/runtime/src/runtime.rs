//! High-level runtime orchestrator.
//!
//! The runtime owns the campaign worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the geoscape clock.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use campaign_core::{CampaignState, OracleSnapshot, TickReport};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::repository::SaveRepository;
use crate::scenario;
use crate::workers::{CampaignWorker, Command};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Campaign seconds that pass per real second. Zero pauses [`Runtime::run`].
    pub time_scale: u64,
    /// Real time between two clock ticks in [`Runtime::run`].
    pub tick_interval: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    /// Campaign seconds covered by one tick.
    pub fn seconds_per_tick(&self) -> u64 {
        let millis = u128::from(self.time_scale) * self.tick_interval.as_millis() / 1000;
        u64::try_from(millis).unwrap_or(u64::MAX)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            // one game hour per real second
            time_scale: 3600,
            tick_interval: Duration::from_secs(1),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that drives the campaign.
///
/// Runtime owns the worker task; [`RuntimeHandle`] provides a cloneable
/// façade for clients.
pub struct Runtime {
    config: RuntimeConfig,
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Advances the campaign by one tick's worth of game time.
    ///
    /// Returns `None` while the time scale is zero.
    pub async fn step(&self) -> Result<Option<TickReport>> {
        let seconds = self.config.seconds_per_tick();
        if seconds == 0 {
            return Ok(None);
        }
        self.handle.advance(seconds).await.map(Some)
    }

    /// Ticks the clock every `tick_interval` until a command fails.
    pub async fn run(&self) -> Result<()> {
        let mut interval = tokio::time::interval(self.config.tick_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.step().await?;
        }
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding [`RuntimeHandle`] is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<CampaignState>,
    oracles: Option<OracleSnapshot>,
    repository: Option<Arc<dyn SaveRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            oracles: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial campaign state. Defaults to the starter campaign.
    pub fn initial_state(mut self, state: CampaignState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set required oracle data
    pub fn oracles(mut self, oracles: OracleSnapshot) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the repository used by save and load commands (optional)
    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let state = match self.state {
            Some(state) => state,
            None => scenario::starter_campaign(&oracles)?,
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = CampaignWorker::new(state, oracles, self.repository, command_rx, event_bus);
        let worker_handle = tokio::spawn(worker.run());

        tracing::info!(
            "Runtime started (time scale {}x, tick {:?})",
            self.config.time_scale,
            self.config.tick_interval
        );

        Ok(Runtime {
            config: self.config,
            handle,
            worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_length_follows_scale_and_interval() {
        let config = RuntimeConfig {
            time_scale: 60,
            tick_interval: Duration::from_millis(500),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.seconds_per_tick(), 30);

        let paused = RuntimeConfig {
            time_scale: 0,
            ..RuntimeConfig::default()
        };
        assert_eq!(paused.seconds_per_tick(), 0);
    }
}
