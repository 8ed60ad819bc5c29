//! Runtime orchestration for the geoscape containment and transfer campaign.
//!
//! This crate wires the pure campaign engine to a tokio worker, a topic-based
//! event bus, save-slot repositories and a string-addressed command surface.
//! Consumers embed [`Runtime`] to drive the clock and interact with the
//! campaign through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`controller`] resolves player-facing names into engine calls
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`save`] and [`repository`] persist campaigns across sessions
//! - [`scenario`] builds the starter campaign
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod controller;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod save;
pub mod scenario;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use controller::{
    BaseSummary, ContainmentCommand, ContainmentReply, Controller, ControllerError,
    SpeciesCount, TransferCommand, TransferListing, TransferReply, TransferRequest,
};
pub use events::{ClockEvent, Event, EventBus, Topic};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveFormat, SaveRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use save::{LoadReport, SAVE_VERSION, SaveError, SaveGame};
