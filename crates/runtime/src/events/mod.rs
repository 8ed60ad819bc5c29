//! Topic-based event bus for runtime events.
//!
//! Engine notifications are published to topics so consumers can subscribe
//! only to what they render: player messages, transfer progress or the clock.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::ClockEvent;
