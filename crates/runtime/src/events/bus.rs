//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use campaign_core::CampaignEvent;

use super::types::ClockEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Player messages, event mail, triggers and collected species
    Campaign,
    /// Transfers starting and resolving
    Transfer,
    /// Ticks, time stops and loads
    Clock,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Campaign, Topic::Transfer, Topic::Clock];
}

/// Event wrapper that carries the typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Campaign(CampaignEvent),
    Clock(ClockEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Campaign(
                CampaignEvent::TransferStarted { .. } | CampaignEvent::TransferResolved { .. },
            ) => Topic::Transfer,
            Event::Campaign(CampaignEvent::TimeStopped(_)) => Topic::Clock,
            Event::Campaign(_) => Topic::Campaign,
            Event::Clock(_) => Topic::Clock,
        }
    }
}

/// Topic-based event bus
///
/// Channels are created up front for every topic, so subscribing never fails.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic) {
            if tx.send(event).is_err() {
                // No subscribers for this topic - this is normal, not an error
                tracing::trace!("No subscribers for topic {:?}", topic);
            }
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // every topic is created in the constructor
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::{BaseId, MessageCategory, StopReason, TransferId};

    #[test]
    fn events_route_by_kind() {
        let message = Event::Campaign(CampaignEvent::message(MessageCategory::Standard, "hi"));
        assert_eq!(message.topic(), Topic::Campaign);

        let resolved = Event::Campaign(CampaignEvent::TransferResolved {
            id: TransferId(0),
            destination: BaseId(1),
            delivered: true,
        });
        assert_eq!(resolved.topic(), Topic::Transfer);

        let stopped = Event::Campaign(CampaignEvent::TimeStopped(StopReason::BaseAttack(BaseId(0))));
        assert_eq!(stopped.topic(), Topic::Clock);
    }

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut transfers = bus.subscribe(Topic::Transfer);
        bus.publish(Event::Campaign(CampaignEvent::message(
            MessageCategory::Standard,
            "ignored",
        )));
        let started = Event::Campaign(CampaignEvent::TransferResolved {
            id: TransferId(3),
            destination: BaseId(0),
            delivered: false,
        });
        bus.publish(started.clone());
        assert_eq!(transfers.recv().await.unwrap(), started);
    }
}
