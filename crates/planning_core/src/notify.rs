//! Transition notifications for interested observers.
//!
//! # Responsibility
//! - Define the event published after a committed transition.
//! - Define the notifier contract and two in-process notifiers.
//!
//! # Invariants
//! - Publishing is best-effort: `publish` cannot fail the caller.
//! - Events are only built from a persisted item, never from a request.

use crate::model::planning::PlanningId;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub const EVENT_ITEM_SPIKED: &str = "item.spiked";
pub const EVENT_ITEM_UNSPIKED: &str = "item.unspiked";

/// Payload carried by every transition event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub item_id: PlanningId,
    pub actor_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    Spiked(EventPayload),
    Unspiked(EventPayload),
}

impl TransitionEvent {
    /// Stable event name observers subscribe to.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spiked(_) => EVENT_ITEM_SPIKED,
            Self::Unspiked(_) => EVENT_ITEM_UNSPIKED,
        }
    }

    pub fn payload(&self) -> &EventPayload {
        match self {
            Self::Spiked(payload) | Self::Unspiked(payload) => payload,
        }
    }
}

/// Broadcasts transition events.
pub trait EventNotifier {
    fn publish(&self, event: &TransitionEvent);
}

impl<N: EventNotifier + ?Sized> EventNotifier for &N {
    fn publish(&self, event: &TransitionEvent) {
        (**self).publish(event);
    }
}

/// Writes events to the process log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl EventNotifier for LogNotifier {
    fn publish(&self, event: &TransitionEvent) {
        let payload = event.payload();
        info!(
            "event=notify module=notify status=ok name={} item_id={} actor_id={}",
            event.name(),
            payload.item_id,
            payload.actor_id
        );
    }
}

/// Keeps published events in memory, in publish order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<TransitionEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything published so far.
    pub fn events(&self) -> Vec<TransitionEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(_) => {
                warn!("event=notify_read module=notify status=error error_code=lock_poisoned");
                Vec::new()
            }
        }
    }
}

impl EventNotifier for RecordingNotifier {
    fn publish(&self, event: &TransitionEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(_) => warn!(
                "event=notify module=notify status=error name={} error_code=lock_poisoned",
                event.name()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventNotifier, EventPayload, RecordingNotifier, TransitionEvent};

    #[test]
    fn payload_serializes_with_camel_case_keys() {
        let payload = EventPayload {
            item_id: "P1".to_string(),
            actor_id: "U1".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"itemId": "P1", "actorId": "U1"}));
    }

    #[test]
    fn recording_notifier_keeps_publish_order() {
        let notifier = RecordingNotifier::new();
        let payload = EventPayload {
            item_id: "P1".to_string(),
            actor_id: "U1".to_string(),
        };
        notifier.publish(&TransitionEvent::Spiked(payload.clone()));
        notifier.publish(&TransitionEvent::Unspiked(payload));

        let names: Vec<_> = notifier.events().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["item.spiked", "item.unspiked"]);
    }

    #[test]
    fn poisoned_recorder_drops_events_without_panicking() {
        let notifier = RecordingNotifier::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = notifier.events.lock().unwrap();
            panic!("poison the recorder lock");
        }));

        notifier.publish(&TransitionEvent::Spiked(EventPayload {
            item_id: "P1".to_string(),
            actor_id: "U1".to_string(),
        }));
        assert!(notifier.events().is_empty());
    }
}
