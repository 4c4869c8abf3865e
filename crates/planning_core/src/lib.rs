//! Planning item lifecycle core.
//! Owns the spike/unspike transitions; storage, authentication and
//! notification transport are injected collaborators.

pub mod auth;
pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;

pub use auth::{AuthError, Authenticator, SessionAuthenticator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{load_config, ConfigError, ExpiryPolicy, LoggingSettings, PlanningConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::actor::Actor;
pub use model::planning::{
    ItemState, ItemUpdate, ItemValidationError, ItemVersion, PlanningId, PlanningItem,
};
pub use notify::{EventNotifier, EventPayload, LogNotifier, RecordingNotifier, TransitionEvent};
pub use service::expiry::compute_expiry;
pub use service::spike_service::{
    PlanningSpikeService, SpikeTransition, TransitionError, TransitionResult, UnspikeTransition,
};
pub use store::item_store::{ItemStore, StoreError, StoreResult};
pub use store::memory::MemoryItemStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
