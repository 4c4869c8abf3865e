//! Spike/unspike use-case service.
//!
//! # Responsibility
//! - Build the two-field update set for each transition.
//! - Delegate the write to the item store with the caller's version.
//! - Publish exactly one event per committed transition.
//!
//! # Invariants
//! - The store write returns `Ok` before any event is built or published.
//! - Store errors propagate without retry; nothing is published for them.
//! - Spiking an already spiked item is allowed and refreshes `expiry`.
//! - No field other than `state` and `expiry` is written.

use crate::auth::{AuthError, Authenticator};
use crate::clock::Clock;
use crate::config::ExpiryPolicy;
use crate::model::actor::Actor;
use crate::model::planning::{ItemUpdate, ItemVersion, PlanningId, PlanningItem};
use crate::notify::{EventNotifier, EventPayload, TransitionEvent};
use crate::service::expiry::compute_expiry;
use crate::store::item_store::{ItemStore, StoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type TransitionResult<T> = Result<T, TransitionError>;

/// Service error for lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// No authenticated actor could be resolved.
    AuthenticationRequired,
    /// Item vanished between read and write.
    NotFound(PlanningId),
    /// Caller's snapshot is out of date.
    Conflict {
        id: PlanningId,
        expected: ItemVersion,
        actual: ItemVersion,
    },
    /// Any other store failure.
    Store(StoreError),
}

impl Display for TransitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationRequired => write!(f, "authentication required"),
            Self::NotFound(id) => write!(f, "planning item not found: {id}"),
            Self::Conflict {
                id,
                expected,
                actual,
            } => write!(
                f,
                "planning item {id} changed since it was read: expected {expected}, found {actual}"
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransitionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for TransitionError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Conflict {
                id,
                expected,
                actual,
            } => Self::Conflict {
                id,
                expected,
                actual,
            },
            other => Self::Store(other),
        }
    }
}

impl From<AuthError> for TransitionError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::AuthenticationRequired => Self::AuthenticationRequired,
        }
    }
}

impl TransitionError {
    fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "authentication_required",
            Self::NotFound(_) => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Store(_) => "store_failed",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TransitionKind {
    Spike,
    Unspike,
}

impl TransitionKind {
    fn log_event(self) -> &'static str {
        match self {
            Self::Spike => "planning_spike",
            Self::Unspike => "planning_unspike",
        }
    }

    fn event(self, payload: EventPayload) -> TransitionEvent {
        match self {
            Self::Spike => TransitionEvent::Spiked(payload),
            Self::Unspike => TransitionEvent::Unspiked(payload),
        }
    }
}

/// Moves a planning item to `Spiked` with a computed expiry.
pub struct SpikeTransition<S: ItemStore, N: EventNotifier, C: Clock> {
    store: S,
    notifier: N,
    clock: C,
    policy: ExpiryPolicy,
}

impl<S: ItemStore, N: EventNotifier, C: Clock> SpikeTransition<S, N, C> {
    pub fn new(store: S, notifier: N, clock: C, policy: ExpiryPolicy) -> Self {
        Self {
            store,
            notifier,
            clock,
            policy,
        }
    }

    /// Spikes `item_id` on behalf of `actor`.
    ///
    /// # Contract
    /// - `original` is the caller's current snapshot; its `version` is the
    ///   expected store version.
    /// - Sets `state = Spiked` and `expiry = now + policy` and nothing else.
    /// - Publishes `item.spiked` only after the write succeeds.
    pub fn apply(
        &self,
        actor: &Actor,
        item_id: &str,
        original: &PlanningItem,
    ) -> TransitionResult<PlanningItem> {
        let expiry = compute_expiry(self.clock.now_epoch_ms(), &self.policy);
        commit(
            &self.store,
            &self.notifier,
            TransitionKind::Spike,
            actor,
            item_id,
            original,
            ItemUpdate::spike(expiry),
        )
    }
}

/// Moves a planning item back to `Active` and clears its expiry.
pub struct UnspikeTransition<S: ItemStore, N: EventNotifier> {
    store: S,
    notifier: N,
}

impl<S: ItemStore, N: EventNotifier> UnspikeTransition<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Unspikes `item_id` on behalf of `actor`.
    ///
    /// # Contract
    /// - Sets `state = Active` and `expiry = None` unconditionally.
    /// - Publishes `item.unspiked` only after the write succeeds.
    pub fn apply(
        &self,
        actor: &Actor,
        item_id: &str,
        original: &PlanningItem,
    ) -> TransitionResult<PlanningItem> {
        commit(
            &self.store,
            &self.notifier,
            TransitionKind::Unspike,
            actor,
            item_id,
            original,
            ItemUpdate::unspike(),
        )
    }
}

fn commit<S: ItemStore, N: EventNotifier>(
    store: &S,
    notifier: &N,
    kind: TransitionKind,
    actor: &Actor,
    item_id: &str,
    original: &PlanningItem,
    update: ItemUpdate,
) -> TransitionResult<PlanningItem> {
    let started_at = Instant::now();
    info!(
        "event={} module=service status=start item_id={} version={}",
        kind.log_event(),
        item_id,
        original.version
    );

    let item = match store.update(item_id, &update, original.version) {
        Ok(item) => item,
        Err(err) => {
            let err = TransitionError::from(err);
            error!(
                "event={} module=service status=error item_id={} duration_ms={} error_code={} error={}",
                kind.log_event(),
                item_id,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            );
            return Err(err);
        }
    };

    notifier.publish(&kind.event(EventPayload {
        item_id: item_id.to_string(),
        actor_id: actor.id.clone(),
    }));

    info!(
        "event={} module=service status=ok item_id={} state={} version={} duration_ms={}",
        kind.log_event(),
        item_id,
        item.state,
        item.version,
        started_at.elapsed().as_millis()
    );
    Ok(item)
}

/// Caller-facing facade resolving the actor before each transition.
pub struct PlanningSpikeService<S: ItemStore, N: EventNotifier, C: Clock> {
    store: S,
    notifier: N,
    clock: C,
    policy: ExpiryPolicy,
}

impl<S: ItemStore, N: EventNotifier, C: Clock> PlanningSpikeService<S, N, C> {
    pub fn new(store: S, notifier: N, clock: C, policy: ExpiryPolicy) -> Self {
        Self {
            store,
            notifier,
            clock,
            policy,
        }
    }

    /// Spikes one item. Fails with `AuthenticationRequired` before any write
    /// when `auth` resolves no actor.
    pub fn spike<A: Authenticator + ?Sized>(
        &self,
        auth: &A,
        item_id: &str,
        original: &PlanningItem,
    ) -> TransitionResult<PlanningItem> {
        let actor = require_actor(auth, item_id)?;
        SpikeTransition::new(&self.store, &self.notifier, &self.clock, self.policy)
            .apply(&actor, item_id, original)
    }

    /// Unspikes one item. Same authentication contract as `spike`.
    pub fn unspike<A: Authenticator + ?Sized>(
        &self,
        auth: &A,
        item_id: &str,
        original: &PlanningItem,
    ) -> TransitionResult<PlanningItem> {
        let actor = require_actor(auth, item_id)?;
        UnspikeTransition::new(&self.store, &self.notifier).apply(&actor, item_id, original)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn require_actor<A: Authenticator + ?Sized>(auth: &A, item_id: &str) -> TransitionResult<Actor> {
    match auth.current_actor(true) {
        Ok(Some(actor)) => Ok(actor),
        Ok(None) | Err(AuthError::AuthenticationRequired) => {
            error!(
                "event=planning_auth module=service status=error item_id={} error_code=authentication_required",
                item_id
            );
            Err(TransitionError::AuthenticationRequired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TransitionError;
    use crate::auth::AuthError;
    use crate::model::planning::ItemVersion;
    use crate::store::item_store::StoreError;

    #[test]
    fn store_errors_map_to_semantic_variants() {
        assert_eq!(
            TransitionError::from(StoreError::NotFound("P1".to_string())),
            TransitionError::NotFound("P1".to_string())
        );
        assert!(matches!(
            TransitionError::from(StoreError::Conflict {
                id: "P1".to_string(),
                expected: ItemVersion(1),
                actual: ItemVersion(3),
            }),
            TransitionError::Conflict { .. }
        ));
        assert!(matches!(
            TransitionError::from(StoreError::Unavailable("down".to_string())),
            TransitionError::Store(_)
        ));
        assert_eq!(
            TransitionError::from(AuthError::AuthenticationRequired),
            TransitionError::AuthenticationRequired
        );
    }
}
