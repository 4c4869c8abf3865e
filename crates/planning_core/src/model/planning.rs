//! Planning item domain model.
//!
//! # Responsibility
//! - Define the planning item fields read and written by lifecycle transitions.
//! - Provide the two-field update set applied by spike/unspike.
//!
//! # Invariants
//! - `id` is stable and never reused for another planning item.
//! - `expiry` is only meaningful while `state == ItemState::Spiked`.
//! - `version` is owned by the store and bumps on every successful write.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a planning item.
///
/// Kept as a type alias; ids are opaque strings owned by the store.
pub type PlanningId = String;

/// Lifecycle state of a planning item.
///
/// Only `Active` and `Spiked` are ever written by this crate. The remaining
/// states exist so persisted items in other workflow stages round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    /// Visible and editable.
    Active,
    /// Withdrawn but recoverable until `expiry`.
    Spiked,
    Draft,
    Scheduled,
    Killed,
    Cancelled,
    Postponed,
    Rescheduled,
}

impl ItemState {
    /// Stable string value used in stored records and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Spiked => "spiked",
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Killed => "killed",
            Self::Cancelled => "cancelled",
            Self::Postponed => "postponed",
            Self::Rescheduled => "rescheduled",
        }
    }

    /// Parses a stored state value. Unknown values return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "active" => Some(Self::Active),
            "spiked" => Some(Self::Spiked),
            "draft" => Some(Self::Draft),
            "scheduled" => Some(Self::Scheduled),
            "killed" => Some(Self::Killed),
            "cancelled" => Some(Self::Cancelled),
            "postponed" => Some(Self::Postponed),
            "rescheduled" => Some(Self::Rescheduled),
            _ => None,
        }
    }
}

impl Display for ItemState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimistic-concurrency token for one stored planning item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemVersion(pub u64);

impl ItemVersion {
    /// Version assigned to a record that has never been written.
    pub const INITIAL: Self = Self(1);

    /// Returns the version that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Display for ItemVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Planning item as seen by lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningItem {
    pub id: PlanningId,
    pub state: ItemState,
    /// Unix epoch milliseconds after which a spiked item may be purged.
    pub expiry: Option<i64>,
    pub version: ItemVersion,
    /// Editorial label. Never written by spike/unspike.
    pub slugline: Option<String>,
}

impl PlanningItem {
    /// Creates an active item with a generated id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// Creates an active item with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: impl Into<PlanningId>) -> Self {
        Self {
            id: id.into(),
            state: ItemState::Active,
            expiry: None,
            version: ItemVersion::INITIAL,
            slugline: None,
        }
    }

    pub fn is_spiked(&self) -> bool {
        self.state == ItemState::Spiked
    }

    pub fn is_active(&self) -> bool {
        self.state == ItemState::Active
    }

    /// Returns whether a spiked item has passed its expiry at `now_epoch_ms`.
    ///
    /// Items that are not spiked, or have no expiry, never expire.
    pub fn is_expired(&self, now_epoch_ms: i64) -> bool {
        self.is_spiked() && self.expiry.is_some_and(|expiry| expiry <= now_epoch_ms)
    }

    /// Validates field combinations a store must never persist.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.trim().is_empty() {
            return Err(ItemValidationError::EmptyId);
        }
        if self.state == ItemState::Active && self.expiry.is_some() {
            return Err(ItemValidationError::ExpiryWithoutSpike {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

impl Default for PlanningItem {
    fn default() -> Self {
        Self::new()
    }
}

/// Field set written by a lifecycle transition.
///
/// Both fields are always written together; nothing else on the item changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub state: ItemState,
    pub expiry: Option<i64>,
}

impl ItemUpdate {
    /// Update set moving an item to `Spiked` with the given expiry.
    pub fn spike(expiry_epoch_ms: i64) -> Self {
        Self {
            state: ItemState::Spiked,
            expiry: Some(expiry_epoch_ms),
        }
    }

    /// Update set moving an item back to `Active` and clearing expiry.
    pub fn unspike() -> Self {
        Self {
            state: ItemState::Active,
            expiry: None,
        }
    }

    /// Writes this update set onto `item`.
    pub fn apply_to(&self, item: &mut PlanningItem) {
        item.state = self.state;
        item.expiry = self.expiry;
    }
}

/// Invalid field combinations on a planning item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    EmptyId,
    ExpiryWithoutSpike { id: PlanningId },
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "planning id cannot be empty"),
            Self::ExpiryWithoutSpike { id } => {
                write!(f, "planning item {id} is active but carries an expiry")
            }
        }
    }
}

impl Error for ItemValidationError {}

#[cfg(test)]
mod tests {
    use super::{ItemState, ItemUpdate, ItemValidationError, ItemVersion, PlanningItem};

    #[test]
    fn state_strings_are_stable() {
        for state in [
            ItemState::Active,
            ItemState::Spiked,
            ItemState::Draft,
            ItemState::Scheduled,
            ItemState::Killed,
            ItemState::Cancelled,
            ItemState::Postponed,
            ItemState::Rescheduled,
        ] {
            assert_eq!(ItemState::parse(state.as_str()), Some(state));
        }
        assert_eq!(ItemState::parse("archived"), None);
    }

    #[test]
    fn new_items_get_unique_ids() {
        let a = PlanningItem::new();
        let b = PlanningItem::new();
        assert_ne!(a.id, b.id);
        assert!(a.is_active());
        assert_eq!(a.version, ItemVersion::INITIAL);
    }

    #[test]
    fn update_touches_only_state_and_expiry() {
        let mut item = PlanningItem::with_id("P1");
        item.slugline = Some("budget".to_string());

        ItemUpdate::spike(5_000).apply_to(&mut item);
        assert_eq!(item.state, ItemState::Spiked);
        assert_eq!(item.expiry, Some(5_000));
        assert_eq!(item.slugline.as_deref(), Some("budget"));
        assert_eq!(item.version, ItemVersion::INITIAL);

        ItemUpdate::unspike().apply_to(&mut item);
        assert!(item.is_active());
        assert_eq!(item.expiry, None);
    }

    #[test]
    fn expired_only_when_spiked_and_past_expiry() {
        let mut item = PlanningItem::with_id("P1");
        assert!(!item.is_expired(i64::MAX));

        ItemUpdate::spike(1_000).apply_to(&mut item);
        assert!(!item.is_expired(999));
        assert!(item.is_expired(1_000));
    }

    #[test]
    fn validate_rejects_active_item_with_expiry() {
        let mut item = PlanningItem::with_id("P1");
        item.expiry = Some(10);
        assert!(matches!(
            item.validate(),
            Err(ItemValidationError::ExpiryWithoutSpike { .. })
        ));

        let blank = PlanningItem::with_id("  ");
        assert_eq!(blank.validate(), Err(ItemValidationError::EmptyId));
    }
}
