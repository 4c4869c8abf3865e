//! Item store contract and error taxonomy.

use crate::model::planning::{
    ItemUpdate, ItemValidationError, ItemVersion, PlanningId, PlanningItem,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Item no longer exists.
    NotFound(PlanningId),
    /// Stored version moved on since the caller's snapshot.
    Conflict {
        id: PlanningId,
        expected: ItemVersion,
        actual: ItemVersion,
    },
    /// Resulting item would violate model invariants.
    Validation(ItemValidationError),
    /// Backend could not serve the request.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "planning item not found: {id}"),
            Self::Conflict {
                id,
                expected,
                actual,
            } => write!(
                f,
                "planning item {id} was modified concurrently: expected {expected}, found {actual}"
            ),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "item store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for StoreError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Storage engine for planning items.
pub trait ItemStore {
    /// Applies `update` to item `id` if its stored version equals `expected`.
    ///
    /// Returns the persisted item with its new version.
    fn update(
        &self,
        id: &str,
        update: &ItemUpdate,
        expected: ItemVersion,
    ) -> StoreResult<PlanningItem>;

    /// Gets one item by id.
    fn get(&self, id: &str) -> StoreResult<Option<PlanningItem>>;
}

impl<S: ItemStore + ?Sized> ItemStore for &S {
    fn update(
        &self,
        id: &str,
        update: &ItemUpdate,
        expected: ItemVersion,
    ) -> StoreResult<PlanningItem> {
        (**self).update(id, update, expected)
    }

    fn get(&self, id: &str) -> StoreResult<Option<PlanningItem>> {
        (**self).get(id)
    }
}
