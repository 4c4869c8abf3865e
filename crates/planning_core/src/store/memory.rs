//! In-process item store with version-checked writes.
//!
//! # Invariants
//! - Every successful write bumps the stored `version` by one.
//! - A write never partially applies: validation runs on a copy first.

use crate::model::planning::{ItemUpdate, ItemVersion, PlanningId, PlanningItem};
use crate::store::item_store::{ItemStore, StoreError, StoreResult};
use log::warn;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: Mutex<BTreeMap<PlanningId, PlanningItem>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an item as-is, keeping its version.
    pub fn insert(&self, item: PlanningItem) -> StoreResult<()> {
        item.validate()?;
        self.lock()?.insert(item.id.clone(), item);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().map_or(0, |items| items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, BTreeMap<PlanningId, PlanningItem>>> {
        self.items.lock().map_err(|_| {
            warn!("event=store_lock module=store status=error error_code=lock_poisoned");
            StoreError::Unavailable("item map lock poisoned".to_string())
        })
    }
}

impl ItemStore for MemoryItemStore {
    fn update(
        &self,
        id: &str,
        update: &ItemUpdate,
        expected: ItemVersion,
    ) -> StoreResult<PlanningItem> {
        let mut items = self.lock()?;
        let stored = items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if stored.version != expected {
            return Err(StoreError::Conflict {
                id: id.to_string(),
                expected,
                actual: stored.version,
            });
        }

        let mut next = stored.clone();
        update.apply_to(&mut next);
        next.version = stored.version.next();
        next.validate()?;

        *stored = next.clone();
        Ok(next)
    }

    fn get(&self, id: &str) -> StoreResult<Option<PlanningItem>> {
        Ok(self.lock()?.get(id).cloned())
    }
}
