//! Item storage contracts consumed by lifecycle transitions.
//!
//! # Responsibility
//! - Define the single write contract transitions depend on.
//! - Provide an in-process store for embedding and tests.
//!
//! # Invariants
//! - Writes are checked against the caller's expected `ItemVersion`.
//! - Store APIs return semantic errors (`NotFound`, `Conflict`) that
//!   transitions propagate unchanged.

pub mod item_store;
pub mod memory;
