//! Domain model for planning items and the actors that transition them.
//!
//! # Responsibility
//! - Define the planning item record as seen by lifecycle transitions.
//! - Define the update set written by spike/unspike.
//! - Define the authenticated actor recorded in notifications.
//!
//! # Invariants
//! - Every planning item is identified by a stable `PlanningId`.
//! - Spiking is a recoverable withdrawal, not a delete.

pub mod actor;
pub mod planning;
