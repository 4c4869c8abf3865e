//! Planning lifecycle use-case services.
//!
//! # Responsibility
//! - Orchestrate store writes and notifications into spike/unspike use-cases.
//! - Keep transport and authentication layers decoupled from storage details.

pub mod expiry;
pub mod spike_service;
