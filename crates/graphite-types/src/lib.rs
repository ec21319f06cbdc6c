//! Shared domain types for Graphite Quest.
//!
//! This crate contains the core domain types used across the workspace:
//! Quest, Claim, suggestion payloads, bot configuration, and the error
//! taxonomy every layer maps into.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod quest;
pub mod suggestion;
