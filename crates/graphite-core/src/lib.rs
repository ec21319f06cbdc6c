//! Business logic and port definitions for Graphite Quest.
//!
//! This crate defines the "ports" (repository, suggestion provider, identity
//! resolver traits) that the infrastructure and gateway layers implement,
//! plus the services and slash-command handlers built on top of them. It
//! depends only on `graphite-types` -- never on `graphite-infra` or any
//! database/IO crate.

pub mod command;
pub mod identity;
pub mod repository;
pub mod service;
pub mod suggest;

#[cfg(test)]
pub(crate) mod test_support;
