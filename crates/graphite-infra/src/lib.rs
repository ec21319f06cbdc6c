//! Infrastructure layer for Graphite Quest.
//!
//! Contains implementations of the ports defined in `graphite-core`:
//! SQLite quest storage and the Hugging Face text-generation client, plus
//! the data directory and `config.toml` loading the binary uses at startup.

pub mod config;
pub mod sqlite;
pub mod suggest;
