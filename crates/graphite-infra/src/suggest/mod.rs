//! Text-generation provider implementations.
//!
//! Contains concrete implementations of the [`SuggestionProvider`] trait
//! defined in `graphite-core`.
//!
//! [`SuggestionProvider`]: graphite_core::suggest::provider::SuggestionProvider

pub mod huggingface;
