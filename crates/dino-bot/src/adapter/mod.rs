//! Chat platform adapter
//!
//! Implements the membership and messaging ports over serenity's HTTP client
//! and gateway cache.

pub mod convert;
mod discord;

pub use discord::SerenityDiscord;
