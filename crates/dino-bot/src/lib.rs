//! # dino-bot
//!
//! Discord front end: the serenity implementation of the platform ports, slash
//! command definitions, interaction handlers and the process wiring.

pub mod adapter;
pub mod commands;
pub mod handlers;
pub mod server;
