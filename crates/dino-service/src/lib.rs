//! # dino-service
//!
//! Application layer: the role assignment coordinator, the birthday registry,
//! the birthday list synchronizer and the daily notifier, plus their outcome types.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dino_service::{RoleService, ServiceContextBuilder};
//!
//! let ctx = ServiceContextBuilder::new()
//!     .store(store)
//!     .platform(discord)
//!     .build()?;
//!
//! let outcome = RoleService::new(&ctx).select_role(guild_id, user_id, role_id).await?;
//! println!("{}", outcome.message());
//! ```

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
