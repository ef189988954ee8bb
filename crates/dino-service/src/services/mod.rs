//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` and owns one concern:
//! role coordination, the birthday registry, the birthday list message, and the
//! daily scan that ties them together.

pub mod birthday;
pub mod context;
pub mod display;
pub mod embed;
pub mod error;
pub mod notifier;
pub mod role;

// Re-export all services for convenience
pub use birthday::{sort_upcoming, BirthdayService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use embed::EmbedService;
pub use error::{ServiceError, ServiceResult};
pub use notifier::{DailyNotifier, NotifierHandle};
pub use role::RoleService;
