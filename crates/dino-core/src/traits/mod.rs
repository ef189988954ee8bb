//! Ports - traits for the collaborators the domain depends on

mod clock;
mod ports;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ports::{BlobStore, MembershipSystem, MessagingSystem, StoreResult};
