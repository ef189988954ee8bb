//! Error types shared by every layer

mod domain_error;
mod external_error;

pub use domain_error::DomainError;
pub use external_error::{ExternalError, ExternalResult};
