//! Service context - dependency container for services
//!
//! Holds the store handle and the chat-platform collaborators needed by services.

use std::sync::Arc;

use chrono::NaiveDateTime;
use dino_core::{Clock, MembershipSystem, MessagingSystem, SystemClock};
use dino_store::Store;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// It provides access to:
/// - The persistent tables
/// - Membership and role operations on the chat platform
/// - Message send / fetch / edit
/// - The local clock
#[derive(Clone)]
pub struct ServiceContext {
    store: Store,
    membership: Arc<dyn MembershipSystem>,
    messaging: Arc<dyn MessagingSystem>,
    clock: Arc<dyn Clock>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        store: Store,
        membership: Arc<dyn MembershipSystem>,
        messaging: Arc<dyn MessagingSystem>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            membership,
            messaging,
            clock,
        }
    }

    /// Get the store handle
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get the membership / role system
    pub fn membership(&self) -> &dyn MembershipSystem {
        self.membership.as_ref()
    }

    /// Get the messaging system
    pub fn messaging(&self) -> &dyn MessagingSystem {
        self.messaging.as_ref()
    }

    /// Current local time
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &self.store)
            .field("membership", &"dyn MembershipSystem")
            .field("messaging", &"dyn MessagingSystem")
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Store>,
    membership: Option<Arc<dyn MembershipSystem>>,
    messaging: Option<Arc<dyn MessagingSystem>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }

    pub fn membership(mut self, membership: Arc<dyn MembershipSystem>) -> Self {
        self.membership = Some(membership);
        self
    }

    pub fn messaging(mut self, messaging: Arc<dyn MessagingSystem>) -> Self {
        self.messaging = Some(messaging);
        self
    }

    /// Use one adapter for both membership and messaging
    pub fn platform<P>(self, platform: Arc<P>) -> Self
    where
        P: MembershipSystem + MessagingSystem + 'static,
    {
        self.membership(platform.clone()).messaging(platform)
    }

    /// Override the clock (defaults to the system clock)
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.membership
                .ok_or_else(|| ServiceError::validation("membership is required"))?,
            self.messaging
                .ok_or_else(|| ServiceError::validation("messaging is required"))?,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        ))
    }
}
