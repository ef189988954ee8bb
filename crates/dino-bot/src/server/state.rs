//! Bot state
//!
//! Shared dependencies for the event handler.

use crate::adapter::SerenityDiscord;
use dino_core::SystemClock;
use dino_service::{DailyNotifier, NotifierHandle, ServiceContext};
use dino_store::Store;
use parking_lot::Mutex;
use serenity::all::Context;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Slot for the running notifier, shared with the shutdown task
pub type NotifierSlot = Arc<Mutex<Option<NotifierHandle>>>;

/// Bot application state
///
/// The service context needs the client's HTTP and cache handles, so it is
/// built on the first event rather than at startup.
#[derive(Clone)]
pub struct BotState {
    store: Store,
    check_interval: Duration,
    services: Arc<OnceLock<ServiceContext>>,
    notifier: NotifierSlot,
}

impl BotState {
    /// Create a new bot state
    pub fn new(store: Store, check_interval: Duration) -> Self {
        Self {
            store,
            check_interval,
            services: Arc::new(OnceLock::new()),
            notifier: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the service context, building it from the client context on first use
    pub fn services(&self, ctx: &Context) -> &ServiceContext {
        self.services.get_or_init(|| {
            let discord = Arc::new(SerenityDiscord::new(ctx.http.clone(), ctx.cache.clone()));
            ServiceContext::new(
                self.store.clone(),
                discord.clone(),
                discord,
                Arc::new(SystemClock),
            )
        })
    }

    /// Start the daily notifier unless it is already running.
    ///
    /// Returns whether a new notifier was started.
    pub fn start_notifier(&self, ctx: &Context) -> bool {
        let mut slot = self.notifier.lock();
        if slot.as_ref().is_some_and(NotifierHandle::is_running) {
            return false;
        }
        let notifier = Arc::new(DailyNotifier::new(self.services(ctx).clone()));
        *slot = Some(notifier.spawn(self.check_interval));
        true
    }

    /// Get the notifier slot
    pub fn notifier(&self) -> NotifierSlot {
        self.notifier.clone()
    }
}

impl std::fmt::Debug for BotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotState")
            .field("store", &self.store)
            .field("check_interval", &self.check_interval)
            .field("connected", &self.services.get().is_some())
            .finish()
    }
}
