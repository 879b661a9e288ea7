//! Event system for wallet tracking.
//!
//! The tracker reports every command and every fetch completion as a [`TrackerEvent`].
//! Handlers registered with the [`EventDispatcher`] receive them in registration
//! order, which keeps logging and any view-side bookkeeping out of the tracker itself.

use crate::validation::WalletAddress;
use crate::wallet::types::DiscardReason;

use std::sync::Arc;
use tracing::{debug, info, warn};

/// Events that occur while tracking wallets
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    /// A wallet was added and its first fetch issued
    WalletAdded { address: WalletAddress, epoch: u64 },
    /// A wallet was removed
    WalletRemoved { address: WalletAddress },
    /// A refresh was issued for a tracked wallet
    RefreshStarted { address: WalletAddress, epoch: u64 },
    /// A fetch result was applied and the wallet is ready
    FetchApplied {
        address: WalletAddress,
        epoch: u64,
        token_count: usize,
    },
    /// A fetch failure was applied and the wallet shows an error
    FetchFailed {
        address: WalletAddress,
        epoch: u64,
        message: String,
    },
    /// A completion arrived for an epoch or entry that is no longer current
    FetchDiscarded {
        address: WalletAddress,
        epoch: u64,
        reason: DiscardReason,
    },
}

/// Trait for handling tracker events.
///
/// Handlers run synchronously on the task that produced the event and must not block.
pub trait TrackerEventHandler: Send + Sync {
    fn handle(&self, event: &TrackerEvent);

    /// Get the name of this handler for logging and diagnostics.
    fn name(&self) -> &'static str;
}

/// Event dispatcher that fans events out to every registered handler.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn TrackerEventHandler>>,
}

impl EventDispatcher {
    /// Create a new, empty event dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new event handler.
    ///
    /// Handlers are called in the order they are registered.
    pub fn register_handler(&mut self, handler: Arc<dyn TrackerEventHandler>) {
        debug!("Registering tracker event handler {}", handler.name());
        self.handlers.push(handler);
    }

    pub fn dispatch(&self, event: &TrackerEvent) {
        for handler in &self.handlers {
            handler.handle(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Logs every event through `tracing`.
pub struct TracingEventHandler;

impl TrackerEventHandler for TracingEventHandler {
    fn handle(&self, event: &TrackerEvent) {
        match event {
            TrackerEvent::WalletAdded { address, .. } => {
                info!("Tracking wallet {}", address);
            }
            TrackerEvent::WalletRemoved { address } => {
                info!("Stopped tracking wallet {}", address);
            }
            TrackerEvent::RefreshStarted { address, epoch } => {
                info!("Refreshing wallet {} (epoch {})", address, epoch);
            }
            TrackerEvent::FetchApplied {
                address,
                epoch,
                token_count,
            } => {
                info!(
                    "Wallet {} ready with {} tokens (epoch {})",
                    address, token_count, epoch
                );
            }
            TrackerEvent::FetchFailed {
                address,
                epoch,
                message,
            } => {
                warn!(
                    "Failed to load wallet {} (epoch {}): {}",
                    address, epoch, message
                );
            }
            TrackerEvent::FetchDiscarded {
                address,
                epoch,
                reason,
            } => {
                debug!(
                    "Discarded {:?} result for wallet {} (epoch {})",
                    reason, address, epoch
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "TracingEventHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl TrackerEventHandler for Recorder {
        fn handle(&self, event: &TrackerEvent) {
            if let TrackerEvent::WalletRemoved { address } = event {
                self.log
                    .lock()
                    .unwrap()
                    .push(format!("{}:{}", self.tag, address.short()));
            }
        }

        fn name(&self) -> &'static str {
            "Recorder"
        }
    }

    #[test]
    fn dispatch_reaches_handlers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register_handler(Arc::new(Recorder {
            tag: "first",
            log: log.clone(),
        }));
        dispatcher.register_handler(Arc::new(TracingEventHandler));
        dispatcher.register_handler(Arc::new(Recorder {
            tag: "second",
            log: log.clone(),
        }));
        assert_eq!(dispatcher.len(), 3);

        let address = WalletAddress::parse("0x1234567890123456789012345678901234567890").unwrap();
        dispatcher.dispatch(&TrackerEvent::WalletRemoved { address });

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:0x1234...7890", "second:0x1234...7890"]
        );
    }
}
