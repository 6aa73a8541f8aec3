use std::sync::Arc;

use crate::core::Config;
use crate::notify::{LogSink, NotificationWorker};
use crate::orders::OrdersManager;

/// Server state - shared handles for every request
///
/// Cloning is shallow: the manager shares its storage and event channel
/// through Arc, so handlers can hold their own copy.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | Configuration (immutable) |
/// | orders | OrdersManager | Event-sourced order engine |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Order engine (commands, queries, event broadcast)
    pub orders: OrdersManager,
}

impl ServerState {
    pub fn new(config: Config, orders: OrdersManager) -> Self {
        Self { config, orders }
    }

    /// Initialize server state from configuration
    ///
    /// Creates the data directory and opens the event store.
    ///
    /// # Panics
    ///
    /// Panics when the data directory or event store cannot be opened;
    /// the process cannot do anything useful without them.
    pub fn initialize(config: &Config) -> Self {
        config
            .ensure_data_dir()
            .expect("Failed to create data directory");

        let orders =
            OrdersManager::new(config.db_path()).expect("Failed to open order event store");

        Self::new(config.clone(), orders)
    }

    /// Spawn background workers
    ///
    /// Must run inside a tokio runtime, before `Server::run` serves traffic.
    /// Workers:
    /// - notification worker (projects order events into user notifications)
    pub fn start_background_tasks(&self) {
        let worker = NotificationWorker::new(self.orders.storage().clone(), Arc::new(LogSink));
        tokio::spawn(worker.run(self.orders.subscribe()));
    }

    /// State over an in-memory event store, for router tests
    #[cfg(test)]
    pub fn in_memory() -> Self {
        let storage = crate::orders::OrderStorage::open_in_memory()
            .expect("Failed to open in-memory storage");
        Self::new(
            Config::with_overrides("/tmp/tally-test", 0),
            OrdersManager::with_storage(storage),
        )
    }
}
