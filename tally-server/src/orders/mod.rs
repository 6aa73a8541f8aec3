//! Order Event Sourcing Module
//!
//! This module implements group order coordination using event sourcing:
//!
//! - **manager**: Core OrdersManager for command processing and event generation
//! - **storage**: redb-based persistence layer for events, snapshots, and indices
//! - **split**: Share calculator for the equal and custom split policies
//! - **reducer**: Event replay and snapshot computation
//! - **progress**: Settlement progress and split preview read models
//!
//! # Architecture
//!
//! ```text
//! Command → OrdersManager → Event → Storage (redb)
//!                 ↓                      ↓
//!              Broadcast          Snapshot Update
//!                 ↓
//!           All Subscribers
//! ```
//!
//! # Data Flow
//!
//! 1. Client sends OrderCommand via the HTTP API
//! 2. OrdersManager validates and processes command
//! 3. OrderEvent is generated with global sequence
//! 4. Event is persisted to redb (transactional)
//! 5. Snapshot is updated
//! 6. Event is broadcast to all subscribers
//! 7. CommandResponse is returned to client

pub mod actions;
pub mod appliers;
pub mod manager;
pub mod money;
pub mod progress;
pub mod reducer;
pub mod split;
pub mod storage;
pub mod traits;

// Re-exports
pub use manager::OrdersManager;
pub use progress::{OrderProgress, SplitPreview};
pub use storage::OrderStorage;

// Re-export shared types for convenience
pub use shared::order::{
    CommandError, CommandErrorCode, CommandResponse, EventPayload, OrderCommand,
    OrderCommandPayload, OrderEvent, OrderEventType, OrderSnapshot, OrderStatus,
};
