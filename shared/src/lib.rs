//! Shared types for Tally
//!
//! Common types used by the server and clients: order snapshots, commands,
//! events, command responses and notification records.

pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Notification, NotificationKind};
pub use order::{
    CommandError, CommandErrorCode, CommandResponse, EventPayload, OrderCommand,
    OrderCommandPayload, OrderEvent, OrderEventType, OrderSnapshot, OrderStatus,
};
