//! Core abstractions for the command/event pipeline
//!
//! Commands are handled by [`CommandHandler`] implementations which validate
//! against the current snapshot and emit events. Events are folded back into
//! snapshots by [`EventApplier`] implementations. Both sides share a
//! [`CommandContext`] scoped to one write transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use enum_dispatch::enum_dispatch;
use redb::WriteTransaction;

// enum_dispatch generates `impl EventApplier for EventAction` at this trait's
// expansion site, so the enum and every variant type must be in scope here.
#[allow(unused_imports)]
use crate::orders::appliers::{
    EventAction, ItemQuantitySetApplier, ItemRemovedApplier, ItemsAddedApplier,
    OrderArchivedApplier, OrderCancelledApplier, OrderCompletedApplier, OrderCreatedApplier,
    OrderFinalizedApplier, OrderInfoUpdatedApplier, ParticipantAddedApplier,
    ParticipantRemovedApplier, ParticipantShareSetApplier, PaymentConfirmedApplier,
    PaymentDisputedApplier, PaymentReopenedApplier, PaymentSubmittedApplier,
    ReminderRequestedApplier, SplitPolicySetApplier, TotalOverrideSetApplier,
};
use crate::orders::storage::{OrderStorage, StorageError};
use shared::order::{
    CommandError, CommandErrorCode, OrderEvent, OrderSnapshot, OrderStatus, PaymentStatus,
};

/// Errors produced while validating and executing commands
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("participant not found: {0}")]
    ParticipantNotFound(String),

    #[error("payment not found: {0}")]
    PaymentNotFound(String),

    #[error("participant with contact {0} already exists")]
    DuplicateParticipant(String),

    #[error("order {order_id} is {status}, operation not allowed")]
    OrderLocked {
        order_id: String,
        status: OrderStatus,
    },

    #[error("invalid split: {0}")]
    InvalidSplit(String),

    #[error("custom shares sum to {actual}, expected {expected} (delta {delta:+.2})")]
    AmountMismatch {
        expected: f64,
        actual: f64,
        delta: f64,
    },

    #[error("invalid payment transition: {from} -> {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("invalid amount")]
    InvalidAmount,

    #[error("operator {0} is not the organizer of this order")]
    NotOrganizer(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl OrderError {
    /// Wire-level error code for this error
    pub fn code(&self) -> CommandErrorCode {
        match self {
            OrderError::OrderNotFound(_) => CommandErrorCode::OrderNotFound,
            OrderError::ParticipantNotFound(_) => CommandErrorCode::ParticipantNotFound,
            OrderError::PaymentNotFound(_) => CommandErrorCode::PaymentNotFound,
            OrderError::DuplicateParticipant(_) => CommandErrorCode::DuplicateParticipant,
            OrderError::OrderLocked { .. } => CommandErrorCode::OrderLocked,
            OrderError::InvalidSplit(_) => CommandErrorCode::InvalidSplit,
            OrderError::AmountMismatch { .. } => CommandErrorCode::AmountMismatch,
            OrderError::InvalidTransition { .. } => CommandErrorCode::InvalidTransition,
            OrderError::InvalidOperation(_) => CommandErrorCode::InvalidOperation,
            OrderError::InvalidAmount => CommandErrorCode::InvalidAmount,
            OrderError::NotOrganizer(_) => CommandErrorCode::NotOrganizer,
            OrderError::Storage(e) => e.code(),
        }
    }
}

impl From<OrderError> for CommandError {
    fn from(err: OrderError) -> Self {
        CommandError::new(err.code(), err.to_string())
    }
}

/// Metadata attached to every command execution
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub operator_id: String,
    pub operator_name: String,
    pub timestamp: i64,
}

/// Execution context scoped to a single write transaction.
///
/// Tracks the sequence counter and snapshots modified during one command so
/// the manager can persist everything atomically at commit time.
pub struct CommandContext<'a> {
    txn: &'a WriteTransaction,
    storage: &'a OrderStorage,
    sequence: u64,
    modified: HashMap<String, OrderSnapshot>,
}

impl<'a> CommandContext<'a> {
    pub fn new(txn: &'a WriteTransaction, storage: &'a OrderStorage, current_sequence: u64) -> Self {
        Self {
            txn,
            storage,
            sequence: current_sequence,
            modified: HashMap::new(),
        }
    }

    /// Load a snapshot, preferring uncommitted modifications from this command
    pub fn load_snapshot(&self, order_id: &str) -> Result<OrderSnapshot, OrderError> {
        if let Some(snapshot) = self.modified.get(order_id) {
            return Ok(snapshot.clone());
        }
        self.storage
            .get_snapshot_txn(self.txn, order_id)?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Load a snapshot or start a fresh one (used when applying OrderCreated)
    pub fn load_or_new(&self, order_id: &str) -> Result<OrderSnapshot, OrderError> {
        if let Some(snapshot) = self.modified.get(order_id) {
            return Ok(snapshot.clone());
        }
        match self.storage.get_snapshot_txn(self.txn, order_id)? {
            Some(snapshot) => Ok(snapshot),
            None => Ok(OrderSnapshot::new(order_id.to_string())),
        }
    }

    pub fn snapshot_exists(&self, order_id: &str) -> Result<bool, OrderError> {
        if self.modified.contains_key(order_id) {
            return Ok(true);
        }
        Ok(self.storage.get_snapshot_txn(self.txn, order_id)?.is_some())
    }

    /// Record a modified snapshot for persistence at commit time
    pub fn save_snapshot(&mut self, snapshot: OrderSnapshot) {
        self.modified.insert(snapshot.order_id.clone(), snapshot);
    }

    /// Allocate the next event sequence number
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    pub fn current_sequence(&self) -> u64 {
        self.sequence
    }

    /// Snapshots modified by this command, in no particular order
    pub fn modified_snapshots(&self) -> impl Iterator<Item = &OrderSnapshot> {
        self.modified.values()
    }
}

/// Command handlers validate preconditions and emit events.
///
/// Handlers never mutate snapshots directly; all state changes go through
/// event application so replay stays equivalent.
#[async_trait]
pub trait CommandHandler {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError>;
}

/// Event appliers fold one event into a snapshot.
///
/// Appliers must be pure with respect to the (snapshot, event) pair: replaying
/// the same event stream always produces the same snapshot.
#[enum_dispatch]
pub trait EventApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent);
}
