//! Order commands - operator intents submitted to the engine

use serde::{Deserialize, Serialize};

use super::types::{OrderItemInput, ParticipantInput, PaymentMethod, SplitPolicy};

/// Order command envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCommand {
    /// Unique command ID; the idempotency key
    pub command_id: String,
    /// External identity of the actor
    pub operator_id: String,
    /// Actor name (snapshot for audit)
    pub operator_name: String,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Optimistic concurrency check: the snapshot `last_sequence` the client
    /// based its edit on. Mismatch fails with CONCURRENT_MODIFICATION.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
    /// The intent
    pub payload: OrderCommandPayload,
}

impl OrderCommand {
    pub fn new(
        operator_id: impl Into<String>,
        operator_name: impl Into<String>,
        payload: OrderCommandPayload,
    ) -> Self {
        Self {
            command_id: uuid::Uuid::new_v4().to_string(),
            operator_id: operator_id.into(),
            operator_name: operator_name.into(),
            timestamp: crate::util::now_millis(),
            expected_version: None,
            payload,
        }
    }

    pub fn with_expected_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }
}

/// Command payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCommandPayload {
    // ========== Lifecycle ==========
    CreateOrder {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        #[serde(default)]
        items: Vec<OrderItemInput>,
        #[serde(default)]
        participants: Vec<ParticipantInput>,
    },

    FinalizeOrder {
        order_id: String,
    },

    CancelOrder {
        order_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    ArchiveOrder {
        order_id: String,
    },

    // ========== Draft structure ==========
    AddItems {
        order_id: String,
        items: Vec<OrderItemInput>,
    },

    RemoveItem {
        order_id: String,
        item_id: String,
    },

    SetItemQuantity {
        order_id: String,
        item_id: String,
        quantity: i32,
    },

    AddParticipant {
        order_id: String,
        participant: ParticipantInput,
    },

    RemoveParticipant {
        order_id: String,
        participant_id: String,
    },

    UpdateOrderInfo {
        order_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },

    // ========== Split configuration ==========
    SetTotalOverride {
        order_id: String,
        /// None clears the override
        total: Option<f64>,
    },

    SetSplitPolicy {
        order_id: String,
        policy: SplitPolicy,
    },

    SetParticipantShare {
        order_id: String,
        participant_id: String,
        amount: f64,
    },

    // ========== Payment ledger ==========
    SubmitPayment {
        order_id: String,
        payment_id: String,
        method: PaymentMethod,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },

    ConfirmPayment {
        order_id: String,
        payment_id: String,
        /// Required for the direct Pending confirm (cash path); otherwise
        /// the method recorded at submit wins
        #[serde(skip_serializing_if = "Option::is_none")]
        method: Option<PaymentMethod>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },

    DisputePayment {
        order_id: String,
        payment_id: String,
        note: String,
    },

    ReopenPayment {
        order_id: String,
        payment_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },

    // ========== Notifications ==========
    RequestReminder {
        order_id: String,
        /// None targets every non-confirmed ledger entry (bulk)
        #[serde(skip_serializing_if = "Option::is_none")]
        payment_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl OrderCommandPayload {
    /// Target order, if the command addresses an existing one
    pub fn order_id(&self) -> Option<&str> {
        use OrderCommandPayload::*;
        match self {
            CreateOrder { .. } => None,
            FinalizeOrder { order_id }
            | CancelOrder { order_id, .. }
            | ArchiveOrder { order_id }
            | AddItems { order_id, .. }
            | RemoveItem { order_id, .. }
            | SetItemQuantity { order_id, .. }
            | AddParticipant { order_id, .. }
            | RemoveParticipant { order_id, .. }
            | UpdateOrderInfo { order_id, .. }
            | SetTotalOverride { order_id, .. }
            | SetSplitPolicy { order_id, .. }
            | SetParticipantShare { order_id, .. }
            | SubmitPayment { order_id, .. }
            | ConfirmPayment { order_id, .. }
            | DisputePayment { order_id, .. }
            | ReopenPayment { order_id, .. }
            | RequestReminder { order_id, .. } => Some(order_id),
        }
    }
}
