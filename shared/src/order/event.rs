//! Order events - immutable facts recorded after command processing

use serde::{Deserialize, Serialize};

use super::snapshot::{OrderItemEntry, OrderStatus, ParticipantEntry};
use super::types::{PaymentMethod, SplitPolicy};

/// Order event - immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Event unique ID
    pub event_id: String,
    /// Global sequence number (for ordering and replay)
    /// This is the AUTHORITATIVE ordering mechanism for state evolution
    pub sequence: u64,
    /// Order this event belongs to
    pub order_id: String,
    /// Server timestamp (Unix milliseconds) - AUTHORITATIVE for state evolution
    pub timestamp: i64,
    /// Client timestamp (Unix milliseconds) - for audit and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_timestamp: Option<i64>,
    /// Actor who triggered this event (organizer or participant)
    pub operator_id: String,
    /// Actor name (snapshot for audit)
    pub operator_name: String,
    /// Command that triggered this event (for audit tracing)
    pub command_id: String,
    /// Event type
    pub event_type: OrderEventType,
    /// Event payload
    pub payload: EventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    // Lifecycle
    OrderCreated,
    OrderFinalized,
    OrderCompleted,
    OrderCancelled,
    OrderArchived,

    // Draft structure
    ItemsAdded,
    ItemRemoved,
    ItemQuantitySet,
    ParticipantAdded,
    ParticipantRemoved,
    OrderInfoUpdated,

    // Split configuration
    TotalOverrideSet,
    SplitPolicySet,
    ParticipantShareSet,

    // Payment ledger
    PaymentSubmitted,
    PaymentConfirmed,
    PaymentDisputed,
    PaymentReopened,

    // Notifications
    ReminderRequested,
}

impl std::fmt::Display for OrderEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEventType::OrderCreated => write!(f, "ORDER_CREATED"),
            OrderEventType::OrderFinalized => write!(f, "ORDER_FINALIZED"),
            OrderEventType::OrderCompleted => write!(f, "ORDER_COMPLETED"),
            OrderEventType::OrderCancelled => write!(f, "ORDER_CANCELLED"),
            OrderEventType::OrderArchived => write!(f, "ORDER_ARCHIVED"),
            OrderEventType::ItemsAdded => write!(f, "ITEMS_ADDED"),
            OrderEventType::ItemRemoved => write!(f, "ITEM_REMOVED"),
            OrderEventType::ItemQuantitySet => write!(f, "ITEM_QUANTITY_SET"),
            OrderEventType::ParticipantAdded => write!(f, "PARTICIPANT_ADDED"),
            OrderEventType::ParticipantRemoved => write!(f, "PARTICIPANT_REMOVED"),
            OrderEventType::OrderInfoUpdated => write!(f, "ORDER_INFO_UPDATED"),
            OrderEventType::TotalOverrideSet => write!(f, "TOTAL_OVERRIDE_SET"),
            OrderEventType::SplitPolicySet => write!(f, "SPLIT_POLICY_SET"),
            OrderEventType::ParticipantShareSet => write!(f, "PARTICIPANT_SHARE_SET"),
            OrderEventType::PaymentSubmitted => write!(f, "PAYMENT_SUBMITTED"),
            OrderEventType::PaymentConfirmed => write!(f, "PAYMENT_CONFIRMED"),
            OrderEventType::PaymentDisputed => write!(f, "PAYMENT_DISPUTED"),
            OrderEventType::PaymentReopened => write!(f, "PAYMENT_REOPENED"),
            OrderEventType::ReminderRequested => write!(f, "REMINDER_REQUESTED"),
        }
    }
}

/// Frozen share assignment recorded by OrderFinalized
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareAssignment {
    pub participant_id: String,
    /// Ledger entry created for this participant
    pub payment_id: String,
    /// Amount due, frozen at finalize time
    pub amount: f64,
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    // ========== Lifecycle ==========
    OrderCreated {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        /// Initial items with server-generated ids
        items: Vec<OrderItemEntry>,
        /// Initial participants with server-generated ids
        participants: Vec<ParticipantEntry>,
    },

    OrderFinalized {
        /// Effective total the shares were computed against
        effective_total: f64,
        /// One frozen assignment per participant, in stable order
        shares: Vec<ShareAssignment>,
    },

    OrderCompleted {
        /// Sum of confirmed amounts at completion
        total_collected: f64,
    },

    OrderCancelled {
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    OrderArchived {
        /// Status the order held before archiving
        previous_status: OrderStatus,
    },

    // ========== Draft structure ==========
    ItemsAdded {
        items: Vec<OrderItemEntry>,
    },

    ItemRemoved {
        item_id: String,
        /// Name snapshot for audit
        name: String,
    },

    ItemQuantitySet {
        item_id: String,
        quantity: i32,
        previous_quantity: i32,
    },

    ParticipantAdded {
        participant: ParticipantEntry,
    },

    ParticipantRemoved {
        participant_id: String,
        /// Name snapshot for audit
        display_name: String,
    },

    OrderInfoUpdated {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },

    // ========== Split configuration ==========
    TotalOverrideSet {
        /// None clears the override
        #[serde(skip_serializing_if = "Option::is_none")]
        total: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<f64>,
    },

    SplitPolicySet {
        policy: SplitPolicy,
        previous: SplitPolicy,
    },

    ParticipantShareSet {
        participant_id: String,
        amount: f64,
        previous: f64,
    },

    // ========== Payment ledger ==========
    PaymentSubmitted {
        payment_id: String,
        participant_id: String,
        method: PaymentMethod,
        amount: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },

    PaymentConfirmed {
        payment_id: String,
        participant_id: String,
        method: PaymentMethod,
        amount: f64,
        /// True when the organizer confirmed straight from Pending (cash path)
        direct: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },

    PaymentDisputed {
        payment_id: String,
        participant_id: String,
        note: String,
    },

    PaymentReopened {
        payment_id: String,
        participant_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },

    // ========== Notifications ==========
    ReminderRequested {
        /// Targeted ledger entries (one, or every non-confirmed for bulk)
        payment_ids: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl OrderEvent {
    /// Create a new event
    ///
    /// # Arguments
    /// * `sequence` - Global sequence number (authoritative ordering)
    /// * `order_id` - Order this event belongs to
    /// * `operator_id` - Actor who triggered this event
    /// * `operator_name` - Actor name (snapshot for audit)
    /// * `command_id` - Command that triggered this event
    /// * `client_timestamp` - Client-provided timestamp (may have clock skew)
    /// * `event_type` - Event type
    /// * `payload` - Event payload
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: u64,
        order_id: String,
        operator_id: String,
        operator_name: String,
        command_id: String,
        client_timestamp: Option<i64>,
        event_type: OrderEventType,
        payload: EventPayload,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            sequence,
            order_id,
            // Server timestamp is ALWAYS set here - this is authoritative
            timestamp: crate::util::now_millis(),
            client_timestamp,
            operator_id,
            operator_name,
            command_id,
            event_type,
            payload,
        }
    }
}
