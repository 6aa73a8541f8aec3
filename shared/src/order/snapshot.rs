//! Order snapshot - current state derived from events

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::types::{PaymentMethod, PaymentStatus, SplitPolicy};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Mutable: items, participants, policy and override may change
    #[default]
    Draft,
    /// Finalized: structure locked, payment ledger live
    Active,
    /// Every payment confirmed
    Completed,
    /// Abandoned by the organizer
    Cancelled,
    /// End-of-life marker for completed/cancelled orders
    Archived,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Cancelled | OrderStatus::Archived
        )
    }

    /// Open orders appear in the default listing
    pub fn is_open(self) -> bool {
        matches!(self, OrderStatus::Draft | OrderStatus::Active)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Draft => write!(f, "DRAFT"),
            OrderStatus::Active => write!(f, "ACTIVE"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
            OrderStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}

/// Item line in an order snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemEntry {
    /// Server-generated item ID (snowflake)
    pub item_id: String,
    /// Item name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Quantity
    pub quantity: i32,
    /// Item note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Participant in an order snapshot
///
/// Insertion order of the `participants` vec is the stable order used by
/// the split calculator for remainder assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantEntry {
    /// Server-generated participant ID (snowflake)
    pub participant_id: String,
    /// External identity (from the identity provider)
    pub user_id: String,
    /// Display name snapshot
    pub display_name: String,
    /// Contact address; unique within an order (case-insensitive)
    pub contact: String,
    /// Currently assigned share of the effective total
    pub assigned_amount: f64,
}

/// One step of a payment entry's append-only history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentHistoryEntry {
    pub status: PaymentStatus,
    pub timestamp: i64,
    /// Who drove the transition (participant or organizer)
    pub actor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Per-participant ledger entry, created at finalize
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentEntry {
    pub payment_id: String,
    pub participant_id: String,
    /// Frozen copy of the assigned amount at finalize time; never changes
    pub amount_due: f64,
    pub status: PaymentStatus,
    /// Recorded on submit (or organizer cash confirm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disputed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reminded_at: Option<i64>,
    /// Append-only; current status always equals the last entry's status
    #[serde(default)]
    pub history: Vec<PaymentHistoryEntry>,
}

impl PaymentEntry {
    /// Fresh ledger entry in `Pending` with no history yet
    pub fn new(payment_id: String, participant_id: String, amount_due: f64) -> Self {
        Self {
            payment_id,
            participant_id,
            amount_due,
            status: PaymentStatus::Pending,
            method: None,
            submitted_at: None,
            confirmed_at: None,
            disputed_at: None,
            last_reminded_at: None,
            history: Vec::new(),
        }
    }

    /// Append a history step and move the current status with it
    pub fn push_history(
        &mut self,
        status: PaymentStatus,
        timestamp: i64,
        actor_id: String,
        note: Option<String>,
    ) {
        self.history.push(PaymentHistoryEntry {
            status,
            timestamp,
            actor_id,
            note,
        });
        self.status = status;
    }
}

/// Order snapshot - the current state of one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: String,
    /// External identity of the organizer
    pub organizer_id: String,
    /// Organizer name snapshot
    pub organizer_name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: OrderStatus,
    pub split_policy: SplitPolicy,
    /// Ordered item lines
    pub items: Vec<OrderItemEntry>,
    /// Participants in stable (insertion) order
    pub participants: Vec<ParticipantEntry>,
    /// Manual total override; when set it replaces the items subtotal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_override: Option<f64>,
    /// Sum of item line totals
    pub items_subtotal: f64,
    /// Override if set, otherwise items subtotal
    pub effective_total: f64,
    /// Payment ledger, one entry per participant after finalize
    #[serde(default)]
    pub payments: Vec<PaymentEntry>,
    /// Sum of confirmed payment amounts
    pub collected_amount: f64,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<i64>,
    /// Sequence of the last applied event
    pub last_sequence: u64,
    /// Integrity checksum over the money-bearing state
    pub state_checksum: u64,
}

impl OrderSnapshot {
    pub fn new(order_id: String) -> Self {
        let now = crate::util::now_millis();
        Self {
            order_id,
            organizer_id: String::new(),
            organizer_name: String::new(),
            title: String::new(),
            note: None,
            status: OrderStatus::Draft,
            split_policy: SplitPolicy::Equal,
            items: Vec::new(),
            participants: Vec::new(),
            total_override: None,
            items_subtotal: 0.0,
            effective_total: 0.0,
            payments: Vec::new(),
            collected_amount: 0.0,
            created_at: now,
            updated_at: now,
            finalized_at: None,
            completed_at: None,
            closed_at: None,
            last_sequence: 0,
            state_checksum: 0,
        }
    }

    pub fn find_item(&self, item_id: &str) -> Option<&OrderItemEntry> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    pub fn find_participant(&self, participant_id: &str) -> Option<&ParticipantEntry> {
        self.participants
            .iter()
            .find(|p| p.participant_id == participant_id)
    }

    pub fn find_payment(&self, payment_id: &str) -> Option<&PaymentEntry> {
        self.payments.iter().find(|p| p.payment_id == payment_id)
    }

    pub fn find_payment_mut(&mut self, payment_id: &str) -> Option<&mut PaymentEntry> {
        self.payments.iter_mut().find(|p| p.payment_id == payment_id)
    }

    /// Contact already present? Duplicate detection is case-insensitive.
    pub fn has_contact(&self, contact: &str) -> bool {
        let needle = contact.trim().to_lowercase();
        self.participants
            .iter()
            .any(|p| p.contact.trim().to_lowercase() == needle)
    }

    pub fn all_payments_confirmed(&self) -> bool {
        !self.payments.is_empty()
            && self
                .payments
                .iter()
                .all(|p| p.status == PaymentStatus::Confirmed)
    }

    /// Recompute the integrity checksum from the money-bearing state.
    ///
    /// Cheap `DefaultHasher` digest over cent-precision totals; detects
    /// divergence between a stored snapshot and an event replay.
    pub fn update_checksum(&mut self) {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.order_id.hash(&mut hasher);
        self.items.len().hash(&mut hasher);
        self.participants.len().hash(&mut hasher);
        ((self.effective_total * 100.0).round() as i64).hash(&mut hasher);
        ((self.collected_amount * 100.0).round() as i64).hash(&mut hasher);
        for p in &self.participants {
            ((p.assigned_amount * 100.0).round() as i64).hash(&mut hasher);
        }
        self.last_sequence.hash(&mut hasher);
        self.status.to_string().hash(&mut hasher);
        self.state_checksum = hasher.finish();
    }
}
