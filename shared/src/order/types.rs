//! Shared types for order event sourcing

use serde::{Deserialize, Serialize};

// ============================================================================
// Split Policy
// ============================================================================

/// How an order's effective total is divided among participants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitPolicy {
    /// System-computed shares: effective total / participant count,
    /// last participant absorbs the rounding remainder
    #[default]
    Equal,
    /// Organizer-assigned shares; their sum must match the effective total
    Custom,
}

// ============================================================================
// Payment Method / Status
// ============================================================================

/// Payment channel used by a participant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Bank transfer, wallet, or other app-mediated payment
    Digital,
    /// Hand-to-hand cash, confirmed directly by the organizer
    Cash,
}

/// Ledger entry status
///
/// ```text
/// Pending ──► Submitted ──► Confirmed (terminal)
///    │            │             ▲
///    ▼            ▼             │
///    └───────► Disputed ────────┘
///                  │
///                  └──► Pending (reset for retry)
/// ```
///
/// `Pending → Confirmed` exists only as the organizer-privileged cash path
/// and is enforced by the confirm action, not by this table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Awaiting the participant's payment
    #[default]
    Pending,
    /// Participant reported paying; awaiting organizer verification
    Submitted,
    /// Organizer verified receipt; terminal
    Confirmed,
    /// Organizer or participant flagged a discrepancy
    Disputed,
}

impl PaymentStatus {
    /// Unprivileged transition table. `Confirmed` is absorbing.
    pub fn can_transition_to(self, to: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, to),
            (Pending, Submitted)
                | (Pending, Disputed)
                | (Submitted, Confirmed)
                | (Submitted, Disputed)
                | (Disputed, Confirmed)
                | (Disputed, Pending)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == PaymentStatus::Confirmed
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Submitted => write!(f, "SUBMITTED"),
            PaymentStatus::Confirmed => write!(f, "CONFIRMED"),
            PaymentStatus::Disputed => write!(f, "DISPUTED"),
        }
    }
}

// ============================================================================
// Input DTOs
// ============================================================================

/// Order item input - for adding items (server generates item_id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
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

/// Participant input - for adding participants (server generates participant_id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantInput {
    /// External identity of the participant (from the identity provider)
    pub user_id: String,
    /// Display name snapshot
    pub display_name: String,
    /// Contact address; duplicate detection key within an order
    pub contact: String,
}

// ============================================================================
// Command Response
// ============================================================================

/// Command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    /// New order ID (only for CreateOrder command)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, order_id: Option<String>) -> Self {
        Self {
            command_id,
            success: true,
            order_id,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            order_id: None,
            error: Some(error),
        }
    }

    pub fn duplicate(command_id: String) -> Self {
        Self {
            command_id,
            success: true,
            order_id: None,
            error: None,
        }
    }
}

/// Command error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Command error codes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    OrderNotFound,
    ParticipantNotFound,
    PaymentNotFound,
    DuplicateParticipant,
    OrderLocked,
    InvalidSplit,
    AmountMismatch,
    InvalidTransition,
    InvalidOperation,
    InvalidAmount,
    NotOrganizer,
    ConcurrentModification,
    DuplicateCommand,
    InternalError,
    // Storage errors
    StorageFull,
    OutOfMemory,
    StorageCorrupted,
    SystemBusy,
}
