//! Notification records built from domain events
//!
//! Owned by the notification worker; the core engine only emits the events
//! these are derived from. Delivery beyond storage (mail, push) belongs to
//! the external dispatcher behind the sink seam.

use serde::{Deserialize, Serialize};

/// What a notification is about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// A finalized order assigned the user a share to pay
    PaymentRequest,
    /// The organizer nudged the user about an outstanding share
    Reminder,
    /// A payment status changed (submitted, confirmed, disputed)
    Confirmation,
}

/// A user-facing notification record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: String,
    /// Recipient (external identity)
    pub user_id: String,
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub created_at: i64,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    pub fn new(
        user_id: impl Into<String>,
        kind: NotificationKind,
        message: impl Into<String>,
        order_id: Option<String>,
        payment_id: Option<String>,
    ) -> Self {
        Self {
            notification_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            kind,
            message: message.into(),
            order_id,
            payment_id,
            created_at: crate::util::now_millis(),
            read: false,
        }
    }
}
