//! Delivery seam for notifications
//!
//! Storage is always written first; the sink only handles the push side.
//! Mail, chat webhooks and mobile push all live behind this trait so the
//! worker never needs to know which transports are configured.

use shared::models::Notification;

/// Outbound notification transport
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, notification: &Notification);
}

/// Default sink - logs the delivery and stops there
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, notification: &Notification) {
        tracing::info!(
            user_id = %notification.user_id,
            kind = ?notification.kind,
            order_id = ?notification.order_id,
            message = %notification.message,
            "Notification delivered"
        );
    }
}
