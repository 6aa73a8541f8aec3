//! OrderCancelled event applier

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderStatus};

/// OrderCancelled applier
pub struct OrderCancelledApplier;

impl EventApplier for OrderCancelledApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderCancelled { .. } = &event.payload {
            snapshot.status = OrderStatus::Cancelled;
            snapshot.closed_at = Some(event.timestamp);

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::OrderEventType;

    fn create_cancelled_event(seq: u64, reason: Option<&str>) -> OrderEvent {
        OrderEvent::new(
            seq,
            "order-1".to_string(),
            "user-1".to_string(),
            "Test User".to_string(),
            "cmd-1".to_string(),
            Some(1234567890),
            OrderEventType::OrderCancelled,
            EventPayload::OrderCancelled {
                reason: reason.map(|s| s.to_string()),
            },
        )
    }

    #[test]
    fn test_order_cancelled_applier() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.status = OrderStatus::Active;

        let event = create_cancelled_event(4, Some("venue closed"));
        let applier = OrderCancelledApplier;
        applier.apply(&mut snapshot, &event);

        assert_eq!(snapshot.status, OrderStatus::Cancelled);
        assert_eq!(snapshot.closed_at, Some(event.timestamp));
        assert_eq!(snapshot.last_sequence, 4);
    }
}
