//! OrderCompleted event applier

use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderStatus};

/// OrderCompleted applier
pub struct OrderCompletedApplier;

impl EventApplier for OrderCompletedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderCompleted { .. } = &event.payload {
            snapshot.status = OrderStatus::Completed;
            snapshot.completed_at = Some(event.timestamp);
            snapshot.closed_at = Some(event.timestamp);

            money::recalculate_totals(snapshot);

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

    fn create_completed_event(seq: u64) -> OrderEvent {
        OrderEvent::new(
            seq,
            "order-1".to_string(),
            "user-1".to_string(),
            "Test User".to_string(),
            "cmd-1".to_string(),
            Some(1234567890),
            OrderEventType::OrderCompleted,
            EventPayload::OrderCompleted { total_collected: 50.0 },
        )
    }

    #[test]
    fn test_order_completed_applier() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.status = OrderStatus::Active;

        let event = create_completed_event(9);
        let applier = OrderCompletedApplier;
        applier.apply(&mut snapshot, &event);

        assert_eq!(snapshot.status, OrderStatus::Completed);
        assert_eq!(snapshot.completed_at, Some(event.timestamp));
        assert_eq!(snapshot.closed_at, Some(event.timestamp));
        assert_eq!(snapshot.last_sequence, 9);
    }
}
