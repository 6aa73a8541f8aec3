//! OrderCreated event applier
//!
//! Initializes a fresh draft snapshot from the creation payload.

use crate::orders::money;
use crate::orders::split;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderStatus};

/// OrderCreated applier
pub struct OrderCreatedApplier;

impl EventApplier for OrderCreatedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderCreated {
            title,
            note,
            items,
            participants,
        } = &event.payload
        {
            snapshot.organizer_id = event.operator_id.clone();
            snapshot.organizer_name = event.operator_name.clone();
            snapshot.title = title.clone();
            snapshot.note = note.clone();
            snapshot.status = OrderStatus::Draft;
            snapshot.items = items.clone();
            snapshot.participants = participants.clone();
            snapshot.created_at = event.timestamp;

            // Recalculate totals and the equal-split preview
            money::recalculate_totals(snapshot);
            split::refresh_equal_shares(snapshot);

            // Update sequence and timestamp
            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;

            // Update checksum
            snapshot.update_checksum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderEventType, OrderItemEntry, ParticipantEntry};

    fn create_event(order_id: &str, items: Vec<OrderItemEntry>, participants: Vec<ParticipantEntry>) -> OrderEvent {
        OrderEvent::new(
            1,
            order_id.to_string(),
            "user-1".to_string(),
            "Ann".to_string(),
            "cmd-1".to_string(),
            Some(1234567890),
            OrderEventType::OrderCreated,
            EventPayload::OrderCreated {
                title: "Team dinner".to_string(),
                note: Some("Friday".to_string()),
                items,
                participants,
            },
        )
    }

    fn item(id: &str, price: f64, quantity: i32) -> OrderItemEntry {
        OrderItemEntry {
            item_id: id.to_string(),
            name: format!("item-{id}"),
            price,
            quantity,
            note: None,
        }
    }

    fn participant(id: &str) -> ParticipantEntry {
        ParticipantEntry {
            participant_id: id.to_string(),
            user_id: format!("user-{id}"),
            display_name: id.to_string(),
            contact: format!("{id}@example.com"),
            assigned_amount: 0.0,
        }
    }

    #[test]
    fn test_order_created_initializes_draft() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        let event = create_event("order-1", vec![item("a", 25.0, 2)], vec![]);

        let applier = OrderCreatedApplier;
        applier.apply(&mut snapshot, &event);

        assert_eq!(snapshot.status, OrderStatus::Draft);
        assert_eq!(snapshot.organizer_id, "user-1");
        assert_eq!(snapshot.organizer_name, "Ann");
        assert_eq!(snapshot.title, "Team dinner");
        assert_eq!(snapshot.items_subtotal, 50.0);
        assert_eq!(snapshot.effective_total, 50.0);
        assert_eq!(snapshot.created_at, event.timestamp);
        assert_eq!(snapshot.last_sequence, 1);
    }

    #[test]
    fn test_order_created_assigns_equal_shares_upfront() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        let event = create_event(
            "order-1",
            vec![item("a", 100.0, 1)],
            vec![participant("p1"), participant("p2"), participant("p3")],
        );

        let applier = OrderCreatedApplier;
        applier.apply(&mut snapshot, &event);

        let amounts: Vec<f64> = snapshot
            .participants
            .iter()
            .map(|p| p.assigned_amount)
            .collect();
        assert_eq!(amounts, vec![33.33, 33.33, 33.34]);
    }
}
