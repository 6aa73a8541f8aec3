//! ParticipantAdded event applier

use crate::orders::money;
use crate::orders::split;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ParticipantAdded applier
pub struct ParticipantAddedApplier;

impl EventApplier for ParticipantAddedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ParticipantAdded { participant } = &event.payload {
            snapshot.participants.push(participant.clone());

            money::recalculate_totals(snapshot);
            split::refresh_equal_shares(snapshot);

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderEventType, OrderItemEntry, ParticipantEntry};

    fn create_participant_added_event(order_id: &str, seq: u64, id: &str, name: &str) -> OrderEvent {
        OrderEvent::new(
            seq,
            order_id.to_string(),
            "user-1".to_string(),
            "Test User".to_string(),
            "cmd-1".to_string(),
            Some(1234567890),
            OrderEventType::ParticipantAdded,
            EventPayload::ParticipantAdded {
                participant: ParticipantEntry {
                    participant_id: id.to_string(),
                    user_id: format!("user-{id}"),
                    display_name: name.to_string(),
                    contact: format!("{id}@example.com"),
                    assigned_amount: 0.0,
                },
            },
        )
    }

    #[test]
    fn test_participant_added_applier() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.items.push(OrderItemEntry {
            item_id: "item-1".to_string(),
            name: "Pizza".to_string(),
            price: 30.0,
            quantity: 1,
            note: None,
        });
        money::recalculate_totals(&mut snapshot);

        let applier = ParticipantAddedApplier;
        applier.apply(&mut snapshot, &create_participant_added_event("order-1", 2, "p-1", "Ann"));
        applier.apply(&mut snapshot, &create_participant_added_event("order-1", 3, "p-2", "Bob"));

        assert_eq!(snapshot.participants.len(), 2);
        assert_eq!(snapshot.participants[0].display_name, "Ann");
        // equal split over the two participants
        assert_eq!(snapshot.participants[0].assigned_amount, 15.0);
        assert_eq!(snapshot.participants[1].assigned_amount, 15.0);
        assert_eq!(snapshot.last_sequence, 3);
    }

    #[test]
    fn test_participant_added_remainder_lands_on_last() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.items.push(OrderItemEntry {
            item_id: "item-1".to_string(),
            name: "Pizza".to_string(),
            price: 100.0,
            quantity: 1,
            note: None,
        });
        money::recalculate_totals(&mut snapshot);

        let applier = ParticipantAddedApplier;
        for (i, name) in ["Ann", "Bob", "Cid"].iter().enumerate() {
            let event =
                create_participant_added_event("order-1", (i + 2) as u64, &format!("p-{i}"), name);
            applier.apply(&mut snapshot, &event);
        }

        assert_eq!(snapshot.participants[0].assigned_amount, 33.33);
        assert_eq!(snapshot.participants[1].assigned_amount, 33.33);
        assert_eq!(snapshot.participants[2].assigned_amount, 33.34);
    }
}
