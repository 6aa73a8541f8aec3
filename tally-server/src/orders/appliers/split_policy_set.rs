//! SplitPolicySet event applier

use crate::orders::split;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// SplitPolicySet applier
pub struct SplitPolicySetApplier;

impl EventApplier for SplitPolicySetApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::SplitPolicySet { policy, .. } = &event.payload {
            snapshot.split_policy = *policy;

            // switching to Equal recomputes shares; switching to Custom keeps
            // the current amounts as the starting point for manual edits
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
    use crate::orders::money;
    use shared::order::{OrderEventType, OrderItemEntry, ParticipantEntry, SplitPolicy};

    fn create_policy_event(seq: u64, policy: SplitPolicy) -> OrderEvent {
        OrderEvent::new(
            seq,
            "order-1".to_string(),
            "user-1".to_string(),
            "Test User".to_string(),
            "cmd-1".to_string(),
            Some(1234567890),
            OrderEventType::SplitPolicySet,
            EventPayload::SplitPolicySet {
                policy,
                previous: SplitPolicy::Equal,
            },
        )
    }

    fn snapshot_with_two() -> OrderSnapshot {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.items.push(OrderItemEntry {
            item_id: "item-1".to_string(),
            name: "Pizza".to_string(),
            price: 30.0,
            quantity: 1,
            note: None,
        });
        snapshot.participants.push(ParticipantEntry {
            participant_id: "p-1".to_string(),
            user_id: "user-ann".to_string(),
            display_name: "Ann".to_string(),
            contact: "ann@example.com".to_string(),
            assigned_amount: 0.0,
        });
        snapshot.participants.push(ParticipantEntry {
            participant_id: "p-2".to_string(),
            user_id: "user-bob".to_string(),
            display_name: "Bob".to_string(),
            contact: "bob@example.com".to_string(),
            assigned_amount: 0.0,
        });
        money::recalculate_totals(&mut snapshot);
        split::refresh_equal_shares(&mut snapshot);
        snapshot
    }

    #[test]
    fn test_switch_to_custom_freezes_amounts() {
        let mut snapshot = snapshot_with_two();
        assert_eq!(snapshot.participants[0].assigned_amount, 15.0);

        let applier = SplitPolicySetApplier;
        applier.apply(&mut snapshot, &create_policy_event(2, SplitPolicy::Custom));

        assert_eq!(snapshot.split_policy, SplitPolicy::Custom);
        // equal amounts carried over as the custom starting point
        assert_eq!(snapshot.participants[0].assigned_amount, 15.0);
        assert_eq!(snapshot.participants[1].assigned_amount, 15.0);
    }

    #[test]
    fn test_switch_back_to_equal_recomputes() {
        let mut snapshot = snapshot_with_two();
        snapshot.split_policy = SplitPolicy::Custom;
        snapshot.participants[0].assigned_amount = 20.0;
        snapshot.participants[1].assigned_amount = 10.0;

        let applier = SplitPolicySetApplier;
        applier.apply(&mut snapshot, &create_policy_event(2, SplitPolicy::Equal));

        assert_eq!(snapshot.split_policy, SplitPolicy::Equal);
        assert_eq!(snapshot.participants[0].assigned_amount, 15.0);
        assert_eq!(snapshot.participants[1].assigned_amount, 15.0);
        assert_eq!(snapshot.last_sequence, 2);
    }
}
