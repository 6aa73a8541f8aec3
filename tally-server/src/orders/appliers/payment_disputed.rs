//! PaymentDisputed event applier

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, PaymentStatus};

/// PaymentDisputed applier
pub struct PaymentDisputedApplier;

impl EventApplier for PaymentDisputedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::PaymentDisputed { payment_id, note, .. } = &event.payload {
            if let Some(payment) = snapshot
                .payments
                .iter_mut()
                .find(|p| &p.payment_id == payment_id)
            {
                payment.disputed_at = Some(event.timestamp);
                payment.push_history(
                    PaymentStatus::Disputed,
                    event.timestamp,
                    event.operator_id.clone(),
                    Some(note.clone()),
                );
            }

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderEventType, PaymentEntry, PaymentMethod};

    fn create_disputed_event(seq: u64, payment_id: &str, note: &str) -> OrderEvent {
        OrderEvent::new(
            seq,
            "order-1".to_string(),
            "user-1".to_string(),
            "Test User".to_string(),
            "cmd-1".to_string(),
            Some(1234567890),
            OrderEventType::PaymentDisputed,
            EventPayload::PaymentDisputed {
                payment_id: payment_id.to_string(),
                participant_id: "p-1".to_string(),
                note: note.to_string(),
            },
        )
    }

    #[test]
    fn test_payment_disputed_applier() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        let mut payment = PaymentEntry::new("pay-1".to_string(), "p-1".to_string(), 25.0);
        payment.method = Some(PaymentMethod::Digital);
        payment.push_history(PaymentStatus::Submitted, 1000, "user-2".to_string(), None);
        snapshot.payments.push(payment);

        let event = create_disputed_event(8, "pay-1", "amount does not match");
        let applier = PaymentDisputedApplier;
        applier.apply(&mut snapshot, &event);

        let pay = &snapshot.payments[0];
        assert_eq!(pay.status, PaymentStatus::Disputed);
        assert_eq!(pay.disputed_at, Some(event.timestamp));
        assert_eq!(
            pay.history.last().and_then(|h| h.note.as_deref()),
            Some("amount does not match")
        );
        assert_eq!(pay.history.len(), 2);
    }
}
