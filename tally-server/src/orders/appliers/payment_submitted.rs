//! PaymentSubmitted event applier

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, PaymentStatus};

/// PaymentSubmitted applier
pub struct PaymentSubmittedApplier;

impl EventApplier for PaymentSubmittedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::PaymentSubmitted { payment_id, method, note, .. } = &event.payload {
            if let Some(payment) = snapshot
                .payments
                .iter_mut()
                .find(|p| &p.payment_id == payment_id)
            {
                payment.method = Some(*method);
                payment.submitted_at = Some(event.timestamp);
                payment.push_history(
                    PaymentStatus::Submitted,
                    event.timestamp,
                    event.operator_id.clone(),
                    note.clone(),
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

    fn create_submitted_event(seq: u64, payment_id: &str) -> OrderEvent {
        OrderEvent::new(
            seq,
            "order-1".to_string(),
            "user-2".to_string(),
            "Ann".to_string(),
            "cmd-1".to_string(),
            Some(1234567890),
            OrderEventType::PaymentSubmitted,
            EventPayload::PaymentSubmitted {
                payment_id: payment_id.to_string(),
                participant_id: "p-1".to_string(),
                method: PaymentMethod::Digital,
                amount: 25.0,
                note: Some("ref 4411".to_string()),
            },
        )
    }

    #[test]
    fn test_payment_submitted_applier() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot
            .payments
            .push(PaymentEntry::new("pay-1".to_string(), "p-1".to_string(), 25.0));

        let event = create_submitted_event(6, "pay-1");
        let applier = PaymentSubmittedApplier;
        applier.apply(&mut snapshot, &event);

        let pay = &snapshot.payments[0];
        assert_eq!(pay.status, PaymentStatus::Submitted);
        assert_eq!(pay.method, Some(PaymentMethod::Digital));
        assert_eq!(pay.submitted_at, Some(event.timestamp));
        assert_eq!(pay.history.last().map(|h| h.actor_id.as_str()), Some("user-2"));
        assert_eq!(
            pay.history.last().and_then(|h| h.note.as_deref()),
            Some("ref 4411")
        );
        assert_eq!(snapshot.last_sequence, 6);
    }

    #[test]
    fn test_unknown_payment_only_advances_sequence() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());

        let applier = PaymentSubmittedApplier;
        applier.apply(&mut snapshot, &create_submitted_event(6, "missing"));

        assert!(snapshot.payments.is_empty());
        assert_eq!(snapshot.last_sequence, 6);
    }
}
