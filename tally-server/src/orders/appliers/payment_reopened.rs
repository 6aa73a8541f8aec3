//! PaymentReopened event applier

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, PaymentStatus};

/// PaymentReopened applier
pub struct PaymentReopenedApplier;

impl EventApplier for PaymentReopenedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::PaymentReopened { payment_id, note, .. } = &event.payload {
            if let Some(payment) = snapshot
                .payments
                .iter_mut()
                .find(|p| &p.payment_id == payment_id)
            {
                // back to square one, the next submission picks a method again
                payment.method = None;
                payment.submitted_at = None;
                payment.push_history(
                    PaymentStatus::Pending,
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

    fn create_reopened_event(seq: u64, payment_id: &str) -> OrderEvent {
        OrderEvent::new(
            seq,
            "order-1".to_string(),
            "user-1".to_string(),
            "Test User".to_string(),
            "cmd-1".to_string(),
            Some(1234567890),
            OrderEventType::PaymentReopened,
            EventPayload::PaymentReopened {
                payment_id: payment_id.to_string(),
                participant_id: "p-1".to_string(),
                note: Some("please resubmit".to_string()),
            },
        )
    }

    #[test]
    fn test_payment_reopened_applier() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        let mut payment = PaymentEntry::new("pay-1".to_string(), "p-1".to_string(), 25.0);
        payment.method = Some(PaymentMethod::Digital);
        payment.submitted_at = Some(1000);
        payment.disputed_at = Some(2000);
        payment.push_history(PaymentStatus::Submitted, 1000, "user-2".to_string(), None);
        payment.push_history(PaymentStatus::Disputed, 2000, "user-1".to_string(), None);
        snapshot.payments.push(payment);

        let applier = PaymentReopenedApplier;
        applier.apply(&mut snapshot, &create_reopened_event(9, "pay-1"));

        let pay = &snapshot.payments[0];
        assert_eq!(pay.status, PaymentStatus::Pending);
        assert_eq!(pay.method, None);
        assert_eq!(pay.submitted_at, None);
        // dispute timeline stays in the audit trail
        assert_eq!(pay.history.len(), 3);
        assert_eq!(pay.disputed_at, Some(2000));
    }
}
