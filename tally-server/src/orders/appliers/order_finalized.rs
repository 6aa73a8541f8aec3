//! OrderFinalized event applier
//!
//! Freezes the split and opens one ledger entry per participant. The
//! assignments (ids and amounts) are carried in the payload so replay
//! reproduces the exact ledger without regenerating anything.

use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderStatus, PaymentEntry, PaymentStatus};

/// OrderFinalized applier
pub struct OrderFinalizedApplier;

impl EventApplier for OrderFinalizedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderFinalized { shares, .. } = &event.payload {
            snapshot.status = OrderStatus::Active;
            snapshot.finalized_at = Some(event.timestamp);

            for share in shares {
                if let Some(participant) = snapshot
                    .participants
                    .iter_mut()
                    .find(|p| p.participant_id == share.participant_id)
                {
                    participant.assigned_amount = share.amount;
                }

                let mut payment = PaymentEntry::new(
                    share.payment_id.clone(),
                    share.participant_id.clone(),
                    share.amount,
                );
                payment.push_history(
                    PaymentStatus::Pending,
                    event.timestamp,
                    event.operator_id.clone(),
                    None,
                );
                snapshot.payments.push(payment);
            }

            money::recalculate_totals(snapshot);

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
