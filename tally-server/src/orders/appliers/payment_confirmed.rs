//! PaymentConfirmed event applier
//!
//! Confirmation is absorbing for the ledger entry and feeds
//! `collected_amount`. Closing the order is a separate OrderCompleted
//! event emitted by the confirm command, never inferred here.

use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, PaymentStatus};

/// PaymentConfirmed applier
pub struct PaymentConfirmedApplier;

impl EventApplier for PaymentConfirmedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::PaymentConfirmed { payment_id, method, note, .. } = &event.payload {
            if let Some(payment) = snapshot
                .payments
                .iter_mut()
                .find(|p| &p.payment_id == payment_id)
            {
                payment.method = Some(*method);
                payment.confirmed_at = Some(event.timestamp);
                payment.push_history(
                    PaymentStatus::Confirmed,
                    event.timestamp,
                    event.operator_id.clone(),
                    note.clone(),
                );
            }

            money::recalculate_totals(snapshot);

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
