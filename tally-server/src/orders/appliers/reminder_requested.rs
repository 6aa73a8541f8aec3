//! ReminderRequested event applier

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ReminderRequested applier
pub struct ReminderRequestedApplier;

impl EventApplier for ReminderRequestedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ReminderRequested { payment_ids, .. } = &event.payload {
            for payment in snapshot
                .payments
                .iter_mut()
                .filter(|p| payment_ids.contains(&p.payment_id))
            {
                payment.last_reminded_at = Some(event.timestamp);
            }

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
