//! OrderArchived event applier

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderStatus};

/// OrderArchived applier
pub struct OrderArchivedApplier;

impl EventApplier for OrderArchivedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderArchived { .. } = &event.payload {
            snapshot.status = OrderStatus::Archived;
            if snapshot.closed_at.is_none() {
                snapshot.closed_at = Some(event.timestamp);
            }

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
