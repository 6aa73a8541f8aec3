//! OrderInfoUpdated event applier

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// OrderInfoUpdated applier
pub struct OrderInfoUpdatedApplier;

impl EventApplier for OrderInfoUpdatedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderInfoUpdated { title, note } = &event.payload {
            if let Some(title) = title {
                snapshot.title = title.clone();
            }
            if let Some(note) = note {
                snapshot.note = Some(note.clone());
            }

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
