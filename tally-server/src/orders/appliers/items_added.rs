//! ItemsAdded event applier
//!
//! Applies the ItemsAdded event to add item lines to the snapshot.

use crate::orders::money;
use crate::orders::split;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ItemsAdded applier
pub struct ItemsAddedApplier;

impl EventApplier for ItemsAddedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemsAdded { items } = &event.payload {
            snapshot.items.extend(items.iter().cloned());

            // Recalculate totals and the equal-split preview
            money::recalculate_totals(snapshot);
            split::refresh_equal_shares(snapshot);

            // Update sequence and timestamp
            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;

            // Update checksum
            snapshot.update_checksum();
        }
    }
}
