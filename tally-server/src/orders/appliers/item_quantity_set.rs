//! ItemQuantitySet event applier

use crate::orders::money;
use crate::orders::split;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ItemQuantitySet applier
pub struct ItemQuantitySetApplier;

impl EventApplier for ItemQuantitySetApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemQuantitySet { item_id, quantity, .. } = &event.payload {
            if let Some(item) = snapshot.items.iter_mut().find(|i| &i.item_id == item_id) {
                item.quantity = *quantity;
            }

            money::recalculate_totals(snapshot);
            split::refresh_equal_shares(snapshot);

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
