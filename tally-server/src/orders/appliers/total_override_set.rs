//! TotalOverrideSet event applier

use crate::orders::money;
use crate::orders::split;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// TotalOverrideSet applier
pub struct TotalOverrideSetApplier;

impl EventApplier for TotalOverrideSetApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::TotalOverrideSet { total, .. } = &event.payload {
            snapshot.total_override = *total;

            money::recalculate_totals(snapshot);
            split::refresh_equal_shares(snapshot);

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
