//! ParticipantRemoved event applier

use crate::orders::money;
use crate::orders::split;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ParticipantRemoved applier
pub struct ParticipantRemovedApplier;

impl EventApplier for ParticipantRemovedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ParticipantRemoved { participant_id, .. } = &event.payload {
            snapshot
                .participants
                .retain(|p| &p.participant_id != participant_id);

            money::recalculate_totals(snapshot);
            split::refresh_equal_shares(snapshot);

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
