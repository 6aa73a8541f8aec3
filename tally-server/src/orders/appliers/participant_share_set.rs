//! ParticipantShareSet event applier

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ParticipantShareSet applier
pub struct ParticipantShareSetApplier;

impl EventApplier for ParticipantShareSetApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ParticipantShareSet { participant_id, amount, .. } = &event.payload {
            if let Some(participant) = snapshot
                .participants
                .iter_mut()
                .find(|p| &p.participant_id == participant_id)
            {
                participant.assigned_amount = *amount;
            }

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
