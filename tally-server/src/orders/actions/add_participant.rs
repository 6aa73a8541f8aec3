//! AddParticipant command handler
//!
//! Contact addresses are the duplicate-detection key within an order;
//! the comparison is case-insensitive.

use async_trait::async_trait;

use crate::orders::reducer;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus, ParticipantInput};

/// AddParticipant action
#[derive(Debug, Clone)]
pub struct AddParticipantAction {
    pub order_id: String,
    pub participant: ParticipantInput,
}

#[async_trait]
impl CommandHandler for AddParticipantAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Structure edits are draft-only
        if snapshot.status != OrderStatus::Draft {
            return Err(OrderError::OrderLocked {
                order_id: self.order_id.clone(),
                status: snapshot.status,
            });
        }

        // 3. Only the organizer edits the draft
        if snapshot.organizer_id != metadata.operator_id {
            return Err(OrderError::NotOrganizer(metadata.operator_id.clone()));
        }

        // 4. Validate the input
        if self.participant.display_name.trim().is_empty() {
            return Err(OrderError::InvalidOperation(
                "participant display name cannot be empty".to_string(),
            ));
        }
        let contact = self.participant.contact.trim();
        if contact.is_empty() {
            return Err(OrderError::InvalidOperation(
                "participant contact cannot be empty".to_string(),
            ));
        }

        // 5. Reject duplicate contacts
        if snapshot.has_contact(contact) {
            return Err(OrderError::DuplicateParticipant(contact.to_string()));
        }

        // 6. Materialize the entry with a server-generated id
        let participant = reducer::participant_input_to_entry(&self.participant);

        // 7. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::ParticipantAdded,
            EventPayload::ParticipantAdded { participant },
        );

        Ok(vec![event])
    }
}
