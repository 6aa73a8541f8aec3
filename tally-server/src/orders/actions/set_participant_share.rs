//! SetParticipantShare command handler
//!
//! Assigns one participant's share under the custom policy. The sum is not
//! checked here; finalize validates the whole set against the effective
//! total so the organizer can edit shares in any order.

use async_trait::async_trait;

use crate::orders::money;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus, SplitPolicy};

/// SetParticipantShare action
#[derive(Debug, Clone)]
pub struct SetParticipantShareAction {
    pub order_id: String,
    pub participant_id: String,
    pub amount: f64,
}

#[async_trait]
impl CommandHandler for SetParticipantShareAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Split configuration is draft-only
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

        // 4. Manual shares only exist under the custom policy
        if snapshot.split_policy != SplitPolicy::Custom {
            return Err(OrderError::InvalidOperation(
                "shares can only be assigned under the custom split policy".to_string(),
            ));
        }

        // 5. Validate the amount
        money::validate_share_amount(self.amount)?;

        // 6. The participant must exist; record the previous amount
        let participant = snapshot
            .find_participant(&self.participant_id)
            .ok_or_else(|| OrderError::ParticipantNotFound(self.participant_id.clone()))?;

        // 7. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::ParticipantShareSet,
            EventPayload::ParticipantShareSet {
                participant_id: self.participant_id.clone(),
                amount: self.amount,
                previous: participant.assigned_amount,
            },
        );

        Ok(vec![event])
    }
}
