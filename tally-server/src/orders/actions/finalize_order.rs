//! FinalizeOrder command handler
//!
//! Locks the draft and opens the payment ledger. The split is validated
//! first; a failing validation emits nothing, so no ledger entries exist
//! for an order that never finalized. Payment ids are generated here and
//! frozen into the event payload.

use async_trait::async_trait;

use crate::orders::split;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{
    EventPayload, OrderEvent, OrderEventType, OrderStatus, ShareAssignment,
};

/// FinalizeOrder action
#[derive(Debug, Clone)]
pub struct FinalizeOrderAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for FinalizeOrderAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Only the organizer finalizes
        if snapshot.organizer_id != metadata.operator_id {
            return Err(OrderError::NotOrganizer(metadata.operator_id.clone()));
        }

        // 3. Only a draft can be finalized
        if snapshot.status != OrderStatus::Draft {
            return Err(OrderError::OrderLocked {
                order_id: self.order_id.clone(),
                status: snapshot.status,
            });
        }

        // 4. Validate the split: non-empty items and participants, and the
        //    assigned sum must match the effective total within tolerance
        split::validate_for_finalize(&snapshot)?;

        // 5. Freeze one share per participant, in stable order
        let shares: Vec<ShareAssignment> = snapshot
            .participants
            .iter()
            .map(|p| ShareAssignment {
                participant_id: p.participant_id.clone(),
                payment_id: shared::util::snowflake_id().to_string(),
                amount: p.assigned_amount,
            })
            .collect();

        // 6. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::OrderFinalized,
            EventPayload::OrderFinalized {
                effective_total: snapshot.effective_total,
                shares,
            },
        );

        Ok(vec![event])
    }
}
