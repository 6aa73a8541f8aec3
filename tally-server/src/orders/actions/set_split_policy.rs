//! SetSplitPolicy command handler
//!
//! Switching to `Equal` recomputes every share from the effective total;
//! switching to `Custom` keeps the current amounts as the starting point
//! for manual edits.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus, SplitPolicy};

/// SetSplitPolicy action
#[derive(Debug, Clone)]
pub struct SetSplitPolicyAction {
    pub order_id: String,
    pub policy: SplitPolicy,
}

#[async_trait]
impl CommandHandler for SetSplitPolicyAction {
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

        // 4. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::SplitPolicySet,
            EventPayload::SplitPolicySet {
                policy: self.policy,
                previous: snapshot.split_policy,
            },
        );

        Ok(vec![event])
    }
}
