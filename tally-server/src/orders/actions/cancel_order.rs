//! CancelOrder command handler
//!
//! Abandons a draft or active order. Completed and closed orders cannot
//! be cancelled.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// CancelOrder action
#[derive(Debug, Clone)]
pub struct CancelOrderAction {
    pub order_id: String,
    pub reason: Option<String>,
}

#[async_trait]
impl CommandHandler for CancelOrderAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Only the organizer cancels
        if snapshot.organizer_id != metadata.operator_id {
            return Err(OrderError::NotOrganizer(metadata.operator_id.clone()));
        }

        // 3. Only drafts and active orders can be cancelled
        if !matches!(snapshot.status, OrderStatus::Draft | OrderStatus::Active) {
            return Err(OrderError::OrderLocked {
                order_id: self.order_id.clone(),
                status: snapshot.status,
            });
        }

        // 4. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::OrderCancelled,
            EventPayload::OrderCancelled {
                reason: self.reason.clone(),
            },
        );

        Ok(vec![event])
    }
}
