//! ArchiveOrder command handler
//!
//! Moves a completed or cancelled order out of the active listing. The
//! previous status is recorded in the event so history stays legible.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// ArchiveOrder action
#[derive(Debug, Clone)]
pub struct ArchiveOrderAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for ArchiveOrderAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Only the organizer archives
        if snapshot.organizer_id != metadata.operator_id {
            return Err(OrderError::NotOrganizer(metadata.operator_id.clone()));
        }

        // 3. Only settled orders can be archived
        if !matches!(
            snapshot.status,
            OrderStatus::Completed | OrderStatus::Cancelled
        ) {
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
            OrderEventType::OrderArchived,
            EventPayload::OrderArchived {
                previous_status: snapshot.status,
            },
        );

        Ok(vec![event])
    }
}
