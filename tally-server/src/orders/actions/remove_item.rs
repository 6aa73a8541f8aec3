//! RemoveItem command handler

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// RemoveItem action
#[derive(Debug, Clone)]
pub struct RemoveItemAction {
    pub order_id: String,
    pub item_id: String,
}

#[async_trait]
impl CommandHandler for RemoveItemAction {
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

        // 4. The item must exist; keep its name for the audit trail
        let item = snapshot.find_item(&self.item_id).ok_or_else(|| {
            OrderError::InvalidOperation(format!("item not found: {}", self.item_id))
        })?;

        // 5. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::ItemRemoved,
            EventPayload::ItemRemoved {
                item_id: self.item_id.clone(),
                name: item.name.clone(),
            },
        );

        Ok(vec![event])
    }
}
