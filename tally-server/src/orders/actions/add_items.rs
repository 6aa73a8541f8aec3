//! AddItems command handler
//!
//! Appends item lines to a draft order.

use async_trait::async_trait;

use crate::orders::money;
use crate::orders::reducer;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderItemInput, OrderStatus};

/// AddItems action
#[derive(Debug, Clone)]
pub struct AddItemsAction {
    pub order_id: String,
    pub items: Vec<OrderItemInput>,
}

#[async_trait]
impl CommandHandler for AddItemsAction {
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

        // 4. Validate the batch
        if self.items.is_empty() {
            return Err(OrderError::InvalidOperation(
                "no items to add".to_string(),
            ));
        }
        for item in &self.items {
            money::validate_item(item)?;
        }

        // 5. Materialize entries with server-generated ids
        let items = self.items.iter().map(reducer::item_input_to_entry).collect();

        // 6. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::ItemsAdded,
            EventPayload::ItemsAdded { items },
        );

        Ok(vec![event])
    }
}
