//! UpdateOrderInfo command handler

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// UpdateOrderInfo action
#[derive(Debug, Clone)]
pub struct UpdateOrderInfoAction {
    pub order_id: String,
    pub title: Option<String>,
    pub note: Option<String>,
}

#[async_trait]
impl CommandHandler for UpdateOrderInfoAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Label edits are draft-only
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

        // 4. At least one field must change, and a new title cannot be blank
        if self.title.is_none() && self.note.is_none() {
            return Err(OrderError::InvalidOperation(
                "nothing to update".to_string(),
            ));
        }
        let title = match &self.title {
            Some(t) => {
                let trimmed = t.trim();
                if trimmed.is_empty() {
                    return Err(OrderError::InvalidOperation(
                        "order title cannot be empty".to_string(),
                    ));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        // 5. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::OrderInfoUpdated,
            EventPayload::OrderInfoUpdated {
                title,
                note: self.note.clone(),
            },
        );

        Ok(vec![event])
    }
}
