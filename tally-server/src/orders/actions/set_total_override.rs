//! SetTotalOverride command handler
//!
//! A manual total replaces the items subtotal as the effective total
//! (delivery fees, venue minimums). Passing `None` clears it.

use async_trait::async_trait;

use crate::orders::money;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// SetTotalOverride action
#[derive(Debug, Clone)]
pub struct SetTotalOverrideAction {
    pub order_id: String,
    pub total: Option<f64>,
}

#[async_trait]
impl CommandHandler for SetTotalOverrideAction {
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

        // 4. Validate the new total when setting
        if let Some(total) = self.total {
            money::validate_total_override(total)?;
        }

        // 5. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::TotalOverrideSet,
            EventPayload::TotalOverrideSet {
                total: self.total,
                previous: snapshot.total_override,
            },
        );

        Ok(vec![event])
    }
}
