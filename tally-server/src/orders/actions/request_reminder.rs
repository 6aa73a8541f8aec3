//! RequestReminder command handler
//!
//! The organizer nudges whoever still owes. A single payment can be
//! targeted, or the whole outstanding set at once. The resolved target
//! list is frozen into the event so the notifier never re-derives it.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus, PaymentStatus};

/// RequestReminder action
#[derive(Debug, Clone)]
pub struct RequestReminderAction {
    pub order_id: String,
    pub payment_id: Option<String>,
    pub message: Option<String>,
}

#[async_trait]
impl CommandHandler for RequestReminderAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Only the organizer sends reminders
        if snapshot.organizer_id != metadata.operator_id {
            return Err(OrderError::NotOrganizer(metadata.operator_id.clone()));
        }

        // 3. Reminders only make sense while payments can still move
        if snapshot.status != OrderStatus::Active {
            return Err(OrderError::OrderLocked {
                order_id: self.order_id.clone(),
                status: snapshot.status,
            });
        }

        // 4. Resolve targets: one named share, or every non-confirmed one
        let payment_ids: Vec<String> = match &self.payment_id {
            Some(payment_id) => {
                let payment = snapshot
                    .find_payment(payment_id)
                    .ok_or_else(|| OrderError::PaymentNotFound(payment_id.clone()))?;
                if payment.status == PaymentStatus::Confirmed {
                    return Err(OrderError::InvalidOperation(format!(
                        "payment {} is already confirmed",
                        payment_id
                    )));
                }
                vec![payment.payment_id.clone()]
            }
            None => snapshot
                .payments
                .iter()
                .filter(|p| p.status != PaymentStatus::Confirmed)
                .map(|p| p.payment_id.clone())
                .collect(),
        };

        if payment_ids.is_empty() {
            return Err(OrderError::InvalidOperation(
                "no outstanding payments to remind".to_string(),
            ));
        }

        // 5. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::ReminderRequested,
            EventPayload::ReminderRequested {
                payment_ids,
                message: self.message.clone(),
            },
        );

        Ok(vec![event])
    }
}
