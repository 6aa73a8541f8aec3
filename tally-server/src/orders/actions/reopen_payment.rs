//! ReopenPayment command handler
//!
//! Resolves a dispute by sending the share back to Pending. The method
//! and submission timestamp are cleared by the applier, so the
//! participant submits again from scratch.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus, PaymentStatus};

/// ReopenPayment action
#[derive(Debug, Clone)]
pub struct ReopenPaymentAction {
    pub order_id: String,
    pub payment_id: String,
    pub note: Option<String>,
}

#[async_trait]
impl CommandHandler for ReopenPaymentAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Only the organizer resolves disputes
        if snapshot.organizer_id != metadata.operator_id {
            return Err(OrderError::NotOrganizer(metadata.operator_id.clone()));
        }

        // 3. Payments only move on an active order
        if snapshot.status != OrderStatus::Active {
            return Err(OrderError::OrderLocked {
                order_id: self.order_id.clone(),
                status: snapshot.status,
            });
        }

        // 4. Find the ledger entry
        let payment = snapshot
            .find_payment(&self.payment_id)
            .ok_or_else(|| OrderError::PaymentNotFound(self.payment_id.clone()))?;

        // 5. Only a disputed share can be reopened
        if !payment.status.can_transition_to(PaymentStatus::Pending) {
            return Err(OrderError::InvalidTransition {
                from: payment.status,
                to: PaymentStatus::Pending,
            });
        }

        // 6. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::PaymentReopened,
            EventPayload::PaymentReopened {
                payment_id: payment.payment_id.clone(),
                participant_id: payment.participant_id.clone(),
                note: self.note.clone(),
            },
        );

        Ok(vec![event])
    }
}
