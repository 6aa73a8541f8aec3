//! SubmitPayment command handler
//!
//! A participant declares "I paid my share". Only the owner of the
//! ledger entry can submit it, and only while the order is active. The
//! amount in the event is the frozen amount due, never caller input.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{
    EventPayload, OrderEvent, OrderEventType, OrderStatus, PaymentMethod, PaymentStatus,
};

/// SubmitPayment action
#[derive(Debug, Clone)]
pub struct SubmitPaymentAction {
    pub order_id: String,
    pub payment_id: String,
    pub method: PaymentMethod,
    pub note: Option<String>,
}

#[async_trait]
impl CommandHandler for SubmitPaymentAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Payments only move on an active order
        if snapshot.status != OrderStatus::Active {
            return Err(OrderError::OrderLocked {
                order_id: self.order_id.clone(),
                status: snapshot.status,
            });
        }

        // 3. Find the ledger entry
        let payment = snapshot
            .find_payment(&self.payment_id)
            .ok_or_else(|| OrderError::PaymentNotFound(self.payment_id.clone()))?;

        // 4. Only the owing participant submits their own share
        let participant = snapshot
            .find_participant(&payment.participant_id)
            .ok_or_else(|| OrderError::ParticipantNotFound(payment.participant_id.clone()))?;
        if participant.user_id != metadata.operator_id {
            return Err(OrderError::InvalidOperation(format!(
                "payment {} belongs to another participant",
                self.payment_id
            )));
        }

        // 5. Check the transition
        if !payment.status.can_transition_to(PaymentStatus::Submitted) {
            return Err(OrderError::InvalidTransition {
                from: payment.status,
                to: PaymentStatus::Submitted,
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
            OrderEventType::PaymentSubmitted,
            EventPayload::PaymentSubmitted {
                payment_id: payment.payment_id.clone(),
                participant_id: payment.participant_id.clone(),
                method: self.method,
                amount: payment.amount_due,
                note: self.note.clone(),
            },
        );

        Ok(vec![event])
    }
}
