//! DisputePayment command handler
//!
//! Flags a share as contested. Either side of the share can raise it:
//! the organizer ("this never arrived") or the owing participant ("this
//! amount is wrong"). A note is mandatory so the other side knows what
//! is being contested.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus, PaymentStatus};

/// DisputePayment action
#[derive(Debug, Clone)]
pub struct DisputePaymentAction {
    pub order_id: String,
    pub payment_id: String,
    pub note: String,
}

#[async_trait]
impl CommandHandler for DisputePaymentAction {
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

        // 4. Organizer or the owing participant, nobody else
        let participant = snapshot
            .find_participant(&payment.participant_id)
            .ok_or_else(|| OrderError::ParticipantNotFound(payment.participant_id.clone()))?;
        let is_organizer = snapshot.organizer_id == metadata.operator_id;
        let is_owner = participant.user_id == metadata.operator_id;
        if !is_organizer && !is_owner {
            return Err(OrderError::InvalidOperation(format!(
                "payment {} can only be disputed by the organizer or its participant",
                self.payment_id
            )));
        }

        // 5. A dispute needs a reason
        if self.note.trim().is_empty() {
            return Err(OrderError::InvalidOperation(
                "dispute note must not be empty".to_string(),
            ));
        }

        // 6. Check the transition
        if !payment.status.can_transition_to(PaymentStatus::Disputed) {
            return Err(OrderError::InvalidTransition {
                from: payment.status,
                to: PaymentStatus::Disputed,
            });
        }

        // 7. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::PaymentDisputed,
            EventPayload::PaymentDisputed {
                payment_id: payment.payment_id.clone(),
                participant_id: payment.participant_id.clone(),
                note: self.note.clone(),
            },
        );

        Ok(vec![event])
    }
}
