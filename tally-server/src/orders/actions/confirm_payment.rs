//! ConfirmPayment command handler
//!
//! The organizer acknowledges money received. Submitted and disputed
//! shares confirm normally; a pending share confirms directly only on
//! the cash path. Confirming the last outstanding share also emits
//! OrderCompleted, so completion is always an explicit event.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::orders::money;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{
    EventPayload, OrderEvent, OrderEventType, OrderStatus, PaymentMethod, PaymentStatus,
};

/// ConfirmPayment action
#[derive(Debug, Clone)]
pub struct ConfirmPaymentAction {
    pub order_id: String,
    pub payment_id: String,
    pub method: Option<PaymentMethod>,
    pub note: Option<String>,
}

#[async_trait]
impl CommandHandler for ConfirmPaymentAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Only the organizer confirms receipt
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

        // 5. Resolve the settling method: recorded at submit wins, the
        //    command's method only feeds the direct cash path
        let method = payment.method.or(self.method).ok_or_else(|| {
            OrderError::InvalidOperation(format!(
                "payment {} has no method on record; specify one to confirm",
                self.payment_id
            ))
        })?;

        // 6. Check the transition; Pending skips Submitted only for cash
        let direct = payment.status == PaymentStatus::Pending;
        let allowed = payment.status.can_transition_to(PaymentStatus::Confirmed)
            || (direct && method == PaymentMethod::Cash);
        if !allowed {
            return Err(OrderError::InvalidTransition {
                from: payment.status,
                to: PaymentStatus::Confirmed,
            });
        }

        // 7. Allocate sequence number and create event
        let mut events = vec![OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::PaymentConfirmed,
            EventPayload::PaymentConfirmed {
                payment_id: payment.payment_id.clone(),
                participant_id: payment.participant_id.clone(),
                method,
                amount: payment.amount_due,
                direct,
                note: self.note.clone(),
            },
        )];

        // 8. Confirming the last outstanding share completes the order
        let all_others_confirmed = snapshot
            .payments
            .iter()
            .filter(|p| p.payment_id != self.payment_id)
            .all(|p| p.status == PaymentStatus::Confirmed);

        if all_others_confirmed {
            let total_collected = money::to_f64(
                snapshot
                    .payments
                    .iter()
                    .map(|p| money::to_decimal(p.amount_due))
                    .sum::<Decimal>(),
            );
            events.push(OrderEvent::new(
                ctx.next_sequence(),
                self.order_id.clone(),
                metadata.operator_id.clone(),
                metadata.operator_name.clone(),
                metadata.command_id.clone(),
                Some(metadata.timestamp),
                OrderEventType::OrderCompleted,
                EventPayload::OrderCompleted { total_collected },
            ));
        }

        Ok(events)
    }
}
