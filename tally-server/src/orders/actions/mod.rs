//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles
//! one specific command type.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{OrderCommand, OrderCommandPayload, OrderEvent};

mod add_items;
mod add_participant;
mod archive_order;
mod cancel_order;
mod confirm_payment;
pub mod create_order;
mod dispute_payment;
mod finalize_order;
mod remove_item;
mod remove_participant;
mod reopen_payment;
mod request_reminder;
mod set_item_quantity;
mod set_participant_share;
mod set_split_policy;
mod set_total_override;
mod submit_payment;
mod update_order_info;

pub use add_items::AddItemsAction;
pub use add_participant::AddParticipantAction;
pub use archive_order::ArchiveOrderAction;
pub use cancel_order::CancelOrderAction;
pub use confirm_payment::ConfirmPaymentAction;
pub use create_order::CreateOrderAction;
pub use dispute_payment::DisputePaymentAction;
pub use finalize_order::FinalizeOrderAction;
pub use remove_item::RemoveItemAction;
pub use remove_participant::RemoveParticipantAction;
pub use reopen_payment::ReopenPaymentAction;
pub use request_reminder::RequestReminderAction;
pub use set_item_quantity::SetItemQuantityAction;
pub use set_participant_share::SetParticipantShareAction;
pub use set_split_policy::SetSplitPolicyAction;
pub use set_total_override::SetTotalOverrideAction;
pub use submit_payment::SubmitPaymentAction;
pub use update_order_info::UpdateOrderInfoAction;

/// CommandAction enum - dispatches to concrete action implementations
pub enum CommandAction {
    CreateOrder(CreateOrderAction),
    FinalizeOrder(FinalizeOrderAction),
    CancelOrder(CancelOrderAction),
    ArchiveOrder(ArchiveOrderAction),
    AddItems(AddItemsAction),
    RemoveItem(RemoveItemAction),
    SetItemQuantity(SetItemQuantityAction),
    AddParticipant(AddParticipantAction),
    RemoveParticipant(RemoveParticipantAction),
    UpdateOrderInfo(UpdateOrderInfoAction),
    SetTotalOverride(SetTotalOverrideAction),
    SetSplitPolicy(SetSplitPolicyAction),
    SetParticipantShare(SetParticipantShareAction),
    SubmitPayment(SubmitPaymentAction),
    ConfirmPayment(ConfirmPaymentAction),
    DisputePayment(DisputePaymentAction),
    ReopenPayment(ReopenPaymentAction),
    RequestReminder(RequestReminderAction),
}

/// Manual implementation of CommandHandler for CommandAction
#[async_trait]
impl CommandHandler for CommandAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        match self {
            CommandAction::CreateOrder(action) => action.execute(ctx, metadata).await,
            CommandAction::FinalizeOrder(action) => action.execute(ctx, metadata).await,
            CommandAction::CancelOrder(action) => action.execute(ctx, metadata).await,
            CommandAction::ArchiveOrder(action) => action.execute(ctx, metadata).await,
            CommandAction::AddItems(action) => action.execute(ctx, metadata).await,
            CommandAction::RemoveItem(action) => action.execute(ctx, metadata).await,
            CommandAction::SetItemQuantity(action) => action.execute(ctx, metadata).await,
            CommandAction::AddParticipant(action) => action.execute(ctx, metadata).await,
            CommandAction::RemoveParticipant(action) => action.execute(ctx, metadata).await,
            CommandAction::UpdateOrderInfo(action) => action.execute(ctx, metadata).await,
            CommandAction::SetTotalOverride(action) => action.execute(ctx, metadata).await,
            CommandAction::SetSplitPolicy(action) => action.execute(ctx, metadata).await,
            CommandAction::SetParticipantShare(action) => action.execute(ctx, metadata).await,
            CommandAction::SubmitPayment(action) => action.execute(ctx, metadata).await,
            CommandAction::ConfirmPayment(action) => action.execute(ctx, metadata).await,
            CommandAction::DisputePayment(action) => action.execute(ctx, metadata).await,
            CommandAction::ReopenPayment(action) => action.execute(ctx, metadata).await,
            CommandAction::RequestReminder(action) => action.execute(ctx, metadata).await,
        }
    }
}

/// Convert OrderCommand to CommandAction
///
/// This is the ONLY place with a match on OrderCommandPayload.
impl From<&OrderCommand> for CommandAction {
    fn from(cmd: &OrderCommand) -> Self {
        match &cmd.payload {
            OrderCommandPayload::CreateOrder { .. } => {
                // CreateOrder is handled specially in OrdersManager to generate order_id
                // This path should never be reached
                unreachable!("CreateOrder should be handled by OrdersManager, not From<&OrderCommand>")
            }
            OrderCommandPayload::FinalizeOrder { order_id } => {
                CommandAction::FinalizeOrder(FinalizeOrderAction {
                    order_id: order_id.clone(),
                })
            }
            OrderCommandPayload::CancelOrder { order_id, reason } => {
                CommandAction::CancelOrder(CancelOrderAction {
                    order_id: order_id.clone(),
                    reason: reason.clone(),
                })
            }
            OrderCommandPayload::ArchiveOrder { order_id } => {
                CommandAction::ArchiveOrder(ArchiveOrderAction {
                    order_id: order_id.clone(),
                })
            }
            OrderCommandPayload::AddItems { order_id, items } => {
                CommandAction::AddItems(AddItemsAction {
                    order_id: order_id.clone(),
                    items: items.clone(),
                })
            }
            OrderCommandPayload::RemoveItem { order_id, item_id } => {
                CommandAction::RemoveItem(RemoveItemAction {
                    order_id: order_id.clone(),
                    item_id: item_id.clone(),
                })
            }
            OrderCommandPayload::SetItemQuantity {
                order_id,
                item_id,
                quantity,
            } => CommandAction::SetItemQuantity(SetItemQuantityAction {
                order_id: order_id.clone(),
                item_id: item_id.clone(),
                quantity: *quantity,
            }),
            OrderCommandPayload::AddParticipant {
                order_id,
                participant,
            } => CommandAction::AddParticipant(AddParticipantAction {
                order_id: order_id.clone(),
                participant: participant.clone(),
            }),
            OrderCommandPayload::RemoveParticipant {
                order_id,
                participant_id,
            } => CommandAction::RemoveParticipant(RemoveParticipantAction {
                order_id: order_id.clone(),
                participant_id: participant_id.clone(),
            }),
            OrderCommandPayload::UpdateOrderInfo {
                order_id,
                title,
                note,
            } => CommandAction::UpdateOrderInfo(UpdateOrderInfoAction {
                order_id: order_id.clone(),
                title: title.clone(),
                note: note.clone(),
            }),
            OrderCommandPayload::SetTotalOverride { order_id, total } => {
                CommandAction::SetTotalOverride(SetTotalOverrideAction {
                    order_id: order_id.clone(),
                    total: *total,
                })
            }
            OrderCommandPayload::SetSplitPolicy { order_id, policy } => {
                CommandAction::SetSplitPolicy(SetSplitPolicyAction {
                    order_id: order_id.clone(),
                    policy: *policy,
                })
            }
            OrderCommandPayload::SetParticipantShare {
                order_id,
                participant_id,
                amount,
            } => CommandAction::SetParticipantShare(SetParticipantShareAction {
                order_id: order_id.clone(),
                participant_id: participant_id.clone(),
                amount: *amount,
            }),
            OrderCommandPayload::SubmitPayment {
                order_id,
                payment_id,
                method,
                note,
            } => CommandAction::SubmitPayment(SubmitPaymentAction {
                order_id: order_id.clone(),
                payment_id: payment_id.clone(),
                method: *method,
                note: note.clone(),
            }),
            OrderCommandPayload::ConfirmPayment {
                order_id,
                payment_id,
                method,
                note,
            } => CommandAction::ConfirmPayment(ConfirmPaymentAction {
                order_id: order_id.clone(),
                payment_id: payment_id.clone(),
                method: *method,
                note: note.clone(),
            }),
            OrderCommandPayload::DisputePayment {
                order_id,
                payment_id,
                note,
            } => CommandAction::DisputePayment(DisputePaymentAction {
                order_id: order_id.clone(),
                payment_id: payment_id.clone(),
                note: note.clone(),
            }),
            OrderCommandPayload::ReopenPayment {
                order_id,
                payment_id,
                note,
            } => CommandAction::ReopenPayment(ReopenPaymentAction {
                order_id: order_id.clone(),
                payment_id: payment_id.clone(),
                note: note.clone(),
            }),
            OrderCommandPayload::RequestReminder {
                order_id,
                payment_id,
                message,
            } => CommandAction::RequestReminder(RequestReminderAction {
                order_id: order_id.clone(),
                payment_id: payment_id.clone(),
                message: message.clone(),
            }),
        }
    }
}
