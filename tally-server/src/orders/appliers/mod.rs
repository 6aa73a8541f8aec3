//! Event applier implementations
//!
//! Each applier implements the `EventApplier` trait and handles
//! one specific event type. Appliers are PURE functions.

use enum_dispatch::enum_dispatch;

use shared::order::{EventPayload, OrderEvent};

mod item_quantity_set;
mod item_removed;
mod items_added;
mod order_archived;
mod order_cancelled;
mod order_completed;
mod order_created;
mod order_finalized;
mod order_info_updated;
mod participant_added;
mod participant_removed;
mod participant_share_set;
mod payment_confirmed;
mod payment_disputed;
mod payment_reopened;
mod payment_submitted;
mod reminder_requested;
mod split_policy_set;
mod total_override_set;

pub use item_quantity_set::ItemQuantitySetApplier;
pub use item_removed::ItemRemovedApplier;
pub use items_added::ItemsAddedApplier;
pub use order_archived::OrderArchivedApplier;
pub use order_cancelled::OrderCancelledApplier;
pub use order_completed::OrderCompletedApplier;
pub use order_created::OrderCreatedApplier;
pub use order_finalized::OrderFinalizedApplier;
pub use order_info_updated::OrderInfoUpdatedApplier;
pub use participant_added::ParticipantAddedApplier;
pub use participant_removed::ParticipantRemovedApplier;
pub use participant_share_set::ParticipantShareSetApplier;
pub use payment_confirmed::PaymentConfirmedApplier;
pub use payment_disputed::PaymentDisputedApplier;
pub use payment_reopened::PaymentReopenedApplier;
pub use payment_submitted::PaymentSubmittedApplier;
pub use reminder_requested::ReminderRequestedApplier;
pub use split_policy_set::SplitPolicySetApplier;
pub use total_override_set::TotalOverrideSetApplier;

/// EventAction enum - dispatches to concrete applier implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(EventApplier)]
pub enum EventAction {
    OrderCreated(OrderCreatedApplier),
    OrderFinalized(OrderFinalizedApplier),
    OrderCompleted(OrderCompletedApplier),
    OrderCancelled(OrderCancelledApplier),
    OrderArchived(OrderArchivedApplier),
    ItemsAdded(ItemsAddedApplier),
    ItemRemoved(ItemRemovedApplier),
    ItemQuantitySet(ItemQuantitySetApplier),
    ParticipantAdded(ParticipantAddedApplier),
    ParticipantRemoved(ParticipantRemovedApplier),
    OrderInfoUpdated(OrderInfoUpdatedApplier),
    TotalOverrideSet(TotalOverrideSetApplier),
    SplitPolicySet(SplitPolicySetApplier),
    ParticipantShareSet(ParticipantShareSetApplier),
    PaymentSubmitted(PaymentSubmittedApplier),
    PaymentConfirmed(PaymentConfirmedApplier),
    PaymentDisputed(PaymentDisputedApplier),
    PaymentReopened(PaymentReopenedApplier),
    ReminderRequested(ReminderRequestedApplier),
}

/// Convert OrderEvent reference to EventAction
///
/// This is the ONLY place with a match on EventPayload.
impl From<&OrderEvent> for EventAction {
    fn from(event: &OrderEvent) -> Self {
        match &event.payload {
            EventPayload::OrderCreated { .. } => EventAction::OrderCreated(OrderCreatedApplier),
            EventPayload::OrderFinalized { .. } => {
                EventAction::OrderFinalized(OrderFinalizedApplier)
            }
            EventPayload::OrderCompleted { .. } => {
                EventAction::OrderCompleted(OrderCompletedApplier)
            }
            EventPayload::OrderCancelled { .. } => {
                EventAction::OrderCancelled(OrderCancelledApplier)
            }
            EventPayload::OrderArchived { .. } => EventAction::OrderArchived(OrderArchivedApplier),
            EventPayload::ItemsAdded { .. } => EventAction::ItemsAdded(ItemsAddedApplier),
            EventPayload::ItemRemoved { .. } => EventAction::ItemRemoved(ItemRemovedApplier),
            EventPayload::ItemQuantitySet { .. } => {
                EventAction::ItemQuantitySet(ItemQuantitySetApplier)
            }
            EventPayload::ParticipantAdded { .. } => {
                EventAction::ParticipantAdded(ParticipantAddedApplier)
            }
            EventPayload::ParticipantRemoved { .. } => {
                EventAction::ParticipantRemoved(ParticipantRemovedApplier)
            }
            EventPayload::OrderInfoUpdated { .. } => {
                EventAction::OrderInfoUpdated(OrderInfoUpdatedApplier)
            }
            EventPayload::TotalOverrideSet { .. } => {
                EventAction::TotalOverrideSet(TotalOverrideSetApplier)
            }
            EventPayload::SplitPolicySet { .. } => {
                EventAction::SplitPolicySet(SplitPolicySetApplier)
            }
            EventPayload::ParticipantShareSet { .. } => {
                EventAction::ParticipantShareSet(ParticipantShareSetApplier)
            }
            EventPayload::PaymentSubmitted { .. } => {
                EventAction::PaymentSubmitted(PaymentSubmittedApplier)
            }
            EventPayload::PaymentConfirmed { .. } => {
                EventAction::PaymentConfirmed(PaymentConfirmedApplier)
            }
            EventPayload::PaymentDisputed { .. } => {
                EventAction::PaymentDisputed(PaymentDisputedApplier)
            }
            EventPayload::PaymentReopened { .. } => {
                EventAction::PaymentReopened(PaymentReopenedApplier)
            }
            EventPayload::ReminderRequested { .. } => {
                EventAction::ReminderRequested(ReminderRequestedApplier)
            }
        }
    }
}
