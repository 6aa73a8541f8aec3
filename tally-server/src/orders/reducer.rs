//! Order snapshot utilities
//!
//! Converts client inputs into snapshot entries with server-generated IDs,
//! and rebuilds snapshots by replaying an event stream.
//!
//! IDs are generated here, in the command path, and baked into event
//! payloads. Appliers never generate IDs, so replaying a stream always
//! reproduces the same snapshot.

use crate::orders::appliers::EventAction;
use crate::orders::traits::EventApplier;
use shared::order::{
    OrderEvent, OrderItemEntry, OrderItemInput, OrderSnapshot, ParticipantEntry, ParticipantInput,
};

/// Materialize an item input into a snapshot entry with a fresh item ID
pub fn item_input_to_entry(input: &OrderItemInput) -> OrderItemEntry {
    OrderItemEntry {
        item_id: shared::util::snowflake_id().to_string(),
        name: input.name.trim().to_string(),
        price: input.price,
        quantity: input.quantity,
        note: input.note.clone(),
    }
}

/// Materialize a participant input into a snapshot entry with a fresh
/// participant ID. Assigned amount starts at zero; the split calculator
/// fills it in.
pub fn participant_input_to_entry(input: &ParticipantInput) -> ParticipantEntry {
    ParticipantEntry {
        participant_id: shared::util::snowflake_id().to_string(),
        user_id: input.user_id.clone(),
        display_name: input.display_name.trim().to_string(),
        contact: input.contact.trim().to_string(),
        assigned_amount: 0.0,
    }
}

/// Rebuild a snapshot by replaying events in sequence order.
///
/// Returns `None` for an empty stream. Events must already be sorted by
/// sequence (storage reads guarantee this).
pub fn replay_events(events: &[OrderEvent]) -> Option<OrderSnapshot> {
    let first = events.first()?;
    let mut snapshot = OrderSnapshot::new(first.order_id.clone());

    for event in events {
        let applier: EventAction = event.into();
        applier.apply(&mut snapshot, event);
    }

    Some(snapshot)
}
