//! CreateOrder command handler
//!
//! Opens a new draft order owned by the commanding operator. Initial items
//! and participants may be supplied inline; ids are generated here so the
//! emitted event replays deterministically.

use async_trait::async_trait;

use crate::orders::money;
use crate::orders::reducer;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{
    EventPayload, OrderEvent, OrderEventType, OrderItemInput, ParticipantInput,
};

/// CreateOrder action
///
/// `order_id` is generated by the manager before dispatch so the response
/// can name the new order.
#[derive(Debug, Clone)]
pub struct CreateOrderAction {
    pub order_id: String,
    pub title: String,
    pub note: Option<String>,
    pub items: Vec<OrderItemInput>,
    pub participants: Vec<ParticipantInput>,
}

#[async_trait]
impl CommandHandler for CreateOrderAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Validate the title
        let title = self.title.trim();
        if title.is_empty() {
            return Err(OrderError::InvalidOperation(
                "order title cannot be empty".to_string(),
            ));
        }

        // 2. Validate initial items
        for item in &self.items {
            money::validate_item(item)?;
        }

        // 3. Validate initial participants, including duplicate contacts
        //    within the inline list itself
        let mut seen_contacts: Vec<String> = Vec::new();
        for participant in &self.participants {
            validate_participant_input(participant)?;
            let contact = participant.contact.trim().to_lowercase();
            if seen_contacts.contains(&contact) {
                return Err(OrderError::DuplicateParticipant(
                    participant.contact.trim().to_string(),
                ));
            }
            seen_contacts.push(contact);
        }

        // 4. Materialize entries with server-generated ids
        let items = self.items.iter().map(reducer::item_input_to_entry).collect();
        let participants = self
            .participants
            .iter()
            .map(reducer::participant_input_to_entry)
            .collect();

        // 5. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::OrderCreated,
            EventPayload::OrderCreated {
                title: title.to_string(),
                note: self.note.clone(),
                items,
                participants,
            },
        );

        Ok(vec![event])
    }
}

fn validate_participant_input(input: &ParticipantInput) -> Result<(), OrderError> {
    if input.display_name.trim().is_empty() {
        return Err(OrderError::InvalidOperation(
            "participant display name cannot be empty".to_string(),
        ));
    }
    if input.contact.trim().is_empty() {
        return Err(OrderError::InvalidOperation(
            "participant contact cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::storage::OrderStorage;
    use crate::orders::traits::CommandContext;

    fn create_test_metadata() -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            operator_id: "user-1".to_string(),
            operator_name: "Test User".to_string(),
            timestamp: 1234567890,
        }
    }

    fn item_input(name: &str, price: f64, quantity: i32) -> OrderItemInput {
        OrderItemInput {
            name: name.to_string(),
            price,
            quantity,
            note: None,
        }
    }

    fn participant_input(name: &str, contact: &str) -> ParticipantInput {
        ParticipantInput {
            user_id: format!("user-{name}"),
            display_name: name.to_string(),
            contact: contact.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_order_success() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        let current_seq = storage.get_current_sequence_txn(&txn).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, current_seq);

        let action = CreateOrderAction {
            order_id: "order-1".to_string(),
            title: "  Team dinner  ".to_string(),
            note: Some("Friday".to_string()),
            items: vec![item_input("Pizza", 25.0, 2)],
            participants: vec![
                participant_input("Ann", "ann@example.com"),
                participant_input("Bob", "bob@example.com"),
            ],
        };

        let metadata = create_test_metadata();
        let events = action.execute(&mut ctx, &metadata).await.unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.sequence, 1);
        assert_eq!(event.order_id, "order-1");
        assert_eq!(event.event_type, OrderEventType::OrderCreated);

        if let EventPayload::OrderCreated {
            title,
            items,
            participants,
            ..
        } = &event.payload
        {
            assert_eq!(title, "Team dinner");
            assert_eq!(items.len(), 1);
            assert!(!items[0].item_id.is_empty());
            assert_eq!(participants.len(), 2);
            assert_ne!(participants[0].participant_id, participants[1].participant_id);
        } else {
            panic!("Expected OrderCreated payload");
        }
    }

    #[tokio::test]
    async fn test_create_order_empty_title() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        let current_seq = storage.get_current_sequence_txn(&txn).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, current_seq);

        let action = CreateOrderAction {
            order_id: "order-1".to_string(),
            title: "   ".to_string(),
            note: None,
            items: vec![],
            participants: vec![],
        };

        let result = action.execute(&mut ctx, &create_test_metadata()).await;
        assert!(matches!(result, Err(OrderError::InvalidOperation(_))));
    }

    #[tokio::test]
    async fn test_create_order_duplicate_inline_contact() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        let current_seq = storage.get_current_sequence_txn(&txn).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, current_seq);

        let action = CreateOrderAction {
            order_id: "order-1".to_string(),
            title: "Team dinner".to_string(),
            note: None,
            items: vec![],
            participants: vec![
                participant_input("Ann", "ann@example.com"),
                participant_input("Annie", "ANN@example.com"),
            ],
        };

        let result = action.execute(&mut ctx, &create_test_metadata()).await;
        assert!(matches!(result, Err(OrderError::DuplicateParticipant(_))));
    }

    #[tokio::test]
    async fn test_create_order_rejects_bad_item() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        let current_seq = storage.get_current_sequence_txn(&txn).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, current_seq);

        let action = CreateOrderAction {
            order_id: "order-1".to_string(),
            title: "Team dinner".to_string(),
            note: None,
            items: vec![item_input("Pizza", -5.0, 1)],
            participants: vec![],
        };

        let result = action.execute(&mut ctx, &create_test_metadata()).await;
        assert!(result.is_err());
    }
}
