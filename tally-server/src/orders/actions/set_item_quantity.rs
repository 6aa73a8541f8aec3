//! SetItemQuantity command handler

use async_trait::async_trait;

use crate::orders::money;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// SetItemQuantity action
#[derive(Debug, Clone)]
pub struct SetItemQuantityAction {
    pub order_id: String,
    pub item_id: String,
    pub quantity: i32,
}

#[async_trait]
impl CommandHandler for SetItemQuantityAction {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // 2. Structure edits are draft-only
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

        // 4. Validate the new quantity
        money::validate_quantity(self.quantity)?;

        // 5. The item must exist; record the previous quantity
        let item = snapshot.find_item(&self.item_id).ok_or_else(|| {
            OrderError::InvalidOperation(format!("item not found: {}", self.item_id))
        })?;

        // 6. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::ItemQuantitySet,
            EventPayload::ItemQuantitySet {
                item_id: self.item_id.clone(),
                quantity: self.quantity,
                previous_quantity: item.quantity,
            },
        );

        Ok(vec![event])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::storage::OrderStorage;
    use crate::orders::traits::CommandContext;
    use shared::order::{OrderItemEntry, OrderSnapshot};

    fn create_test_metadata() -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            operator_id: "user-1".to_string(),
            operator_name: "Test User".to_string(),
            timestamp: 1234567890,
        }
    }

    fn create_draft_with_item(order_id: &str) -> OrderSnapshot {
        let mut snapshot = OrderSnapshot::new(order_id.to_string());
        snapshot.organizer_id = "user-1".to_string();
        snapshot.items.push(OrderItemEntry {
            item_id: "item-1".to_string(),
            name: "Pizza".to_string(),
            price: 12.5,
            quantity: 2,
            note: None,
        });
        snapshot
    }

    #[tokio::test]
    async fn test_set_item_quantity_success() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        storage
            .store_snapshot(&txn, &create_draft_with_item("order-1"))
            .unwrap();

        let current_seq = storage.get_current_sequence_txn(&txn).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, current_seq);

        let action = SetItemQuantityAction {
            order_id: "order-1".to_string(),
            item_id: "item-1".to_string(),
            quantity: 5,
        };

        let events = action.execute(&mut ctx, &create_test_metadata()).await.unwrap();
        if let EventPayload::ItemQuantitySet {
            quantity,
            previous_quantity,
            ..
        } = &events[0].payload
        {
            assert_eq!(*quantity, 5);
            assert_eq!(*previous_quantity, 2);
        } else {
            panic!("Expected ItemQuantitySet payload");
        }
    }

    #[tokio::test]
    async fn test_set_item_quantity_negative() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        storage
            .store_snapshot(&txn, &create_draft_with_item("order-1"))
            .unwrap();

        let current_seq = storage.get_current_sequence_txn(&txn).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, current_seq);

        let action = SetItemQuantityAction {
            order_id: "order-1".to_string(),
            item_id: "item-1".to_string(),
            quantity: -1,
        };

        let result = action.execute(&mut ctx, &create_test_metadata()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_set_item_quantity_unknown_item() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        storage
            .store_snapshot(&txn, &create_draft_with_item("order-1"))
            .unwrap();

        let current_seq = storage.get_current_sequence_txn(&txn).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, current_seq);

        let action = SetItemQuantityAction {
            order_id: "order-1".to_string(),
            item_id: "missing".to_string(),
            quantity: 3,
        };

        let result = action.execute(&mut ctx, &create_test_metadata()).await;
        assert!(matches!(result, Err(OrderError::InvalidOperation(_))));
    }
}
