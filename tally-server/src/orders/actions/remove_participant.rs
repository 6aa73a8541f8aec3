//! RemoveParticipant command handler
//!
//! Draft-only. Once an order is finalized each participant owns a ledger
//! entry, so removal is forbidden rather than cascading into the ledger.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// RemoveParticipant action
#[derive(Debug, Clone)]
pub struct RemoveParticipantAction {
    pub order_id: String,
    pub participant_id: String,
}

#[async_trait]
impl CommandHandler for RemoveParticipantAction {
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

        // 4. The participant must exist
        let participant = snapshot
            .find_participant(&self.participant_id)
            .ok_or_else(|| OrderError::ParticipantNotFound(self.participant_id.clone()))?;

        // 5. Allocate sequence number and create event
        let event = OrderEvent::new(
            ctx.next_sequence(),
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::ParticipantRemoved,
            EventPayload::ParticipantRemoved {
                participant_id: self.participant_id.clone(),
                display_name: participant.display_name.clone(),
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
    use shared::order::{OrderSnapshot, ParticipantEntry};

    fn create_test_metadata() -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            operator_id: "user-1".to_string(),
            operator_name: "Test User".to_string(),
            timestamp: 1234567890,
        }
    }

    fn create_draft_with_participant(order_id: &str) -> OrderSnapshot {
        let mut snapshot = OrderSnapshot::new(order_id.to_string());
        snapshot.organizer_id = "user-1".to_string();
        snapshot.participants.push(ParticipantEntry {
            participant_id: "p-1".to_string(),
            user_id: "user-ann".to_string(),
            display_name: "Ann".to_string(),
            contact: "ann@example.com".to_string(),
            assigned_amount: 0.0,
        });
        snapshot
    }

    #[tokio::test]
    async fn test_remove_participant_success() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        storage
            .store_snapshot(&txn, &create_draft_with_participant("order-1"))
            .unwrap();

        let current_seq = storage.get_current_sequence_txn(&txn).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, current_seq);

        let action = RemoveParticipantAction {
            order_id: "order-1".to_string(),
            participant_id: "p-1".to_string(),
        };

        let events = action.execute(&mut ctx, &create_test_metadata()).await.unwrap();
        if let EventPayload::ParticipantRemoved {
            participant_id,
            display_name,
        } = &events[0].payload
        {
            assert_eq!(participant_id, "p-1");
            assert_eq!(display_name, "Ann");
        } else {
            panic!("Expected ParticipantRemoved payload");
        }
    }

    #[tokio::test]
    async fn test_remove_participant_unknown_id() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        storage
            .store_snapshot(&txn, &create_draft_with_participant("order-1"))
            .unwrap();

        let current_seq = storage.get_current_sequence_txn(&txn).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, current_seq);

        let action = RemoveParticipantAction {
            order_id: "order-1".to_string(),
            participant_id: "missing".to_string(),
        };

        let result = action.execute(&mut ctx, &create_test_metadata()).await;
        assert!(matches!(result, Err(OrderError::ParticipantNotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_participant_forbidden_after_finalize() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();

        let mut snapshot = create_draft_with_participant("order-1");
        snapshot.status = OrderStatus::Active;
        storage.store_snapshot(&txn, &snapshot).unwrap();

        let current_seq = storage.get_current_sequence_txn(&txn).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, current_seq);

        let action = RemoveParticipantAction {
            order_id: "order-1".to_string(),
            participant_id: "p-1".to_string(),
        };

        let result = action.execute(&mut ctx, &create_test_metadata()).await;
        assert!(matches!(result, Err(OrderError::OrderLocked { .. })));
    }
}
