//! Event store durability across restarts
//! Run: cargo test -p tally-server --test persistence

use shared::order::{
    OrderCommand, OrderCommandPayload, OrderItemInput, OrderStatus, ParticipantInput,
};
use tally_server::OrdersManager;

fn participant(user_id: &str, name: &str) -> ParticipantInput {
    ParticipantInput {
        user_id: user_id.to_string(),
        display_name: name.to_string(),
        contact: format!("{}@example.com", name.to_lowercase()),
    }
}

/// Create a two-participant draft with a 90.00 cabin item
fn open_order(manager: &OrdersManager) -> String {
    let cmd = OrderCommand::new(
        "user-ava",
        "Ava",
        OrderCommandPayload::CreateOrder {
            title: "Ski trip".to_string(),
            note: None,
            items: vec![OrderItemInput {
                name: "Cabin".to_string(),
                price: 90.0,
                quantity: 1,
                note: None,
            }],
            participants: vec![
                participant("user-ben", "Ben"),
                participant("user-cam", "Cam"),
            ],
        },
    );
    let resp = manager.execute_command(cmd);
    assert!(resp.success, "create failed: {:?}", resp.error);
    resp.order_id.unwrap()
}

fn finalize(manager: &OrdersManager, order_id: &str) {
    let resp = manager.execute_command(OrderCommand::new(
        "user-ava",
        "Ava",
        OrderCommandPayload::FinalizeOrder {
            order_id: order_id.to_string(),
        },
    ));
    assert!(resp.success, "finalize failed: {:?}", resp.error);
}

#[test]
fn store_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("tally.redb");

    let (order_id, sequence_before) = {
        let manager = OrdersManager::new(&db_path).unwrap();
        let order_id = open_order(&manager);
        finalize(&manager, &order_id);
        (order_id, manager.get_current_sequence().unwrap())
    };

    // Reopen the same file as a fresh process would
    let manager = OrdersManager::new(&db_path).unwrap();

    assert_eq!(manager.get_current_sequence().unwrap(), sequence_before);

    let events = manager.get_events_for_order(&order_id).unwrap();
    assert_eq!(events.len(), 2);

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.status, OrderStatus::Active);
    assert_eq!(snapshot.effective_total, 90.0);
    assert_eq!(snapshot.payments.len(), 2);
    assert_eq!(snapshot.payments[0].amount_due, 45.0);
    assert_eq!(snapshot.payments[1].amount_due, 45.0);
    assert_eq!(snapshot.collected_amount, 0.0);

    // The open-order index survives too
    let open = manager.get_open_orders().unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].order_id, order_id);
}

#[test]
fn sequence_continues_after_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("tally.redb");

    let sequence_before = {
        let manager = OrdersManager::new(&db_path).unwrap();
        open_order(&manager);
        manager.get_current_sequence().unwrap()
    };

    let manager = OrdersManager::new(&db_path).unwrap();
    let second = open_order(&manager);

    let events = manager.get_events_for_order(&second).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].sequence, sequence_before + 1);
}

#[test]
fn duplicate_command_still_rejected_after_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("tally.redb");

    let cmd = OrderCommand::new(
        "user-ava",
        "Ava",
        OrderCommandPayload::CreateOrder {
            title: "Ski trip".to_string(),
            note: None,
            items: vec![],
            participants: vec![],
        },
    );

    let (order_id, sequence_before) = {
        let manager = OrdersManager::new(&db_path).unwrap();
        let resp = manager.execute_command(cmd.clone());
        assert!(resp.success);
        (resp.order_id.unwrap(), manager.get_current_sequence().unwrap())
    };

    // Redelivery after a restart must not append a second event
    let manager = OrdersManager::new(&db_path).unwrap();
    let resp = manager.execute_command(cmd);
    assert!(resp.success);
    assert!(resp.order_id.is_none());

    assert_eq!(manager.get_current_sequence().unwrap(), sequence_before);
    assert_eq!(manager.get_events_for_order(&order_id).unwrap().len(), 1);
}

#[test]
fn epoch_rotates_per_instance() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("tally.redb");

    let first = {
        let manager = OrdersManager::new(&db_path).unwrap();
        manager.epoch().to_string()
    };

    let manager = OrdersManager::new(&db_path).unwrap();
    assert_ne!(manager.epoch(), first);
}
