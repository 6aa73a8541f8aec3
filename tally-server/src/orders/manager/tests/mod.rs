use super::*;
use shared::order::{
    CommandErrorCode, OrderCommandPayload, OrderEventType, OrderItemInput, OrderStatus,
    ParticipantInput, PaymentMethod, PaymentStatus,
};

/// Organizer identity used by every test order
const ORGANIZER: &str = "user-ava";

fn create_test_manager() -> OrdersManager {
    let storage = OrderStorage::open_in_memory().unwrap();
    OrdersManager::with_storage(storage)
}

/// Command issued by the organizer
fn organizer_cmd(payload: OrderCommandPayload) -> OrderCommand {
    OrderCommand::new(ORGANIZER, "Ava".to_string(), payload)
}

/// Command issued by an arbitrary user
fn user_cmd(user_id: &str, payload: OrderCommandPayload) -> OrderCommand {
    OrderCommand::new(user_id, "Participant".to_string(), payload)
}

fn simple_item(name: &str, price: f64, quantity: i32) -> OrderItemInput {
    OrderItemInput {
        name: name.to_string(),
        price,
        quantity,
        note: None,
    }
}

fn participant(user_id: &str, name: &str) -> ParticipantInput {
    ParticipantInput {
        user_id: user_id.to_string(),
        display_name: name.to_string(),
        contact: format!("{}@pay", name.to_lowercase()),
    }
}

// ========================================================================
// Helper: create orders in various shapes
// ========================================================================

fn create_order(
    manager: &OrdersManager,
    items: Vec<OrderItemInput>,
    participants: Vec<ParticipantInput>,
) -> String {
    let cmd = organizer_cmd(OrderCommandPayload::CreateOrder {
        title: "Team dinner".to_string(),
        note: None,
        items,
        participants,
    });
    let resp = manager.execute_command(cmd);
    assert!(resp.success, "Failed to create order: {:?}", resp.error);
    resp.order_id.unwrap()
}

/// A $100 order split equally across Bo, Caro and Dee
fn standard_order(manager: &OrdersManager) -> String {
    create_order(
        manager,
        vec![simple_item("Set menu", 100.0, 1)],
        vec![
            participant("user-bo", "Bo"),
            participant("user-caro", "Caro"),
            participant("user-dee", "Dee"),
        ],
    )
}

fn finalize_order(manager: &OrdersManager, order_id: &str) {
    let resp = manager.execute_command(organizer_cmd(OrderCommandPayload::FinalizeOrder {
        order_id: order_id.to_string(),
    }));
    assert!(resp.success, "Failed to finalize: {:?}", resp.error);
}

/// Standard order, already finalized
fn finalized_order(manager: &OrdersManager) -> String {
    let order_id = standard_order(manager);
    finalize_order(manager, &order_id);
    order_id
}

// ========================================================================
// Helper: ledger lookups and payment commands
// ========================================================================

/// Resolve the ledger entry belonging to a participant user
fn payment_for(manager: &OrdersManager, order_id: &str, user_id: &str) -> (String, f64) {
    let snapshot = manager.get_snapshot(order_id).unwrap().unwrap();
    let participant = snapshot
        .participants
        .iter()
        .find(|p| p.user_id == user_id)
        .expect("participant not found");
    let payment = snapshot
        .payments
        .iter()
        .find(|p| p.participant_id == participant.participant_id)
        .expect("ledger entry not found");
    (payment.payment_id.clone(), payment.amount_due)
}

fn submit(
    manager: &OrdersManager,
    order_id: &str,
    payment_id: &str,
    user_id: &str,
    method: PaymentMethod,
) -> CommandResponse {
    manager.execute_command(user_cmd(
        user_id,
        OrderCommandPayload::SubmitPayment {
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
            method,
            note: None,
        },
    ))
}

fn confirm(
    manager: &OrdersManager,
    order_id: &str,
    payment_id: &str,
    method: Option<PaymentMethod>,
) -> CommandResponse {
    manager.execute_command(organizer_cmd(OrderCommandPayload::ConfirmPayment {
        order_id: order_id.to_string(),
        payment_id: payment_id.to_string(),
        method,
        note: None,
    }))
}

fn dispute(
    manager: &OrdersManager,
    order_id: &str,
    payment_id: &str,
    actor_id: &str,
    note: &str,
) -> CommandResponse {
    manager.execute_command(user_cmd(
        actor_id,
        OrderCommandPayload::DisputePayment {
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
            note: note.to_string(),
        },
    ))
}

fn reopen(manager: &OrdersManager, order_id: &str, payment_id: &str) -> CommandResponse {
    manager.execute_command(organizer_cmd(OrderCommandPayload::ReopenPayment {
        order_id: order_id.to_string(),
        payment_id: payment_id.to_string(),
        note: None,
    }))
}

// ========================================================================
// Helper: assertions
// ========================================================================

fn error_code(resp: &CommandResponse) -> CommandErrorCode {
    resp.error
        .as_ref()
        .expect("expected an error response")
        .code
        .clone()
}

fn assert_order_status(manager: &OrdersManager, order_id: &str, expected: OrderStatus) {
    let snapshot = manager.get_snapshot(order_id).unwrap().unwrap();
    assert_eq!(
        snapshot.status, expected,
        "Expected order status {:?}, got {:?}",
        expected, snapshot.status
    );
}

/// Verify snapshot consistency (stored vs rebuilt from events)
fn assert_snapshot_consistent(manager: &OrdersManager, order_id: &str) {
    let stored = manager.get_snapshot(order_id).unwrap().unwrap();
    let rebuilt = manager.rebuild_snapshot(order_id).unwrap();
    assert_eq!(
        stored.state_checksum, rebuilt.state_checksum,
        "Snapshot diverged from event replay!\n  stored total: {} collected: {}\n  rebuilt total: {} collected: {}",
        stored.effective_total, stored.collected_amount, rebuilt.effective_total, rebuilt.collected_amount,
    );
}

fn assert_close(actual: f64, expected: f64, msg: &str) {
    assert!(
        (actual - expected).abs() < 0.005,
        "{}: expected {:.2}, got {:.2}",
        msg,
        expected,
        actual
    );
}

mod test_lifecycle;
