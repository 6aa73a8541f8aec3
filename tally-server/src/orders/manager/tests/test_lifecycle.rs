use super::*;
use shared::order::EventPayload;

/// Settle every share so the order completes
fn settle_all(manager: &OrdersManager, order_id: &str) {
    for user in ["user-bo", "user-caro", "user-dee"] {
        let (payment_id, _) = payment_for(manager, order_id, user);
        let resp = confirm(manager, order_id, &payment_id, Some(PaymentMethod::Cash));
        assert!(resp.success, "settle failed: {:?}", resp.error);
    }
}

#[test]
fn test_cancel_draft_order() {
    let manager = create_test_manager();
    let order_id = standard_order(&manager);

    let resp = manager.execute_command(organizer_cmd(OrderCommandPayload::CancelOrder {
        order_id: order_id.clone(),
        reason: Some("dinner called off".to_string()),
    }));
    assert!(resp.success);

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.status, OrderStatus::Cancelled);
    assert!(snapshot.closed_at.is_some());
    assert!(manager.get_open_orders().unwrap().is_empty());

    let events = manager.get_events_for_order(&order_id).unwrap();
    let cancelled = events.last().unwrap();
    assert_eq!(cancelled.event_type, OrderEventType::OrderCancelled);
    if let EventPayload::OrderCancelled { reason } = &cancelled.payload {
        assert_eq!(reason.as_deref(), Some("dinner called off"));
    } else {
        panic!("Expected OrderCancelled payload");
    }
}

#[test]
fn test_cancel_active_order_keeps_ledger() {
    let manager = create_test_manager();
    let order_id = finalized_order(&manager);
    let (payment_id, _) = payment_for(&manager, &order_id, "user-bo");
    assert!(submit(&manager, &order_id, &payment_id, "user-bo", PaymentMethod::Digital).success);

    let resp = manager.execute_command(organizer_cmd(OrderCommandPayload::CancelOrder {
        order_id: order_id.clone(),
        reason: None,
    }));
    assert!(resp.success);

    // The ledger survives for the audit trail
    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.status, OrderStatus::Cancelled);
    assert_eq!(snapshot.payments.len(), 3);
    assert_eq!(
        snapshot.find_payment(&payment_id).unwrap().status,
        PaymentStatus::Submitted
    );
}

#[test]
fn test_cancelled_order_is_locked() {
    let manager = create_test_manager();
    let order_id = finalized_order(&manager);
    let (payment_id, _) = payment_for(&manager, &order_id, "user-bo");
    assert!(
        manager
            .execute_command(organizer_cmd(OrderCommandPayload::CancelOrder {
                order_id: order_id.clone(),
                reason: None,
            }))
            .success
    );

    let resp = submit(&manager, &order_id, &payment_id, "user-bo", PaymentMethod::Digital);
    assert!(!resp.success);
    assert_eq!(error_code(&resp), CommandErrorCode::OrderLocked);

    let resp = manager.execute_command(organizer_cmd(OrderCommandPayload::AddItems {
        order_id: order_id.clone(),
        items: vec![simple_item("Too late", 5.0, 1)],
    }));
    assert!(!resp.success);
    assert_eq!(error_code(&resp), CommandErrorCode::OrderLocked);

    // Cancelling twice does not work either
    let resp = manager.execute_command(organizer_cmd(OrderCommandPayload::CancelOrder {
        order_id: order_id.clone(),
        reason: None,
    }));
    assert!(!resp.success);
    assert_eq!(error_code(&resp), CommandErrorCode::OrderLocked);
}

#[test]
fn test_cancel_completed_order_rejected() {
    let manager = create_test_manager();
    let order_id = finalized_order(&manager);
    settle_all(&manager, &order_id);
    assert_order_status(&manager, &order_id, OrderStatus::Completed);

    let resp = manager.execute_command(organizer_cmd(OrderCommandPayload::CancelOrder {
        order_id: order_id.clone(),
        reason: None,
    }));
    assert!(!resp.success);
    assert_eq!(error_code(&resp), CommandErrorCode::OrderLocked);
}

#[test]
fn test_archive_completed_order() {
    let manager = create_test_manager();
    let order_id = finalized_order(&manager);
    settle_all(&manager, &order_id);

    let resp = manager.execute_command(organizer_cmd(OrderCommandPayload::ArchiveOrder {
        order_id: order_id.clone(),
    }));
    assert!(resp.success, "archive failed: {:?}", resp.error);

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_eq!(snapshot.status, OrderStatus::Archived);

    let events = manager.get_events_for_order(&order_id).unwrap();
    let archived = events.last().unwrap();
    assert_eq!(archived.event_type, OrderEventType::OrderArchived);
    if let EventPayload::OrderArchived { previous_status } = &archived.payload {
        assert_eq!(*previous_status, OrderStatus::Completed);
    } else {
        panic!("Expected OrderArchived payload");
    }
}

#[test]
fn test_archive_cancelled_order() {
    let manager = create_test_manager();
    let order_id = standard_order(&manager);
    assert!(
        manager
            .execute_command(organizer_cmd(OrderCommandPayload::CancelOrder {
                order_id: order_id.clone(),
                reason: None,
            }))
            .success
    );

    let resp = manager.execute_command(organizer_cmd(OrderCommandPayload::ArchiveOrder {
        order_id: order_id.clone(),
    }));
    assert!(resp.success);
    assert_order_status(&manager, &order_id, OrderStatus::Archived);
}

#[test]
fn test_archive_open_order_rejected() {
    let manager = create_test_manager();

    let draft_id = standard_order(&manager);
    let resp = manager.execute_command(organizer_cmd(OrderCommandPayload::ArchiveOrder {
        order_id: draft_id,
    }));
    assert!(!resp.success);
    assert_eq!(error_code(&resp), CommandErrorCode::OrderLocked);

    let active_id = finalized_order(&manager);
    let resp = manager.execute_command(organizer_cmd(OrderCommandPayload::ArchiveOrder {
        order_id: active_id,
    }));
    assert!(!resp.success);
    assert_eq!(error_code(&resp), CommandErrorCode::OrderLocked);
}

#[test]
fn test_lifecycle_commands_require_organizer() {
    let manager = create_test_manager();
    let order_id = standard_order(&manager);

    let resp = manager.execute_command(user_cmd(
        "user-bo",
        OrderCommandPayload::CancelOrder {
            order_id: order_id.clone(),
            reason: None,
        },
    ));
    assert!(!resp.success);
    assert_eq!(error_code(&resp), CommandErrorCode::NotOrganizer);

    let resp = manager.execute_command(user_cmd(
        "user-bo",
        OrderCommandPayload::FinalizeOrder {
            order_id: order_id.clone(),
        },
    ));
    assert!(!resp.success);
    assert_eq!(error_code(&resp), CommandErrorCode::NotOrganizer);
}

#[test]
fn test_full_lifecycle_walkthrough() {
    let manager = create_test_manager();
    let order_id = standard_order(&manager);
    finalize_order(&manager, &order_id);

    // Bo and Caro pay through the app, the organizer checks each transfer
    for user in ["user-bo", "user-caro"] {
        let (payment_id, amount) = payment_for(&manager, &order_id, user);
        assert_close(amount, 33.33, "frozen share");
        assert!(submit(&manager, &order_id, &payment_id, user, PaymentMethod::Digital).success);
        assert!(confirm(&manager, &order_id, &payment_id, None).success);
    }

    // Dee pays cash at the table; this settles the order
    let (payment_id, amount) = payment_for(&manager, &order_id, "user-dee");
    assert_close(amount, 33.34, "remainder share");
    assert!(confirm(&manager, &order_id, &payment_id, Some(PaymentMethod::Cash)).success);
    assert_order_status(&manager, &order_id, OrderStatus::Completed);

    assert!(
        manager
            .execute_command(organizer_cmd(OrderCommandPayload::ArchiveOrder {
                order_id: order_id.clone(),
            }))
            .success
    );

    let types: Vec<_> = manager
        .get_events_for_order(&order_id)
        .unwrap()
        .iter()
        .map(|e| e.event_type.clone())
        .collect();
    assert_eq!(
        types,
        vec![
            OrderEventType::OrderCreated,
            OrderEventType::OrderFinalized,
            OrderEventType::PaymentSubmitted,
            OrderEventType::PaymentConfirmed,
            OrderEventType::PaymentSubmitted,
            OrderEventType::PaymentConfirmed,
            OrderEventType::PaymentConfirmed,
            OrderEventType::OrderCompleted,
            OrderEventType::OrderArchived,
        ]
    );

    let snapshot = manager.get_snapshot(&order_id).unwrap().unwrap();
    assert_close(snapshot.collected_amount, 100.0, "settled total");
    assert_eq!(snapshot.status, OrderStatus::Archived);
    assert_snapshot_consistent(&manager, &order_id);
}
