//! Order API Handlers
//!
//! Every mutation builds an `OrderCommand` stamped with the caller's
//! identity, dispatches it through the engine and returns the refreshed
//! snapshot. Reads serve the stored snapshot (or a view computed over it)
//! directly.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::{OrderProgress, SplitPreview, money};
use crate::utils::{AppError, AppResult};
use shared::order::{
    CommandResponse, OrderCommand, OrderCommandPayload, OrderEvent, OrderItemInput, OrderSnapshot,
    ParticipantInput, PaymentMethod, SplitPolicy,
};

/// Unwrap a command response, converting engine rejection into AppError
fn dispatched(resp: CommandResponse) -> AppResult<CommandResponse> {
    if resp.success {
        Ok(resp)
    } else {
        Err(match resp.error {
            Some(err) => AppError::Command(err),
            None => AppError::internal("Command failed without error detail"),
        })
    }
}

fn load_order(state: &ServerState, order_id: &str) -> AppResult<OrderSnapshot> {
    state
        .orders
        .get_snapshot(order_id)?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))
}

/// Dispatch a command and return the refreshed snapshot
fn apply(state: &ServerState, cmd: OrderCommand) -> AppResult<Json<OrderSnapshot>> {
    let target = cmd.payload.order_id().map(str::to_string);
    let resp = dispatched(state.orders.execute_command(cmd))?;
    let order_id = resp
        .order_id
        .or(target)
        .ok_or_else(|| AppError::internal("Command response without order id"))?;
    Ok(Json(load_order(state, &order_id)?))
}

// ========== Create / list / info ==========

/// Create order request
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub title: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub participants: Vec<ParticipantInput>,
}

/// Create a draft order, caller becomes the organizer
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::CreateOrder {
            title: payload.title,
            note: payload.note,
            items: payload.items,
            participants: payload.participants,
        },
    );
    apply(&state, cmd)
}

/// List open (Draft or Active) orders
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<OrderSnapshot>>> {
    Ok(Json(state.orders.get_open_orders()?))
}

/// Get order snapshot by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderSnapshot>> {
    Ok(Json(load_order(&state, &id)?))
}

/// Update info request
#[derive(Debug, Deserialize)]
pub struct UpdateInfoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Update title/note of a draft
pub async fn update_info(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateInfoRequest>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::UpdateOrderInfo {
            order_id: id,
            title: payload.title,
            note: payload.note,
        },
    );
    apply(&state, cmd)
}

// ========== Items ==========

/// Add items request
#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    pub items: Vec<OrderItemInput>,
}

pub async fn add_items(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<AddItemsRequest>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::AddItems {
            order_id: id,
            items: payload.items,
        },
    );
    apply(&state, cmd)
}

pub async fn remove_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::RemoveItem {
            order_id: id,
            item_id,
        },
    );
    apply(&state, cmd)
}

/// Set quantity request
#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i32,
}

pub async fn set_item_quantity(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<SetQuantityRequest>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::SetItemQuantity {
            order_id: id,
            item_id,
            quantity: payload.quantity,
        },
    );
    apply(&state, cmd)
}

// ========== Participants ==========

pub async fn add_participant(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(participant): Json<ParticipantInput>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::AddParticipant {
            order_id: id,
            participant,
        },
    );
    apply(&state, cmd)
}

pub async fn remove_participant(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, participant_id)): Path<(String, String)>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::RemoveParticipant {
            order_id: id,
            participant_id,
        },
    );
    apply(&state, cmd)
}

/// Set share request
#[derive(Debug, Deserialize)]
pub struct SetShareRequest {
    pub amount: f64,
}

/// Assign a custom share; only legal under the CUSTOM policy
pub async fn set_participant_share(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, participant_id)): Path<(String, String)>,
    Json(payload): Json<SetShareRequest>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::SetParticipantShare {
            order_id: id,
            participant_id,
            amount: payload.amount,
        },
    );
    apply(&state, cmd)
}

// ========== Split policy / totals ==========

/// Set split policy request
#[derive(Debug, Deserialize)]
pub struct SetSplitPolicyRequest {
    pub policy: SplitPolicy,
}

pub async fn set_split_policy(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<SetSplitPolicyRequest>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::SetSplitPolicy {
            order_id: id,
            policy: payload.policy,
        },
    );
    apply(&state, cmd)
}

/// Set total override request; `{ "total": null }` or `{}` clears it
#[derive(Debug, Deserialize)]
pub struct SetTotalRequest {
    #[serde(default)]
    pub total: Option<f64>,
}

pub async fn set_total_override(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<SetTotalRequest>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::SetTotalOverride {
            order_id: id,
            total: payload.total,
        },
    );
    apply(&state, cmd)
}

/// Live per-participant breakdown while a draft is being edited
pub async fn split_preview(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<SplitPreview>> {
    let snapshot = load_order(&state, &id)?;
    Ok(Json(SplitPreview::from_snapshot(&snapshot)))
}

// ========== Lifecycle ==========

/// Freeze the split into a payment ledger and open settlement
pub async fn finalize(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::FinalizeOrder { order_id: id },
    );
    apply(&state, cmd)
}

/// Cancel request
#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Option<Json<CancelRequest>>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::CancelOrder {
            order_id: id,
            reason: payload.and_then(|Json(p)| p.reason),
        },
    );
    apply(&state, cmd)
}

pub async fn archive(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::ArchiveOrder { order_id: id },
    );
    apply(&state, cmd)
}

// ========== Payment ledger ==========

/// Submit payment request
#[derive(Debug, Deserialize)]
pub struct SubmitPaymentRequest {
    pub method: PaymentMethod,
    #[serde(default)]
    pub note: Option<String>,
}

/// Participant reports having paid their share
pub async fn submit_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, payment_id)): Path<(String, String)>,
    Json(payload): Json<SubmitPaymentRequest>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::SubmitPayment {
            order_id: id,
            payment_id,
            method: payload.method,
            note: payload.note,
        },
    );
    apply(&state, cmd)
}

/// Confirm payment request; `method` is required only for the direct
/// cash confirm of a Pending entry
#[derive(Debug, Deserialize)]
pub struct ConfirmPaymentRequest {
    #[serde(default)]
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Organizer verifies receipt of a share
pub async fn confirm_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, payment_id)): Path<(String, String)>,
    payload: Option<Json<ConfirmPaymentRequest>>,
) -> AppResult<Json<OrderSnapshot>> {
    let payload = payload.map(|Json(p)| p).unwrap_or(ConfirmPaymentRequest {
        method: None,
        note: None,
    });
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::ConfirmPayment {
            order_id: id,
            payment_id,
            method: payload.method,
            note: payload.note,
        },
    );
    apply(&state, cmd)
}

/// Dispute request; the note is what the counterparty will read
#[derive(Debug, Deserialize)]
pub struct DisputeRequest {
    pub note: String,
}

pub async fn dispute_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, payment_id)): Path<(String, String)>,
    Json(payload): Json<DisputeRequest>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::DisputePayment {
            order_id: id,
            payment_id,
            note: payload.note,
        },
    );
    apply(&state, cmd)
}

/// Reopen request
#[derive(Debug, Deserialize)]
pub struct ReopenRequest {
    #[serde(default)]
    pub note: Option<String>,
}

/// Organizer resets a disputed entry for another attempt
pub async fn reopen_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, payment_id)): Path<(String, String)>,
    payload: Option<Json<ReopenRequest>>,
) -> AppResult<Json<OrderSnapshot>> {
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::ReopenPayment {
            order_id: id,
            payment_id,
            note: payload.and_then(|Json(p)| p.note),
        },
    );
    apply(&state, cmd)
}

// ========== Reminders ==========

/// Reminder request; omitting `payment_id` nudges every outstanding entry
#[derive(Debug, Deserialize)]
pub struct ReminderRequest {
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub async fn request_reminder(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Option<Json<ReminderRequest>>,
) -> AppResult<Json<OrderSnapshot>> {
    let payload = payload.map(|Json(p)| p).unwrap_or(ReminderRequest {
        payment_id: None,
        message: None,
    });
    let cmd = OrderCommand::new(
        user.user_id,
        user.display_name,
        OrderCommandPayload::RequestReminder {
            order_id: id,
            payment_id: payload.payment_id,
            message: payload.message,
        },
    );
    apply(&state, cmd)
}

// ========== Read models ==========

/// Progress query params
#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    /// Opaque conversion rate multiplier for display amounts
    #[serde(default)]
    pub rate: Option<f64>,
}

/// Settlement progress summary for one order
pub async fn progress(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<ProgressQuery>,
) -> AppResult<Json<OrderProgress>> {
    if let Some(rate) = query.rate
        && money::validate_rate(rate).is_err()
    {
        return Err(AppError::validation("rate must be a positive number"));
    }

    let snapshot = load_order(&state, &id)?;
    Ok(Json(OrderProgress::from_snapshot(&snapshot, query.rate)))
}

/// Full event history of one order, in sequence order
pub async fn events(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<OrderEvent>>> {
    // Surface a clean 404 for unknown ids instead of an empty list
    load_order(&state, &id)?;
    Ok(Json(state.orders.get_events_for_order(&id)?))
}
