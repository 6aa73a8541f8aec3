//! Notification Worker - derives user notifications from order events
//!
//! Listens on the manager's event broadcast and turns settlement-relevant
//! events into per-user notification records:
//!
//! - `OrderFinalized` → a payment request for every frozen share
//! - `PaymentSubmitted` → the organizer hears a transfer was claimed
//! - `PaymentConfirmed` → the paying participant gets the receipt
//! - `PaymentDisputed` → the counterparty of whoever raised it
//! - `ReminderRequested` → every targeted participant
//!
//! Records are persisted to redb first, then pushed through the
//! [`NotificationSink`] seam. Storage is the source of truth; a failed
//! push is logged and dropped.
//!
//! Note: redb operations are synchronous for stability.

mod sink;
pub use sink::{LogSink, NotificationSink};

use std::sync::Arc;

use shared::models::{Notification, NotificationKind};
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};
use tokio::sync::broadcast;

use crate::orders::storage::OrderStorage;

/// Worker that projects order events into user notifications
pub struct NotificationWorker {
    storage: OrderStorage,
    sink: Arc<dyn NotificationSink>,
}

impl NotificationWorker {
    pub fn new(storage: OrderStorage, sink: Arc<dyn NotificationSink>) -> Self {
        Self { storage, sink }
    }

    /// Run the notification worker until the event channel closes
    ///
    /// Tracks the last projected sequence so a lagged receiver can re-read
    /// the missed events from storage instead of dropping them.
    pub async fn run(self, mut event_rx: broadcast::Receiver<OrderEvent>) {
        // Events committed before the worker subscribed are not its business
        let mut last_seen = match self.storage.get_current_sequence() {
            Ok(seq) => seq,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read current sequence, starting from zero");
                0
            }
        };

        tracing::info!(last_seen, "NotificationWorker started");

        loop {
            match event_rx.recv().await {
                Ok(event) => {
                    // Already projected during a catch-up pass
                    if event.sequence <= last_seen {
                        continue;
                    }
                    last_seen = event.sequence;
                    self.handle_event(&event);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        skipped,
                        last_seen,
                        "Notification worker lagged, catching up from storage"
                    );
                    last_seen = self.catch_up(last_seen);
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event channel closed, shutting down NotificationWorker");
                    break;
                }
            }
        }
    }

    /// Project every stored event after `after`; returns the new position
    fn catch_up(&self, after: u64) -> u64 {
        match self.storage.get_events_since(after) {
            Ok(events) => {
                let mut last = after;
                for event in &events {
                    self.handle_event(event);
                    last = event.sequence;
                }
                last
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to catch up after lag");
                after
            }
        }
    }

    /// Project one event; persists and delivers whatever it yields
    fn handle_event(&self, event: &OrderEvent) {
        let notifications = self.build_notifications(event);
        for notification in notifications {
            if let Err(e) = self.storage.store_notification(&notification) {
                tracing::error!(
                    user_id = %notification.user_id,
                    order_id = %event.order_id,
                    error = %e,
                    "Failed to store notification"
                );
                continue;
            }
            self.sink.deliver(&notification);
        }
    }

    fn build_notifications(&self, event: &OrderEvent) -> Vec<Notification> {
        // The broadcast fires after commit, so the snapshot already
        // reflects this event
        let Some(snapshot) = self.load_snapshot(&event.order_id) else {
            return vec![];
        };

        match &event.payload {
            EventPayload::OrderFinalized { shares, .. } => shares
                .iter()
                .filter_map(|share| {
                    let participant = snapshot
                        .participants
                        .iter()
                        .find(|p| p.participant_id == share.participant_id)?;
                    Some(Notification::new(
                        participant.user_id.clone(),
                        NotificationKind::PaymentRequest,
                        format!("You owe {:.2} for {}", share.amount, snapshot.title),
                        Some(snapshot.order_id.clone()),
                        Some(share.payment_id.clone()),
                    ))
                })
                .collect(),

            EventPayload::PaymentSubmitted {
                payment_id, amount, ..
            } => {
                let Some(owner) = self.owner_of(&snapshot, payment_id) else {
                    return vec![];
                };
                vec![Notification::new(
                    snapshot.organizer_id.clone(),
                    NotificationKind::Confirmation,
                    format!(
                        "{} marked their {:.2} share for {} as paid",
                        owner.display_name, amount, snapshot.title
                    ),
                    Some(snapshot.order_id.clone()),
                    Some(payment_id.clone()),
                )]
            }

            EventPayload::PaymentConfirmed {
                payment_id, amount, ..
            } => {
                let Some(owner) = self.owner_of(&snapshot, payment_id) else {
                    return vec![];
                };
                vec![Notification::new(
                    owner.user_id.clone(),
                    NotificationKind::Confirmation,
                    format!(
                        "Your {:.2} payment for {} is confirmed",
                        amount, snapshot.title
                    ),
                    Some(snapshot.order_id.clone()),
                    Some(payment_id.clone()),
                )]
            }

            EventPayload::PaymentDisputed {
                payment_id, note, ..
            } => {
                let Some(owner) = self.owner_of(&snapshot, payment_id) else {
                    return vec![];
                };
                let amount = snapshot
                    .find_payment(payment_id)
                    .map(|p| p.amount_due)
                    .unwrap_or_default();
                // The counterparty of whoever raised the dispute gets told
                let notification = if event.operator_id == snapshot.organizer_id {
                    Notification::new(
                        owner.user_id.clone(),
                        NotificationKind::Confirmation,
                        format!(
                            "Your {:.2} share for {} was disputed: {}",
                            amount, snapshot.title, note
                        ),
                        Some(snapshot.order_id.clone()),
                        Some(payment_id.clone()),
                    )
                } else {
                    Notification::new(
                        snapshot.organizer_id.clone(),
                        NotificationKind::Confirmation,
                        format!(
                            "{} disputed their {:.2} share for {}: {}",
                            owner.display_name, amount, snapshot.title, note
                        ),
                        Some(snapshot.order_id.clone()),
                        Some(payment_id.clone()),
                    )
                };
                vec![notification]
            }

            EventPayload::ReminderRequested {
                payment_ids,
                message,
            } => payment_ids
                .iter()
                .filter_map(|payment_id| {
                    let owner = self.owner_of(&snapshot, payment_id)?;
                    let amount = snapshot.find_payment(payment_id)?.amount_due;
                    let text = match message {
                        Some(custom) => custom.clone(),
                        None => format!("You still owe {:.2} for {}", amount, snapshot.title),
                    };
                    Some(Notification::new(
                        owner.user_id.clone(),
                        NotificationKind::Reminder,
                        text,
                        Some(snapshot.order_id.clone()),
                        Some(payment_id.clone()),
                    ))
                })
                .collect(),

            _ => vec![],
        }
    }

    /// Resolve the participant owning a ledger entry
    fn owner_of<'a>(
        &self,
        snapshot: &'a OrderSnapshot,
        payment_id: &str,
    ) -> Option<&'a shared::order::ParticipantEntry> {
        let payment = snapshot.find_payment(payment_id)?;
        snapshot.find_participant(&payment.participant_id)
    }

    fn load_snapshot(&self, order_id: &str) -> Option<OrderSnapshot> {
        match self.storage.get_snapshot(order_id) {
            Ok(Some(snapshot)) => Some(snapshot),
            Ok(None) => {
                tracing::warn!(order_id = %order_id, "Snapshot not found for notification");
                None
            }
            Err(e) => {
                tracing::error!(order_id = %order_id, error = %e, "Failed to load snapshot for notification");
                None
            }
        }
    }
}
