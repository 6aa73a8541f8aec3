//! Read models computed over a snapshot
//!
//! Pure request-scoped views: nothing here is persisted or cached. The
//! progress summary drives the settlement dashboard; the split preview
//! is the live breakdown the organizer sees while editing a draft.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orders::money;
use crate::orders::split;
use shared::order::{
    OrderSnapshot, OrderStatus, PaymentMethod, PaymentStatus, SplitPolicy,
};

/// One participant's row in the progress summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantProgress {
    pub participant_id: String,
    pub display_name: String,
    /// None until the order is finalized and the ledger exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub amount_due: f64,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
    /// `amount_due` through the supplied rate, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_amount: Option<f64>,
}

/// Summary totals re-expressed through a supplied conversion rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertedTotals {
    pub rate: f64,
    pub effective_total: f64,
    pub collected: f64,
    pub outstanding: f64,
}

/// Settlement progress for one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderProgress {
    pub order_id: String,
    pub status: OrderStatus,
    pub effective_total: f64,
    pub collected: f64,
    pub outstanding: f64,
    /// paid participants / all participants, as a percentage rounded to 2 dp
    pub percent_complete: f64,
    pub paid_count: usize,
    pub participant_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted: Option<ConvertedTotals>,
    pub participants: Vec<ParticipantProgress>,
}

impl OrderProgress {
    /// Build the summary from a snapshot, optionally converting display
    /// amounts with an opaque rate multiplier.
    pub fn from_snapshot(snapshot: &OrderSnapshot, rate: Option<f64>) -> Self {
        let collected: Decimal = snapshot
            .payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Confirmed)
            .map(|p| money::to_decimal(p.amount_due))
            .sum();
        let outstanding = money::to_decimal(snapshot.effective_total) - collected;

        let paid_count = snapshot
            .payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Confirmed)
            .count();
        let participant_count = snapshot.participants.len();
        let percent_complete = if participant_count == 0 {
            0.0
        } else {
            money::round2(paid_count as f64 / participant_count as f64 * 100.0)
        };

        let participants = snapshot
            .participants
            .iter()
            .map(|participant| {
                let payment = snapshot
                    .payments
                    .iter()
                    .find(|p| p.participant_id == participant.participant_id);
                let amount_due = payment
                    .map(|p| p.amount_due)
                    .unwrap_or(participant.assigned_amount);
                ParticipantProgress {
                    participant_id: participant.participant_id.clone(),
                    display_name: participant.display_name.clone(),
                    payment_id: payment.map(|p| p.payment_id.clone()),
                    amount_due,
                    status: payment.map(|p| p.status).unwrap_or_default(),
                    method: payment.and_then(|p| p.method),
                    display_amount: rate.map(|r| money::convert(amount_due, r)),
                }
            })
            .collect();

        OrderProgress {
            order_id: snapshot.order_id.clone(),
            status: snapshot.status,
            effective_total: snapshot.effective_total,
            collected: money::to_f64(collected),
            outstanding: money::to_f64(outstanding),
            percent_complete,
            paid_count,
            participant_count,
            converted: rate.map(|r| ConvertedTotals {
                rate: r,
                effective_total: money::convert(snapshot.effective_total, r),
                collected: money::convert(money::to_f64(collected), r),
                outstanding: money::convert(money::to_f64(outstanding), r),
            }),
            participants,
        }
    }
}

/// One share line in the split preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRow {
    pub participant_id: String,
    pub display_name: String,
    pub amount: f64,
}

/// Live per-participant breakdown for a draft being edited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitPreview {
    pub order_id: String,
    pub policy: SplitPolicy,
    pub effective_total: f64,
    /// Sum of the assigned amounts as they stand
    pub assigned_sum: f64,
    /// Whether the assigned sum covers the effective total within tolerance
    pub balanced: bool,
    pub shares: Vec<ShareRow>,
}

impl SplitPreview {
    pub fn from_snapshot(snapshot: &OrderSnapshot) -> Self {
        let amounts: Vec<f64> = snapshot
            .participants
            .iter()
            .map(|p| p.assigned_amount)
            .collect();
        let assigned_sum = money::to_f64(
            amounts.iter().map(|a| money::to_decimal(*a)).sum::<Decimal>(),
        );
        let balanced = split::validate_shares_sum(snapshot.effective_total, &amounts).is_ok();

        SplitPreview {
            order_id: snapshot.order_id.clone(),
            policy: snapshot.split_policy,
            effective_total: snapshot.effective_total,
            assigned_sum,
            balanced,
            shares: snapshot
                .participants
                .iter()
                .map(|p| ShareRow {
                    participant_id: p.participant_id.clone(),
                    display_name: p.display_name.clone(),
                    amount: p.assigned_amount,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::money::recalculate_totals;
    use crate::orders::split::refresh_equal_shares;
    use shared::order::{OrderItemEntry, ParticipantEntry, PaymentEntry};

    fn participant(id: &str, name: &str) -> ParticipantEntry {
        ParticipantEntry {
            participant_id: id.to_string(),
            user_id: format!("user-{id}"),
            display_name: name.to_string(),
            contact: format!("{id}@example.com"),
            assigned_amount: 0.0,
        }
    }

    /// 100.00 across three participants, equal split
    fn draft_snapshot() -> OrderSnapshot {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.organizer_id = "user-1".to_string();
        snapshot.items.push(OrderItemEntry {
            item_id: "i-1".to_string(),
            name: "Dinner".to_string(),
            price: 100.0,
            quantity: 1,
            note: None,
        });
        snapshot.participants.push(participant("p-1", "Ann"));
        snapshot.participants.push(participant("p-2", "Bob"));
        snapshot.participants.push(participant("p-3", "Cid"));
        recalculate_totals(&mut snapshot);
        refresh_equal_shares(&mut snapshot);
        snapshot
    }

    /// Same order finalized, with pay-1 confirmed
    fn active_snapshot() -> OrderSnapshot {
        let mut snapshot = draft_snapshot();
        snapshot.status = OrderStatus::Active;
        for (i, p) in snapshot.participants.iter().enumerate() {
            snapshot.payments.push(PaymentEntry::new(
                format!("pay-{}", i + 1),
                p.participant_id.clone(),
                p.assigned_amount,
            ));
        }
        snapshot.payments[0].method = Some(PaymentMethod::Digital);
        snapshot.payments[0].push_history(
            PaymentStatus::Confirmed,
            1000,
            "user-1".to_string(),
            None,
        );
        recalculate_totals(&mut snapshot);
        snapshot
    }

    #[test]
    fn test_draft_progress_is_all_outstanding() {
        let progress = OrderProgress::from_snapshot(&draft_snapshot(), None);

        assert_eq!(progress.effective_total, 100.0);
        assert_eq!(progress.collected, 0.0);
        assert_eq!(progress.outstanding, 100.0);
        assert_eq!(progress.percent_complete, 0.0);
        assert_eq!(progress.paid_count, 0);
        assert_eq!(progress.participant_count, 3);

        // no ledger yet: rows fall back to assigned amounts
        assert_eq!(progress.participants.len(), 3);
        assert_eq!(progress.participants[0].payment_id, None);
        assert_eq!(progress.participants[0].amount_due, 33.33);
        assert_eq!(progress.participants[0].status, PaymentStatus::Pending);
    }

    #[test]
    fn test_one_of_three_confirmed() {
        let progress = OrderProgress::from_snapshot(&active_snapshot(), None);

        assert_eq!(progress.collected, 33.33);
        assert_eq!(progress.outstanding, 66.67);
        assert_eq!(progress.percent_complete, 33.33);
        assert_eq!(progress.paid_count, 1);

        assert_eq!(progress.participants[0].status, PaymentStatus::Confirmed);
        assert_eq!(progress.participants[0].method, Some(PaymentMethod::Digital));
        assert_eq!(
            progress.participants[0].payment_id.as_deref(),
            Some("pay-1")
        );
        assert_eq!(progress.participants[1].status, PaymentStatus::Pending);
    }

    #[test]
    fn test_fully_settled_order() {
        let mut snapshot = active_snapshot();
        for payment in &mut snapshot.payments {
            if payment.status != PaymentStatus::Confirmed {
                payment.push_history(PaymentStatus::Confirmed, 2000, "user-1".to_string(), None);
            }
        }
        recalculate_totals(&mut snapshot);

        let progress = OrderProgress::from_snapshot(&snapshot, None);
        assert_eq!(progress.collected, 100.0);
        assert_eq!(progress.outstanding, 0.0);
        assert_eq!(progress.percent_complete, 100.0);
        assert_eq!(progress.paid_count, 3);
    }

    #[test]
    fn test_empty_order_percent_is_zero() {
        let snapshot = OrderSnapshot::new("order-1".to_string());
        let progress = OrderProgress::from_snapshot(&snapshot, None);
        assert_eq!(progress.percent_complete, 0.0);
        assert_eq!(progress.participant_count, 0);
    }

    #[test]
    fn test_conversion_rate_adds_display_amounts() {
        let progress = OrderProgress::from_snapshot(&active_snapshot(), Some(0.85));

        let converted = progress.converted.as_ref().unwrap();
        assert_eq!(converted.rate, 0.85);
        assert_eq!(converted.effective_total, 85.0);
        // 33.33 * 0.85 = 28.3305 -> 28.33
        assert_eq!(converted.collected, 28.33);
        // 66.67 * 0.85 = 56.6695 -> 56.67
        assert_eq!(converted.outstanding, 56.67);

        assert_eq!(progress.participants[0].display_amount, Some(28.33));
        // base amounts are untouched
        assert_eq!(progress.participants[0].amount_due, 33.33);
    }

    #[test]
    fn test_progress_without_rate_has_no_converted_block() {
        let progress = OrderProgress::from_snapshot(&active_snapshot(), None);
        assert!(progress.converted.is_none());
        assert_eq!(progress.participants[0].display_amount, None);
    }

    #[test]
    fn test_split_preview_equal_policy() {
        let preview = SplitPreview::from_snapshot(&draft_snapshot());

        assert_eq!(preview.policy, SplitPolicy::Equal);
        assert_eq!(preview.effective_total, 100.0);
        assert_eq!(preview.assigned_sum, 100.0);
        assert!(preview.balanced);

        let amounts: Vec<f64> = preview.shares.iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![33.33, 33.33, 33.34]);
    }

    #[test]
    fn test_split_preview_flags_unbalanced_custom_shares() {
        let mut snapshot = draft_snapshot();
        snapshot.split_policy = SplitPolicy::Custom;
        snapshot.participants[0].assigned_amount = 30.0;
        snapshot.participants[1].assigned_amount = 30.0;
        snapshot.participants[2].assigned_amount = 38.0;

        let preview = SplitPreview::from_snapshot(&snapshot);
        assert_eq!(preview.assigned_sum, 98.0);
        assert!(!preview.balanced);
    }

    #[test]
    fn test_split_preview_empty_draft() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        recalculate_totals(&mut snapshot);

        let preview = SplitPreview::from_snapshot(&snapshot);
        assert!(preview.shares.is_empty());
        assert_eq!(preview.assigned_sum, 0.0);
        // 0.00 assigned against a 0.00 total is balanced
        assert!(preview.balanced);
    }
}
