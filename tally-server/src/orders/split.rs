//! Split calculator
//!
//! Computes per-participant shares of an order's effective total. Equal
//! splits round every share to 2 decimal places and assign the rounding
//! remainder to the last participant in stable (insertion) order, so the
//! shares always sum to the effective total exactly to the cent. Naive
//! per-share rounding drifts by a cent for totals like 100.00 / 3; the
//! remainder assignment here closes that gap deterministically.
//!
//! All functions are pure over their inputs.

use rust_decimal::prelude::*;

use crate::orders::money::{to_decimal, to_f64, MONEY_TOLERANCE};
use crate::orders::traits::OrderError;
use shared::order::{OrderSnapshot, SplitPolicy};

/// Equal shares for a validated (total, count) pair; count must be > 0.
fn equal_shares(total: Decimal, count: usize) -> Vec<f64> {
    let n = Decimal::from(count as u64);
    let base = (total / n).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let mut shares = vec![to_f64(base); count];
    // Last participant absorbs the remainder so the sum is exact
    let last = total - base * Decimal::from((count - 1) as u64);
    shares[count - 1] = to_f64(last);
    shares
}

/// Compute equal shares of `effective_total` across `count` participants.
///
/// Shares are returned in participant order; the last one absorbs the
/// rounding remainder. A zero total is allowed (free order, everyone owes
/// 0.00).
pub fn compute_equal_shares(effective_total: f64, count: usize) -> Result<Vec<f64>, OrderError> {
    if count == 0 {
        return Err(OrderError::InvalidSplit("no participants".to_string()));
    }
    let total = to_decimal(effective_total);
    if total < Decimal::ZERO {
        return Err(OrderError::InvalidSplit(format!(
            "negative total: {}",
            effective_total
        )));
    }
    Ok(equal_shares(total, count))
}

/// Recompute assigned amounts in place when the order uses the equal policy.
///
/// No-op under the custom policy or with no participants. Callers must
/// recalculate `effective_total` first.
pub fn refresh_equal_shares(snapshot: &mut OrderSnapshot) {
    if snapshot.split_policy != SplitPolicy::Equal || snapshot.participants.is_empty() {
        return;
    }
    let shares = equal_shares(
        to_decimal(snapshot.effective_total),
        snapshot.participants.len(),
    );
    for (participant, share) in snapshot.participants.iter_mut().zip(shares) {
        participant.assigned_amount = share;
    }
}

/// Check that custom share amounts sum to the effective total within the
/// money tolerance. The error carries the signed delta (positive = shares
/// fall short of the total).
pub fn validate_shares_sum(effective_total: f64, amounts: &[f64]) -> Result<(), OrderError> {
    let total = to_decimal(effective_total);
    let sum: Decimal = amounts.iter().map(|a| to_decimal(*a)).sum();
    let delta = total - sum;

    if delta.abs() < MONEY_TOLERANCE {
        Ok(())
    } else {
        Err(OrderError::AmountMismatch {
            expected: to_f64(total),
            actual: to_f64(sum),
            delta: to_f64(delta),
        })
    }
}

/// Preconditions for finalizing a draft: non-empty items, non-empty
/// participants, and assigned amounts that cover the effective total.
pub fn validate_for_finalize(snapshot: &OrderSnapshot) -> Result<(), OrderError> {
    if snapshot.items.is_empty() {
        return Err(OrderError::InvalidOperation(
            "cannot finalize an order with no items".to_string(),
        ));
    }
    if snapshot.participants.is_empty() {
        return Err(OrderError::InvalidSplit("no participants".to_string()));
    }

    let amounts: Vec<f64> = snapshot
        .participants
        .iter()
        .map(|p| p.assigned_amount)
        .collect();
    validate_shares_sum(snapshot.effective_total, &amounts)
}
