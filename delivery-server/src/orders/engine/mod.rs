//! Order recompute engine
//!
//! [`recompute`] is the single place derived monetary fields are written:
//! the order total and, when a split bill is enabled, the per-head or
//! per-share allocation figures. It is pure and idempotent: the
//! persistence boundary runs it before every write, so repeated saves
//! must never drift the totals.

use rust_decimal::Decimal;
use shared::models::{Order, OrderItem, SplitBill, SplitType};

use super::error::OrderError;
use super::money::{MAX_PRICE, MAX_QUANTITY, to_decimal, to_f64};

#[cfg(test)]
mod tests;

/// What happens to the rounding surplus of a ceiling-based equal split
///
/// `ceil(total / n) × n` can exceed the total by up to `n − 1` minor
/// units. The policy decides who carries that difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemainderPolicy {
    /// Every head pays the ceiling figure; the surplus is the collection
    /// layer's concern
    #[default]
    Overcollect,
    /// The final payer is charged the exact remaining amount instead of
    /// the ceiling figure
    LastPayerAdjusts,
}

impl std::str::FromStr for RemainderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overcollect" => Ok(RemainderPolicy::Overcollect),
            "last_payer" => Ok(RemainderPolicy::LastPayerAdjusts),
            other => Err(format!("Unknown remainder policy: {}", other)),
        }
    }
}

/// Recompute all derived fields of an order
///
/// Returns the corrected order; the input's derived fields are ignored
/// and overwritten. Calling this twice on the same input yields the same
/// output.
pub fn recompute(mut order: Order, policy: RemainderPolicy) -> Result<Order, OrderError> {
    let total = compute_total(&order.items)?;
    order.total_amount = to_f64(total);

    if let Some(split) = order.split_bill.take() {
        order.split_bill = Some(recompute_split(split, total, policy)?);
    }

    Ok(order)
}

/// Sum of unit price × quantity over all items
///
/// An empty item list is a valid order with a zero total.
fn compute_total(items: &[OrderItem]) -> Result<Decimal, OrderError> {
    let mut total = Decimal::ZERO;
    for item in items {
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(OrderError::InvalidItem(format!(
                "Item '{}' has a negative or non-finite unit price",
                item.name
            )));
        }
        if item.price > MAX_PRICE {
            return Err(OrderError::InvalidItem(format!(
                "Item '{}' exceeds the maximum unit price",
                item.name
            )));
        }
        if item.quantity < 1 || item.quantity > MAX_QUANTITY {
            return Err(OrderError::InvalidItem(format!(
                "Item '{}' has quantity {}, expected 1..={}",
                item.name, item.quantity, MAX_QUANTITY
            )));
        }
        total += to_decimal(item.price) * Decimal::from(item.quantity);
    }
    Ok(total)
}

/// Derive the split-bill fields for the active split type
///
/// The inactive type's derived fields are cleared so switching between
/// equal and manual never leaves stale figures behind.
fn recompute_split(
    mut split: SplitBill,
    total: Decimal,
    policy: RemainderPolicy,
) -> Result<SplitBill, OrderError> {
    if !split.enabled {
        split.equal_split_amount = None;
        split.last_share_amount = None;
        split.total_allocated = None;
        split.remaining_amount = None;
        return Ok(split);
    }

    match split.split_type {
        SplitType::Equal => {
            let people = split.number_of_people.unwrap_or(0);
            if people <= 0 {
                return Err(OrderError::InvalidSplitConfiguration(format!(
                    "Equal split requires a positive headcount, got {}",
                    people
                )));
            }

            // Ceiling avoids under-collection; the rounding surplus is
            // handled according to the configured remainder policy.
            let per_head = (total / Decimal::from(people)).ceil();
            split.equal_split_amount = Some(to_f64(per_head));
            split.last_share_amount = match policy {
                RemainderPolicy::Overcollect => None,
                RemainderPolicy::LastPayerAdjusts => {
                    // Floored at zero: with many payers the ceiling figures
                    // can already cover the whole total
                    let others = per_head * Decimal::from(people - 1);
                    Some(to_f64((total - others).max(Decimal::ZERO)))
                }
            };
            split.total_allocated = None;
            split.remaining_amount = None;
        }
        SplitType::Manual => {
            let mut allocated = Decimal::ZERO;
            for share in &split.manual_split {
                if share.name.trim().is_empty() {
                    return Err(OrderError::InvalidSplitEntry(
                        "Manual split entry is missing a name".to_string(),
                    ));
                }
                if !share.amount.is_finite() || share.amount < 0.0 {
                    return Err(OrderError::InvalidSplitEntry(format!(
                        "Manual split entry '{}' has a negative or non-finite amount",
                        share.name
                    )));
                }
                allocated += to_decimal(share.amount);
            }

            split.total_allocated = Some(to_f64(allocated));
            // Negative when over-allocated: reported as-is, never clamped.
            // Whether the caller accepts over-allocation is a policy
            // decision above this engine.
            split.remaining_amount = Some(to_f64(total - allocated));
            split.equal_split_amount = None;
            split.last_share_amount = None;
        }
    }

    Ok(split)
}
