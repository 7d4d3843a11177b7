use super::*;
use shared::models::{DeliveryAddress, GeoPoint, ManualShare, OrderStatus};

fn test_item(name: &str, price: f64, quantity: i32) -> OrderItem {
    OrderItem {
        dish_id: format!("dish_{}", name),
        name: name.to_string(),
        price,
        quantity,
    }
}

fn test_order(items: Vec<OrderItem>) -> Order {
    Order {
        id: "order_1".to_string(),
        restaurant_id: "rest_1".to_string(),
        restaurant_location: GeoPoint {
            lat: 22.3072,
            lng: 73.1812,
        },
        items,
        total_amount: 0.0,
        split_bill: None,
        status: OrderStatus::Pending,
        delivery_address: DeliveryAddress {
            street: "12 Station Road".to_string(),
            city: "Vadodara".to_string(),
            location: GeoPoint {
                lat: 22.2950,
                lng: 73.2020,
            },
        },
        payment_method: "card".to_string(),
        is_paid: false,
        is_active: true,
        created_at: 0,
        updated_at: 0,
    }
}

fn equal_split(people: i32) -> SplitBill {
    SplitBill {
        enabled: true,
        split_type: SplitType::Equal,
        number_of_people: Some(people),
        ..Default::default()
    }
}

fn manual_split(shares: Vec<(&str, f64)>) -> SplitBill {
    SplitBill {
        enabled: true,
        split_type: SplitType::Manual,
        manual_split: shares
            .into_iter()
            .map(|(name, amount)| ManualShare {
                name: name.to_string(),
                amount,
            })
            .collect(),
        ..Default::default()
    }
}

// ========================================================================
// Total computation
// ========================================================================

#[test]
fn test_total_is_sum_of_line_totals() {
    let order = test_order(vec![test_item("thali", 100.0, 2), test_item("lassi", 50.0, 1)]);
    let result = recompute(order, RemainderPolicy::default()).unwrap();
    assert_eq!(result.total_amount, 250.0);
}

#[test]
fn test_empty_items_yield_zero_total() {
    let mut order = test_order(vec![]);
    order.total_amount = 99.0; // stale caller value must be overwritten
    let result = recompute(order, RemainderPolicy::default()).unwrap();
    assert_eq!(result.total_amount, 0.0);
}

#[test]
fn test_total_is_decimal_exact() {
    // 0.1 × 3 = 0.30 exactly, no floating drift
    let order = test_order(vec![test_item("chutney", 0.1, 3)]);
    let result = recompute(order, RemainderPolicy::default()).unwrap();
    assert_eq!(result.total_amount, 0.3);
}

#[test]
fn test_recompute_is_idempotent() {
    let mut order = test_order(vec![test_item("thali", 100.0, 2), test_item("lassi", 50.0, 1)]);
    order.split_bill = Some(equal_split(3));

    let once = recompute(order, RemainderPolicy::default()).unwrap();
    let twice = recompute(once.clone(), RemainderPolicy::default()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_zero_quantity_rejected() {
    let order = test_order(vec![test_item("thali", 100.0, 0)]);
    let err = recompute(order, RemainderPolicy::default()).unwrap_err();
    assert!(matches!(err, OrderError::InvalidItem(_)));
}

#[test]
fn test_negative_price_rejected() {
    let order = test_order(vec![test_item("thali", -1.0, 1)]);
    let err = recompute(order, RemainderPolicy::default()).unwrap_err();
    assert!(matches!(err, OrderError::InvalidItem(_)));
}

// ========================================================================
// Equal split
// ========================================================================

#[test]
fn test_equal_split_rounds_up() {
    let mut order = test_order(vec![test_item("thali", 100.0, 2), test_item("lassi", 50.0, 1)]);
    order.split_bill = Some(equal_split(3));

    let result = recompute(order, RemainderPolicy::default()).unwrap();
    let split = result.split_bill.unwrap();
    // ceil(250 / 3) = 84
    assert_eq!(split.equal_split_amount, Some(84.0));
    assert_eq!(split.last_share_amount, None);
    assert_eq!(split.total_allocated, None);
    assert_eq!(split.remaining_amount, None);
}

#[test]
fn test_equal_split_ceiling_property() {
    for people in 1..=7 {
        let mut order = test_order(vec![test_item("thali", 100.0, 2), test_item("lassi", 50.0, 1)]);
        order.split_bill = Some(equal_split(people));

        let result = recompute(order, RemainderPolicy::default()).unwrap();
        let per_head = result.split_bill.unwrap().equal_split_amount.unwrap();

        // Everyone paying the figure covers the total...
        assert!(per_head * people as f64 >= result.total_amount);
        // ...and one fewer payer would not
        assert!(per_head * ((people - 1) as f64) < result.total_amount);
    }
}

#[test]
fn test_equal_split_single_person_pays_total() {
    let mut order = test_order(vec![test_item("thali", 100.0, 2), test_item("lassi", 50.0, 1)]);
    order.split_bill = Some(equal_split(1));

    let result = recompute(order, RemainderPolicy::default()).unwrap();
    assert_eq!(result.split_bill.unwrap().equal_split_amount, Some(250.0));
}

#[test]
fn test_last_payer_policy_shares_sum_to_total() {
    let mut order = test_order(vec![test_item("thali", 100.0, 2), test_item("lassi", 50.0, 1)]);
    order.split_bill = Some(equal_split(3));

    let result = recompute(order, RemainderPolicy::LastPayerAdjusts).unwrap();
    let split = result.split_bill.unwrap();
    let per_head = split.equal_split_amount.unwrap();
    let last = split.last_share_amount.unwrap();

    assert_eq!(per_head, 84.0);
    assert_eq!(last, 82.0); // 250 − 84 × 2
    assert_eq!(per_head * 2.0 + last, result.total_amount);
}

#[test]
fn test_last_payer_share_floors_at_zero() {
    // ceil(10 / 12) = 1, so eleven payers already cover the total
    let mut order = test_order(vec![test_item("chai", 10.0, 1)]);
    order.split_bill = Some(equal_split(12));

    let result = recompute(order, RemainderPolicy::LastPayerAdjusts).unwrap();
    let split = result.split_bill.unwrap();
    assert_eq!(split.equal_split_amount, Some(1.0));
    assert_eq!(split.last_share_amount, Some(0.0));
}

#[test]
fn test_equal_split_rejects_non_positive_headcount() {
    for people in [0, -2] {
        let mut order = test_order(vec![test_item("thali", 100.0, 1)]);
        order.split_bill = Some(equal_split(people));

        let err = recompute(order, RemainderPolicy::default()).unwrap_err();
        assert!(matches!(err, OrderError::InvalidSplitConfiguration(_)));
    }
}

#[test]
fn test_equal_split_missing_headcount_rejected() {
    let mut order = test_order(vec![test_item("thali", 100.0, 1)]);
    let mut split = equal_split(3);
    split.number_of_people = None;
    order.split_bill = Some(split);

    let err = recompute(order, RemainderPolicy::default()).unwrap_err();
    assert!(matches!(err, OrderError::InvalidSplitConfiguration(_)));
}

// ========================================================================
// Manual split
// ========================================================================

#[test]
fn test_manual_split_reports_allocation() {
    let mut order = test_order(vec![test_item("thali", 100.0, 2), test_item("lassi", 50.0, 1)]);
    order.split_bill = Some(manual_split(vec![("Asha", 100.0), ("Ravi", 100.0)]));

    let result = recompute(order, RemainderPolicy::default()).unwrap();
    let split = result.split_bill.unwrap();
    assert_eq!(split.total_allocated, Some(200.0));
    assert_eq!(split.remaining_amount, Some(50.0));
    assert_eq!(split.equal_split_amount, None);
}

#[test]
fn test_manual_split_over_allocation_is_reported_not_rejected() {
    let mut order = test_order(vec![test_item("thali", 100.0, 1)]);
    order.split_bill = Some(manual_split(vec![("Asha", 80.0), ("Ravi", 60.0)]));

    let result = recompute(order, RemainderPolicy::default()).unwrap();
    let split = result.split_bill.unwrap();
    assert_eq!(split.total_allocated, Some(140.0));
    assert_eq!(split.remaining_amount, Some(-40.0));
}

#[test]
fn test_manual_split_allocation_invariant() {
    // total_allocated + remaining_amount == total_amount, over-allocated included
    for shares in [vec![("A", 10.0)], vec![("A", 125.5), ("B", 200.0)]] {
        let mut order = test_order(vec![test_item("thali", 100.0, 2)]);
        order.split_bill = Some(manual_split(shares));

        let result = recompute(order, RemainderPolicy::default()).unwrap();
        let split = result.split_bill.unwrap();
        assert_eq!(
            split.total_allocated.unwrap() + split.remaining_amount.unwrap(),
            result.total_amount
        );
    }
}

#[test]
fn test_manual_split_rejects_nameless_entry() {
    let mut order = test_order(vec![test_item("thali", 100.0, 1)]);
    order.split_bill = Some(manual_split(vec![("  ", 50.0)]));

    let err = recompute(order, RemainderPolicy::default()).unwrap_err();
    assert!(matches!(err, OrderError::InvalidSplitEntry(_)));
}

#[test]
fn test_manual_split_rejects_negative_amount() {
    let mut order = test_order(vec![test_item("thali", 100.0, 1)]);
    order.split_bill = Some(manual_split(vec![("Asha", -5.0)]));

    let err = recompute(order, RemainderPolicy::default()).unwrap_err();
    assert!(matches!(err, OrderError::InvalidSplitEntry(_)));
}

// ========================================================================
// Split type switching / disabled splits
// ========================================================================

#[test]
fn test_switching_to_manual_clears_equal_fields() {
    let mut order = test_order(vec![test_item("thali", 100.0, 2)]);
    order.split_bill = Some(equal_split(4));
    let mut order = recompute(order, RemainderPolicy::default()).unwrap();
    assert!(order.split_bill.as_ref().unwrap().equal_split_amount.is_some());

    // Caller flips the type; stale equal figures must not survive
    let split = order.split_bill.as_mut().unwrap();
    split.split_type = SplitType::Manual;
    split.manual_split = vec![ManualShare {
        name: "Asha".to_string(),
        amount: 120.0,
    }];

    let result = recompute(order, RemainderPolicy::default()).unwrap();
    let split = result.split_bill.unwrap();
    assert_eq!(split.equal_split_amount, None);
    assert_eq!(split.total_allocated, Some(120.0));
}

#[test]
fn test_disabled_split_derives_nothing() {
    let mut order = test_order(vec![test_item("thali", 100.0, 2)]);
    let mut split = equal_split(4);
    split.enabled = false;
    split.equal_split_amount = Some(999.0); // stale caller value
    order.split_bill = Some(split);

    let result = recompute(order, RemainderPolicy::default()).unwrap();
    let split = result.split_bill.unwrap();
    assert_eq!(split.equal_split_amount, None);
    assert_eq!(split.total_allocated, None);
    assert_eq!(split.remaining_amount, None);
}
