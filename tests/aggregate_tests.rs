// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use loomcrm::aggregate::{
    ChartData, mode_breakdown, monthly_paid, monthly_sales, status_breakdown, type_breakdown,
};
use loomcrm::models::{DeliveryStatus, Order, PaymentMode, PaymentStatus};
use rust_decimal::Decimal;

fn order(
    date: &str,
    item_type: &str,
    amount: i64,
    status: PaymentStatus,
    mode: Option<PaymentMode>,
) -> Order {
    Order {
        id: 0,
        order_ref: String::new(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        customer_id: 1,
        item_type: item_type.to_string(),
        amount: Decimal::from(amount),
        channel: "Online".to_string(),
        payment_status: status,
        payment_mode: mode,
        delivery_status: DeliveryStatus::Pending,
        remarks: String::new(),
    }
}

fn sample() -> Vec<Order> {
    vec![
        order("2025-01-10", "Banarasi", 100, PaymentStatus::Paid, Some(PaymentMode::Upi)),
        order("2025-01-20", "Silk", 50, PaymentStatus::Pending, None),
        order("2025-02-05", "Banarasi", 200, PaymentStatus::Paid, Some(PaymentMode::Card)),
    ]
}

#[test]
fn monthly_sales_groups_chronologically() {
    let data = monthly_sales(&sample());
    assert_eq!(data.labels, vec!["2025-01", "2025-02"]);
    assert_eq!(data.values, vec![Decimal::from(150), Decimal::from(200)]);
}

#[test]
fn monthly_paid_filters_pending_orders() {
    let data = monthly_paid(&sample());
    assert_eq!(data.labels, vec!["2025-01", "2025-02"]);
    assert_eq!(data.values, vec![Decimal::from(100), Decimal::from(200)]);
}

#[test]
fn status_breakdown_sums_by_status_descending() {
    let data = status_breakdown(&sample());
    assert_eq!(data.labels, vec!["Paid", "Pending"]);
    assert_eq!(data.values, vec![Decimal::from(300), Decimal::from(50)]);
}

#[test]
fn type_breakdown_sums_amounts() {
    let data = type_breakdown(&sample());
    assert_eq!(data.labels, vec!["Banarasi", "Silk"]);
    assert_eq!(data.values, vec![Decimal::from(300), Decimal::from(50)]);
}

#[test]
fn mode_breakdown_folds_unpaid_into_pending() {
    let data = mode_breakdown(&sample());
    assert_eq!(data.labels, vec!["Card", "UPI", "Pending"]);
    assert_eq!(
        data.values,
        vec![Decimal::from(200), Decimal::from(100), Decimal::from(50)]
    );
}

#[test]
fn empty_input_yields_empty_chart_data() {
    let orders: Vec<Order> = Vec::new();
    assert!(monthly_sales(&orders).is_empty());
    assert!(monthly_paid(&orders).is_empty());
    assert!(type_breakdown(&orders).is_empty());
    assert!(status_breakdown(&orders).is_empty());
    assert!(mode_breakdown(&orders).is_empty());
}

#[test]
fn labels_and_values_stay_parallel() {
    let orders = sample();
    for data in [
        monthly_sales(&orders),
        monthly_paid(&orders),
        type_breakdown(&orders),
        status_breakdown(&orders),
        mode_breakdown(&orders),
    ] {
        assert_eq!(data.labels.len(), data.values.len());
    }
}

#[test]
fn chart_total_matches_order_sum() {
    let orders = sample();
    let expected: Decimal = orders.iter().map(|o| o.amount).sum();
    assert_eq!(monthly_sales(&orders).total(), expected);
    assert_eq!(type_breakdown(&orders).total(), expected);
    assert_eq!(status_breakdown(&orders).total(), expected);
}

#[test]
fn tail_keeps_trailing_months() {
    let data = ChartData {
        labels: vec!["2025-01".into(), "2025-02".into(), "2025-03".into()],
        values: vec![Decimal::ONE, Decimal::TWO, Decimal::TEN],
    };
    let tail = data.tail(2);
    assert_eq!(tail.labels, vec!["2025-02", "2025-03"]);
    assert_eq!(tail.values, vec![Decimal::TWO, Decimal::TEN]);
}
