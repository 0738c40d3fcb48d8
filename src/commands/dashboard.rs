// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{monthly_sales, type_breakdown};
use crate::charts::{ChartSpec, InrFormatter, bar_chart, pie_chart};
use crate::commands::orders;
use crate::models::{DeliveryStatus, Order, PaymentStatus};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
pub struct Summary {
    pub total_customers: i64,
    pub total_orders: usize,
    pub paid_revenue: Decimal,
    pub pending_amount: Decimal,
    pub avg_order: Decimal,
    pub pending_payments: usize,
    pub pending_delivery: usize,
    pub open_followups: i64,
}

/// KPI cards for the dashboard. Revenue figures are Decimal sums over the
/// already-loaded order set; only the customer and follow-up counts go
/// back to the database.
pub fn summary(conn: &Connection, orders: &[Order]) -> Result<Summary> {
    let total_customers: i64 =
        conn.query_row("SELECT COUNT(id) FROM customers", [], |r| r.get(0))?;
    let open_followups: i64 = conn.query_row(
        "SELECT COUNT(id) FROM followups WHERE status='Open'",
        [],
        |r| r.get(0),
    )?;

    let paid_revenue: Decimal = orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Paid)
        .map(|o| o.amount)
        .sum();
    let pending_amount: Decimal = orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Pending)
        .map(|o| o.amount)
        .sum();
    let avg_order = if orders.is_empty() {
        Decimal::ZERO
    } else {
        let total: Decimal = orders.iter().map(|o| o.amount).sum();
        (total / Decimal::from(orders.len())).round_dp(2)
    };

    Ok(Summary {
        total_customers,
        total_orders: orders.len(),
        paid_revenue,
        pending_amount,
        avg_order,
        pending_payments: orders
            .iter()
            .filter(|o| o.payment_status == PaymentStatus::Pending)
            .count(),
        pending_delivery: orders
            .iter()
            .filter(|o| o.delivery_status == DeliveryStatus::Pending)
            .count(),
        open_followups,
    })
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let months: usize = *m.get_one::<usize>("months").unwrap_or(&6);

    let orders = orders::load_all(conn)?;
    let s = summary(conn, &orders)?;
    let sales = bar_chart("monthlySales", monthly_sales(&orders).tail(months))?;
    let types = pie_chart("typeChart", type_breakdown(&orders), Some(&InrFormatter))?;

    let payload = json!({ "summary": s, "charts": [sales, types] });
    if !maybe_print_json(json_flag, jsonl_flag, &payload)? {
        println!(
            "{}",
            pretty_table(
                &["Metric", "Value"],
                vec![
                    vec!["Customers".into(), s.total_customers.to_string()],
                    vec!["Orders".into(), s.total_orders.to_string()],
                    vec!["Paid revenue".into(), s.paid_revenue.to_string()],
                    vec!["Pending amount".into(), s.pending_amount.to_string()],
                    vec!["Avg order".into(), s.avg_order.to_string()],
                    vec!["Pending payments".into(), s.pending_payments.to_string()],
                    vec!["Pending delivery".into(), s.pending_delivery.to_string()],
                    vec!["Open follow-ups".into(), s.open_followups.to_string()],
                ],
            )
        );
        print_chart(&sales);
        print_chart(&types);
    }
    Ok(())
}

pub fn print_chart(spec: &ChartSpec) {
    if spec.slices.is_empty() {
        let rows = spec
            .labels
            .iter()
            .zip(spec.values.iter())
            .map(|(l, v)| vec![l.clone(), v.to_string()])
            .collect();
        println!("{}\n{}", spec.element_id, pretty_table(&["Label", "Total"], rows));
    } else {
        let rows = spec
            .slices
            .iter()
            .map(|s| vec![s.label.clone(), s.value.to_string(), format!("{}%", s.pct)])
            .collect();
        println!(
            "{}\n{}",
            spec.element_id,
            pretty_table(&["Label", "Total", "Share"], rows)
        );
    }
}
