// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{mode_breakdown, monthly_paid};
use crate::charts::{InrFormatter, bar_chart, donut_chart};
use crate::commands::{dashboard::print_chart, orders};
use crate::models::PaymentStatus;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");

    let all = orders::load_all(conn)?;
    let paid_total: Decimal = all
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Paid)
        .map(|o| o.amount)
        .sum();
    let pending_total: Decimal = all
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Pending)
        .map(|o| o.amount)
        .sum();

    let donut = donut_chart("donut", mode_breakdown(&all), Some(&InrFormatter))?;
    let monthly = bar_chart("monthlyPaid", monthly_paid(&all))?;
    let listing = orders::query_rows(conn, m)?;

    let payload = json!({
        "paid_total": paid_total,
        "pending_total": pending_total,
        "charts": [donut, monthly],
        "orders": listing,
    });
    if !maybe_print_json(json_flag, jsonl_flag, &payload)? {
        println!(
            "{}",
            pretty_table(
                &["Metric", "Value"],
                vec![
                    vec!["Paid total".into(), paid_total.to_string()],
                    vec!["Pending total".into(), pending_total.to_string()],
                ],
            )
        );
        print_chart(&donut);
        print_chart(&monthly);
        let rows: Vec<Vec<String>> = listing
            .iter()
            .map(|o| {
                vec![
                    o.order_ref.clone(),
                    o.date.clone(),
                    o.customer.clone(),
                    o.amount.clone(),
                    o.payment_status.clone(),
                    o.payment_mode.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Ref", "Date", "Customer", "Amount", "Payment", "Mode"], rows)
        );
    }
    Ok(())
}
