// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::orders;
use crate::models::DeliveryStatus;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

#[derive(Serialize)]
pub struct StatusCount {
    pub status: &'static str,
    pub count: i64,
}

/// Orders per delivery status, every pipeline stage present even at zero.
pub fn status_counts(conn: &Connection) -> Result<Vec<StatusCount>> {
    let mut stmt =
        conn.prepare("SELECT delivery_status, COUNT(*) FROM orders GROUP BY delivery_status")?;
    let mut by_status: HashMap<String, i64> = HashMap::new();
    let mut rows = stmt.query([])?;
    while let Some(r) = rows.next()? {
        by_status.insert(r.get(0)?, r.get(1)?);
    }
    Ok(DeliveryStatus::ALL
        .iter()
        .map(|s| StatusCount {
            status: s.as_str(),
            count: by_status.get(s.as_str()).copied().unwrap_or(0),
        })
        .collect())
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");

    let counts = status_counts(conn)?;
    let listing = orders::query_rows(conn, m)?;

    let payload = json!({
        "counts": counts,
        "orders": listing,
    });
    if !maybe_print_json(json_flag, jsonl_flag, &payload)? {
        let kpi_rows: Vec<Vec<String>> = counts
            .iter()
            .map(|c| vec![c.status.to_string(), c.count.to_string()])
            .collect();
        println!("{}", pretty_table(&["Delivery", "Orders"], kpi_rows));
        let rows: Vec<Vec<String>> = listing
            .iter()
            .map(|o| {
                vec![
                    o.order_ref.clone(),
                    o.date.clone(),
                    o.customer.clone(),
                    o.item_type.clone(),
                    o.delivery_status.clone(),
                    o.remarks.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Ref", "Date", "Customer", "Type", "Delivery", "Remarks"], rows)
        );
    }
    Ok(())
}
