// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = findings(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// One row per inconsistency, as (issue, detail) pairs.
pub fn findings(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Orders pointing at a customer that no longer exists
    let mut stmt = conn.prepare(
        "SELECT o.order_ref FROM orders o
         LEFT JOIN customers c ON o.customer_id=c.id
         WHERE c.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let oref: String = r.get(0)?;
        rows.push(vec!["orphan_order".into(), oref]);
    }

    // 2) Status/mode coupling violations: a mode stored on an unpaid order
    let mut stmt2 = conn.prepare(
        "SELECT order_ref, payment_mode FROM orders
         WHERE payment_status<>'Paid' AND payment_mode IS NOT NULL",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let oref: String = r.get(0)?;
        let mode: String = r.get(1)?;
        rows.push(vec!["mode_on_unpaid_order".into(), format!("{} {}", oref, mode)]);
    }

    // 3) Amounts that fail to parse as non-negative decimals
    let mut stmt3 = conn.prepare("SELECT order_ref, amount FROM orders")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let oref: String = r.get(0)?;
        let amount: String = r.get(1)?;
        match amount.parse::<Decimal>() {
            Ok(d) if !d.is_sign_negative() => {}
            _ => rows.push(vec!["bad_amount".into(), format!("{} '{}'", oref, amount)]),
        }
    }

    Ok(rows)
}
