// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::coupling::effective_mode;
use crate::models::{DeliveryStatus, Order, PaymentMode, PaymentStatus};
use crate::utils::{
    id_for_customer, maybe_print_json, next_order_ref, parse_amount, parse_date, parse_month,
    pretty_table,
};
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let order_ref = sub.get_one::<String>("ref").unwrap();
            let n = conn.execute("DELETE FROM orders WHERE order_ref=?1", params![order_ref])?;
            if n == 0 {
                bail!("Order '{}' not found", order_ref);
            }
            println!("Removed order '{}'", order_ref);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let order_ref = sub
        .get_one::<String>("ref")
        .cloned()
        .unwrap_or_else(next_order_ref);
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let customer_code = sub
        .get_one::<String>("customer")
        .context("--customer is required when adding an order")?;
    let customer_id = id_for_customer(conn, customer_code)?;
    let item_type = sub
        .get_one::<String>("type")
        .cloned()
        .unwrap_or_else(|| "Saree".to_string());
    let amount = parse_amount(
        sub.get_one::<String>("amount")
            .context("--amount is required when adding an order")?,
    )?;
    let channel = sub
        .get_one::<String>("channel")
        .cloned()
        .unwrap_or_else(|| "Online".to_string());
    let status: PaymentStatus = sub
        .get_one::<String>("status")
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(PaymentStatus::Pending);
    let requested: Option<PaymentMode> = sub
        .get_one::<String>("mode")
        .map(|s| s.parse())
        .transpose()?;
    // Unpaid orders never persist a mode.
    let mode = effective_mode(status, requested);
    let delivery: DeliveryStatus = sub
        .get_one::<String>("delivery")
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(DeliveryStatus::Pending);
    let remarks = sub.get_one::<String>("remarks").cloned().unwrap_or_default();

    conn.execute(
        "INSERT INTO orders(order_ref, date, customer_id, item_type, amount, channel,
                            payment_status, payment_mode, delivery_status, remarks)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            order_ref,
            date.to_string(),
            customer_id,
            item_type,
            amount.to_string(),
            channel,
            status.as_str(),
            mode.map(|m| m.as_str()),
            delivery.as_str(),
            remarks
        ],
    )?;
    println!(
        "Recorded order '{}' for {} on {} ({} {})",
        order_ref, customer_code, date, item_type, amount
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|o| {
                vec![
                    o.order_ref.clone(),
                    o.date.clone(),
                    o.customer.clone(),
                    o.item_type.clone(),
                    o.amount.clone(),
                    o.channel.clone(),
                    o.payment_status.clone(),
                    o.payment_mode.clone(),
                    o.delivery_status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Ref", "Date", "Customer", "Type", "Amount", "Channel", "Payment", "Mode", "Delivery"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct OrderRow {
    pub order_ref: String,
    pub date: String,
    pub customer: String,
    pub item_type: String,
    pub amount: String,
    pub channel: String,
    pub payment_status: String,
    pub payment_mode: String,
    pub delivery_status: String,
    pub remarks: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<OrderRow>> {
    let mut sql = String::from(
        "SELECT o.order_ref, o.date, c.code, o.item_type, o.amount, o.channel,
                o.payment_status, o.payment_mode, o.delivery_status, o.remarks
         FROM orders o LEFT JOIN customers c ON o.customer_id=c.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(o.date,1,7)=?");
        params_vec.push(parse_month(month)?);
    }
    if let Some(status) = sub.get_one::<String>("status") {
        let status: PaymentStatus = status.parse()?;
        sql.push_str(" AND o.payment_status=?");
        params_vec.push(status.as_str().into());
    }
    if let Some(delivery) = sub.get_one::<String>("delivery") {
        let delivery: DeliveryStatus = delivery.parse()?;
        sql.push_str(" AND o.delivery_status=?");
        params_vec.push(delivery.as_str().into());
    }
    sql.push_str(" ORDER BY o.date DESC, o.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(OrderRow {
            order_ref: r.get(0)?,
            date: r.get(1)?,
            customer: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            item_type: r.get(3)?,
            amount: r.get(4)?,
            channel: r.get(5)?,
            payment_status: r.get(6)?,
            payment_mode: r.get::<_, Option<String>>(7)?.unwrap_or_default(),
            delivery_status: r.get(8)?,
            remarks: r.get::<_, Option<String>>(9)?.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let order_ref = sub.get_one::<String>("ref").unwrap();
    let current = fetch(conn, order_ref)?;
    let Some(mut o) = current else {
        bail!("Order '{}' not found", order_ref);
    };

    if let Some(d) = sub.get_one::<String>("date") {
        o.date = parse_date(d)?;
    }
    if let Some(code) = sub.get_one::<String>("customer") {
        o.customer_id = id_for_customer(conn, code)?;
    }
    if let Some(t) = sub.get_one::<String>("type") {
        o.item_type = t.clone();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        o.amount = parse_amount(a)?;
    }
    if let Some(c) = sub.get_one::<String>("channel") {
        o.channel = c.clone();
    }
    if let Some(s) = sub.get_one::<String>("status") {
        o.payment_status = s.parse()?;
    }
    let requested: Option<PaymentMode> = match sub.get_one::<String>("mode") {
        Some(s) => Some(s.parse()?),
        None => o.payment_mode,
    };
    // Re-apply the coupling rule after any status change.
    o.payment_mode = effective_mode(o.payment_status, requested);
    if let Some(d) = sub.get_one::<String>("delivery") {
        o.delivery_status = d.parse()?;
    }
    if let Some(r) = sub.get_one::<String>("remarks") {
        o.remarks = r.clone();
    }

    conn.execute(
        "UPDATE orders SET date=?1, customer_id=?2, item_type=?3, amount=?4, channel=?5,
                           payment_status=?6, payment_mode=?7, delivery_status=?8, remarks=?9
         WHERE order_ref=?10",
        params![
            o.date.to_string(),
            o.customer_id,
            o.item_type,
            o.amount.to_string(),
            o.channel,
            o.payment_status.as_str(),
            o.payment_mode.map(|m| m.as_str()),
            o.delivery_status.as_str(),
            o.remarks,
            order_ref
        ],
    )?;
    println!("Updated order '{}'", order_ref);
    Ok(())
}

fn fetch(conn: &Connection, order_ref: &str) -> Result<Option<Order>> {
    let mut stmt = conn.prepare(
        "SELECT id, order_ref, date, customer_id, item_type, amount, channel,
                payment_status, payment_mode, delivery_status, remarks
         FROM orders WHERE order_ref=?1",
    )?;
    let row = stmt
        .query_row(params![order_ref], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, i64>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, String>(5)?,
                r.get::<_, String>(6)?,
                r.get::<_, String>(7)?,
                r.get::<_, Option<String>>(8)?,
                r.get::<_, String>(9)?,
                r.get::<_, Option<String>>(10)?,
            ))
        })
        .optional()?;
    row.map(from_row).transpose()
}

/// Every order in the database, parsed into typed records for the
/// aggregation layer.
pub fn load_all(conn: &Connection) -> Result<Vec<Order>> {
    let mut stmt = conn.prepare(
        "SELECT id, order_ref, date, customer_id, item_type, amount, channel,
                payment_status, payment_mode, delivery_status, remarks
         FROM orders ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, i64>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, String>(7)?,
            r.get::<_, Option<String>>(8)?,
            r.get::<_, String>(9)?,
            r.get::<_, Option<String>>(10)?,
        ))
    })?;
    let mut orders = Vec::new();
    for row in rows {
        orders.push(from_row(row?)?);
    }
    Ok(orders)
}

type RawOrder = (
    i64,
    String,
    String,
    i64,
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    Option<String>,
);

fn from_row(raw: RawOrder) -> Result<Order> {
    let (id, order_ref, date, customer_id, item_type, amount, channel, status, mode, delivery, remarks) =
        raw;
    Ok(Order {
        id,
        order_ref: order_ref.clone(),
        date: parse_date(&date)?,
        customer_id,
        item_type,
        amount: amount
            .parse()
            .with_context(|| format!("Invalid amount '{}' on order '{}'", amount, order_ref))?,
        channel,
        payment_status: status.parse()?,
        payment_mode: mode.map(|m| m.parse()).transpose()?,
        delivery_status: delivery.parse()?,
        remarks: remarks.unwrap_or_default(),
    })
}
