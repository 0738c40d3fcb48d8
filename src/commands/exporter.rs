// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("customers", sub)) => export_customers(conn, sub),
        Some(("orders", sub)) => export_orders(conn, sub),
        _ => Ok(()),
    }
}

fn export_customers(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT code, name, instagram, phone, city, notes, created_at
         FROM customers ORDER BY id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, Option<String>>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["code", "name", "instagram", "phone", "city", "notes", "created_at"])?;
            for row in rows {
                let (code, name, ig, phone, city, notes, created) = row?;
                wtr.write_record([
                    code,
                    name,
                    ig,
                    phone.unwrap_or_default(),
                    city.unwrap_or_default(),
                    notes,
                    created,
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (code, name, ig, phone, city, notes, created) = row?;
                items.push(json!({
                    "code": code, "name": name, "instagram": ig, "phone": phone,
                    "city": city, "notes": notes, "created_at": created
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported customers to {}", out);
    Ok(())
}

fn export_orders(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT o.order_ref, o.date, c.code, c.name, o.item_type, o.amount, o.channel,
                o.payment_status, o.payment_mode, o.delivery_status, o.remarks
         FROM orders o
         LEFT JOIN customers c ON o.customer_id=c.id
         ORDER BY o.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, String>(7)?,
            r.get::<_, Option<String>>(8)?,
            r.get::<_, String>(9)?,
            r.get::<_, Option<String>>(10)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "order_ref",
                "date",
                "customer_code",
                "customer_name",
                "item_type",
                "amount",
                "channel",
                "payment_status",
                "payment_mode",
                "delivery_status",
                "remarks",
            ])?;
            for row in rows {
                let (oref, date, code, name, typ, amount, channel, status, mode, delivery, remarks) =
                    row?;
                wtr.write_record([
                    oref,
                    date,
                    code.unwrap_or_default(),
                    name.unwrap_or_default(),
                    typ,
                    amount,
                    channel,
                    status,
                    mode.unwrap_or_default(),
                    delivery,
                    remarks.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (oref, date, code, name, typ, amount, channel, status, mode, delivery, remarks) =
                    row?;
                items.push(json!({
                    "order_ref": oref, "date": date, "customer_code": code,
                    "customer_name": name, "item_type": typ, "amount": amount,
                    "channel": channel, "payment_status": status, "payment_mode": mode,
                    "delivery_status": delivery, "remarks": remarks
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported orders to {}", out);
    Ok(())
}
