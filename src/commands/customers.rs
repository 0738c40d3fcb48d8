// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, next_customer_code, pretty_table};
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let code = sub.get_one::<String>("code").unwrap();
            let n = conn.execute("DELETE FROM customers WHERE code=?1", params![code])?;
            if n == 0 {
                bail!("Customer '{}' not found", code);
            }
            println!("Removed customer '{}'", code);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    if name.is_empty() {
        bail!("Name is required");
    }
    let code = sub
        .get_one::<String>("code")
        .cloned()
        .unwrap_or_else(next_customer_code);
    let instagram = sub
        .get_one::<String>("instagram")
        .cloned()
        .unwrap_or_else(|| "None".to_string());
    let phone = sub.get_one::<String>("phone");
    let city = sub.get_one::<String>("city");
    let notes = sub.get_one::<String>("notes").cloned().unwrap_or_default();

    conn.execute(
        "INSERT INTO customers(code, name, instagram, phone, city, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![code, name, instagram, phone, city, notes],
    )
    .with_context(|| {
        format!(
            "Could not add customer '{}': code '{}' may already be in use (pass --code to pick another)",
            name, code
        )
    })?;
    println!("Added customer '{}' ({})", name, code);
    Ok(())
}

#[derive(Serialize)]
pub struct CustomerRow {
    pub code: String,
    pub name: String,
    pub instagram: String,
    pub phone: String,
    pub city: String,
    pub notes: String,
    pub created_at: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.code.clone(),
                    c.name.clone(),
                    c.instagram.clone(),
                    c.phone.clone(),
                    c.city.clone(),
                    c.notes.clone(),
                    c.created_at.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Code", "Name", "Instagram", "Phone", "City", "Notes", "Created"],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<CustomerRow>> {
    let mut sql = String::from(
        "SELECT code, name, instagram, phone, city, notes, created_at FROM customers WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(q) = sub.get_one::<String>("search") {
        sql.push_str(" AND (name LIKE ?1 OR city LIKE ?1 OR phone LIKE ?1 OR code LIKE ?1)");
        params_vec.push(format!("%{}%", q));
    }
    sql.push_str(" ORDER BY id DESC");

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
        data.push(CustomerRow {
            code: r.get(0)?,
            name: r.get(1)?,
            instagram: r.get(2)?,
            phone: r.get::<_, Option<String>>(3)?.unwrap_or_default(),
            city: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
            notes: r.get(5)?,
            created_at: r.get(6)?,
        });
    }
    Ok(data)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let code = sub.get_one::<String>("code").unwrap();
    let id: Option<i64> = conn
        .query_row("SELECT id FROM customers WHERE code=?1", params![code], |r| {
            r.get(0)
        })
        .optional()?;
    let Some(id) = id else {
        bail!("Customer '{}' not found", code);
    };

    if let Some(name) = sub.get_one::<String>("name") {
        let name = name.trim();
        if name.is_empty() {
            bail!("Name is required");
        }
        conn.execute("UPDATE customers SET name=?1 WHERE id=?2", params![name, id])?;
    }
    if let Some(phone) = sub.get_one::<String>("phone") {
        // Keep phone numbers unique across customers, ignoring this one.
        let taken: Option<i64> = conn
            .query_row(
                "SELECT id FROM customers WHERE phone=?1 AND id<>?2",
                params![phone, id],
                |r| r.get(0),
            )
            .optional()?;
        if taken.is_some() {
            bail!("Another customer already has phone '{}'", phone);
        }
        conn.execute("UPDATE customers SET phone=?1 WHERE id=?2", params![phone, id])?;
    }
    if let Some(city) = sub.get_one::<String>("city") {
        conn.execute("UPDATE customers SET city=?1 WHERE id=?2", params![city, id])?;
    }
    if let Some(instagram) = sub.get_one::<String>("instagram") {
        conn.execute(
            "UPDATE customers SET instagram=?1 WHERE id=?2",
            params![instagram, id],
        )?;
    }
    if let Some(notes) = sub.get_one::<String>("notes") {
        conn.execute("UPDATE customers SET notes=?1 WHERE id=?2", params![notes, id])?;
    }
    println!("Updated customer '{}'", code);
    Ok(())
}
