// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::FOLLOWUP_STATUSES;
use crate::utils::{id_for_customer, maybe_print_json, parse_date, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("done", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            set_status(conn, id, "Completed")?;
        }
        Some(("status", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let status = sub.get_one::<String>("status").unwrap();
            if !FOLLOWUP_STATUSES.contains(&status.as_str()) {
                bail!(
                    "Invalid follow-up status '{}', expected one of: {}",
                    status,
                    FOLLOWUP_STATUSES.join(", ")
                );
            }
            set_status(conn, id, status)?;
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let due = parse_date(sub.get_one::<String>("due").unwrap())?;
    let code = sub.get_one::<String>("customer").unwrap();
    let customer_id = id_for_customer(conn, code)?;
    let notes = sub.get_one::<String>("notes").cloned().unwrap_or_default();
    conn.execute(
        "INSERT INTO followups(due_date, customer_id, notes, status) VALUES (?1, ?2, ?3, 'Open')",
        params![due.to_string(), customer_id, notes],
    )?;
    println!("Follow-up for '{}' due {}", code, due);
    Ok(())
}

#[derive(Serialize)]
pub struct FollowUpRow {
    pub id: i64,
    pub due_date: String,
    pub customer: String,
    pub notes: String,
    pub status: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut sql = String::from(
        "SELECT f.id, f.due_date, c.code, c.name, f.notes, f.status
         FROM followups f LEFT JOIN customers c ON f.customer_id=c.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(status) = sub.get_one::<String>("status") {
        sql.push_str(" AND f.status=?1");
        params_vec.push(status.clone());
    }
    sql.push_str(" ORDER BY f.due_date ASC, f.id ASC");

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
        let code: Option<String> = r.get(2)?;
        let name: Option<String> = r.get(3)?;
        data.push(FollowUpRow {
            id: r.get(0)?,
            due_date: r.get(1)?,
            customer: match (code, name) {
                (Some(c), Some(n)) => format!("{} ({})", n, c),
                (Some(c), None) => c,
                _ => String::new(),
            },
            notes: r.get(4)?,
            status: r.get(5)?,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|f| {
                vec![
                    f.id.to_string(),
                    f.due_date.clone(),
                    f.customer.clone(),
                    f.notes.clone(),
                    f.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Due", "Customer", "Notes", "Status"], rows)
        );
    }
    Ok(())
}

fn set_status(conn: &Connection, id: i64, status: &str) -> Result<()> {
    let n = conn.execute(
        "UPDATE followups SET status=?1 WHERE id=?2",
        params![status, id],
    )?;
    if n == 0 {
        bail!("Follow-up {} not found", id);
    }
    println!("Follow-up {} -> {}", id, status);
    Ok(())
}
