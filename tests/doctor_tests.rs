// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use loomcrm::commands::doctor;
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE customers(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL
        );
        CREATE TABLE orders(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_ref TEXT NOT NULL UNIQUE,
            date TEXT NOT NULL,
            customer_id INTEGER NOT NULL,
            item_type TEXT NOT NULL DEFAULT 'Saree',
            amount TEXT NOT NULL,
            channel TEXT NOT NULL DEFAULT 'Online',
            payment_status TEXT NOT NULL DEFAULT 'Pending',
            payment_mode TEXT,
            delivery_status TEXT NOT NULL DEFAULT 'Pending',
            remarks TEXT NOT NULL DEFAULT ''
        );
        "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO customers(code, name) VALUES ('CUST00001', 'Meera Pillai')",
        [],
    )
    .unwrap();
    conn
}

fn insert_order(
    conn: &Connection,
    order_ref: &str,
    customer_id: i64,
    amount: &str,
    status: &str,
    mode: Option<&str>,
) {
    conn.execute(
        "INSERT INTO orders(order_ref, date, customer_id, amount, payment_status, payment_mode)
         VALUES (?1, '2025-01-10', ?2, ?3, ?4, ?5)",
        params![order_ref, customer_id, amount, status, mode],
    )
    .unwrap();
}

#[test]
fn clean_database_has_no_findings() {
    let conn = setup();
    insert_order(&conn, "ORD1", 1, "1499", "Paid", Some("UPI"));
    insert_order(&conn, "ORD2", 1, "999", "Pending", None);
    assert!(doctor::findings(&conn).unwrap().is_empty());
}

#[test]
fn orders_without_a_customer_are_reported() {
    let conn = setup();
    insert_order(&conn, "ORD1", 99, "500", "Pending", None);
    let rows = doctor::findings(&conn).unwrap();
    assert_eq!(rows, vec![vec!["orphan_order".to_string(), "ORD1".to_string()]]);
}

#[test]
fn a_mode_stored_on_an_unpaid_order_is_reported() {
    let conn = setup();
    insert_order(&conn, "ORD1", 1, "500", "Pending", Some("UPI"));
    insert_order(&conn, "ORD2", 1, "750", "Paid", Some("Cash"));
    let rows = doctor::findings(&conn).unwrap();
    assert_eq!(
        rows,
        vec![vec!["mode_on_unpaid_order".to_string(), "ORD1 UPI".to_string()]]
    );
}

#[test]
fn unparseable_and_negative_amounts_are_reported() {
    let conn = setup();
    insert_order(&conn, "ORD1", 1, "twelve", "Pending", None);
    insert_order(&conn, "ORD2", 1, "-50", "Paid", Some("Card"));
    insert_order(&conn, "ORD3", 1, "123.45", "Paid", Some("UPI"));
    let rows = doctor::findings(&conn).unwrap();
    assert_eq!(
        rows,
        vec![
            vec!["bad_amount".to_string(), "ORD1 'twelve'".to_string()],
            vec!["bad_amount".to_string(), "ORD2 '-50'".to_string()],
        ]
    );
}

#[test]
fn each_defect_kind_gets_its_own_row() {
    let conn = setup();
    insert_order(&conn, "ORD1", 99, "abc", "Pending", Some("UPI"));
    let rows = doctor::findings(&conn).unwrap();
    let issues: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(issues, ["orphan_order", "mode_on_unpaid_order", "bad_amount"]);
}
