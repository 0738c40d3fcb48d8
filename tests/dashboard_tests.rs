// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use loomcrm::commands::{dashboard, orders};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE customers(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            instagram TEXT NOT NULL DEFAULT 'None',
            phone TEXT,
            city TEXT,
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE TABLE orders(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_ref TEXT NOT NULL UNIQUE,
            date TEXT NOT NULL,
            customer_id INTEGER NOT NULL,
            item_type TEXT NOT NULL,
            amount TEXT NOT NULL,
            channel TEXT NOT NULL DEFAULT 'Online',
            payment_status TEXT NOT NULL DEFAULT 'Pending',
            payment_mode TEXT,
            delivery_status TEXT NOT NULL DEFAULT 'Pending',
            remarks TEXT NOT NULL DEFAULT ''
        );
        CREATE TABLE followups(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            due_date TEXT NOT NULL,
            customer_id INTEGER NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'Open'
        );
        "#,
    )
    .unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO customers(code, name) VALUES ('CUST00001', 'Priya Reddy');
        INSERT INTO customers(code, name) VALUES ('CUST00002', 'Rani Agarwal');
        INSERT INTO orders(order_ref, date, customer_id, item_type, amount, payment_status, payment_mode)
            VALUES ('ORD1', '2025-01-10', 1, 'Banarasi', '100', 'Paid', 'UPI');
        INSERT INTO orders(order_ref, date, customer_id, item_type, amount, payment_status)
            VALUES ('ORD2', '2025-01-20', 1, 'Silk', '50', 'Pending');
        INSERT INTO orders(order_ref, date, customer_id, item_type, amount, payment_status, payment_mode, delivery_status)
            VALUES ('ORD3', '2025-02-05', 2, 'Banarasi', '200', 'Paid', 'Card', 'Delivered');
        INSERT INTO followups(due_date, customer_id, notes) VALUES ('2025-02-10', 1, 'Call back');
        INSERT INTO followups(due_date, customer_id, notes, status) VALUES ('2025-02-11', 2, '', 'Completed');
        "#,
    )
    .unwrap();
    conn
}

#[test]
fn summary_counts_and_decimal_totals() {
    let conn = setup();
    let all = orders::load_all(&conn).unwrap();
    let s = dashboard::summary(&conn, &all).unwrap();

    assert_eq!(s.total_customers, 2);
    assert_eq!(s.total_orders, 3);
    assert_eq!(s.paid_revenue.to_string(), "300");
    assert_eq!(s.pending_amount.to_string(), "50");
    // (100 + 50 + 200) / 3
    assert_eq!(s.avg_order.to_string(), "116.67");
    assert_eq!(s.pending_payments, 1);
    assert_eq!(s.pending_delivery, 2);
    assert_eq!(s.open_followups, 1);
}

#[test]
fn summary_of_an_empty_database_is_all_zero() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE customers(id INTEGER PRIMARY KEY, code TEXT, name TEXT);
        CREATE TABLE orders(id INTEGER PRIMARY KEY, order_ref TEXT, date TEXT,
            customer_id INTEGER, item_type TEXT, amount TEXT, channel TEXT,
            payment_status TEXT, payment_mode TEXT, delivery_status TEXT, remarks TEXT);
        CREATE TABLE followups(id INTEGER PRIMARY KEY, due_date TEXT,
            customer_id INTEGER, notes TEXT, status TEXT);
        "#,
    )
    .unwrap();
    let all = orders::load_all(&conn).unwrap();
    let s = dashboard::summary(&conn, &all).unwrap();
    assert_eq!(s.total_orders, 0);
    assert_eq!(s.paid_revenue.to_string(), "0");
    assert_eq!(s.avg_order.to_string(), "0");
}
