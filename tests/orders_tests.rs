// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use loomcrm::{cli, commands::orders};
use rusqlite::{Connection, params};

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
        "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO customers(code, name) VALUES ('CUST00001', 'Lakshmi Menon')",
        [],
    )
    .unwrap();
    conn
}

fn run_order(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["loomcrm", "order"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("order", om)) = matches.subcommand() else {
        panic!("no order subcommand");
    };
    orders::handle(conn, om)
}

fn stored_mode(conn: &Connection, order_ref: &str) -> Option<String> {
    conn.query_row(
        "SELECT payment_mode FROM orders WHERE order_ref=?1",
        params![order_ref],
        |r| r.get(0),
    )
    .unwrap()
}

#[test]
fn add_clears_mode_for_pending_orders() {
    let conn = setup();
    run_order(
        &conn,
        &[
            "add", "--ref", "ORD1", "--customer", "CUST00001", "--amount", "999", "--date",
            "2025-01-10", "--status", "Pending", "--mode", "UPI",
        ],
    )
    .unwrap();
    assert_eq!(stored_mode(&conn, "ORD1"), None);
}

#[test]
fn add_keeps_mode_for_paid_orders() {
    let conn = setup();
    run_order(
        &conn,
        &[
            "add", "--ref", "ORD2", "--customer", "CUST00001", "--amount", "2499", "--date",
            "2025-01-12", "--status", "Paid", "--mode", "Cash",
        ],
    )
    .unwrap();
    assert_eq!(stored_mode(&conn, "ORD2"), Some("Cash".to_string()));
}

#[test]
fn edit_to_pending_drops_the_stored_mode() {
    let conn = setup();
    run_order(
        &conn,
        &[
            "add", "--ref", "ORD3", "--customer", "CUST00001", "--amount", "1499", "--date",
            "2025-02-01", "--status", "Paid", "--mode", "UPI",
        ],
    )
    .unwrap();
    assert_eq!(stored_mode(&conn, "ORD3"), Some("UPI".to_string()));

    run_order(&conn, &["edit", "--ref", "ORD3", "--status", "Pending"]).unwrap();
    assert_eq!(stored_mode(&conn, "ORD3"), None);
}

#[test]
fn add_rejects_negative_amounts() {
    let conn = setup();
    let err = run_order(
        &conn,
        &[
            "add", "--ref", "ORD4", "--customer", "CUST00001", "--amount=-50", "--date",
            "2025-02-01",
        ],
    );
    assert!(err.is_err());
}

#[test]
fn list_filters_and_limit_are_respected() {
    let conn = setup();
    for (i, (date, status)) in [
        ("2025-01-05", "Paid"),
        ("2025-01-20", "Pending"),
        ("2025-02-03", "Paid"),
    ]
    .into_iter()
    .enumerate()
    {
        run_order(
            &conn,
            &[
                "add",
                "--ref",
                &format!("ORD{}", i + 10),
                "--customer",
                "CUST00001",
                "--amount",
                "100",
                "--date",
                date,
                "--status",
                status,
            ],
        )
        .unwrap();
    }

    let matches = cli::build_cli().get_matches_from([
        "loomcrm", "order", "list", "--month", "2025-01", "--status", "Paid",
    ]);
    let Some(("order", om)) = matches.subcommand() else {
        panic!("no order subcommand");
    };
    let Some(("list", lm)) = om.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = orders::query_rows(&conn, lm).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].order_ref, "ORD10");

    let matches =
        cli::build_cli().get_matches_from(["loomcrm", "order", "list", "--limit", "2"]);
    let Some(("order", om)) = matches.subcommand() else {
        panic!("no order subcommand");
    };
    let Some(("list", lm)) = om.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = orders::query_rows(&conn, lm).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-02-03");
}

#[test]
fn load_all_parses_typed_orders() {
    let conn = setup();
    run_order(
        &conn,
        &[
            "add", "--ref", "ORD20", "--customer", "CUST00001", "--amount", "123.45", "--date",
            "2025-03-01", "--status", "Paid", "--mode", "UPI", "--type", "Kanchipuram",
        ],
    )
    .unwrap();
    let all = orders::load_all(&conn).unwrap();
    assert_eq!(all.len(), 1);
    let o = &all[0];
    assert_eq!(o.item_type, "Kanchipuram");
    assert_eq!(o.amount.to_string(), "123.45");
    assert_eq!(o.payment_mode, Some(loomcrm::models::PaymentMode::Upi));
}
