// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

fn order_filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("month").long("month").help("Filter by month (YYYY-MM)"))
        .arg(
            Arg::new("status")
                .long("status")
                .help("Filter by payment status (Paid|Pending)"),
        )
        .arg(
            Arg::new("delivery")
                .long("delivery")
                .help("Filter by delivery status"),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .value_parser(value_parser!(usize))
                .help("Maximum number of rows"),
        )
}

fn order_field_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("date").long("date").help("Order date (YYYY-MM-DD)"))
        .arg(Arg::new("customer").long("customer").help("Customer code"))
        .arg(Arg::new("type").long("type").help("Item type, e.g. Banarasi"))
        .arg(Arg::new("amount").long("amount").help("Order amount"))
        .arg(
            Arg::new("channel")
                .long("channel")
                .help("Sales channel (Online|Offline)"),
        )
        .arg(
            Arg::new("status")
                .long("status")
                .help("Payment status (Paid|Pending)"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .help("Payment mode (UPI|Cash|Card); only kept for paid orders"),
        )
        .arg(
            Arg::new("delivery")
                .long("delivery")
                .help("Delivery status (Pending|Packed|Shipped|Out for Delivery|Delivered|Cancelled|Failed)"),
        )
        .arg(Arg::new("remarks").long("remarks").help("Free-form remarks"))
}

fn customer_cmd() -> Command {
    Command::new("customer")
        .about("Manage customers")
        .subcommand(
            Command::new("add")
                .about("Add a customer")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("code").long("code").help("Customer code; generated when omitted"))
                .arg(Arg::new("instagram").long("instagram"))
                .arg(Arg::new("phone").long("phone"))
                .arg(Arg::new("city").long("city"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(json_flags(
            Command::new("list").about("List customers").arg(
                Arg::new("search")
                    .long("search")
                    .short('q')
                    .help("Match against name, city, phone or code"),
            ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Edit a customer")
                .arg(Arg::new("code").long("code").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("instagram").long("instagram"))
                .arg(Arg::new("phone").long("phone"))
                .arg(Arg::new("city").long("city"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a customer and their orders")
                .arg(Arg::new("code").long("code").required(true)),
        )
}

fn order_cmd() -> Command {
    Command::new("order")
        .about("Manage orders")
        .subcommand(order_field_args(
            Command::new("add")
                .about("Add an order")
                .arg(Arg::new("ref").long("ref").help("Order reference; generated when omitted")),
        ))
        .subcommand(json_flags(order_filter_args(
            Command::new("list").about("List orders"),
        )))
        .subcommand(order_field_args(
            Command::new("edit")
                .about("Edit an order")
                .arg(Arg::new("ref").long("ref").required(true)),
        ))
        .subcommand(
            Command::new("rm")
                .about("Remove an order")
                .arg(Arg::new("ref").long("ref").required(true)),
        )
}

fn followup_cmd() -> Command {
    Command::new("followup")
        .about("Manage customer follow-ups")
        .subcommand(
            Command::new("add")
                .about("Add a follow-up")
                .arg(Arg::new("due").long("due").required(true).help("Due date (YYYY-MM-DD)"))
                .arg(Arg::new("customer").long("customer").required(true).help("Customer code"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List follow-ups by due date")
                .arg(Arg::new("status").long("status").help("Filter by status")),
        ))
        .subcommand(
            Command::new("done")
                .about("Mark a follow-up completed")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Set a follow-up status")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("status").long("status").required(true)),
        )
}

fn export_cmd() -> Command {
    let table_args = |cmd: Command| {
        cmd.arg(
            Arg::new("format")
                .long("format")
                .default_value("csv")
                .help("Output format (csv|json)"),
        )
        .arg(Arg::new("out").long("out").required(true).help("Output file path"))
    };
    Command::new("export")
        .about("Export tables to a file")
        .subcommand(table_args(Command::new("customers").about("Export customers")))
        .subcommand(table_args(Command::new("orders").about("Export orders")))
}

pub fn build_cli() -> Command {
    Command::new("loomcrm")
        .about("Order, payment, customer and follow-up tracking for a small retail seller")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database and print its path"))
        .subcommand(customer_cmd())
        .subcommand(order_cmd())
        .subcommand(followup_cmd())
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Summary KPIs plus monthly sales and item type charts")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .default_value("6")
                        .value_parser(value_parser!(usize))
                        .help("How many trailing months of sales to chart"),
                ),
        ))
        .subcommand(json_flags(order_filter_args(
            Command::new("payments")
                .about("Payment totals, mode donut and monthly paid chart"),
        )))
        .subcommand(json_flags(order_filter_args(
            Command::new("delivery")
                .about("Delivery pipeline counts and order listing"),
        )))
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check the database for inconsistencies"))
}
