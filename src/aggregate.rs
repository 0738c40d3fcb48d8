// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure summary statistics over order records, one `ChartData` per chart.
//! No storage access and no side effects; callers load the orders.

use crate::models::{Order, PaymentStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Parallel label/value sequences feeding one chart.
/// `labels.len() == values.len()` holds for every constructor in this module.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.values.iter().sum()
    }

    /// Keeps only the trailing `n` entries. Used for "last N months" views.
    pub fn tail(mut self, n: usize) -> ChartData {
        if self.labels.len() > n {
            self.labels.drain(..self.labels.len() - n);
            self.values.drain(..self.values.len() - n);
        }
        self
    }
}

/// Sum of `amount` per calendar month (YYYY-MM), chronological.
pub fn monthly_sales(orders: &[Order]) -> ChartData {
    monthly(orders, |_| true)
}

/// Same as `monthly_sales` but counting paid orders only.
pub fn monthly_paid(orders: &[Order]) -> ChartData {
    monthly(orders, |o| o.payment_status == PaymentStatus::Paid)
}

fn monthly(orders: &[Order], keep: impl Fn(&Order) -> bool) -> ChartData {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for o in orders.iter().filter(|o| keep(o)) {
        *totals
            .entry(o.date.format("%Y-%m").to_string())
            .or_insert(Decimal::ZERO) += o.amount;
    }
    let (labels, values) = totals.into_iter().unzip();
    ChartData { labels, values }
}

/// Sum of `amount` per item type, largest first.
pub fn type_breakdown(orders: &[Order]) -> ChartData {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for o in orders {
        *totals.entry(o.item_type.clone()).or_insert(Decimal::ZERO) += o.amount;
    }
    ranked(totals)
}

/// Sum of `amount` per payment status, largest first.
pub fn status_breakdown(orders: &[Order]) -> ChartData {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for o in orders {
        *totals
            .entry(o.payment_status.as_str().to_string())
            .or_insert(Decimal::ZERO) += o.amount;
    }
    ranked(totals)
}

/// Sum of `amount` per payment mode, largest first. Unpaid orders are
/// folded into a single "Pending" slice so the donut accounts for every
/// order, paid or not.
pub fn mode_breakdown(orders: &[Order]) -> ChartData {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for o in orders {
        let key = match (o.payment_status, o.payment_mode) {
            (PaymentStatus::Paid, Some(mode)) => mode.as_str(),
            _ => "Pending",
        };
        *totals.entry(key.to_string()).or_insert(Decimal::ZERO) += o.amount;
    }
    ranked(totals)
}

/// Descending by total, label ascending on ties so output is deterministic.
fn ranked(totals: HashMap<String, Decimal>) -> ChartData {
    let mut items: Vec<_> = totals.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let (labels, values) = items.into_iter().unzip();
    ChartData { labels, values }
}
