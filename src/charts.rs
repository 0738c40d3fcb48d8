// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns `ChartData` into renderable chart specifications.
//!
//! A `ChartSpec` carries everything the frontend needs for one widget:
//! the container element id, the chart kind, the raw label/value series,
//! and for pie/donut charts the per-slice percentage plus the tooltip and
//! legend strings. The frontend only draws; it computes nothing.

use crate::aggregate::ChartData;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Slices below this share of the total get no on-chart label. The
/// percentage still appears in the tooltip and legend.
const LABEL_THRESHOLD_PCT: u32 = 3;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart '{id}': {labels} labels but {values} values")]
    LengthMismatch {
        id: String,
        labels: usize,
        values: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Donut,
}

#[derive(Debug, Clone, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: Decimal,
    /// Share of the chart total, rounded to one decimal place.
    pub pct: Decimal,
    /// Whether the slice is large enough to carry an on-chart label.
    pub labeled: bool,
    pub tooltip: String,
    pub legend: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    /// HTML container id, e.g. "monthlySales" or "donut".
    pub element_id: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
    /// Empty for bar charts.
    pub slices: Vec<Slice>,
}

/// Optional value-formatting capability injected by the caller. When no
/// formatter is supplied values render as plain decimal strings.
pub trait ValueFormatter {
    fn format(&self, value: &Decimal) -> String;
}

/// Indian digit grouping for rupee amounts: 1221507 renders as 12,21,507.
/// Groups the integer part only, two digits at a time past the last three.
pub struct InrFormatter;

impl ValueFormatter for InrFormatter {
    fn format(&self, value: &Decimal) -> String {
        let whole = value.trunc().abs().to_string();
        let grouped = if whole.len() <= 3 {
            whole
        } else {
            let (head, last3) = whole.split_at(whole.len() - 3);
            let mut parts: Vec<&str> = Vec::new();
            let mut rest = head;
            while rest.len() > 2 {
                let (h, t) = rest.split_at(rest.len() - 2);
                parts.insert(0, t);
                rest = h;
            }
            if !rest.is_empty() {
                parts.insert(0, rest);
            }
            parts.push(last3);
            parts.join(",")
        };
        if value.is_sign_negative() && !value.is_zero() {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }
}

pub fn bar_chart(element_id: &str, data: ChartData) -> Result<ChartSpec, ChartError> {
    check_lengths(element_id, &data)?;
    Ok(ChartSpec {
        element_id: element_id.to_string(),
        kind: ChartKind::Bar,
        labels: data.labels,
        values: data.values,
        slices: Vec::new(),
    })
}

pub fn pie_chart(
    element_id: &str,
    data: ChartData,
    formatter: Option<&dyn ValueFormatter>,
) -> Result<ChartSpec, ChartError> {
    sliced_chart(element_id, ChartKind::Pie, data, formatter)
}

pub fn donut_chart(
    element_id: &str,
    data: ChartData,
    formatter: Option<&dyn ValueFormatter>,
) -> Result<ChartSpec, ChartError> {
    sliced_chart(element_id, ChartKind::Donut, data, formatter)
}

fn sliced_chart(
    element_id: &str,
    kind: ChartKind,
    data: ChartData,
    formatter: Option<&dyn ValueFormatter>,
) -> Result<ChartSpec, ChartError> {
    check_lengths(element_id, &data)?;
    let total = data.total();
    let threshold = Decimal::from(LABEL_THRESHOLD_PCT);
    let hundred = Decimal::ONE_HUNDRED;

    let slices = data
        .labels
        .iter()
        .zip(data.values.iter())
        .map(|(label, value)| {
            // A zero total yields 0% slices rather than a division error.
            let pct = if total.is_zero() {
                Decimal::ZERO
            } else {
                (value * hundred / total).round_dp(1)
            };
            let shown = match formatter {
                Some(f) => f.format(value),
                None => value.normalize().to_string(),
            };
            let legend = format!("{} — {}% ({})", label, pct, shown);
            Slice {
                label: label.clone(),
                value: *value,
                pct,
                labeled: pct >= threshold,
                tooltip: legend.clone(),
                legend,
            }
        })
        .collect();

    Ok(ChartSpec {
        element_id: element_id.to_string(),
        kind,
        labels: data.labels,
        values: data.values,
        slices,
    })
}

fn check_lengths(element_id: &str, data: &ChartData) -> Result<(), ChartError> {
    if data.labels.len() != data.values.len() {
        return Err(ChartError::LengthMismatch {
            id: element_id.to_string(),
            labels: data.labels.len(),
            values: data.values.len(),
        });
    }
    Ok(())
}
