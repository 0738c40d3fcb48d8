// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::bail;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub instagram: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_ref: String,
    pub date: NaiveDate,
    pub customer_id: i64,
    pub item_type: String,
    pub amount: Decimal,
    pub channel: String,
    pub payment_status: PaymentStatus,
    pub payment_mode: Option<PaymentMode>,
    pub delivery_status: DeliveryStatus,
    pub remarks: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: i64,
    pub due_date: NaiveDate,
    pub customer_id: i64,
    pub notes: String,
    pub status: String,
}

/// Follow-up statuses accepted by `followup status`.
pub const FOLLOWUP_STATUSES: [&str; 5] = ["Open", "In Progress", "Completed", "Closed", "Dropped"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(PaymentStatus::Pending),
            "Paid" => Ok(PaymentStatus::Paid),
            other => bail!("Invalid payment status '{}', expected Paid|Pending", other),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    Upi,
    Cash,
    Card,
}

impl PaymentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMode::Upi => "UPI",
            PaymentMode::Cash => "Cash",
            PaymentMode::Card => "Card",
        }
    }
}

impl FromStr for PaymentMode {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPI" | "upi" => Ok(PaymentMode::Upi),
            "Cash" | "cash" => Ok(PaymentMode::Cash),
            "Card" | "card" => Ok(PaymentMode::Card),
            other => bail!("Invalid payment mode '{}', expected UPI|Cash|Card", other),
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Pending,
    Packed,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
    Failed,
}

impl DeliveryStatus {
    /// Every status, in pipeline order. Drives the delivery KPI counts.
    pub const ALL: [DeliveryStatus; 7] = [
        DeliveryStatus::Pending,
        DeliveryStatus::Packed,
        DeliveryStatus::Shipped,
        DeliveryStatus::OutForDelivery,
        DeliveryStatus::Delivered,
        DeliveryStatus::Cancelled,
        DeliveryStatus::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::Packed => "Packed",
            DeliveryStatus::Shipped => "Shipped",
            DeliveryStatus::OutForDelivery => "Out for Delivery",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Cancelled => "Cancelled",
            DeliveryStatus::Failed => "Failed",
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(DeliveryStatus::Pending),
            "Packed" => Ok(DeliveryStatus::Packed),
            "Shipped" => Ok(DeliveryStatus::Shipped),
            "Out for Delivery" => Ok(DeliveryStatus::OutForDelivery),
            "Delivered" => Ok(DeliveryStatus::Delivered),
            "Cancelled" => Ok(DeliveryStatus::Cancelled),
            "Failed" => Ok(DeliveryStatus::Failed),
            other => bail!(
                "Invalid delivery status '{}', expected Pending|Packed|Shipped|Out for Delivery|Delivered|Cancelled|Failed",
                other
            ),
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
