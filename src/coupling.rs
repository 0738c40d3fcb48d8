// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Coupling between the payment-status and payment-mode fields.
//!
//! A payment mode is only meaningful once an order is marked Paid. The
//! mode field therefore has two states: enabled (status is Paid, a mode
//! may be selected) and disabled-and-cleared (any other status; the value
//! is reset to empty and cannot be changed). The same rule is applied
//! when persisting an order, so an unpaid order never stores a mode.

use crate::models::{PaymentMode, PaymentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeField {
    Enabled(Option<PaymentMode>),
    Disabled,
}

impl ModeField {
    /// Initial state for a form being opened on an existing record.
    pub fn for_status(status: PaymentStatus, current: Option<PaymentMode>) -> ModeField {
        match status {
            PaymentStatus::Paid => ModeField::Enabled(current),
            PaymentStatus::Pending => ModeField::Disabled,
        }
    }

    /// Transition on a change event from the status field. Moving to Paid
    /// preserves whatever selection the field already held; moving away
    /// clears it.
    pub fn on_status_change(self, status: PaymentStatus) -> ModeField {
        ModeField::for_status(status, self.value())
    }

    /// A user picking a mode. Ignored while the field is disabled.
    pub fn select(self, mode: PaymentMode) -> ModeField {
        match self {
            ModeField::Enabled(_) => ModeField::Enabled(Some(mode)),
            ModeField::Disabled => ModeField::Disabled,
        }
    }

    pub fn value(self) -> Option<PaymentMode> {
        match self {
            ModeField::Enabled(m) => m,
            ModeField::Disabled => None,
        }
    }

    pub fn interactive(self) -> bool {
        matches!(self, ModeField::Enabled(_))
    }
}

/// Server-side application of the rule: the mode that actually gets
/// persisted for a given status and requested mode.
pub fn effective_mode(
    status: PaymentStatus,
    requested: Option<PaymentMode>,
) -> Option<PaymentMode> {
    match status {
        PaymentStatus::Paid => requested,
        PaymentStatus::Pending => None,
    }
}
