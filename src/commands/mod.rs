// Copyright (c) 2025 Loomcrm contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod customers;
pub mod orders;
pub mod followups;
pub mod delivery;
pub mod dashboard;
pub mod payments;
pub mod exporter;
pub mod doctor;
