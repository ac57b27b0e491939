// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test harness for feed post validation sweeps.
//!
//! This module provides post and field generators used to check validator
//! rules across many inputs rather than single examples.

pub mod generators;
