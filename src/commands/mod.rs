// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod compare;
pub mod completions;
pub mod config;
pub mod export;
pub mod import;
pub mod part;
pub mod revision;
