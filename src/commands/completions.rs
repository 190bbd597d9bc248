// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Completions command - generate shell completion scripts

use anyhow::Result;
use clap_complete::Shell;

/// Generate completions for the given shell to stdout.
///
/// The binary passes its own clap command definition in.
pub fn run(shell: Shell, command: &mut clap::Command) -> Result<()> {
    clap_complete::generate(shell, command, "partledger", &mut std::io::stdout());
    Ok(())
}
