// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Compare command - field diff between two history entries of a part

use crate::catalog::Catalog;
use crate::commands::part::{get_data_dir, resolve_part_id};
use crate::compare::compare_entries;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// Run the compare command.
///
/// `first` and `second` are 1-based indices into the newest-first listing
/// printed by `partledger part history`.
pub fn run(part: &str, first: usize, second: usize, no_color: bool) -> Result<()> {
    let data_dir = get_data_dir()?;
    let catalog = Catalog::load(&data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;

    let part_id = resolve_part_id(&catalog, part)?;
    let entries = catalog.history_for(&part_id);

    if first == second {
        anyhow::bail!("Pick two different history entries to compare");
    }
    let pick = |index: usize| {
        entries
            .get(index.checked_sub(1).unwrap_or(usize::MAX))
            .copied()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No history entry {} for {} (have {})",
                    index,
                    part_id,
                    entries.len()
                )
            })
    };
    let a = pick(first)?;
    let b = pick(second)?;

    let comparison = compare_entries(a, b);

    let older_who = comparison.older.changed_by.as_deref().unwrap_or("unknown");
    let newer_who = comparison.newer.changed_by.as_deref().unwrap_or("unknown");
    println!(
        "Comparing {}: {} ({}) -> {} ({})",
        part_id,
        comparison.older.changed_at.format("%Y-%m-%d %H:%M"),
        older_who,
        comparison.newer.changed_at.format("%Y-%m-%d %H:%M"),
        newer_who
    );
    println!();

    for diff in &comparison.fields {
        if diff.changed {
            if no_color {
                println!("  * {}: {} -> {}", diff.label, diff.old, diff.new);
            } else {
                println!(
                    "  {} {}: {} -> {}",
                    "*".yellow(),
                    diff.label.bold(),
                    diff.old.red(),
                    diff.new.green()
                );
            }
        } else {
            println!("    {}: {}", diff.label, diff.old);
        }
    }

    println!();
    println!("{} field(s) changed", comparison.changed_count());

    Ok(())
}
