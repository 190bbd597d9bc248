// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Import command - register artifact files from a directory as revisions

use crate::catalog::Catalog;
use crate::commands::part::{get_data_dir, resolve_part_id};
use crate::importer::scan_path;
use crate::types::FileRevision;
use crate::version::suggest_next;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing::info;

/// Run the import command
pub fn run(path: &Path, part: &str, by: Option<String>) -> Result<()> {
    info!("Importing artifacts from {:?}", path);

    let data_dir = get_data_dir()?;
    let mut catalog = Catalog::load(&data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;

    let part_id = resolve_part_id(&catalog, part)?;

    let result = scan_path(path)
        .with_context(|| format!("Failed to scan {}", path.display()))?;

    if result.artifacts.is_empty() {
        println!("No artifact files found in {}", path.display());
        return Ok(());
    }

    let mut recorded = 0usize;
    for artifact in &result.artifacts {
        // Each import lands in the bugfix slot after the current highest;
        // the highest moves forward as revisions are recorded, so multiple
        // files of one category get consecutive patch versions.
        let highest = catalog.highest_version(&part_id, artifact.category);
        let version = suggest_next(highest).bugfix;

        let revision = FileRevision {
            kind: "FileRevision".into(),
            id: FileRevision::generate_id(&part_id, artifact.category, version),
            part_id: part_id.clone(),
            category: artifact.category,
            version,
            file_name: artifact.file_name.clone(),
            uploaded_by: by.clone(),
            created_at: Utc::now(),
        };

        match catalog.add_revision(revision) {
            Ok(()) => {
                println!(
                    "  {} {} <- {}",
                    artifact.category.label(),
                    version,
                    artifact.file_name
                );
                recorded += 1;
            }
            Err(err) => {
                eprintln!("  Warning for {}: {}", artifact.file_name, err);
            }
        }
    }

    for skipped in &result.skipped {
        eprintln!("  Skipped (unrecognized type): {}", skipped);
    }

    catalog.save(&data_dir)
        .with_context(|| format!("Failed to save catalog to {}", data_dir.display()))?;

    println!();
    println!("Recorded {} revision(s) for {}", recorded, part_id);

    Ok(())
}
