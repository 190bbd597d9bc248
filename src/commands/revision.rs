// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Revision commands - record, list, and suggest versioned artifact uploads

use crate::catalog::Catalog;
use crate::commands::part::{get_data_dir, resolve_part_id};
use crate::types::{FileCategory, FileRevision};
use crate::version::{suggest_next, Version};
use anyhow::{Context, Result};
use chrono::Utc;

/// Run revision command
pub fn run(
    action: &str,
    part: Option<String>,
    category: Option<String>,
    file_version: Option<String>,
    file: Option<String>,
    by: Option<String>,
) -> Result<()> {
    let data_dir = get_data_dir()?;
    let mut catalog = Catalog::load(&data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;

    match action {
        "add" | "create" => {
            let part = part.ok_or_else(|| anyhow::anyhow!("Part number or ID is required"))?;
            let part_id = resolve_part_id(&catalog, &part)?;
            let category = parse_category(category.as_deref())?;
            let text = file_version
                .ok_or_else(|| anyhow::anyhow!("--file-version is required"))?;
            let file_name =
                file.ok_or_else(|| anyhow::anyhow!("--file is required"))?;

            let version = Version::parse(&text);
            let revision = FileRevision {
                kind: "FileRevision".into(),
                id: FileRevision::generate_id(&part_id, category, version),
                part_id: part_id.clone(),
                category,
                version,
                file_name: file_name.clone(),
                uploaded_by: by,
                created_at: Utc::now(),
            };
            let id = revision.id.clone();

            if let Err(err) = catalog.add_revision(revision) {
                // Permissive parsing means "v1.0.0" arrives here as 0.0.0;
                // echo what the input parsed to so the rejection is explicable.
                anyhow::bail!("Rejected version '{}' (parsed as {}): {}", text, version, err);
            }
            catalog.save(&data_dir)?;

            println!("Recorded {} revision {} for {}", category.label(), version, part_id);
            println!("  file: {}", file_name);
            println!("  id: {}", id);
        }

        "list" | "ls" => {
            let part = part.ok_or_else(|| anyhow::anyhow!("Part number or ID is required"))?;
            let part_id = resolve_part_id(&catalog, &part)?;

            let mut revisions = catalog.revisions_for(&part_id);
            if revisions.is_empty() {
                println!("No revisions recorded for {}", part_id);
                return Ok(());
            }
            revisions.sort_by(|a, b| (a.category.code(), a.version).cmp(&(b.category.code(), b.version)));

            println!("Revisions for {} ({}):", part_id, revisions.len());
            for revision in revisions {
                let who = revision.uploaded_by.as_deref().unwrap_or("unknown");
                println!(
                    "  {} {} - {} ({}, {})",
                    revision.category.label(),
                    revision.version,
                    revision.file_name,
                    who,
                    revision.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }

        "suggest" => {
            let part = part.ok_or_else(|| anyhow::anyhow!("Part number or ID is required"))?;
            let part_id = resolve_part_id(&catalog, &part)?;
            let category = parse_category(category.as_deref())?;

            let highest = catalog.highest_version(&part_id, category);
            let suggestions = suggest_next(highest);

            if highest.is_zero() {
                println!("No {} revisions yet for {}", category.label(), part_id);
            } else {
                println!("Current highest {} version: {}", category.label(), highest);
            }
            println!("  bugfix: {}", suggestions.bugfix);
            println!("  minor:  {}", suggestions.minor);
            println!("  major:  {}", suggestions.major);
        }

        "highest" => {
            let part = part.ok_or_else(|| anyhow::anyhow!("Part number or ID is required"))?;
            let part_id = resolve_part_id(&catalog, &part)?;

            match category {
                Some(code) => {
                    let category = parse_category(Some(&code))?;
                    println!("{}", catalog.highest_version(&part_id, category));
                }
                None => {
                    for category in FileCategory::all() {
                        println!(
                            "  {}: {}",
                            category.label(),
                            catalog.highest_version(&part_id, category)
                        );
                    }
                }
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: add, list, suggest, highest", other);
        }
    }

    Ok(())
}

fn parse_category(code: Option<&str>) -> Result<FileCategory> {
    let code = code.ok_or_else(|| anyhow::anyhow!("--category is required"))?;
    FileCategory::from_code(code).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown category: {}. Valid: cad_model, technical_drawing, documentation",
            code
        )
    })
}
