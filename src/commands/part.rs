// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Part management commands - catalog CRUD and edit history

use crate::catalog::Catalog;
use crate::types::{FileCategory, Part, PartStatus, Sourcing};
use crate::version::Version;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

/// Arguments for the part command
pub struct PartArgs {
    /// Action: add, edit, list, show, history
    pub action: String,
    /// Part number or ID
    pub part: Option<String>,
    /// Owning department
    pub department: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Sourcing code
    pub sourcing: Option<String>,
    /// Manufacturing process
    pub manufacturing_type: Option<String>,
    /// Material
    pub material: Option<String>,
    /// Responsible person
    pub responsible_person: Option<String>,
    /// Responsible company
    pub responsible_company: Option<String>,
    /// Approver
    pub approver: Option<String>,
    /// Designer
    pub designer: Option<String>,
    /// Vehicle system
    pub system: Option<String>,
    /// Assembly
    pub assembly: Option<String>,
    /// Sub-assembly
    pub sub_assembly: Option<String>,
    /// Quantity per vehicle
    pub quantity: Option<u32>,
    /// Cost of a single part
    pub cost_per_part: Option<f64>,
    /// Emissions of a single part
    pub emissions_per_part: Option<f64>,
    /// Status code
    pub status: Option<String>,
    /// Part-level version label
    pub part_version: Option<String>,
    /// Who is making the change
    pub by: Option<String>,
}

/// Run part command
pub fn run(args: PartArgs) -> Result<()> {
    let data_dir = get_data_dir()?;
    let mut catalog = Catalog::load(&data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;

    match args.action.as_str() {
        "add" | "create" => {
            let part_number = args
                .part
                .ok_or_else(|| anyhow::anyhow!("Part number is required"))?;
            let department = args
                .department
                .ok_or_else(|| anyhow::anyhow!("--department is required"))?;
            let name = args
                .name
                .ok_or_else(|| anyhow::anyhow!("--name is required"))?;

            let id = Part::generate_id(&department, &part_number);
            if catalog.get_part(&id).is_some() {
                anyhow::bail!("Part already exists: {}", id);
            }

            let part = Part {
                kind: "Part".into(),
                id: id.clone(),
                part_number,
                department,
                name: name.clone(),
                description: args.description,
                sourcing: parse_sourcing(args.sourcing.as_deref())?,
                manufacturing_type: args.manufacturing_type,
                material: args.material,
                responsible_person: args.responsible_person,
                responsible_company: args.responsible_company,
                approver: args.approver,
                designer: args.designer,
                system: args.system,
                assembly: args.assembly,
                sub_assembly: args.sub_assembly,
                quantity: args.quantity,
                cost_per_part: args.cost_per_part,
                emissions_per_part: args.emissions_per_part,
                status: parse_status(args.status.as_deref())?,
                version: args
                    .part_version
                    .as_deref()
                    .map_or(Version::new(1, 0, 0), Version::parse),
                created_at: Utc::now(),
            };

            catalog.record_history(&part, args.by);
            catalog.add_part(part);
            catalog.save(&data_dir)?;

            println!("Created part: {} ({})", name, id);
        }

        "edit" | "update" => {
            let part_ref = args
                .part
                .ok_or_else(|| anyhow::anyhow!("Part number or ID is required"))?;
            let part_id = resolve_part_id(&catalog, &part_ref)?;

            let mut part = catalog
                .get_part(&part_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Part not found: {}", part_id))?;

            if let Some(name) = args.name {
                part.name = name;
            }
            if let Some(sourcing) = args.sourcing {
                part.sourcing = parse_sourcing(Some(&sourcing))?;
            }
            // An empty string clears an optional field back to unset
            apply_text(&mut part.description, args.description);
            apply_text(&mut part.manufacturing_type, args.manufacturing_type);
            apply_text(&mut part.material, args.material);
            apply_text(&mut part.responsible_person, args.responsible_person);
            apply_text(&mut part.responsible_company, args.responsible_company);
            apply_text(&mut part.approver, args.approver);
            apply_text(&mut part.designer, args.designer);
            apply_text(&mut part.system, args.system);
            apply_text(&mut part.assembly, args.assembly);
            apply_text(&mut part.sub_assembly, args.sub_assembly);
            if let Some(quantity) = args.quantity {
                part.quantity = Some(quantity);
            }
            if let Some(cost) = args.cost_per_part {
                part.cost_per_part = Some(cost);
            }
            if let Some(emissions) = args.emissions_per_part {
                part.emissions_per_part = Some(emissions);
            }
            if let Some(status) = args.status {
                part.status = parse_status(Some(&status))?;
            }
            if let Some(v) = args.part_version {
                part.version = Version::parse(&v);
            }

            catalog.record_history(&part, args.by);
            catalog.add_part(part.clone());
            catalog.save(&data_dir)?;

            println!("Updated part: {} ({})", part.name, part.id);
        }

        "list" | "ls" => {
            if catalog.is_empty() {
                println!("No parts in the catalog. Use 'partledger part add' to create one.");
                return Ok(());
            }

            // --department and --status narrow the listing
            let status = args
                .status
                .as_deref()
                .map(|code| parse_status(Some(code)))
                .transpose()?;
            let listed: Vec<&Part> = catalog
                .parts()
                .iter()
                .filter(|p| {
                    args.department
                        .as_deref()
                        .map_or(true, |d| p.department == d)
                })
                .filter(|p| status.map_or(true, |s| p.status == s))
                .collect();

            if listed.is_empty() {
                println!("No parts match the given filters.");
                return Ok(());
            }

            println!("Parts ({}):", listed.len());
            for part in listed {
                println!(
                    "  {} {} [{}] v{} - {}",
                    part.part_number,
                    part.name,
                    part.department,
                    part.version,
                    part.status.label()
                );
            }
        }

        "show" => {
            let part_ref = args
                .part
                .ok_or_else(|| anyhow::anyhow!("Part number or ID is required"))?;
            let part_id = resolve_part_id(&catalog, &part_ref)?;
            let part = catalog
                .get_part(&part_id)
                .ok_or_else(|| anyhow::anyhow!("Part not found: {}", part_id))?;

            println!("Part: {}", part.name);
            println!("  id: {}", part.id);
            println!("  part number: {}", part.part_number);
            println!("  department: {}", part.department);
            println!("  sourcing: {}", part.sourcing.label());
            println!("  status: {}", part.status.label());
            println!("  version: {}", part.version);
            if let Some(mt) = &part.manufacturing_type {
                println!("  manufacturing type: {}", mt);
            }
            if let Some(material) = &part.material {
                println!("  material: {}", material);
            }
            if let Some(person) = &part.responsible_person {
                println!("  responsible person: {}", person);
            }
            if let Some(company) = &part.responsible_company {
                println!("  responsible company: {}", company);
            }
            if let Some(approver) = &part.approver {
                println!("  approver: {}", approver);
            }
            if let Some(designer) = &part.designer {
                println!("  designer: {}", designer);
            }
            if let Some(system) = &part.system {
                println!("  system: {}", system);
            }
            if let Some(assembly) = &part.assembly {
                println!("  assembly: {}", assembly);
            }
            if let Some(sub_assembly) = &part.sub_assembly {
                println!("  sub-assembly: {}", sub_assembly);
            }
            if let Some(quantity) = part.quantity {
                println!("  quantity: {}", quantity);
            }
            if let Some(cost) = part.cost_per_part {
                println!("  cost per part: {}", cost);
            }
            if let Some(sum) = part.cost_sum() {
                println!("  cost sum: {}", sum);
            }
            if let Some(emissions) = part.emissions_per_part {
                println!("  emissions per part: {}", emissions);
            }
            if let Some(sum) = part.emissions_sum() {
                println!("  emissions sum: {}", sum);
            }
            if let Some(desc) = &part.description {
                println!("  description: {}", desc);
            }

            for category in FileCategory::all() {
                let highest = catalog.highest_version(&part.id, category);
                if !highest.is_zero() {
                    println!("  {}: {}", category.label(), highest);
                }
            }
        }

        "history" => {
            let part_ref = args
                .part
                .ok_or_else(|| anyhow::anyhow!("Part number or ID is required"))?;
            let part_id = resolve_part_id(&catalog, &part_ref)?;

            let entries = catalog.history_for(&part_id);
            if entries.is_empty() {
                println!("No edit history for {}", part_id);
                return Ok(());
            }

            println!("History for {} ({} entries, newest first):", part_id, entries.len());
            for (index, entry) in entries.iter().enumerate() {
                let who = entry.changed_by.as_deref().unwrap_or("unknown");
                println!(
                    "  {}. {} by {} - {} v{}",
                    index + 1,
                    entry.changed_at.format("%Y-%m-%d %H:%M"),
                    who,
                    entry.status.label(),
                    entry.version
                );
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: add, edit, list, show, history", other);
        }
    }

    Ok(())
}

/// Overwrite an optional text field; an empty string clears it
fn apply_text(target: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        *target = if v.is_empty() { None } else { Some(v) };
    }
}

fn parse_sourcing(code: Option<&str>) -> Result<Sourcing> {
    match code.unwrap_or("manufactured") {
        "manufactured" => Ok(Sourcing::Manufactured),
        "purchased" => Ok(Sourcing::Purchased),
        other => anyhow::bail!("Unknown sourcing: {}. Valid: manufactured, purchased", other),
    }
}

fn parse_status(code: Option<&str>) -> Result<PartStatus> {
    let code = code.unwrap_or("draft");
    PartStatus::from_code(code).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown status: {}. Valid: draft, in_manufacturing, done, awaiting_approval, rejected",
            code
        )
    })
}

/// Resolve a part number or ID to a full ID
pub(crate) fn resolve_part_id(catalog: &Catalog, number_or_id: &str) -> Result<String> {
    if number_or_id.starts_with("part:") {
        if catalog.get_part(number_or_id).is_some() {
            return Ok(number_or_id.to_string());
        }
        anyhow::bail!("Part not found: {}", number_or_id);
    }

    let matches: Vec<_> = catalog
        .parts()
        .iter()
        .filter(|p| p.part_number == number_or_id)
        .collect();

    match matches.len() {
        0 => anyhow::bail!("No part found: {}", number_or_id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple parts match '{}':", number_or_id);
            for p in &matches {
                eprintln!("  {} ({})", p.name, p.id);
            }
            anyhow::bail!("Ambiguous part number. Use full ID.");
        }
    }
}

/// Get the data directory
pub(crate) fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PARTLEDGER_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let data_dir = directories::ProjectDirs::from("org", "hyperpolymath", "partledger")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".partledger")
        });

    Ok(data_dir)
}
