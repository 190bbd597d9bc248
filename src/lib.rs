// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Partledger library - revision ledger for a Formula-Student parts catalog
//!
//! This crate provides the core functionality for tracking catalog parts,
//! their edit history, and versioned artifact uploads (CAD models,
//! technical drawings, documentation) with a strict per-category
//! version-ordering policy.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod commands;
pub mod compare;
pub mod config;
pub mod importer;
pub mod version;

/// Core data types for the parts catalog
pub mod types {
    use crate::version::Version;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use sha2::{Digest, Sha256};

    // =========================================================================
    // File Categories
    // =========================================================================

    /// Classification of an uploaded artifact's purpose.
    ///
    /// Versioning is independent per category: the CAD model of a part can
    /// be at 3.0.0 while its documentation is still at 0.1.0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum FileCategory {
        /// 3D CAD model (STEP, STL, ...)
        CadModel,
        /// Technical drawing (DWG, DXF, PDF)
        TechnicalDrawing,
        /// Documentation
        Documentation,
    }

    impl FileCategory {
        /// Get the short code for this category
        #[must_use]
        pub fn code(&self) -> &'static str {
            match self {
                Self::CadModel => "cad_model",
                Self::TechnicalDrawing => "technical_drawing",
                Self::Documentation => "documentation",
            }
        }

        /// Human-readable label
        #[must_use]
        pub fn label(&self) -> &'static str {
            match self {
                Self::CadModel => "CAD model",
                Self::TechnicalDrawing => "Technical drawing",
                Self::Documentation => "Documentation",
            }
        }

        /// Parse a category from its short code
        #[must_use]
        pub fn from_code(code: &str) -> Option<Self> {
            match code {
                "cad_model" | "cad" => Some(Self::CadModel),
                "technical_drawing" | "drawing" => Some(Self::TechnicalDrawing),
                "documentation" | "doc" | "docs" => Some(Self::Documentation),
                _ => None,
            }
        }

        /// All categories, in display order
        #[must_use]
        pub fn all() -> [Self; 3] {
            [Self::CadModel, Self::TechnicalDrawing, Self::Documentation]
        }
    }

    // =========================================================================
    // Part (Catalog Entity)
    // =========================================================================

    /// Whether a part is manufactured in-house or purchased
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Sourcing {
        /// Manufactured by the team
        Manufactured,
        /// Purchased off the shelf
        Purchased,
    }

    impl Sourcing {
        /// Human-readable label
        #[must_use]
        pub fn label(&self) -> &'static str {
            match self {
                Self::Manufactured => "Manufactured",
                Self::Purchased => "Purchased",
            }
        }
    }

    /// Lifecycle status of a part
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PartStatus {
        /// Design phase
        Draft,
        /// Currently being manufactured
        InManufacturing,
        /// Finished
        Done,
        /// Waiting for an approver's sign-off
        AwaitingApproval,
        /// Rejected by the approver
        Rejected,
    }

    impl PartStatus {
        /// Human-readable label
        #[must_use]
        pub fn label(&self) -> &'static str {
            match self {
                Self::Draft => "Draft",
                Self::InManufacturing => "In manufacturing",
                Self::Done => "Done",
                Self::AwaitingApproval => "Awaiting approval",
                Self::Rejected => "Rejected",
            }
        }

        /// Parse a status from its snake_case code
        #[must_use]
        pub fn from_code(code: &str) -> Option<Self> {
            match code {
                "draft" => Some(Self::Draft),
                "in_manufacturing" => Some(Self::InManufacturing),
                "done" => Some(Self::Done),
                "awaiting_approval" => Some(Self::AwaitingApproval),
                "rejected" => Some(Self::Rejected),
                _ => None,
            }
        }
    }

    /// A part in the team catalog
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Part {
        /// Always "Part"
        pub kind: String,
        /// Unique identifier: part:<department-slug>/<part_number>
        pub id: String,
        /// Drawing number
        pub part_number: String,
        /// Owning department (chassis, aero, powertrain, ...)
        pub department: String,
        /// Display name
        pub name: String,
        /// Free-form description
        pub description: Option<String>,
        /// Manufactured or purchased
        pub sourcing: Sourcing,
        /// Manufacturing process (milled, printed, laser-cut, ...)
        pub manufacturing_type: Option<String>,
        /// Material
        pub material: Option<String>,
        /// Person responsible for the part
        pub responsible_person: Option<String>,
        /// Company responsible (for purchased parts)
        pub responsible_company: Option<String>,
        /// Approver
        pub approver: Option<String>,
        /// Designer
        #[serde(default)]
        pub designer: Option<String>,
        /// Vehicle system the part belongs to
        #[serde(default)]
        pub system: Option<String>,
        /// Assembly
        #[serde(default)]
        pub assembly: Option<String>,
        /// Sub-assembly
        #[serde(default)]
        pub sub_assembly: Option<String>,
        /// Quantity per vehicle
        #[serde(default)]
        pub quantity: Option<u32>,
        /// Cost of a single part
        #[serde(default)]
        pub cost_per_part: Option<f64>,
        /// Emissions of a single part (kg CO2e)
        #[serde(default)]
        pub emissions_per_part: Option<f64>,
        /// Lifecycle status
        pub status: PartStatus,
        /// Part-level revision label shown in listings
        pub version: Version,
        /// When the part was created
        pub created_at: DateTime<Utc>,
    }

    impl Part {
        /// Generate a deterministic ID from department and part number
        #[must_use]
        pub fn generate_id(department: &str, part_number: &str) -> String {
            format!("part:{}/{}", slug(department), part_number)
        }

        /// Total cost for the quantity, when both are known
        #[must_use]
        pub fn cost_sum(&self) -> Option<f64> {
            match (self.quantity, self.cost_per_part) {
                (Some(quantity), Some(cost)) => Some(f64::from(quantity) * cost),
                _ => None,
            }
        }

        /// Total emissions for the quantity, when both are known
        #[must_use]
        pub fn emissions_sum(&self) -> Option<f64> {
            match (self.quantity, self.emissions_per_part) {
                (Some(quantity), Some(emissions)) => Some(f64::from(quantity) * emissions),
                _ => None,
            }
        }
    }

    /// Convert a name to a slug for IDs
    #[must_use]
    pub fn slug(name: &str) -> String {
        name.to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .trim_matches('-')
            .to_string()
    }

    // =========================================================================
    // File Revisions
    // =========================================================================

    /// One uploaded artifact, tagged with a category and a version.
    ///
    /// Revisions are append-only: the catalog never mutates or deletes a
    /// recorded revision.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct FileRevision {
        /// Always "FileRevision"
        pub kind: String,
        /// Content-hash ID: rev:<hash of (part_id, category, version)>
        pub id: String,
        /// Owning part ID
        pub part_id: String,
        /// Artifact category
        pub category: FileCategory,
        /// Revision version
        pub version: Version,
        /// Original file name of the artifact
        pub file_name: String,
        /// Who uploaded it
        pub uploaded_by: Option<String>,
        /// When the revision was recorded
        pub created_at: DateTime<Utc>,
    }

    impl FileRevision {
        /// Generate a deterministic ID for a revision
        #[must_use]
        pub fn generate_id(part_id: &str, category: FileCategory, version: Version) -> String {
            let mut hasher = Sha256::new();
            hasher.update(part_id.as_bytes());
            hasher.update(category.code().as_bytes());
            hasher.update(version.to_string().as_bytes());
            let hash = hex::encode(hasher.finalize());
            format!("rev:{}", &hash[..12])
        }
    }

    // =========================================================================
    // Edit History
    // =========================================================================

    /// Snapshot of a part's editable fields, recorded before each edit
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct HistoryEntry {
        /// Always "HistoryEntry"
        pub kind: String,
        /// Unique identifier
        pub id: String,
        /// Owning part ID
        pub part_id: String,
        /// Drawing number at the time of the snapshot
        pub part_number: String,
        /// Department at the time of the snapshot
        pub department: String,
        /// Name at the time of the snapshot
        pub name: String,
        /// Description at the time of the snapshot
        pub description: Option<String>,
        /// Sourcing at the time of the snapshot
        pub sourcing: Sourcing,
        /// Manufacturing process at the time of the snapshot
        pub manufacturing_type: Option<String>,
        /// Material at the time of the snapshot
        pub material: Option<String>,
        /// Responsible person at the time of the snapshot
        pub responsible_person: Option<String>,
        /// Responsible company at the time of the snapshot
        pub responsible_company: Option<String>,
        /// Approver at the time of the snapshot
        pub approver: Option<String>,
        /// Designer at the time of the snapshot
        #[serde(default)]
        pub designer: Option<String>,
        /// Vehicle system at the time of the snapshot
        #[serde(default)]
        pub system: Option<String>,
        /// Assembly at the time of the snapshot
        #[serde(default)]
        pub assembly: Option<String>,
        /// Sub-assembly at the time of the snapshot
        #[serde(default)]
        pub sub_assembly: Option<String>,
        /// Quantity at the time of the snapshot
        #[serde(default)]
        pub quantity: Option<u32>,
        /// Cost per part at the time of the snapshot
        #[serde(default)]
        pub cost_per_part: Option<f64>,
        /// Emissions per part at the time of the snapshot
        #[serde(default)]
        pub emissions_per_part: Option<f64>,
        /// Status at the time of the snapshot
        pub status: PartStatus,
        /// Part-level version at the time of the snapshot
        pub version: Version,
        /// When the change happened
        pub changed_at: DateTime<Utc>,
        /// Who made the change
        pub changed_by: Option<String>,
    }

    impl HistoryEntry {
        /// Snapshot the current state of a part
        #[must_use]
        pub fn snapshot(part: &Part, changed_by: Option<String>) -> Self {
            let changed_at = Utc::now();
            let mut hasher = Sha256::new();
            hasher.update(part.id.as_bytes());
            hasher.update(changed_at.to_rfc3339().as_bytes());
            let hash = hex::encode(hasher.finalize());

            Self {
                kind: "HistoryEntry".into(),
                id: format!("hist:{}", &hash[..12]),
                part_id: part.id.clone(),
                part_number: part.part_number.clone(),
                department: part.department.clone(),
                name: part.name.clone(),
                description: part.description.clone(),
                sourcing: part.sourcing,
                manufacturing_type: part.manufacturing_type.clone(),
                material: part.material.clone(),
                responsible_person: part.responsible_person.clone(),
                responsible_company: part.responsible_company.clone(),
                approver: part.approver.clone(),
                designer: part.designer.clone(),
                system: part.system.clone(),
                assembly: part.assembly.clone(),
                sub_assembly: part.sub_assembly.clone(),
                quantity: part.quantity,
                cost_per_part: part.cost_per_part,
                emissions_per_part: part.emissions_per_part,
                status: part.status,
                version: part.version,
                changed_at,
                changed_by,
            }
        }
    }

    // =========================================================================
    // Catalog Store
    // =========================================================================

    /// The complete catalog store
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct CatalogStore {
        /// All parts
        #[serde(default)]
        pub parts: Vec<Part>,
        /// All file revisions
        #[serde(default)]
        pub revisions: Vec<FileRevision>,
    }

    /// Edit history store, persisted separately from the catalog
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct HistoryStore {
        /// All history entries
        #[serde(default)]
        pub entries: Vec<HistoryEntry>,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::version::Version;
    pub use anyhow::{Context, Result};
}
