// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Catalog store - parts, file revisions, and edit history on disk

use crate::types::{CatalogStore, FileCategory, FileRevision, HistoryEntry, HistoryStore, Part};
use crate::version::{self, Version, VersionError};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// The parts catalog with JSON persistence
pub struct Catalog {
    /// Parts and file revisions
    pub store: CatalogStore,
    /// Edit history snapshots
    pub history: HistoryStore,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: CatalogStore::default(),
            history: HistoryStore::default(),
        }
    }

    /// Load the catalog from a directory containing catalog.json and
    /// history.json. Missing files yield an empty store.
    pub fn load(dir: &Path) -> Result<Self> {
        let catalog_path = dir.join("catalog.json");
        let history_path = dir.join("history.json");

        let store: CatalogStore = if catalog_path.exists() {
            let content = fs::read_to_string(&catalog_path)
                .with_context(|| format!("Failed to read {}", catalog_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", catalog_path.display()))?
        } else {
            CatalogStore::default()
        };

        let history: HistoryStore = if history_path.exists() {
            let content = fs::read_to_string(&history_path)
                .with_context(|| format!("Failed to read {}", history_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", history_path.display()))?
        } else {
            HistoryStore::default()
        };

        Ok(Self { store, history })
    }

    /// Save the catalog to a directory
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let catalog_path = dir.join("catalog.json");
        let history_path = dir.join("history.json");

        let catalog_json = serde_json::to_string_pretty(&self.store)
            .context("Failed to serialize catalog")?;
        fs::write(&catalog_path, catalog_json)
            .with_context(|| format!("Failed to write {}", catalog_path.display()))?;

        let history_json = serde_json::to_string_pretty(&self.history)
            .context("Failed to serialize history")?;
        fs::write(&history_path, history_json)
            .with_context(|| format!("Failed to write {}", history_path.display()))?;

        Ok(())
    }

    /// Add a part to the catalog, replacing any existing part with the same ID
    pub fn add_part(&mut self, part: Part) {
        if let Some(existing) = self.store.parts.iter_mut().find(|p| p.id == part.id) {
            *existing = part;
        } else {
            self.store.parts.push(part);
        }
    }

    /// Get a part by ID
    #[must_use]
    pub fn get_part(&self, id: &str) -> Option<&Part> {
        self.store.parts.iter().find(|p| p.id == id)
    }

    /// Get all parts
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.store.parts
    }

    /// Get all file revisions
    #[must_use]
    pub fn revisions(&self) -> &[FileRevision] {
        &self.store.revisions
    }

    /// Revisions belonging to a part, all categories
    #[must_use]
    pub fn revisions_for(&self, part_id: &str) -> Vec<&FileRevision> {
        self.store
            .revisions
            .iter()
            .filter(|r| r.part_id == part_id)
            .collect()
    }

    /// Highest recorded version for a part and category, or `0.0.0` when
    /// the category has no revisions. Derived on demand, never stored.
    #[must_use]
    pub fn highest_version(&self, part_id: &str, category: FileCategory) -> Version {
        version::highest_version(
            self.store.revisions.iter().filter(|r| r.part_id == part_id),
            category,
        )
    }

    /// Record a new file revision.
    ///
    /// The revision's version is validated against the current highest for
    /// its part and category; a rejected version leaves the store untouched.
    /// Re-adding an identical revision fails the not-newer rule, so adds
    /// are never silently duplicated.
    pub fn add_revision(&mut self, revision: FileRevision) -> Result<(), VersionError> {
        let highest = self.highest_version(&revision.part_id, revision.category);
        version::validate_candidate(revision.version, highest)?;
        self.store.revisions.push(revision);
        Ok(())
    }

    /// Record a history snapshot of a part's current state
    pub fn record_history(&mut self, part: &Part, changed_by: Option<String>) {
        self.history
            .entries
            .push(HistoryEntry::snapshot(part, changed_by));
    }

    /// History entries for a part, newest first
    #[must_use]
    pub fn history_for(&self, part_id: &str) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self
            .history
            .entries
            .iter()
            .filter(|e| e.part_id == part_id)
            .collect();
        entries.sort_by(|a, b| b.changed_at.cmp(&a.changed_at));
        entries
    }

    /// Get part count
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.store.parts.len()
    }

    /// Get revision count
    #[must_use]
    pub fn revision_count(&self) -> usize {
        self.store.revisions.len()
    }

    /// Check if the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.parts.is_empty()
    }

    /// Export the store to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.store).context("Failed to serialize catalog to JSON")
    }

    /// Export the store to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.store).context("Failed to serialize catalog to TOML")
    }
}
