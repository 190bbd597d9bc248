// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Artifact import - walk a directory and classify files into categories

use crate::types::FileCategory;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

/// A file found during an import scan
#[derive(Debug, Clone)]
pub struct FoundArtifact {
    /// Category inferred from the file extension
    pub category: FileCategory,
    /// File name (no directory components)
    pub file_name: String,
}

/// Result of scanning a directory for artifacts
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Classified artifact files
    pub artifacts: Vec<FoundArtifact>,
    /// Files that matched no category
    pub skipped: Vec<String>,
}

fn glob_set(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("Bad glob: {pattern}"))?);
    }
    builder.build().context("Failed to build glob set")
}

/// Extension glob sets per category
fn category_globs() -> Result<[(FileCategory, GlobSet); 3]> {
    Ok([
        (
            FileCategory::CadModel,
            glob_set(&["*.step", "*.stp", "*.stl", "*.iges", "*.igs", "*.sldprt"])?,
        ),
        (
            FileCategory::TechnicalDrawing,
            glob_set(&["*.dwg", "*.dxf", "*.pdf"])?,
        ),
        (
            FileCategory::Documentation,
            glob_set(&["*.md", "*.txt", "*.docx", "*.odt"])?,
        ),
    ])
}

/// Walk `path` and classify every regular file by extension.
///
/// Drawings are matched before documentation, so a PDF lands in the
/// technical-drawing category. Unclassifiable files are collected in
/// `skipped` rather than failing the scan.
pub fn scan_path(path: &Path) -> Result<ScanResult> {
    let globs = category_globs()?;
    let mut result = ScanResult::default();

    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_lowercase();

        match globs.iter().find(|(_, set)| set.is_match(&file_name)) {
            Some((category, _)) => result.artifacts.push(FoundArtifact {
                category: *category,
                file_name: entry.file_name().to_string_lossy().into_owned(),
            }),
            None => result
                .skipped
                .push(entry.file_name().to_string_lossy().into_owned()),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_classifies_by_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bracket.step"), b"solid").unwrap();
        fs::write(dir.path().join("bracket.dwg"), b"drawing").unwrap();
        fs::write(dir.path().join("README.md"), b"# notes").unwrap();
        fs::write(dir.path().join("photo.jpg"), b"jpeg").unwrap();

        let result = scan_path(dir.path()).unwrap();

        assert_eq!(result.artifacts.len(), 3);
        assert!(result
            .artifacts
            .iter()
            .any(|a| a.category == FileCategory::CadModel && a.file_name == "bracket.step"));
        assert!(result
            .artifacts
            .iter()
            .any(|a| a.category == FileCategory::TechnicalDrawing));
        assert!(result
            .artifacts
            .iter()
            .any(|a| a.category == FileCategory::Documentation));
        assert_eq!(result.skipped, vec!["photo.jpg".to_string()]);
    }

    #[test]
    fn test_scan_pdf_is_a_drawing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("assembly.pdf"), b"pdf").unwrap();

        let result = scan_path(dir.path()).unwrap();
        assert_eq!(result.artifacts.len(), 1);
        assert_eq!(result.artifacts[0].category, FileCategory::TechnicalDrawing);
    }

    #[test]
    fn test_scan_recurses_and_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("cad")).unwrap();
        fs::write(dir.path().join("cad").join("WING.STEP"), b"solid").unwrap();

        let result = scan_path(dir.path()).unwrap();
        assert_eq!(result.artifacts.len(), 1);
        assert_eq!(result.artifacts[0].category, FileCategory::CadModel);
        assert_eq!(result.artifacts[0].file_name, "WING.STEP");
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        let result = scan_path(dir.path()).unwrap();
        assert!(result.artifacts.is_empty());
        assert!(result.skipped.is_empty());
    }
}
