// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Revision version policy - parsing, ordering, and suggestion of
//! `major.minor.patch` version strings for uploaded artifacts.
//!
//! Versioning is scoped per file category: the highest version for CAD
//! models never constrains technical drawings or documentation.

use crate::types::{FileCategory, FileRevision};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A three-component, non-negative revision version.
///
/// The derived `Ord` compares `(major, minor, patch)` left to right, which
/// is exactly the total order the catalog relies on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major component
    pub major: u32,
    /// Minor component
    pub minor: u32,
    /// Patch component
    pub patch: u32,
}

/// The `0.0.0` sentinel meaning "no revision recorded yet".
pub const ZERO: Version = Version { major: 0, minor: 0, patch: 0 };

impl Version {
    /// Create a version from its three components
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Parse a version string permissively.
    ///
    /// Split on `.`; missing trailing components default to 0, non-numeric
    /// components coerce to 0, and components past the third are ignored.
    /// Never fails: `"abc"` parses as `0.0.0`. Callers that need to reject
    /// nonsense rely on [`validate_candidate`] flagging `0.0.0` instead.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split('.');
        let mut component = || {
            parts
                .next()
                .and_then(|p| p.trim().parse::<u32>().ok())
                .unwrap_or(0)
        };
        Self {
            major: component(),
            minor: component(),
            patch: component(),
        }
    }

    /// True if this is the `0.0.0` sentinel
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == ZERO
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

// Persist versions in their canonical string form so the store stays
// readable and matches what users typed.
impl Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse(&text))
    }
}

/// Why a candidate version was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Candidate parses to `0.0.0`; the first revision in a category must be
    /// strictly greater than the zero sentinel
    #[error("version must be greater than 0.0.0")]
    BelowMinimum,

    /// Candidate is not strictly greater than the category's current highest
    #[error("version must be greater than the current highest ({highest})")]
    NotNewerThanExisting {
        /// The highest version the candidate was checked against
        highest: Version,
    },
}

/// Suggested next versions derived from a category's highest version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestions {
    /// Patch bump
    pub bugfix: Version,
    /// Minor bump, patch reset
    pub minor: Version,
    /// Major bump, minor and patch reset
    pub major: Version,
}

/// Highest version recorded for `category` among `revisions`, or `0.0.0`
/// when the category has none.
pub fn highest_version<'a, I>(revisions: I, category: FileCategory) -> Version
where
    I: IntoIterator<Item = &'a FileRevision>,
{
    revisions
        .into_iter()
        .filter(|r| r.category == category)
        .map(|r| r.version)
        .max()
        .unwrap_or(ZERO)
}

/// Suggest the next bugfix/minor/major versions after `highest`.
///
/// A category with no revisions yet (`highest == 0.0.0`) gets the fixed
/// first-version triple `0.0.1` / `0.1.0` / `1.0.0` rather than increments
/// of the sentinel. All three suggestions are strictly greater than
/// `highest`, and `bugfix < minor < major`, as long as the bumped
/// component is below `u32::MAX`; at the bound the bump saturates instead
/// of overflowing, so the affected suggestion degrades to `>=`.
#[must_use]
pub fn suggest_next(highest: Version) -> Suggestions {
    if highest.is_zero() {
        return Suggestions {
            bugfix: Version::new(0, 0, 1),
            minor: Version::new(0, 1, 0),
            major: Version::new(1, 0, 0),
        };
    }
    Suggestions {
        bugfix: Version::new(highest.major, highest.minor, highest.patch.saturating_add(1)),
        minor: Version::new(highest.major, highest.minor.saturating_add(1), 0),
        major: Version::new(highest.major.saturating_add(1), 0, 0),
    }
}

/// Validate a candidate version against a category's current highest.
///
/// Rules, in order: the candidate must be strictly greater than `0.0.0`,
/// and when the category already has revisions it must be strictly greater
/// than `highest`. Equal is not newer.
pub fn validate_candidate(candidate: Version, highest: Version) -> Result<(), VersionError> {
    if candidate.is_zero() {
        return Err(VersionError::BelowMinimum);
    }
    if !highest.is_zero() && candidate <= highest {
        return Err(VersionError::NotNewerThanExisting { highest });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileCategory, FileRevision};
    use chrono::Utc;
    use std::cmp::Ordering;

    fn make_revision(category: FileCategory, version: Version) -> FileRevision {
        FileRevision {
            kind: "FileRevision".into(),
            id: FileRevision::generate_id("part:chassis/CH-001", category, version),
            part_id: "part:chassis/CH-001".into(),
            category,
            version,
            file_name: format!("artifact-{version}.step"),
            uploaded_by: Some("test".into()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_full() {
        assert_eq!(Version::parse("1.2.3"), Version::new(1, 2, 3));
        assert_eq!(Version::parse("0.0.1"), Version::new(0, 0, 1));
        assert_eq!(Version::parse("10.20.30"), Version::new(10, 20, 30));
    }

    #[test]
    fn test_parse_missing_components_default_to_zero() {
        assert_eq!(Version::parse("1.2"), Version::new(1, 2, 0));
        assert_eq!(Version::parse("1"), Version::new(1, 0, 0));
        assert_eq!(Version::parse(""), ZERO);
    }

    #[test]
    fn test_parse_extra_components_ignored() {
        assert_eq!(Version::parse("1.2.3.4"), Version::new(1, 2, 3));
        assert_eq!(Version::parse("1.2.3.4.5"), Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_non_numeric_coerces_to_zero() {
        assert_eq!(Version::parse("abc"), ZERO);
        assert_eq!(Version::parse("v1.0.0"), Version::new(0, 0, 0));
        assert_eq!(Version::parse("1.x.3"), Version::new(1, 0, 3));
        assert_eq!(Version::parse("-1.2.3"), Version::new(0, 2, 3));
    }

    #[test]
    fn test_render_round_trip() {
        for v in [ZERO, Version::new(1, 2, 3), Version::new(0, 10, 0)] {
            assert_eq!(Version::parse(&v.to_string()), v);
        }
    }

    #[test]
    fn test_order_is_lexicographic() {
        assert!(Version::new(1, 0, 0) > Version::new(0, 9, 9));
        assert!(Version::new(1, 1, 0) > Version::new(1, 0, 9));
        assert!(Version::new(1, 1, 1) > Version::new(1, 1, 0));
        assert_eq!(
            Version::new(2, 3, 4).cmp(&Version::new(2, 3, 4)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_highest_version_empty() {
        let revisions: Vec<FileRevision> = Vec::new();
        assert_eq!(highest_version(&revisions, FileCategory::CadModel), ZERO);
    }

    #[test]
    fn test_highest_version_respects_category() {
        let revisions = vec![
            make_revision(FileCategory::CadModel, Version::new(1, 0, 0)),
            make_revision(FileCategory::CadModel, Version::new(0, 5, 0)),
            make_revision(FileCategory::Documentation, Version::new(9, 0, 0)),
        ];

        assert_eq!(
            highest_version(&revisions, FileCategory::CadModel),
            Version::new(1, 0, 0)
        );
        assert_eq!(
            highest_version(&revisions, FileCategory::Documentation),
            Version::new(9, 0, 0)
        );
        assert_eq!(
            highest_version(&revisions, FileCategory::TechnicalDrawing),
            ZERO
        );
    }

    #[test]
    fn test_suggest_first_versions_are_fixed_literals() {
        let s = suggest_next(ZERO);
        assert_eq!(s.bugfix, Version::new(0, 0, 1));
        assert_eq!(s.minor, Version::new(0, 1, 0));
        assert_eq!(s.major, Version::new(1, 0, 0));
    }

    #[test]
    fn test_suggest_after_existing() {
        let s = suggest_next(Version::new(1, 2, 3));
        assert_eq!(s.bugfix, Version::new(1, 2, 4));
        assert_eq!(s.minor, Version::new(1, 3, 0));
        assert_eq!(s.major, Version::new(2, 0, 0));
    }

    #[test]
    fn test_suggestions_are_strictly_increasing() {
        for highest in [ZERO, Version::new(0, 0, 9), Version::new(3, 7, 1)] {
            let s = suggest_next(highest);
            assert!(highest < s.bugfix);
            assert!(s.bugfix < s.minor);
            assert!(s.minor < s.major);
        }
    }

    #[test]
    fn test_suggest_saturates_at_component_bound() {
        // "4294967295.4294967295.4294967295" parses fine and is a valid
        // recorded version, so suggesting after it must not overflow
        let bound = Version::new(u32::MAX, u32::MAX, u32::MAX);
        let s = suggest_next(bound);
        assert_eq!(s.bugfix, bound);
        assert_eq!(s.minor, Version::new(u32::MAX, u32::MAX, 0));
        assert_eq!(s.major, Version::new(u32::MAX, 0, 0));

        // One below the bound the strict ordering still holds
        let highest = Version::new(u32::MAX - 1, u32::MAX - 1, u32::MAX - 1);
        let s = suggest_next(highest);
        assert!(highest < s.bugfix);
        assert!(s.bugfix < s.minor);
        assert!(s.minor < s.major);
    }

    #[test]
    fn test_validate_zero_candidate_below_minimum() {
        assert_eq!(
            validate_candidate(ZERO, ZERO),
            Err(VersionError::BelowMinimum)
        );
        // BelowMinimum wins even when a highest exists
        assert_eq!(
            validate_candidate(ZERO, Version::new(1, 0, 0)),
            Err(VersionError::BelowMinimum)
        );
    }

    #[test]
    fn test_validate_first_revision() {
        assert_eq!(validate_candidate(Version::new(0, 0, 1), ZERO), Ok(()));
    }

    #[test]
    fn test_validate_equal_is_not_newer() {
        assert_eq!(
            validate_candidate(Version::new(1, 0, 0), Version::new(1, 0, 0)),
            Err(VersionError::NotNewerThanExisting {
                highest: Version::new(1, 0, 0)
            })
        );
    }

    #[test]
    fn test_validate_newer_succeeds() {
        assert_eq!(
            validate_candidate(Version::new(1, 0, 1), Version::new(1, 0, 0)),
            Ok(())
        );
    }

    #[test]
    fn test_validate_older_rejected() {
        assert_eq!(
            validate_candidate(Version::new(0, 9, 9), Version::new(1, 0, 0)),
            Err(VersionError::NotNewerThanExisting {
                highest: Version::new(1, 0, 0)
            })
        );
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let json = serde_json::to_string(&Version::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"1.2.3\"");

        let back: Version = serde_json::from_str("\"2.0\"").unwrap();
        assert_eq!(back, Version::new(2, 0, 0));
    }
}
