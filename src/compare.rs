// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! History comparison - pair two edit snapshots and diff their fields

use crate::types::HistoryEntry;

/// One field of the older/newer comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    /// Display label for the field
    pub label: &'static str,
    /// Value in the older snapshot
    pub old: String,
    /// Value in the newer snapshot
    pub new: String,
    /// True when the two values differ
    pub changed: bool,
}

/// The result of comparing two history entries
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    /// The chronologically older snapshot
    pub older: &'a HistoryEntry,
    /// The chronologically newer snapshot
    pub newer: &'a HistoryEntry,
    /// Field-by-field diff
    pub fields: Vec<FieldDiff>,
}

impl Comparison<'_> {
    /// Number of fields that changed between the two snapshots
    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.fields.iter().filter(|f| f.changed).count()
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn opt_num<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn field(label: &'static str, old: String, new: String) -> FieldDiff {
    let changed = old != new;
    FieldDiff { label, old, new, changed }
}

/// Compare two history entries field by field.
///
/// The pair is ordered by `changed_at` first, so callers may pass the two
/// selected snapshots in either order.
#[must_use]
pub fn compare_entries<'a>(a: &'a HistoryEntry, b: &'a HistoryEntry) -> Comparison<'a> {
    let (older, newer) = if a.changed_at <= b.changed_at { (a, b) } else { (b, a) };

    let fields = vec![
        field("Status", older.status.label().into(), newer.status.label().into()),
        field("Part number", older.part_number.clone(), newer.part_number.clone()),
        field("Department", older.department.clone(), newer.department.clone()),
        field("Name", older.name.clone(), newer.name.clone()),
        field("Sourcing", older.sourcing.label().into(), newer.sourcing.label().into()),
        field(
            "Manufacturing type",
            opt(&older.manufacturing_type),
            opt(&newer.manufacturing_type),
        ),
        field("Material", opt(&older.material), opt(&newer.material)),
        field(
            "Responsible person",
            opt(&older.responsible_person),
            opt(&newer.responsible_person),
        ),
        field(
            "Responsible company",
            opt(&older.responsible_company),
            opt(&newer.responsible_company),
        ),
        field("Approver", opt(&older.approver), opt(&newer.approver)),
        field("Designer", opt(&older.designer), opt(&newer.designer)),
        field("System", opt(&older.system), opt(&newer.system)),
        field("Assembly", opt(&older.assembly), opt(&newer.assembly)),
        field("Sub-assembly", opt(&older.sub_assembly), opt(&newer.sub_assembly)),
        field("Quantity", opt_num(older.quantity), opt_num(newer.quantity)),
        field(
            "Cost per part",
            opt_num(older.cost_per_part),
            opt_num(newer.cost_per_part),
        ),
        field(
            "Emissions per part",
            opt_num(older.emissions_per_part),
            opt_num(newer.emissions_per_part),
        ),
        field("Version", older.version.to_string(), newer.version.to_string()),
        field("Description", opt(&older.description), opt(&newer.description)),
    ];

    Comparison { older, newer, fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HistoryEntry, Part, PartStatus, Sourcing};
    use crate::version::Version;
    use chrono::{Duration, Utc};

    fn make_part() -> Part {
        Part {
            kind: "Part".into(),
            id: Part::generate_id("aero", "AE-042"),
            part_number: "AE-042".into(),
            department: "aero".into(),
            name: "Front wing endplate".into(),
            description: Some("First iteration".into()),
            sourcing: Sourcing::Manufactured,
            manufacturing_type: Some("layup".into()),
            material: Some("CFRP".into()),
            responsible_person: Some("alice".into()),
            responsible_company: None,
            approver: None,
            designer: Some("alice".into()),
            system: Some("aero".into()),
            assembly: Some("front-wing".into()),
            sub_assembly: None,
            quantity: Some(2),
            cost_per_part: Some(120.0),
            emissions_per_part: None,
            status: PartStatus::Draft,
            version: Version::new(1, 0, 0),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_compare_orders_by_timestamp() {
        let part = make_part();
        let mut older = HistoryEntry::snapshot(&part, Some("alice".into()));
        older.changed_at = Utc::now() - Duration::hours(1);
        let newer = HistoryEntry::snapshot(&part, Some("bob".into()));

        // Pass them newest-first; the comparison flips them back
        let cmp = compare_entries(&newer, &older);
        assert!(cmp.older.changed_at <= cmp.newer.changed_at);
        assert_eq!(cmp.older.changed_by.as_deref(), Some("alice"));
    }

    #[test]
    fn test_identical_snapshots_have_no_changes() {
        let part = make_part();
        let a = HistoryEntry::snapshot(&part, None);
        let b = HistoryEntry::snapshot(&part, None);

        let cmp = compare_entries(&a, &b);
        assert_eq!(cmp.changed_count(), 0);
    }

    #[test]
    fn test_changed_fields_flagged() {
        let mut part = make_part();
        let mut older = HistoryEntry::snapshot(&part, None);
        older.changed_at = Utc::now() - Duration::hours(1);

        part.status = PartStatus::AwaitingApproval;
        part.material = Some("GFRP".into());
        part.approver = Some("carol".into());
        let newer = HistoryEntry::snapshot(&part, None);

        let cmp = compare_entries(&older, &newer);
        assert_eq!(cmp.changed_count(), 3);

        let status = cmp.fields.iter().find(|f| f.label == "Status").unwrap();
        assert!(status.changed);
        assert_eq!(status.old, "Draft");
        assert_eq!(status.new, "Awaiting approval");

        let approver = cmp.fields.iter().find(|f| f.label == "Approver").unwrap();
        assert_eq!(approver.old, "-");
        assert_eq!(approver.new, "carol");

        let name = cmp.fields.iter().find(|f| f.label == "Name").unwrap();
        assert!(!name.changed);
    }

    #[test]
    fn test_numeric_fields_diff_with_placeholder() {
        let mut part = make_part();
        let mut older = HistoryEntry::snapshot(&part, None);
        older.changed_at = Utc::now() - Duration::hours(1);

        part.quantity = Some(4);
        part.emissions_per_part = Some(0.8);
        let newer = HistoryEntry::snapshot(&part, None);

        let cmp = compare_entries(&older, &newer);

        let quantity = cmp.fields.iter().find(|f| f.label == "Quantity").unwrap();
        assert!(quantity.changed);
        assert_eq!(quantity.old, "2");
        assert_eq!(quantity.new, "4");

        // Unset numerics render as the same placeholder as unset text
        let emissions = cmp
            .fields
            .iter()
            .find(|f| f.label == "Emissions per part")
            .unwrap();
        assert_eq!(emissions.old, "-");
        assert_eq!(emissions.new, "0.8");
    }
}
