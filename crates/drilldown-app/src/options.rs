// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::Row;
use std::collections::HashSet;

/// A candidate plant entry: the select value is the code, the label pairs
/// code and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantOption {
    pub code: String,
    pub name: String,
}

impl PlantOption {
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Unique, non-empty, ascending department names across the full row set.
/// Departments are the chain root and never filtered.
pub fn departments(rows: &[Row]) -> Vec<String> {
    sorted_unique(rows.iter().map(|row| row.department_name.as_str()))
}

/// Section candidates, optionally narrowed to one department. An empty
/// `dept` means no filter.
pub fn sections(rows: &[Row], dept: &str) -> Vec<String> {
    sorted_unique(
        rows.iter()
            .filter(|row| dept.is_empty() || row.department_name == dept)
            .map(|row| row.section_name.as_str()),
    )
}

/// Division candidates under the department/section filters, each applied
/// only when non-empty.
pub fn divisions(rows: &[Row], dept: &str, sect: &str) -> Vec<String> {
    sorted_unique(
        rows.iter()
            .filter(|row| dept.is_empty() || row.department_name == dept)
            .filter(|row| sect.is_empty() || row.section_name == sect)
            .map(|row| row.division_name.as_str()),
    )
}

/// Plant candidates under the department/section/division filters, deduped
/// by the (code, name) pair. Unlike the string levels these keep first-seen
/// order rather than sorting.
pub fn plants(rows: &[Row], dept: &str, sect: &str, div: &str) -> Vec<PlantOption> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in rows
        .iter()
        .filter(|row| dept.is_empty() || row.department_name == dept)
        .filter(|row| sect.is_empty() || row.section_name == sect)
        .filter(|row| div.is_empty() || row.division_name == div)
    {
        let key = (row.plant_code.clone(), row.plant_name.clone());
        if seen.insert(key) {
            out.push(PlantOption {
                code: row.plant_code.clone(),
                name: row.plant_name.clone(),
            });
        }
    }
    out
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .filter(|value| !value.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::{departments, divisions, plants, sections};
    use crate::model::Row;

    fn row(dept: &str, sect: &str, div: &str, code: &str, name: &str) -> Row {
        Row {
            department_name: dept.to_owned(),
            section_name: sect.to_owned(),
            division_name: div.to_owned(),
            plant_code: code.to_owned(),
            plant_name: name.to_owned(),
        }
    }

    fn fixture() -> Vec<Row> {
        vec![
            row("Eng", "Core", "A", "P1", "Alpha"),
            row("Eng", "Core", "B", "P2", "Beta"),
            row("Eng", "Tooling", "A", "P1", "Alpha"),
            row("Ops", "Field", "North", "P3", "Gamma"),
            row("Ops", "Field", "North", "P3", "Gamma"),
            row("", "Orphan", "", "P9", "NoDept"),
        ]
    }

    #[test]
    fn departments_are_unique_sorted_and_non_empty() {
        assert_eq!(departments(&fixture()), vec!["Eng", "Ops"]);
    }

    #[test]
    fn departments_of_empty_row_list_is_empty() {
        assert!(departments(&[]).is_empty());
    }

    #[test]
    fn sections_without_filter_span_all_rows() {
        assert_eq!(
            sections(&fixture(), ""),
            vec!["Core", "Field", "Orphan", "Tooling"]
        );
    }

    #[test]
    fn sections_honor_department_filter() {
        let rows = fixture();
        for section in sections(&rows, "Eng") {
            assert!(
                rows.iter()
                    .any(|r| r.department_name == "Eng" && r.section_name == section),
                "section {section:?} must come from an Eng row"
            );
        }
        assert_eq!(sections(&rows, "Eng"), vec!["Core", "Tooling"]);
        assert_eq!(sections(&rows, "Ops"), vec!["Field"]);
    }

    #[test]
    fn sections_with_unknown_department_are_empty() {
        assert!(sections(&fixture(), "Finance").is_empty());
    }

    #[test]
    fn divisions_apply_each_filter_only_when_non_empty() {
        let rows = fixture();
        assert_eq!(divisions(&rows, "Eng", ""), vec!["A", "B"]);
        assert_eq!(divisions(&rows, "Eng", "Core"), vec!["A", "B"]);
        assert_eq!(divisions(&rows, "Eng", "Tooling"), vec!["A"]);
        assert_eq!(divisions(&rows, "", "Field"), vec!["North"]);
    }

    #[test]
    fn plants_dedupe_by_code_name_pair_preserving_order() {
        let rows = vec![
            row("Eng", "Core", "A", "P2", "Beta"),
            row("Eng", "Core", "B", "P1", "Alpha"),
            row("Eng", "Core", "C", "P2", "Beta"),
            row("Eng", "Core", "D", "P2", "Renamed"),
        ];
        let got = plants(&rows, "Eng", "", "");
        let labels: Vec<String> = got.iter().map(super::PlantOption::label).collect();
        assert_eq!(labels, vec!["P2 - Beta", "P1 - Alpha", "P2 - Renamed"]);
    }

    #[test]
    fn plants_narrow_with_all_three_filters() {
        let rows = fixture();
        let got = plants(&rows, "Eng", "Core", "B");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].code, "P2");
        assert_eq!(got[0].label(), "P2 - Beta");
    }

    #[test]
    fn plants_keep_entries_with_empty_fields() {
        // Unlike the string levels, the plant list does not drop empties;
        // a blank name still renders as "CODE - ".
        let rows = vec![row("Eng", "Core", "A", "P7", "")];
        let got = plants(&rows, "", "", "");
        assert_eq!(got[0].label(), "P7 - ");
    }
}
