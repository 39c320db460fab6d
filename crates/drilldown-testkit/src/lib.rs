// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! In-memory select host plus deterministic row fixtures for exercising the
//! chain without a terminal.

use drilldown_app::{Row, SelectHost, SelectIds, SelectOption};
use std::collections::BTreeMap;

/// One fake select: the full option set last applied and the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySelect {
    pub options: Vec<SelectOption>,
    pub value: String,
}

/// A map of fake selects keyed by id. Selects must be registered up front;
/// the chain treats unregistered ids as absent widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySelects {
    selects: BTreeMap<String, MemorySelect>,
}

impl MemorySelects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the four chain selects for the given ids, all empty.
    pub fn with_ids(ids: &SelectIds) -> Self {
        let mut host = Self::new();
        for id in [&ids.department, &ids.section, &ids.division, &ids.plant] {
            host.register(id);
        }
        host
    }

    pub fn register(&mut self, id: &str) {
        self.selects.insert(id.to_owned(), MemorySelect::default());
    }

    pub fn select(&self, id: &str) -> Option<&MemorySelect> {
        self.selects.get(id)
    }

    /// Option labels of a select, in order. Empty when the select is absent.
    pub fn labels(&self, id: &str) -> Vec<String> {
        self.selects.get(id).map_or_else(Vec::new, |select| {
            select
                .options
                .iter()
                .map(|option| option.label.clone())
                .collect()
        })
    }

    pub fn value_of(&self, id: &str) -> String {
        self.selects
            .get(id)
            .map(|select| select.value.clone())
            .unwrap_or_default()
    }

    /// Simulates the user picking a value without running any cascade; pair
    /// with `Chain::on_change` to model a change event.
    pub fn pick(&mut self, id: &str, value: &str) {
        if let Some(select) = self.selects.get_mut(id) {
            select.value = value.to_owned();
        }
    }
}

impl SelectHost for MemorySelects {
    fn value(&self, id: &str) -> Option<String> {
        self.selects.get(id).map(|select| select.value.clone())
    }

    fn apply(&mut self, id: &str, options: Vec<SelectOption>, selected: &str) {
        if let Some(select) = self.selects.get_mut(id) {
            select.options = options;
            select.value = selected.to_owned();
        }
    }
}

/// Shorthand row constructor for fixtures.
pub fn row(dept: &str, sect: &str, div: &str, code: &str, name: &str) -> Row {
    Row {
        department_name: dept.to_owned(),
        section_name: sect.to_owned(),
        division_name: div.to_owned(),
        plant_code: code.to_owned(),
        plant_name: name.to_owned(),
    }
}

/// A small deterministic org: two departments with shared plants, one
/// duplicate row, and one row with a missing department.
pub fn sample_rows() -> Vec<Row> {
    vec![
        row("Engineering", "Assembly", "Line 1", "P01", "Aurora"),
        row("Engineering", "Assembly", "Line 2", "P02", "Borealis"),
        row("Engineering", "Machining", "Line 1", "P01", "Aurora"),
        row("Engineering", "Machining", "Line 3", "P03", "Cascade"),
        row("Logistics", "Inbound", "Dock A", "P04", "Delta"),
        row("Logistics", "Inbound", "Dock A", "P04", "Delta"),
        row("Logistics", "Outbound", "Dock B", "P05", "Edge"),
        row("", "Unassigned", "", "P99", "Floating"),
    ]
}
