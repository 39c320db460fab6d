// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::Row;
use crate::options::{departments, divisions, plants, sections};

const ALL_LABEL: &str = "All";

/// One entry of a select's option list. The empty value is the All
/// sentinel: no filter at that level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn all() -> Self {
        Self {
            value: String::new(),
            label: ALL_LABEL.to_owned(),
        }
    }

    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Capability surface the chain drives. Implementations own the concrete
/// widgets (terminal panels, an in-memory fake); the chain only reads a
/// select's current value and replaces its option set.
///
/// `value` returns None when no select with that id exists; the chain
/// treats such selects as silent no-ops.
pub trait SelectHost {
    fn value(&self, id: &str) -> Option<String>;
    fn apply(&mut self, id: &str, options: Vec<SelectOption>, selected: &str);
}

/// Ids of the four selects, overridable per page/config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectIds {
    pub department: String,
    pub section: String,
    pub division: String,
    pub plant: String,
}

impl Default for SelectIds {
    fn default() -> Self {
        Self {
            department: "deptSelect".to_owned(),
            section: "sectionSelect".to_owned(),
            division: "divisionSelect".to_owned(),
            plant: "plantSelect".to_owned(),
        }
    }
}

/// Requested values for one `reload` pass.
///
/// Per level: `Some(value)` selects that value, `Some("")` resets to the
/// All sentinel, `None` keeps the select's previous value when the fresh
/// option list still offers it. Either way a value that is no longer
/// offered falls back to All rather than an arbitrary option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub dept: Option<String>,
    pub sect: Option<String>,
    pub div: Option<String>,
    pub plant: Option<String>,
}

impl Selection {
    /// Reset every level to the All sentinel.
    pub fn cleared() -> Self {
        Self {
            dept: Some(String::new()),
            sect: Some(String::new()),
            div: Some(String::new()),
            plant: Some(String::new()),
        }
    }
}

/// The four chain levels, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Department,
    Section,
    Division,
    Plant,
}

/// The chain controller: immutable rows captured at construction, widget
/// ids, and no selection state of its own. The selects are the only source
/// of truth for what is currently picked.
#[derive(Debug, Clone)]
pub struct Chain {
    rows: Vec<Row>,
    ids: SelectIds,
}

impl Chain {
    pub fn new(rows: Vec<Row>, ids: SelectIds) -> Self {
        Self { rows, ids }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn ids(&self) -> &SelectIds {
        &self.ids
    }

    /// Repopulate all four selects in department -> section -> division ->
    /// plant order. Every select gets the All sentinel first, then its
    /// derived candidates. The value a level actually applied (not merely
    /// the requested one) is the filter for the next level, so downstream
    /// candidates stay consistent with upstream selections even when a
    /// requested value was stale.
    pub fn reload<H: SelectHost>(&self, host: &mut H, want: &Selection) {
        let dept = self.populate(
            host,
            &self.ids.department,
            departments(&self.rows)
                .into_iter()
                .map(SelectOption::plain)
                .collect(),
            want.dept.as_deref(),
        );

        let sect = self.populate(
            host,
            &self.ids.section,
            sections(&self.rows, &dept)
                .into_iter()
                .map(SelectOption::plain)
                .collect(),
            want.sect.as_deref(),
        );

        let div = self.populate(
            host,
            &self.ids.division,
            divisions(&self.rows, &dept, &sect)
                .into_iter()
                .map(SelectOption::plain)
                .collect(),
            want.div.as_deref(),
        );

        let plant_options = plants(&self.rows, &dept, &sect, &div)
            .into_iter()
            .map(|plant| SelectOption {
                label: plant.label(),
                value: plant.code,
            })
            .collect();
        self.populate(host, &self.ids.plant, plant_options, want.plant.as_deref());
    }

    /// Department changed: keep it, reset everything downstream.
    pub fn update_section<H: SelectHost>(&self, host: &mut H) {
        let dept = current(host, &self.ids.department);
        self.reload(
            host,
            &Selection {
                dept: Some(dept),
                ..Selection::cleared()
            },
        );
    }

    /// Section changed: keep department + section, reset division/plant.
    pub fn update_division<H: SelectHost>(&self, host: &mut H) {
        let dept = current(host, &self.ids.department);
        let sect = current(host, &self.ids.section);
        self.reload(
            host,
            &Selection {
                dept: Some(dept),
                sect: Some(sect),
                ..Selection::cleared()
            },
        );
    }

    /// Division changed: keep the upper three, reset plant.
    pub fn update_plant<H: SelectHost>(&self, host: &mut H) {
        let dept = current(host, &self.ids.department);
        let sect = current(host, &self.ids.section);
        let div = current(host, &self.ids.division);
        self.reload(
            host,
            &Selection {
                dept: Some(dept),
                sect: Some(sect),
                div: Some(div),
                plant: Some(String::new()),
            },
        );
    }

    /// Event dispatch for the host's change notifications: each level's
    /// change cascades into the levels below it. A plant change has no
    /// downstream levels and does nothing.
    pub fn on_change<H: SelectHost>(&self, host: &mut H, level: Level) {
        match level {
            Level::Department => self.update_section(host),
            Level::Section => self.update_division(host),
            Level::Division => self.update_plant(host),
            Level::Plant => {}
        }
    }

    fn populate<H: SelectHost>(
        &self,
        host: &mut H,
        id: &str,
        items: Vec<SelectOption>,
        want: Option<&str>,
    ) -> String {
        let Some(prev) = host.value(id) else {
            // Absent select: nothing to touch, but the requested value
            // still filters the levels below.
            return want.unwrap_or_default().to_owned();
        };

        let desired = want.map_or(prev, str::to_owned);

        let mut options = Vec::with_capacity(items.len() + 1);
        options.push(SelectOption::all());
        options.extend(items);

        let applied = if options.iter().any(|option| option.value == desired) {
            desired
        } else {
            String::new()
        };
        host.apply(id, options, &applied);
        applied
    }
}

fn current<H: SelectHost>(host: &H, id: &str) -> String {
    host.value(id).unwrap_or_default()
}
