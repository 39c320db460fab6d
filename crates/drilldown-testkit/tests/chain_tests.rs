// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use drilldown_app::{Chain, Level, SelectIds, Selection};
use drilldown_testkit::{MemorySelects, row, sample_rows};

#[test]
fn two_row_example_reload_yields_the_expected_option_lists() {
    let rows = vec![
        row("Eng", "Core", "A", "P1", "Alpha"),
        row("Eng", "Core", "B", "P2", "Beta"),
    ];
    let ids = SelectIds::default();
    let chain = Chain::new(rows, ids.clone());
    let mut host = MemorySelects::with_ids(&ids);

    chain.reload(
        &mut host,
        &Selection {
            dept: Some("Eng".to_owned()),
            ..Selection::cleared()
        },
    );

    assert_eq!(host.labels(&ids.section), vec!["All", "Core"]);
    assert_eq!(host.labels(&ids.division), vec!["All", "A", "B"]);
    assert_eq!(
        host.labels(&ids.plant),
        vec!["All", "P1 - Alpha", "P2 - Beta"]
    );
}

#[test]
fn reload_twice_with_identical_arguments_is_a_fixed_point() {
    let ids = SelectIds::default();
    let chain = Chain::new(sample_rows(), ids.clone());
    let mut host = MemorySelects::with_ids(&ids);
    let want = Selection {
        dept: Some("Engineering".to_owned()),
        sect: Some("Machining".to_owned()),
        ..Selection::cleared()
    };

    chain.reload(&mut host, &want);
    let first = host.clone();
    chain.reload(&mut host, &want);

    assert_eq!(host, first);
}

#[test]
fn department_change_resets_every_downstream_select_to_all() {
    let ids = SelectIds::default();
    let chain = Chain::new(sample_rows(), ids.clone());
    let mut host = MemorySelects::with_ids(&ids);

    chain.reload(
        &mut host,
        &Selection {
            dept: Some("Engineering".to_owned()),
            sect: Some("Assembly".to_owned()),
            div: Some("Line 2".to_owned()),
            plant: Some("P02".to_owned()),
        },
    );

    host.pick(&ids.department, "Logistics");
    chain.on_change(&mut host, Level::Department);

    assert_eq!(host.value_of(&ids.department), "Logistics");
    assert_eq!(host.value_of(&ids.section), "");
    assert_eq!(host.value_of(&ids.division), "");
    assert_eq!(host.value_of(&ids.plant), "");
    assert_eq!(host.labels(&ids.section), vec!["All", "Inbound", "Outbound"]);
}

#[test]
fn drill_down_then_widen_keeps_levels_consistent() {
    let ids = SelectIds::default();
    let chain = Chain::new(sample_rows(), ids.clone());
    let mut host = MemorySelects::with_ids(&ids);
    chain.reload(&mut host, &Selection::cleared());

    // Drill: Engineering -> Machining -> Line 3.
    host.pick(&ids.department, "Engineering");
    chain.on_change(&mut host, Level::Department);
    host.pick(&ids.section, "Machining");
    chain.on_change(&mut host, Level::Section);
    host.pick(&ids.division, "Line 3");
    chain.on_change(&mut host, Level::Division);

    assert_eq!(host.labels(&ids.plant), vec!["All", "P03 - Cascade"]);

    // Widen the section back to All: divisions and plants re-span the
    // department.
    host.pick(&ids.section, "");
    chain.on_change(&mut host, Level::Section);

    assert_eq!(
        host.labels(&ids.division),
        vec!["All", "Line 1", "Line 2", "Line 3"]
    );
    assert_eq!(
        host.labels(&ids.plant),
        vec!["All", "P01 - Aurora", "P02 - Borealis", "P03 - Cascade"]
    );
}

#[test]
fn duplicate_rows_collapse_in_every_derived_list() {
    let ids = SelectIds::default();
    let chain = Chain::new(sample_rows(), ids.clone());
    let mut host = MemorySelects::with_ids(&ids);

    chain.reload(
        &mut host,
        &Selection {
            dept: Some("Logistics".to_owned()),
            sect: Some("Inbound".to_owned()),
            ..Selection::cleared()
        },
    );

    assert_eq!(host.labels(&ids.division), vec!["All", "Dock A"]);
    assert_eq!(host.labels(&ids.plant), vec!["All", "P04 - Delta"]);
}
