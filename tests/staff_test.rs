//! Tests for Staff queries: total salary, rendering, roots and orphans

use rstest::rstest;

use orgtree::domain::{EmployeeId, EmployeeRecord, Staff};

fn record(id: i64, name: &str, salary: u64, manager: Option<i64>) -> EmployeeRecord {
    EmployeeRecord::new(id, name, salary, manager)
}

fn names(staff: &Staff, handles: &[generational_arena::Index]) -> Vec<String> {
    handles
        .iter()
        .map(|&idx| staff.get(idx).unwrap().name.clone())
        .collect()
}

fn ids(staff: &Staff, handles: &[generational_arena::Index]) -> Vec<i64> {
    handles
        .iter()
        .map(|&idx| staff.get(idx).unwrap().id.0)
        .collect()
}

// ============================================================
// Total salary
// ============================================================

#[test]
fn given_manager_and_report_when_totalling_then_sums_both() {
    // Arrange
    let staff = Staff::from_records(vec![
        record(1, "jacob", 130_000, None),
        record(2, "jacob", 130_000, Some(1)),
    ]);

    // Act
    let total = staff.total_salary();

    // Assert
    assert_eq!(total, 260_000);
}

#[test]
fn given_empty_roster_when_querying_then_everything_is_empty() {
    let staff = Staff::from_records(Vec::new());

    assert_eq!(staff.total_salary(), 0);
    assert_eq!(staff.render(), "");
    assert!(staff.roots().is_empty());
    assert!(staff.is_empty());
}

#[test]
fn given_no_roots_when_totalling_then_still_sums_everyone() {
    let staff = Staff::from_records(vec![
        record(1, "a", 10, Some(7)),
        record(2, "b", 20, Some(8)),
    ]);

    assert!(staff.roots().is_empty());
    assert_eq!(staff.render(), "");
    assert_eq!(staff.total_salary(), 30);
}

// ============================================================
// Hierarchy shape
// ============================================================

#[test]
fn given_reports_with_mixed_names_when_building_then_sorted_alphabetically() {
    // Arrange
    let staff = Staff::from_records(vec![
        record(1, "jacob", 1, None),
        record(2, "jacob", 1, Some(1)),
        record(3, "a", 1, Some(1)),
    ]);

    // Act
    let roots = staff.roots();

    // Assert
    assert_eq!(ids(&staff, roots), vec![1]);
    let reports = staff.reports_of(roots[0]);
    assert_eq!(names(&staff, reports), vec!["a", "jacob"]);
    assert_eq!(ids(&staff, reports), vec![3, 2]);
}

#[test]
fn given_several_owners_when_building_then_all_are_roots_in_name_order() {
    let staff = Staff::from_records(vec![
        record(1, "zoe", 1, None),
        record(2, "adam", 1, None),
        record(3, "mia", 1, Some(1)),
    ]);

    assert_eq!(names(&staff, staff.roots()), vec!["adam", "zoe"]);
    assert_eq!(staff.render(), "adam\nzoe\n  mia\n");
}

#[test]
fn given_siblings_with_same_name_when_building_then_input_order_kept() {
    let staff = Staff::from_records(vec![
        record(1, "boss", 1, None),
        record(7, "sam", 1, Some(1)),
        record(3, "sam", 1, Some(1)),
    ]);

    let reports = staff.reports_of(staff.roots()[0]);

    assert_eq!(ids(&staff, reports), vec![7, 3]);
}

#[test]
fn given_deep_chain_when_building_then_every_level_is_attached() {
    let records: Vec<EmployeeRecord> = (1..=200)
        .map(|id| record(id, &format!("e{:03}", id), 1, (id > 1).then(|| id - 1)))
        .collect();

    let staff = Staff::from_records(records);

    assert_eq!(staff.depth(), 200);
    assert!(staff.orphans().is_empty());
}

#[test]
fn given_manager_roles_when_building_then_is_manager_reflects_reports() {
    let staff = Staff::from_records(vec![
        record(1, "boss", 1, None),
        record(2, "worker", 1, Some(1)),
    ]);

    let boss = staff.find(EmployeeId(1)).unwrap();
    let worker = staff.find(EmployeeId(2)).unwrap();

    assert!(staff.get(boss).unwrap().is_manager());
    assert!(!staff.get(worker).unwrap().is_manager());
    assert!(staff.get(worker).unwrap().reports_to(EmployeeId(1)));
}

// ============================================================
// Rendering
// ============================================================

#[test]
fn given_manager_with_two_reports_when_rendering_then_indents_two_spaces() {
    let staff = Staff::from_records(vec![
        record(1, "jacob", 130_000, None),
        record(2, "jacob", 130_000, Some(1)),
        record(3, "a", 130_000, Some(1)),
    ]);

    assert_eq!(staff.render(), "jacob\n  a\n  jacob\n");
    assert_eq!(staff.to_string(), "jacob\n  a\n  jacob\n");
}

#[rstest]
#[case("jacob", 130_000)]
#[case("a", 0)]
#[case("Zoë", 42)]
fn given_single_employee_when_querying_then_name_line_and_own_salary(
    #[case] name: &str,
    #[case] salary: u64,
) {
    let staff = Staff::from_records(vec![record(1, name, salary, None)]);

    assert_eq!(staff.render(), format!("{}\n", name));
    assert_eq!(staff.total_salary(), salary);
}

#[test]
fn given_three_levels_when_rendering_then_depth_first_pre_order() {
    let staff = Staff::from_records(vec![
        record(1, "ceo", 1, None),
        record(2, "cto", 1, Some(1)),
        record(3, "cfo", 1, Some(1)),
        record(4, "dev", 1, Some(2)),
        record(5, "accountant", 1, Some(3)),
    ]);

    assert_eq!(
        staff.render(),
        "ceo\n  cfo\n    accountant\n  cto\n    dev\n"
    );
}

#[test]
fn given_forest_when_rendering_twice_then_identical() {
    let staff = Staff::from_records(vec![
        record(1, "ceo", 1, None),
        record(2, "cto", 1, Some(1)),
    ]);

    assert_eq!(staff.render(), staff.render());
}

// ============================================================
// Orphans
// ============================================================

#[test]
fn given_unknown_manager_id_when_building_then_employee_is_orphaned() {
    // Arrange
    let staff = Staff::from_records(vec![
        record(1, "boss", 100, None),
        record(2, "ghost", 50, Some(42)),
    ]);
    let ghost = staff.find(EmployeeId(2)).unwrap();

    // Assert: counted, but neither root nor anyone's report
    assert_eq!(staff.total_salary(), 150);
    assert_eq!(staff.len(), 2);
    assert!(!staff.roots().contains(&ghost));
    assert!(staff
        .employees()
        .all(|(idx, _)| !staff.reports_of(idx).contains(&ghost)));
    assert!(staff.is_orphan(ghost));
    assert_eq!(staff.render(), "boss\n");
}
