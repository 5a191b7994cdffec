// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for report data-section persistence operations.

use super::create_test_db_with_school;

#[test]
fn test_replace_enrollment_entries_round_trips() {
    let (mut persistence, school_id) = create_test_db_with_school();
    let report_id = persistence.create_report(school_id, 2, 2025).unwrap();

    persistence
        .replace_enrollment_entries(report_id, &[
            ("student".to_string(), 240),
            ("teacher".to_string(), 12),
        ])
        .unwrap();

    let entries = persistence.enrollment_for_reports(&[report_id]).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(
        entries
            .iter()
            .any(|e| e.role == "student" && e.head_count == 240)
    );
    assert!(
        entries
            .iter()
            .any(|e| e.role == "teacher" && e.head_count == 12)
    );
}

#[test]
fn test_replace_discards_previous_entries() {
    let (mut persistence, school_id) = create_test_db_with_school();
    let report_id = persistence.create_report(school_id, 2, 2025).unwrap();

    persistence
        .replace_attendance_entries(report_id, &[("student".to_string(), 91)])
        .unwrap();
    persistence
        .replace_attendance_entries(report_id, &[
            ("student".to_string(), 88),
            ("teacher".to_string(), 97),
        ])
        .unwrap();

    let entries = persistence.attendance_for_reports(&[report_id]).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(
        entries
            .iter()
            .any(|e| e.role == "student" && e.attendance_rate == 88)
    );
}

#[test]
fn test_finance_entries_allow_missing_amounts() {
    let (mut persistence, school_id) = create_test_db_with_school();
    let report_id = persistence.create_report(school_id, 2, 2025).unwrap();

    persistence
        .replace_finance_entries(report_id, &[
            ("income".to_string(), Some(150_000)),
            ("expenditure".to_string(), None),
        ])
        .unwrap();

    let entries = persistence.finance_for_reports(&[report_id]).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(
        entries
            .iter()
            .any(|e| e.kind == "expenditure" && e.amount.is_none())
    );
}

#[test]
fn test_section_update_touches_report_timestamp() {
    let (mut persistence, school_id) = create_test_db_with_school();
    let report_id = persistence.create_report(school_id, 2, 2025).unwrap();

    persistence
        .replace_enrollment_entries(report_id, &[("student".to_string(), 100)])
        .unwrap();

    let report = persistence.get_report_by_id(report_id).unwrap().unwrap();
    assert!(report.updated_at.is_some());
}

#[test]
fn test_sections_are_scoped_by_report_set() {
    let (mut persistence, school_id) = create_test_db_with_school();
    let feb = persistence.create_report(school_id, 2, 2025).unwrap();
    let mar = persistence.create_report(school_id, 3, 2025).unwrap();

    persistence
        .replace_enrollment_entries(feb, &[("student".to_string(), 100)])
        .unwrap();
    persistence
        .replace_enrollment_entries(mar, &[("student".to_string(), 105)])
        .unwrap();

    let entries = persistence.enrollment_for_reports(&[mar]).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].head_count, 105);
}
