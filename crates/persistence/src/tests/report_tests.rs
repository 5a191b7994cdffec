// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for report lifecycle persistence operations.

use super::create_test_db_with_school;
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_report_returns_id_and_draft_status() {
    let (mut persistence, school_id) = create_test_db_with_school();

    let report_id = persistence.create_report(school_id, 2, 2025).unwrap();

    let report = persistence.get_report_by_id(report_id).unwrap().unwrap();
    assert_eq!(report.school_id, school_id);
    assert_eq!(report.month, 2);
    assert_eq!(report.year, 2025);
    assert_eq!(report.status, "Draft");
}

#[test]
fn test_create_duplicate_report_fails() {
    let (mut persistence, school_id) = create_test_db_with_school();

    persistence.create_report(school_id, 2, 2025).unwrap();
    let result = persistence.create_report(school_id, 2, 2025);

    assert_eq!(
        result,
        Err(PersistenceError::DuplicateReport {
            school_id,
            month: 2,
            year: 2025,
        })
    );
}

#[test]
fn test_duplicate_check_is_scoped_to_school_and_period() {
    let (mut persistence, school_id) = create_test_db_with_school();
    let region_id = persistence.create_region("Southern Region").unwrap();
    let other_school = persistence
        .create_school(region_id, "Valley Secondary")
        .unwrap();

    persistence.create_report(school_id, 2, 2025).unwrap();

    // Same period, different school.
    persistence.create_report(other_school, 2, 2025).unwrap();
    // Same school, different period.
    persistence.create_report(school_id, 3, 2025).unwrap();
}

#[test]
fn test_submit_report_transitions_draft_to_submitted() {
    let (mut persistence, school_id) = create_test_db_with_school();

    let report_id = persistence.create_report(school_id, 2, 2025).unwrap();
    persistence.submit_report(report_id).unwrap();

    let report = persistence.get_report_by_id(report_id).unwrap().unwrap();
    assert_eq!(report.status, "Submitted");
}

#[test]
fn test_submit_already_submitted_report_fails() {
    let (mut persistence, school_id) = create_test_db_with_school();

    let report_id = persistence.create_report(school_id, 2, 2025).unwrap();
    persistence.submit_report(report_id).unwrap();

    let result = persistence.submit_report(report_id);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_soft_delete_hides_report_from_queries() {
    let (mut persistence, school_id) = create_test_db_with_school();

    let report_id = persistence.create_report(school_id, 2, 2025).unwrap();
    persistence.soft_delete_report(report_id).unwrap();

    assert!(persistence.get_report_by_id(report_id).unwrap().is_none());
    assert!(
        persistence
            .get_report_for_period(school_id, 2, 2025)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_soft_deleted_period_accepts_a_new_report() {
    let (mut persistence, school_id) = create_test_db_with_school();

    let first = persistence.create_report(school_id, 2, 2025).unwrap();
    persistence.soft_delete_report(first).unwrap();

    // The partial unique index ignores soft-deleted rows.
    let second = persistence.create_report(school_id, 2, 2025).unwrap();
    assert_ne!(first, second);

    let report = persistence
        .get_report_for_period(school_id, 2, 2025)
        .unwrap()
        .unwrap();
    assert_eq!(report.report_id, second);
}

#[test]
fn test_soft_delete_submitted_report_fails() {
    let (mut persistence, school_id) = create_test_db_with_school();

    let report_id = persistence.create_report(school_id, 2, 2025).unwrap();
    persistence.submit_report(report_id).unwrap();

    let result = persistence.soft_delete_report(report_id);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));

    // Still visible.
    assert!(persistence.get_report_by_id(report_id).unwrap().is_some());
}

#[test]
fn test_submitted_months_excludes_drafts_and_deleted() {
    let (mut persistence, school_id) = create_test_db_with_school();

    let jan = persistence.create_report(school_id, 1, 2025).unwrap();
    persistence.submit_report(jan).unwrap();

    // February stays a draft.
    persistence.create_report(school_id, 2, 2025).unwrap();

    let mar = persistence.create_report(school_id, 3, 2025).unwrap();
    persistence.submit_report(mar).unwrap();

    let apr = persistence.create_report(school_id, 4, 2025).unwrap();
    persistence.soft_delete_report(apr).unwrap();

    assert_eq!(persistence.submitted_months(school_id, 2025).unwrap(), [
        1, 3
    ]);
}

#[test]
fn test_list_reports_for_school_year_is_ordered_by_month() {
    let (mut persistence, school_id) = create_test_db_with_school();

    persistence.create_report(school_id, 3, 2025).unwrap();
    persistence.create_report(school_id, 1, 2025).unwrap();
    persistence.create_report(school_id, 12, 2024).unwrap();

    let reports = persistence
        .list_reports_for_school_year(school_id, 2025)
        .unwrap();
    let months: Vec<u8> = reports.iter().map(|r| r.month).collect();
    assert_eq!(months, [1, 3]);
}

#[test]
fn test_list_reports_for_schools_period() {
    let (mut persistence, school_id) = create_test_db_with_school();
    let region_id = persistence.create_region("Southern Region").unwrap();
    let other_school = persistence
        .create_school(region_id, "Valley Secondary")
        .unwrap();

    persistence.create_report(school_id, 2, 2025).unwrap();
    persistence.create_report(other_school, 2, 2025).unwrap();
    persistence.create_report(school_id, 3, 2025).unwrap();

    let reports = persistence
        .list_reports_for_schools_period(&[school_id, other_school], 2, 2025)
        .unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.month == 2 && r.year == 2025));
}

#[test]
fn test_create_report_fails_for_missing_school() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    // No schools exist; the foreign key must reject the insert.
    let result = persistence.create_report(999, 2, 2025);
    assert!(result.is_err());
}
