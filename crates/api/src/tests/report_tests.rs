// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    AttendanceRow, CreateReportRequest, DeleteReportRequest, EnrollmentRow, FinanceRow,
    SubmitReportRequest, UpdateReportSectionsRequest,
};

use super::{admin, head_teacher, regional_officer, seeded_db};

fn create_request(school_id: i64) -> CreateReportRequest {
    CreateReportRequest {
        school_id,
        month: 2,
        year: 2025,
    }
}

fn sections_request(report_id: i64) -> UpdateReportSectionsRequest {
    UpdateReportSectionsRequest {
        report_id,
        enrollment: Some(vec![
            EnrollmentRow {
                role: String::from("student"),
                head_count: 420,
            },
            EnrollmentRow {
                role: String::from("teacher"),
                head_count: 18,
            },
        ]),
        attendance: Some(vec![AttendanceRow {
            role: String::from("student"),
            attendance_rate: 87,
        }]),
        finance: Some(vec![
            FinanceRow {
                kind: String::from("income"),
                amount: Some(125_000),
            },
            FinanceRow {
                kind: String::from("expenditure"),
                amount: None,
            },
        ]),
    }
}

#[test]
fn test_head_teacher_creates_draft_for_own_school() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    let response =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();

    assert_eq!(response.school_id, school_id);
    assert_eq!(response.month, 2);
    assert_eq!(response.year, 2025);
    assert_eq!(response.status, "Draft");
}

#[test]
fn test_create_for_other_school_denied() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let other_school = persistence
        .create_school(region_id, "Valley Secondary")
        .unwrap();
    let actor = head_teacher(school_id, region_id);

    let err =
        handlers::create_report(&mut persistence, &actor, &create_request(other_school))
            .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_admin_writes_any_school() {
    let (mut persistence, _region_id, school_id) = seeded_db();

    let response =
        handlers::create_report(&mut persistence, &admin(), &create_request(school_id)).unwrap();
    assert_eq!(response.status, "Draft");
}

#[test]
fn test_regional_officer_cannot_create_reports() {
    let (mut persistence, region_id, school_id) = seeded_db();

    let err = handlers::create_report(
        &mut persistence,
        &regional_officer(region_id),
        &create_request(school_id),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_invalid_month_rejected() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    let err = handlers::create_report(
        &mut persistence,
        &actor,
        &CreateReportRequest {
            school_id,
            month: 13,
            year: 2025,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "month"));
}

#[test]
fn test_unknown_school_not_found() {
    let (mut persistence, _region_id, _school_id) = seeded_db();

    let err =
        handlers::create_report(&mut persistence, &admin(), &create_request(9999)).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_duplicate_create_conflicts() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();
    let err =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap_err();

    match err {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "unique_report");
            assert!(!message.contains("already submitted"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_after_submit_mentions_submission() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    let created =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();
    handlers::submit_report(
        &mut persistence,
        &actor,
        &SubmitReportRequest {
            report_id: created.report_id,
        },
    )
    .unwrap();

    let err =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap_err();
    match err {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "unique_report");
            assert!(message.contains("already submitted"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_update_sections_roundtrip() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    let created =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();
    handlers::update_report_sections(&mut persistence, &actor, &sections_request(created.report_id))
        .unwrap();

    let enrollment = persistence
        .enrollment_for_reports(&[created.report_id])
        .unwrap();
    assert_eq!(enrollment.len(), 2);
    assert_eq!(enrollment[0].head_count, 420);

    let finance = persistence
        .finance_for_reports(&[created.report_id])
        .unwrap();
    assert_eq!(finance.len(), 2);
    assert_eq!(finance[1].amount, None);
}

#[test]
fn test_absent_sections_are_untouched() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    let created =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();
    handlers::update_report_sections(&mut persistence, &actor, &sections_request(created.report_id))
        .unwrap();

    // Only attendance is replaced; enrollment keeps its rows.
    handlers::update_report_sections(
        &mut persistence,
        &actor,
        &UpdateReportSectionsRequest {
            report_id: created.report_id,
            enrollment: None,
            attendance: Some(vec![AttendanceRow {
                role: String::from("teacher"),
                attendance_rate: 95,
            }]),
            finance: None,
        },
    )
    .unwrap();

    let enrollment = persistence
        .enrollment_for_reports(&[created.report_id])
        .unwrap();
    assert_eq!(enrollment.len(), 2);
    let attendance = persistence
        .attendance_for_reports(&[created.report_id])
        .unwrap();
    assert_eq!(attendance.len(), 1);
    assert_eq!(attendance[0].role, "teacher");
}

#[test]
fn test_update_sections_rejected_on_submitted_report() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    let created =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();
    handlers::submit_report(
        &mut persistence,
        &actor,
        &SubmitReportRequest {
            report_id: created.report_id,
        },
    )
    .unwrap();

    let err = handlers::update_report_sections(
        &mut persistence,
        &actor,
        &sections_request(created.report_id),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "draft_only"));
}

#[test]
fn test_section_rows_are_validated() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);
    let created =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();

    let bad_role = UpdateReportSectionsRequest {
        report_id: created.report_id,
        enrollment: Some(vec![EnrollmentRow {
            role: String::from("janitor"),
            head_count: 1,
        }]),
        attendance: None,
        finance: None,
    };
    let err =
        handlers::update_report_sections(&mut persistence, &actor, &bad_role).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "role"));

    let bad_rate = UpdateReportSectionsRequest {
        report_id: created.report_id,
        enrollment: None,
        attendance: Some(vec![AttendanceRow {
            role: String::from("student"),
            attendance_rate: 101,
        }]),
        finance: None,
    };
    let err =
        handlers::update_report_sections(&mut persistence, &actor, &bad_rate).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "attendance_rate"));

    let bad_kind = UpdateReportSectionsRequest {
        report_id: created.report_id,
        enrollment: None,
        attendance: None,
        finance: Some(vec![FinanceRow {
            kind: String::from("loan"),
            amount: Some(10),
        }]),
    };
    let err =
        handlers::update_report_sections(&mut persistence, &actor, &bad_kind).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "kind"));
}

#[test]
fn test_submit_is_terminal() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    let created =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();
    let request = SubmitReportRequest {
        report_id: created.report_id,
    };

    let submitted = handlers::submit_report(&mut persistence, &actor, &request).unwrap();
    assert_eq!(submitted.status, "Submitted");

    let err = handlers::submit_report(&mut persistence, &actor, &request).unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "draft_only"));
}

#[test]
fn test_delete_frees_the_period() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    let created =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();
    handlers::delete_report(
        &mut persistence,
        &actor,
        &DeleteReportRequest {
            report_id: created.report_id,
        },
    )
    .unwrap();

    // The period is free again.
    let recreated =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();
    assert_ne!(recreated.report_id, created.report_id);
}

#[test]
fn test_delete_submitted_report_rejected() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    let created =
        handlers::create_report(&mut persistence, &actor, &create_request(school_id)).unwrap();
    handlers::submit_report(
        &mut persistence,
        &actor,
        &SubmitReportRequest {
            report_id: created.report_id,
        },
    )
    .unwrap();

    let err = handlers::delete_report(
        &mut persistence,
        &actor,
        &DeleteReportRequest {
            report_id: created.report_id,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "draft_only"));
}

#[test]
fn test_missing_report_not_found() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let actor = head_teacher(school_id, region_id);

    let err = handlers::submit_report(
        &mut persistence,
        &actor,
        &SubmitReportRequest { report_id: 9999 },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}
