// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Section-row queries for chart aggregation.
//!
//! Sections are fetched by report-id set: the caller resolves which
//! reports are in scope (school, year) and these queries return the
//! flat rows for grouping and averaging.

use diesel::prelude::*;

use crate::data_models::{AttendanceEntry, EnrollmentEntry, FinanceEntry};
use crate::diesel_schema::{attendance_entries, enrollment_entries, finance_entries};
use crate::error::PersistenceError;

/// Retrieves enrollment entries for a set of reports.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn enrollment_for_reports(
    conn: &mut SqliteConnection,
    report_ids: &[i64],
) -> Result<Vec<EnrollmentEntry>, PersistenceError> {
    let rows: Vec<(i64, String, i32)> = enrollment_entries::table
        .filter(enrollment_entries::report_id.eq_any(report_ids))
        .select((
            enrollment_entries::report_id,
            enrollment_entries::role,
            enrollment_entries::head_count,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(report_id, role, head_count)| EnrollmentEntry {
            report_id,
            role,
            head_count,
        })
        .collect())
}

/// Retrieves attendance entries for a set of reports.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn attendance_for_reports(
    conn: &mut SqliteConnection,
    report_ids: &[i64],
) -> Result<Vec<AttendanceEntry>, PersistenceError> {
    let rows: Vec<(i64, String, i32)> = attendance_entries::table
        .filter(attendance_entries::report_id.eq_any(report_ids))
        .select((
            attendance_entries::report_id,
            attendance_entries::role,
            attendance_entries::attendance_rate,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(report_id, role, attendance_rate)| AttendanceEntry {
            report_id,
            role,
            attendance_rate,
        })
        .collect())
}

/// Retrieves finance entries for a set of reports.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn finance_for_reports(
    conn: &mut SqliteConnection,
    report_ids: &[i64],
) -> Result<Vec<FinanceEntry>, PersistenceError> {
    let rows: Vec<(i64, String, Option<i64>)> = finance_entries::table
        .filter(finance_entries::report_id.eq_any(report_ids))
        .select((
            finance_entries::report_id,
            finance_entries::kind,
            finance_entries::amount,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(report_id, kind, amount)| FinanceEntry {
            report_id,
            kind,
            amount,
        })
        .collect())
}
