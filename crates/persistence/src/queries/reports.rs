// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report queries.
//!
//! Every query here treats soft-deleted rows (`deleted_at IS NOT NULL`)
//! as nonexistent.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::ReportRecord;
use crate::diesel_schema::reports;
use crate::error::PersistenceError;

type ReportTuple = (
    i64,
    i64,
    i32,
    i32,
    String,
    Option<String>,
    Option<String>,
);

const REPORT_COLUMNS: (
    reports::report_id,
    reports::school_id,
    reports::month,
    reports::year,
    reports::status,
    reports::created_at,
    reports::updated_at,
) = (
    reports::report_id,
    reports::school_id,
    reports::month,
    reports::year,
    reports::status,
    reports::created_at,
    reports::updated_at,
);

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn map_row(row: ReportTuple) -> ReportRecord {
    ReportRecord {
        report_id: row.0,
        school_id: row.1,
        // month is CHECK-constrained to 1..=12
        month: row.2 as u8,
        year: row.3,
        status: row.4,
        created_at: row.5,
        updated_at: row.6,
    }
}

/// Retrieves the non-deleted report for a school and period, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_report_for_period(
    conn: &mut SqliteConnection,
    school_id: i64,
    month: u8,
    year: i32,
) -> Result<Option<ReportRecord>, PersistenceError> {
    debug!("Looking up report for school {school_id}, period {month}-{year}");

    let result: Result<ReportTuple, diesel::result::Error> = reports::table
        .filter(reports::school_id.eq(school_id))
        .filter(reports::month.eq(i32::from(month)))
        .filter(reports::year.eq(year))
        .filter(reports::deleted_at.is_null())
        .select(REPORT_COLUMNS)
        .first(conn);

    match result {
        Ok(row) => Ok(Some(map_row(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Retrieves a non-deleted report by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_report_by_id(
    conn: &mut SqliteConnection,
    report_id: i64,
) -> Result<Option<ReportRecord>, PersistenceError> {
    let result: Result<ReportTuple, diesel::result::Error> = reports::table
        .filter(reports::report_id.eq(report_id))
        .filter(reports::deleted_at.is_null())
        .select(REPORT_COLUMNS)
        .first(conn);

    match result {
        Ok(row) => Ok(Some(map_row(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists the months of a year for which a school has a **Submitted**
/// report. Drafts are excluded: they do not clear a month from the
/// missing-periods computation.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn submitted_months(
    conn: &mut SqliteConnection,
    school_id: i64,
    year: i32,
) -> Result<Vec<u8>, PersistenceError> {
    let months: Vec<i32> = reports::table
        .filter(reports::school_id.eq(school_id))
        .filter(reports::year.eq(year))
        .filter(reports::status.eq("Submitted"))
        .filter(reports::deleted_at.is_null())
        .select(reports::month)
        .order(reports::month.asc())
        .load(conn)?;

    Ok(months.into_iter().map(|m| m as u8).collect())
}

/// Lists all non-deleted reports of a school for a year, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_reports_for_school_year(
    conn: &mut SqliteConnection,
    school_id: i64,
    year: i32,
) -> Result<Vec<ReportRecord>, PersistenceError> {
    let rows: Vec<ReportTuple> = reports::table
        .filter(reports::school_id.eq(school_id))
        .filter(reports::year.eq(year))
        .filter(reports::deleted_at.is_null())
        .select(REPORT_COLUMNS)
        .order((reports::year.asc(), reports::month.asc()))
        .load(conn)?;

    Ok(rows.into_iter().map(map_row).collect())
}

/// Retrieves the non-deleted reports of a set of schools for one period.
///
/// Used by the region dashboard to classify every school at once.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_reports_for_schools_period(
    conn: &mut SqliteConnection,
    school_ids: &[i64],
    month: u8,
    year: i32,
) -> Result<Vec<ReportRecord>, PersistenceError> {
    let rows: Vec<ReportTuple> = reports::table
        .filter(reports::school_id.eq_any(school_ids))
        .filter(reports::month.eq(i32::from(month)))
        .filter(reports::year.eq(year))
        .filter(reports::deleted_at.is_null())
        .select(REPORT_COLUMNS)
        .load(conn)?;

    Ok(rows.into_iter().map(map_row).collect())
}
