// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report mutations.
//!
//! Creation is atomic: the insert relies on the partial unique index on
//! `(school_id, month, year) WHERE deleted_at IS NULL` and maps the
//! constraint violation to `DuplicateReport`, so two concurrent creates
//! for the same period cannot both succeed.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use tracing::{debug, info};

use crate::diesel_schema::{attendance_entries, enrollment_entries, finance_entries, reports};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new draft report for a school and period.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `school_id` - The owning school
/// * `month` - The period month (1-12)
/// * `year` - The period year
///
/// # Returns
///
/// The generated report ID.
///
/// # Errors
///
/// Returns `DuplicateReport` if a non-deleted report already exists for
/// the school and period, or a database error otherwise.
pub fn create_report(
    conn: &mut SqliteConnection,
    school_id: i64,
    month: u8,
    year: i32,
) -> Result<i64, PersistenceError> {
    info!("Creating draft report for school {school_id}, period {month}-{year}");

    let inserted = diesel::insert_into(reports::table)
        .values((
            reports::school_id.eq(school_id),
            reports::month.eq(i32::from(month)),
            reports::year.eq(year),
            reports::status.eq("Draft"),
        ))
        .execute(conn);

    match inserted {
        Ok(_) => {
            let report_id: i64 = get_last_insert_rowid(conn)?;
            info!(report_id, "Draft report created");
            Ok(report_id)
        }
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(PersistenceError::DuplicateReport {
                school_id,
                month,
                year,
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Marks a draft report as submitted.
///
/// The update is filtered on `status = 'Draft'`, so a report that was
/// already submitted (or soft-deleted) is not touched.
///
/// # Errors
///
/// Returns `NotFound` if no matching draft report exists.
pub fn submit_report(conn: &mut SqliteConnection, report_id: i64) -> Result<(), PersistenceError> {
    info!("Submitting report {report_id}");

    let affected = diesel::update(reports::table)
        .filter(reports::report_id.eq(report_id))
        .filter(reports::status.eq("Draft"))
        .filter(reports::deleted_at.is_null())
        .set((
            reports::status.eq("Submitted"),
            reports::updated_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "No draft report with ID {report_id}"
        )));
    }
    Ok(())
}

/// Soft-deletes a draft report.
///
/// Only drafts can be deleted; submitted reports are never removed
/// through normal flows. The row is retained with `deleted_at` set and
/// becomes invisible to all queries.
///
/// # Errors
///
/// Returns `NotFound` if no matching draft report exists.
pub fn soft_delete_report(
    conn: &mut SqliteConnection,
    report_id: i64,
) -> Result<(), PersistenceError> {
    info!("Soft-deleting report {report_id}");

    let affected = diesel::update(reports::table)
        .filter(reports::report_id.eq(report_id))
        .filter(reports::status.eq("Draft"))
        .filter(reports::deleted_at.is_null())
        .set(reports::deleted_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "No draft report with ID {report_id}"
        )));
    }
    Ok(())
}

/// Replaces the enrollment entries of a report.
///
/// Runs in a transaction: existing entries are deleted and the new set
/// inserted as one unit.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn replace_enrollment_entries(
    conn: &mut SqliteConnection,
    report_id: i64,
    entries: &[(String, i32)],
) -> Result<(), PersistenceError> {
    debug!("Replacing enrollment entries for report {report_id}");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(enrollment_entries::table)
            .filter(enrollment_entries::report_id.eq(report_id))
            .execute(conn)?;

        for (role, head_count) in entries {
            diesel::insert_into(enrollment_entries::table)
                .values((
                    enrollment_entries::report_id.eq(report_id),
                    enrollment_entries::role.eq(role),
                    enrollment_entries::head_count.eq(head_count),
                ))
                .execute(conn)?;
        }
        touch_report(conn, report_id)
    })
}

/// Replaces the attendance entries of a report.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn replace_attendance_entries(
    conn: &mut SqliteConnection,
    report_id: i64,
    entries: &[(String, i32)],
) -> Result<(), PersistenceError> {
    debug!("Replacing attendance entries for report {report_id}");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(attendance_entries::table)
            .filter(attendance_entries::report_id.eq(report_id))
            .execute(conn)?;

        for (role, attendance_rate) in entries {
            diesel::insert_into(attendance_entries::table)
                .values((
                    attendance_entries::report_id.eq(report_id),
                    attendance_entries::role.eq(role),
                    attendance_entries::attendance_rate.eq(attendance_rate),
                ))
                .execute(conn)?;
        }
        touch_report(conn, report_id)
    })
}

/// Replaces the finance entries of a report.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn replace_finance_entries(
    conn: &mut SqliteConnection,
    report_id: i64,
    entries: &[(String, Option<i64>)],
) -> Result<(), PersistenceError> {
    debug!("Replacing finance entries for report {report_id}");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(finance_entries::table)
            .filter(finance_entries::report_id.eq(report_id))
            .execute(conn)?;

        for (kind, amount) in entries {
            diesel::insert_into(finance_entries::table)
                .values((
                    finance_entries::report_id.eq(report_id),
                    finance_entries::kind.eq(kind),
                    finance_entries::amount.eq(amount),
                ))
                .execute(conn)?;
        }
        touch_report(conn, report_id)
    })
}

/// Stamps the report's `updated_at` column.
fn touch_report(conn: &mut SqliteConnection, report_id: i64) -> Result<(), PersistenceError> {
    diesel::update(reports::table)
        .filter(reports::report_id.eq(report_id))
        .set(reports::updated_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")))
        .execute(conn)?;
    Ok(())
}
