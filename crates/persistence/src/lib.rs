// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the education reporting system.
//!
//! This crate stores accounts, sessions, schools, regions, monthly
//! reports with their data sections, and in-app notifications. It is
//! built on Diesel over `SQLite`.
//!
//! ## Backend
//!
//! `SQLite` is the only backend:
//! - In-memory shared databases for unit and integration tests
//! - A WAL-mode file database for deployments
//!
//! ## Soft deletion
//!
//! Reports are never physically removed. Deletion stamps `deleted_at`
//! and every query filters those rows out, which keeps the partial
//! unique index on `(school_id, month, year)` free to accept a
//! replacement report for the same period.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against in-memory `SQLite`
//! - Each test database gets a unique name via an atomic counter
//! - Tests fail fast if foreign key enforcement is off

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;

pub use data_models::{
    AccountData, AttendanceEntry, EnrollmentEntry, FinanceEntry, RegionRecord, ReportRecord,
    SchoolRecord, SessionData,
};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the reporting database.
///
/// Owns a single `SQLite` connection; callers serialize access (the
/// server wraps it in a mutex).
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn = sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on the file backend.
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure
    /// referential integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Regions & Schools
    // ========================================================================

    /// Creates a region.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_region(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::setup::create_region(&mut self.conn, name)
    }

    /// Creates a school within a region.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_school(&mut self, region_id: i64, name: &str) -> Result<i64, PersistenceError> {
        mutations::setup::create_school(&mut self.conn, region_id, name)
    }

    /// Lists all schools, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_schools(&mut self) -> Result<Vec<SchoolRecord>, PersistenceError> {
        queries::schools::list_schools(&mut self.conn)
    }

    /// Lists the schools of one region, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_schools_in_region(
        &mut self,
        region_id: i64,
    ) -> Result<Vec<SchoolRecord>, PersistenceError> {
        queries::schools::list_schools_in_region(&mut self.conn, region_id)
    }

    /// Retrieves a school by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_school(&mut self, school_id: i64) -> Result<Option<SchoolRecord>, PersistenceError> {
        queries::schools::get_school(&mut self.conn, school_id)
    }

    /// Lists all regions, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_regions(&mut self) -> Result<Vec<RegionRecord>, PersistenceError> {
        queries::schools::list_regions(&mut self.conn)
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// Creates a new draft report for a school and period.
    ///
    /// The insert is atomic: a concurrent create for the same school
    /// and period loses with `DuplicateReport` rather than producing a
    /// second row.
    ///
    /// # Arguments
    ///
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
    /// Returns `DuplicateReport` if a non-deleted report already exists
    /// for the school and period.
    pub fn create_report(
        &mut self,
        school_id: i64,
        month: u8,
        year: i32,
    ) -> Result<i64, PersistenceError> {
        mutations::reports::create_report(&mut self.conn, school_id, month, year)
    }

    /// Retrieves a non-deleted report by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_report_by_id(
        &mut self,
        report_id: i64,
    ) -> Result<Option<ReportRecord>, PersistenceError> {
        queries::reports::get_report_by_id(&mut self.conn, report_id)
    }

    /// Retrieves the non-deleted report for a school and period, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_report_for_period(
        &mut self,
        school_id: i64,
        month: u8,
        year: i32,
    ) -> Result<Option<ReportRecord>, PersistenceError> {
        queries::reports::get_report_for_period(&mut self.conn, school_id, month, year)
    }

    /// Lists the months of a year with a Submitted report for a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn submitted_months(
        &mut self,
        school_id: i64,
        year: i32,
    ) -> Result<Vec<u8>, PersistenceError> {
        queries::reports::submitted_months(&mut self.conn, school_id, year)
    }

    /// Lists all non-deleted reports of a school for a year, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_reports_for_school_year(
        &mut self,
        school_id: i64,
        year: i32,
    ) -> Result<Vec<ReportRecord>, PersistenceError> {
        queries::reports::list_reports_for_school_year(&mut self.conn, school_id, year)
    }

    /// Retrieves the non-deleted reports of a set of schools for one period.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_reports_for_schools_period(
        &mut self,
        school_ids: &[i64],
        month: u8,
        year: i32,
    ) -> Result<Vec<ReportRecord>, PersistenceError> {
        queries::reports::list_reports_for_schools_period(&mut self.conn, school_ids, month, year)
    }

    /// Marks a draft report as submitted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no matching draft report exists.
    pub fn submit_report(&mut self, report_id: i64) -> Result<(), PersistenceError> {
        mutations::reports::submit_report(&mut self.conn, report_id)
    }

    /// Soft-deletes a draft report.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no matching draft report exists.
    pub fn soft_delete_report(&mut self, report_id: i64) -> Result<(), PersistenceError> {
        mutations::reports::soft_delete_report(&mut self.conn, report_id)
    }

    // ========================================================================
    // Report Sections
    // ========================================================================

    /// Replaces the enrollment entries of a report as one transaction.
    ///
    /// # Arguments
    ///
    /// * `report_id` - The report
    /// * `entries` - `(role, head_count)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn replace_enrollment_entries(
        &mut self,
        report_id: i64,
        entries: &[(String, i32)],
    ) -> Result<(), PersistenceError> {
        mutations::reports::replace_enrollment_entries(&mut self.conn, report_id, entries)
    }

    /// Replaces the attendance entries of a report as one transaction.
    ///
    /// # Arguments
    ///
    /// * `report_id` - The report
    /// * `entries` - `(role, attendance_rate)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn replace_attendance_entries(
        &mut self,
        report_id: i64,
        entries: &[(String, i32)],
    ) -> Result<(), PersistenceError> {
        mutations::reports::replace_attendance_entries(&mut self.conn, report_id, entries)
    }

    /// Replaces the finance entries of a report as one transaction.
    ///
    /// # Arguments
    ///
    /// * `report_id` - The report
    /// * `entries` - `(kind, amount)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn replace_finance_entries(
        &mut self,
        report_id: i64,
        entries: &[(String, Option<i64>)],
    ) -> Result<(), PersistenceError> {
        mutations::reports::replace_finance_entries(&mut self.conn, report_id, entries)
    }

    /// Retrieves enrollment entries for a set of reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn enrollment_for_reports(
        &mut self,
        report_ids: &[i64],
    ) -> Result<Vec<EnrollmentEntry>, PersistenceError> {
        queries::sections::enrollment_for_reports(&mut self.conn, report_ids)
    }

    /// Retrieves attendance entries for a set of reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn attendance_for_reports(
        &mut self,
        report_ids: &[i64],
    ) -> Result<Vec<AttendanceEntry>, PersistenceError> {
        queries::sections::attendance_for_reports(&mut self.conn, report_ids)
    }

    /// Retrieves finance entries for a set of reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn finance_for_reports(
        &mut self,
        report_ids: &[i64],
    ) -> Result<Vec<FinanceEntry>, PersistenceError> {
        queries::sections::finance_for_reports(&mut self.conn, report_ids)
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Creates a new account.
    ///
    /// # Arguments
    ///
    /// * `login_name` - The login name (will be normalized)
    /// * `display_name` - The display name
    /// * `password` - The plain-text password (will be hashed)
    /// * `role` - The role string
    /// * `school_id` - The school scope, for Head Teacher accounts
    /// * `region_id` - The region scope, for Regional Officer accounts
    ///
    /// # Errors
    ///
    /// Returns an error if the account cannot be created.
    pub fn create_account(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
        role: &str,
        school_id: Option<i64>,
        region_id: Option<i64>,
    ) -> Result<i64, PersistenceError> {
        mutations::accounts::create_account(
            &mut self.conn,
            login_name,
            display_name,
            password,
            role,
            school_id,
            region_id,
        )
    }

    /// Retrieves an account by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_account_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_login(&mut self.conn, login_name)
    }

    /// Retrieves an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_account_by_id(
        &mut self,
        account_id: i64,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_id(&mut self.conn, account_id)
    }

    /// Lists the enabled Head Teacher accounts attached to a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn head_teacher_accounts_for_school(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<AccountData>, PersistenceError> {
        queries::accounts::head_teacher_accounts_for_school(&mut self.conn, school_id)
    }

    /// Updates the last login timestamp for an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_last_login(&mut self, account_id: i64) -> Result<(), PersistenceError> {
        mutations::accounts::update_last_login(&mut self.conn, account_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Arguments
    ///
    /// * `password` - The plain text password to verify
    /// * `password_hash` - The stored bcrypt hash
    ///
    /// # Errors
    ///
    /// Returns an error if password verification fails.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::accounts::verify_password(password, password_hash)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a new session for an account.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The unique session token
    /// * `account_id` - The account ID
    /// * `expires_at` - The expiration timestamp (ISO 8601 format)
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        account_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::accounts::create_session(&mut self.conn, session_token, account_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::accounts::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::accounts::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::accounts::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::accounts::delete_expired_sessions(&mut self.conn, now)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Inserts an in-app notification for an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_notification(
        &mut self,
        account_id: i64,
        message: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::notifications::insert_notification(&mut self.conn, account_id, message)
    }

    /// Marks a notification as read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification does not exist.
    pub fn mark_notification_read(&mut self, notification_id: i64) -> Result<(), PersistenceError> {
        mutations::notifications::mark_notification_read(&mut self.conn, notification_id)
    }
}
