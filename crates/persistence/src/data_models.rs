// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain data structs returned by the persistence adapter.
//!
//! These are deliberately free of Diesel types so the API layer can
//! consume them without a database dependency.

/// A stored account (login identity) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountData {
    pub account_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    /// Set for Head Teacher accounts: the school they report for.
    pub school_id: Option<i64>,
    /// Set for Regional Officer accounts: the region they read.
    pub region_id: Option<i64>,
    pub is_disabled: bool,
    pub created_at: Option<String>,
    pub last_login_at: Option<String>,
}

/// A stored session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub account_id: i64,
    pub created_at: Option<String>,
    pub expires_at: String,
    pub last_activity_at: Option<String>,
}

/// A stored report row. `deleted_at` is always `None` here: queries
/// filter soft-deleted rows out before mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub report_id: i64,
    pub school_id: i64,
    pub month: u8,
    pub year: i32,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A school row with its owning region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolRecord {
    pub school_id: i64,
    pub region_id: i64,
    pub name: String,
}

/// A region row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRecord {
    pub region_id: i64,
    pub name: String,
}

/// One enrollment head-count entry of a report section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentEntry {
    pub report_id: i64,
    /// "student" or "teacher".
    pub role: String,
    pub head_count: i32,
}

/// One attendance-rate entry of a report section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEntry {
    pub report_id: i64,
    /// "student" or "teacher".
    pub role: String,
    /// Percentage, 0-100.
    pub attendance_rate: i32,
}

/// One finance entry of a report section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceEntry {
    pub report_id: i64,
    /// "income" or "expenditure".
    pub kind: String,
    /// Amount in minor currency units; `None` when not reported.
    pub amount: Option<i64>,
}
