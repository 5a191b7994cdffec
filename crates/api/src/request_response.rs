// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs.
//!
//! These are distinct from domain and persistence types and represent
//! the API contract. All of them serialize for the HTTP layer.

use edu_report_domain::ReportingPeriod;
use serde::{Deserialize, Serialize};

/// Request to authenticate and open a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The login name (case-insensitive).
    pub login_name: String,
    /// The plain-text password.
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The bearer token for subsequent requests.
    pub session_token: String,
    /// The authenticated account.
    pub account_id: i64,
    /// The account role.
    pub role: String,
}

/// Response describing the authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// The account ID.
    pub account_id: i64,
    /// The normalized login name.
    pub login_name: String,
    /// The account role.
    pub role: String,
    /// The school scope, when present.
    pub school_id: Option<i64>,
    /// The region scope, when present.
    pub region_id: Option<i64>,
}

/// Request to create a draft report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReportRequest {
    /// The school the report belongs to.
    pub school_id: i64,
    /// The period month (1-12).
    pub month: u8,
    /// The period year.
    pub year: i32,
}

/// Response for a successful report creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReportResponse {
    /// The created report.
    pub report_id: i64,
    /// The school the report belongs to.
    pub school_id: i64,
    /// The period month.
    pub month: u8,
    /// The period year.
    pub year: i32,
    /// The report status ("Draft").
    pub status: String,
}

/// One enrollment head-count row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRow {
    /// "student" or "teacher".
    pub role: String,
    /// The head count.
    pub head_count: i32,
}

/// One attendance-rate row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRow {
    /// "student" or "teacher".
    pub role: String,
    /// Percentage, 0-100.
    pub attendance_rate: i32,
}

/// One finance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceRow {
    /// "income" or "expenditure".
    pub kind: String,
    /// Amount in minor currency units; `None` when not reported.
    pub amount: Option<i64>,
}

/// Request to replace the data sections of a draft report.
///
/// Sections left as `None` are untouched; a `Some` section replaces
/// that section's rows entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReportSectionsRequest {
    /// The report to update.
    pub report_id: i64,
    /// Replacement enrollment rows.
    pub enrollment: Option<Vec<EnrollmentRow>>,
    /// Replacement attendance rows.
    pub attendance: Option<Vec<AttendanceRow>>,
    /// Replacement finance rows.
    pub finance: Option<Vec<FinanceRow>>,
}

/// Response for a successful section update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReportSectionsResponse {
    /// The updated report.
    pub report_id: i64,
    /// A success message.
    pub message: String,
}

/// Request to submit a draft report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReportRequest {
    /// The report to submit.
    pub report_id: i64,
}

/// Response for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReportResponse {
    /// The submitted report.
    pub report_id: i64,
    /// The report status ("Submitted").
    pub status: String,
}

/// Request to soft-delete a draft report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReportRequest {
    /// The report to delete.
    pub report_id: i64,
}

/// Response for a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReportResponse {
    /// The deleted report.
    pub report_id: i64,
    /// A success message.
    pub message: String,
}

/// Request for the single-school dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolDashboardRequest {
    /// The school to report on.
    pub school_id: i64,
}

/// The single-school dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolDashboardResponse {
    /// The school.
    pub school_id: i64,
    /// The reporting period currently open for submission.
    pub open_period: ReportingPeriod,
    /// The due date for the open period (ISO 8601 date).
    pub due_date: String,
    /// The school's submission status for the open period.
    pub status: String,
    /// Current-year months with no submitted report, ascending.
    pub missing_periods: Vec<ReportingPeriod>,
}

/// Request for the per-region dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDashboardRequest {
    /// The region to report on.
    pub region_id: i64,
}

/// One school's submission status for the open period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolStatusRow {
    /// The school.
    pub school_id: i64,
    /// The school name.
    pub school_name: String,
    /// The submission status for the open period.
    pub status: String,
}

/// The per-region dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDashboardResponse {
    /// The region.
    pub region_id: i64,
    /// The reporting period currently open for submission.
    pub open_period: ReportingPeriod,
    /// The due date for the open period (ISO 8601 date).
    pub due_date: String,
    /// Per-school statuses, in school-name order.
    pub schools: Vec<SchoolStatusRow>,
}

/// Request for chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeriesRequest {
    /// The school to chart.
    pub school_id: i64,
    /// The calendar year to chart.
    pub year: i32,
}

/// One point of a monthly chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// The period the point covers.
    pub period: ReportingPeriod,
    /// The aggregated value.
    pub value: i64,
}

/// Chart series for a school-year.
///
/// Enrollment and attendance are averaged per role; finance is summed
/// per kind. All series are ordered by `(year, month)` ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeriesResponse {
    /// The school.
    pub school_id: i64,
    /// The charted year.
    pub year: i32,
    /// Average student head count per month.
    pub enrollment_students: Vec<MonthlyPoint>,
    /// Average teacher head count per month.
    pub enrollment_teachers: Vec<MonthlyPoint>,
    /// Average student attendance rate per month.
    pub attendance_students: Vec<MonthlyPoint>,
    /// Average teacher attendance rate per month.
    pub attendance_teachers: Vec<MonthlyPoint>,
    /// Total income per month.
    pub income: Vec<MonthlyPoint>,
    /// Total expenditure per month.
    pub expenditure: Vec<MonthlyPoint>,
}

/// One overdue school-period pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverduePair {
    /// The school with no submitted report.
    pub school_id: i64,
    /// The school name.
    pub school_name: String,
    /// The overdue period.
    pub period: ReportingPeriod,
}

/// The overdue-reminder computation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueRemindersResponse {
    /// The reporting period the reminders cover.
    pub open_period: ReportingPeriod,
    /// The overdue pairs, in school-name order.
    pub overdue: Vec<OverduePair>,
    /// How many in-app notification rows were written.
    pub notifications_sent: usize,
}

/// One school in the schools overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolDto {
    /// The school.
    pub school_id: i64,
    /// The owning region.
    pub region_id: i64,
    /// The school name.
    pub name: String,
}

/// The schools overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSchoolsResponse {
    /// All schools, in name order.
    pub schools: Vec<SchoolDto>,
}

/// Request to provision an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    /// The login name (will be normalized).
    pub login_name: String,
    /// The display name.
    pub display_name: String,
    /// The plain-text password (will be hashed).
    pub password: String,
    /// The role string.
    pub role: String,
    /// The school scope (required for Head Teacher accounts).
    pub school_id: Option<i64>,
    /// The region scope (required for Regional Officer accounts).
    pub region_id: Option<i64>,
}

/// Response for a successful account creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountResponse {
    /// The created account.
    pub account_id: i64,
    /// The normalized login name.
    pub login_name: String,
    /// The account role.
    pub role: String,
}
