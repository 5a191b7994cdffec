// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The API operations.
//!
//! Each handler takes the persistence adapter, the authenticated actor,
//! a request DTO, and the current instant. The clock is always passed in
//! so behavior around period boundaries is testable.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::time::Instant;

use time::OffsetDateTime;
use tracing::{debug, info};

use edu_report_domain::{
    MonthlyRow, ReportStatus, ReportingPeriod, average_by, classify, current_reporting_period,
    due_date, group_by_month, missing_periods, period_key, sum_by,
};
use edu_report_persistence::{Persistence, PersistenceError, ReportRecord, SchoolRecord};

use crate::auth::{AuthenticatedActor, AuthenticationService, Role};
use crate::cache::TtlCache;
use crate::csv_export::render_statuses_csv;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::permissions::{Operation, authorize, check_region_scope, check_school_scope};
use crate::request_response::{
    ChartSeriesRequest, ChartSeriesResponse, CreateAccountRequest, CreateAccountResponse,
    CreateReportRequest, CreateReportResponse, DeleteReportRequest, DeleteReportResponse,
    ListSchoolsResponse, LoginRequest, LoginResponse, MonthlyPoint, OverduePair,
    OverdueRemindersResponse, RegionDashboardRequest, RegionDashboardResponse,
    SchoolDashboardRequest, SchoolDashboardResponse, SchoolDto, SchoolStatusRow,
    SubmitReportRequest, SubmitReportResponse, UpdateReportSectionsRequest,
    UpdateReportSectionsResponse, WhoAmIResponse,
};

// ============================================================================
// Authentication
// ============================================================================

/// Authenticates an account and opens a session.
///
/// # Errors
///
/// Returns an error if the credentials are invalid or the account is
/// disabled.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
    now: OffsetDateTime,
) -> Result<LoginResponse, ApiError> {
    let (session_token, actor) =
        AuthenticationService::login(persistence, &request.login_name, &request.password, now)?;

    Ok(LoginResponse {
        session_token,
        account_id: actor.account_id,
        role: String::from(actor.role.as_str()),
    })
}

/// Closes the session behind a token.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Describes the authenticated actor.
#[must_use]
pub fn who_am_i(actor: &AuthenticatedActor) -> WhoAmIResponse {
    WhoAmIResponse {
        account_id: actor.account_id,
        login_name: actor.login_name.clone(),
        role: String::from(actor.role.as_str()),
        school_id: actor.school_id,
        region_id: actor.region_id,
    }
}

// ============================================================================
// Report lifecycle
// ============================================================================

/// Creates a draft report for a school and period.
///
/// The uniqueness rule (one report per school and period) is enforced
/// by the storage layer's partial unique index, so concurrent creates
/// cannot race past a read-then-insert check here.
///
/// # Errors
///
/// Returns an error if the actor may not write for the school, the
/// period is invalid, or a report already exists for the period.
pub fn create_report(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateReportRequest,
) -> Result<CreateReportResponse, ApiError> {
    authorize(Operation::CreateReport, actor)?;

    let period =
        ReportingPeriod::new(request.month, request.year).map_err(translate_domain_error)?;

    let school = load_school(persistence, request.school_id)?;
    check_school_scope(
        Operation::CreateReport,
        actor,
        school.school_id,
        school.region_id,
    )?;

    let report_id = match persistence.create_report(school.school_id, period.month(), period.year())
    {
        Ok(id) => id,
        Err(PersistenceError::DuplicateReport { .. }) => {
            return Err(duplicate_report_error(persistence, school.school_id, period));
        }
        Err(e) => return Err(translate_persistence_error(e)),
    };

    info!(
        "Report {report_id} created for school {} period {period}",
        school.school_id
    );

    Ok(CreateReportResponse {
        report_id,
        school_id: school.school_id,
        month: period.month(),
        year: period.year(),
        status: String::from(ReportStatus::Draft.as_str()),
    })
}

/// Builds the duplicate-report error, distinguishing an existing
/// submitted report from an existing draft.
fn duplicate_report_error(
    persistence: &mut Persistence,
    school_id: i64,
    period: ReportingPeriod,
) -> ApiError {
    let existing = persistence
        .get_report_for_period(school_id, period.month(), period.year())
        .ok()
        .flatten();

    let message = match existing {
        Some(report) if report.status == ReportStatus::Submitted.as_str() => format!(
            "A report for school {school_id} in period {period} was already submitted"
        ),
        _ => format!("A report already exists for school {school_id} in period {period}"),
    };

    ApiError::DomainRuleViolation {
        rule: String::from("unique_report"),
        message,
    }
}

/// Replaces the data sections of a draft report.
///
/// Sections present in the request replace that section's rows in one
/// transaction each; absent sections are untouched.
///
/// # Errors
///
/// Returns an error if the report is missing, outside the actor's
/// scope, not a draft, or a row fails validation.
pub fn update_report_sections(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &UpdateReportSectionsRequest,
) -> Result<UpdateReportSectionsResponse, ApiError> {
    authorize(Operation::UpdateReportSections, actor)?;

    let report = load_editable_report(
        persistence,
        actor,
        Operation::UpdateReportSections,
        request.report_id,
    )?;

    if let Some(rows) = &request.enrollment {
        let entries: Vec<(String, i32)> = rows
            .iter()
            .map(|row| {
                validate_section_role(&row.role)?;
                if row.head_count < 0 {
                    return Err(ApiError::InvalidInput {
                        field: String::from("head_count"),
                        message: format!("Head count must not be negative: {}", row.head_count),
                    });
                }
                Ok((row.role.clone(), row.head_count))
            })
            .collect::<Result<_, ApiError>>()?;
        persistence
            .replace_enrollment_entries(report.report_id, &entries)
            .map_err(translate_persistence_error)?;
    }

    if let Some(rows) = &request.attendance {
        let entries: Vec<(String, i32)> = rows
            .iter()
            .map(|row| {
                validate_section_role(&row.role)?;
                if !(0..=100).contains(&row.attendance_rate) {
                    return Err(ApiError::InvalidInput {
                        field: String::from("attendance_rate"),
                        message: format!(
                            "Attendance rate must be between 0 and 100: {}",
                            row.attendance_rate
                        ),
                    });
                }
                Ok((row.role.clone(), row.attendance_rate))
            })
            .collect::<Result<_, ApiError>>()?;
        persistence
            .replace_attendance_entries(report.report_id, &entries)
            .map_err(translate_persistence_error)?;
    }

    if let Some(rows) = &request.finance {
        let entries: Vec<(String, Option<i64>)> = rows
            .iter()
            .map(|row| {
                validate_finance_kind(&row.kind)?;
                Ok((row.kind.clone(), row.amount))
            })
            .collect::<Result<_, ApiError>>()?;
        persistence
            .replace_finance_entries(report.report_id, &entries)
            .map_err(translate_persistence_error)?;
    }

    debug!("Report {} sections updated", report.report_id);

    Ok(UpdateReportSectionsResponse {
        report_id: report.report_id,
        message: String::from("Report sections updated"),
    })
}

/// Submits a draft report. Submission is terminal.
///
/// # Errors
///
/// Returns an error if the report is missing, outside the actor's
/// scope, or already submitted.
pub fn submit_report(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &SubmitReportRequest,
) -> Result<SubmitReportResponse, ApiError> {
    authorize(Operation::SubmitReport, actor)?;

    let report = load_editable_report(
        persistence,
        actor,
        Operation::SubmitReport,
        request.report_id,
    )?;

    persistence
        .submit_report(report.report_id)
        .map_err(translate_persistence_error)?;

    info!(
        "Report {} submitted for school {} period {}-{}",
        report.report_id, report.school_id, report.month, report.year
    );

    Ok(SubmitReportResponse {
        report_id: report.report_id,
        status: String::from(ReportStatus::Submitted.as_str()),
    })
}

/// Soft-deletes a draft report.
///
/// Deletion frees the period: a new report may be created for the same
/// school and period afterwards.
///
/// # Errors
///
/// Returns an error if the report is missing, outside the actor's
/// scope, or already submitted.
pub fn delete_report(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &DeleteReportRequest,
) -> Result<DeleteReportResponse, ApiError> {
    authorize(Operation::DeleteReport, actor)?;

    let report = load_editable_report(
        persistence,
        actor,
        Operation::DeleteReport,
        request.report_id,
    )?;

    persistence
        .soft_delete_report(report.report_id)
        .map_err(translate_persistence_error)?;

    info!("Report {} deleted", report.report_id);

    Ok(DeleteReportResponse {
        report_id: report.report_id,
        message: String::from("Report deleted"),
    })
}

// ============================================================================
// Dashboards
// ============================================================================

/// Builds the single-school dashboard.
///
/// Covers the open period's status and due date plus the current-year
/// months that still have no submitted report.
///
/// # Errors
///
/// Returns an error if the school is missing or outside the actor's
/// scope.
pub fn school_dashboard(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &SchoolDashboardRequest,
    now: OffsetDateTime,
) -> Result<SchoolDashboardResponse, ApiError> {
    authorize(Operation::SchoolDashboard, actor)?;

    let school = load_school(persistence, request.school_id)?;
    check_school_scope(
        Operation::SchoolDashboard,
        actor,
        school.school_id,
        school.region_id,
    )?;

    let open_period = current_reporting_period(now);
    let due = due_date(now).map_err(translate_domain_error)?;

    let status = period_status(persistence, school.school_id, open_period, now)?;

    let submitted: HashSet<ReportingPeriod> = persistence
        .submitted_months(school.school_id, now.year())
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|month| ReportingPeriod::new(month, now.year()).map_err(translate_domain_error))
        .collect::<Result<_, ApiError>>()?;

    Ok(SchoolDashboardResponse {
        school_id: school.school_id,
        open_period,
        due_date: due.to_string(),
        status,
        missing_periods: missing_periods(&submitted, now),
    })
}

/// Builds the per-region dashboard: one status row per school in the
/// region for the open period.
///
/// # Errors
///
/// Returns an error if the region is outside the actor's scope.
pub fn region_dashboard(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &RegionDashboardRequest,
    now: OffsetDateTime,
) -> Result<RegionDashboardResponse, ApiError> {
    authorize(Operation::RegionDashboard, actor)?;
    check_region_scope(Operation::RegionDashboard, actor, request.region_id)?;

    let schools = persistence
        .list_schools_in_region(request.region_id)
        .map_err(translate_persistence_error)?;

    let open_period = current_reporting_period(now);
    let due = due_date(now).map_err(translate_domain_error)?;

    let rows = school_status_rows(persistence, &schools, open_period, now)?;

    Ok(RegionDashboardResponse {
        region_id: request.region_id,
        open_period,
        due_date: due.to_string(),
        schools: rows,
    })
}

// ============================================================================
// Charts
// ============================================================================

/// One section row joined to its report's period, for grouping.
struct PeriodRow {
    month: u8,
    year: i32,
    label: String,
    value: Option<i64>,
}

impl MonthlyRow for PeriodRow {
    fn month(&self) -> u8 {
        self.month
    }
    fn year(&self) -> i32 {
        self.year
    }
}

/// Builds the chart series for a school and calendar year.
///
/// Enrollment and attendance are averaged per role and month; income
/// and expenditure are summed per month. Every series carries one point
/// per non-deleted report of the year, ordered by period ascending.
///
/// # Errors
///
/// Returns an error if the school is missing or outside the actor's
/// scope.
pub fn chart_series(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ChartSeriesRequest,
) -> Result<ChartSeriesResponse, ApiError> {
    authorize(Operation::ChartSeries, actor)?;

    let school = load_school(persistence, request.school_id)?;
    check_school_scope(
        Operation::ChartSeries,
        actor,
        school.school_id,
        school.region_id,
    )?;

    let reports = persistence
        .list_reports_for_school_year(school.school_id, request.year)
        .map_err(translate_persistence_error)?;

    let report_ids: Vec<i64> = reports.iter().map(|r| r.report_id).collect();
    let period_of: HashMap<i64, (u8, i32)> = reports
        .iter()
        .map(|r| (r.report_id, (r.month, r.year)))
        .collect();

    let mut periods: Vec<ReportingPeriod> = reports
        .iter()
        .map(|r| ReportingPeriod::new(r.month, r.year).map_err(translate_domain_error))
        .collect::<Result<_, ApiError>>()?;
    periods.sort_unstable();

    let enrollment = persistence
        .enrollment_for_reports(&report_ids)
        .map_err(translate_persistence_error)?;
    let attendance = persistence
        .attendance_for_reports(&report_ids)
        .map_err(translate_persistence_error)?;
    let finance = persistence
        .finance_for_reports(&report_ids)
        .map_err(translate_persistence_error)?;

    let enrollment_groups = group_by_month(
        enrollment
            .into_iter()
            .filter_map(|e| {
                period_of.get(&e.report_id).map(|&(month, year)| PeriodRow {
                    month,
                    year,
                    label: e.role,
                    value: Some(i64::from(e.head_count)),
                })
            })
            .collect(),
    );
    let attendance_groups = group_by_month(
        attendance
            .into_iter()
            .filter_map(|a| {
                period_of.get(&a.report_id).map(|&(month, year)| PeriodRow {
                    month,
                    year,
                    label: a.role,
                    value: Some(i64::from(a.attendance_rate)),
                })
            })
            .collect(),
    );
    let finance_groups = group_by_month(
        finance
            .into_iter()
            .filter_map(|f| {
                period_of.get(&f.report_id).map(|&(month, year)| PeriodRow {
                    month,
                    year,
                    label: f.kind,
                    value: f.amount,
                })
            })
            .collect(),
    );

    let role_series = |groups: &HashMap<String, Vec<PeriodRow>>, role: &str| -> Vec<MonthlyPoint> {
        periods
            .iter()
            .map(|period| {
                let empty: Vec<PeriodRow> = Vec::new();
                let rows = groups
                    .get(&period_key(period.month(), period.year()))
                    .unwrap_or(&empty);
                MonthlyPoint {
                    period: *period,
                    value: average_by(rows, |r| r.label == role, |r| r.value.unwrap_or(0)),
                }
            })
            .collect()
    };
    let sum_series = |groups: &HashMap<String, Vec<PeriodRow>>, kind: &str| -> Vec<MonthlyPoint> {
        periods
            .iter()
            .map(|period| {
                let empty: Vec<PeriodRow> = Vec::new();
                let rows = groups
                    .get(&period_key(period.month(), period.year()))
                    .unwrap_or(&empty);
                let matching: Vec<&PeriodRow> =
                    rows.iter().filter(|r| r.label == kind).collect();
                MonthlyPoint {
                    period: *period,
                    value: sum_by(&matching, |r| r.value),
                }
            })
            .collect()
    };

    Ok(ChartSeriesResponse {
        school_id: school.school_id,
        year: request.year,
        enrollment_students: role_series(&enrollment_groups, "student"),
        enrollment_teachers: role_series(&enrollment_groups, "teacher"),
        attendance_students: role_series(&attendance_groups, "student"),
        attendance_teachers: role_series(&attendance_groups, "teacher"),
        income: sum_series(&finance_groups, "income"),
        expenditure: sum_series(&finance_groups, "expenditure"),
    })
}

// ============================================================================
// Reminders, overview, export
// ============================================================================

/// Computes the overdue `(school, period)` pairs and writes one in-app
/// notification per pair per Head Teacher account of the school.
///
/// A period is overdue when its due date has passed without a submitted
/// report. The open period's due date is the end of the current month,
/// so it is never overdue itself; the pairs cover the current-year
/// periods before it. Drafts do not clear a period.
///
/// # Errors
///
/// Returns an error if the actor may not compute reminders or a
/// database operation fails.
pub fn overdue_reminders(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<OverdueRemindersResponse, ApiError> {
    authorize(Operation::OverdueReminders, actor)?;

    let open_period = current_reporting_period(now);
    let schools = persistence
        .list_schools()
        .map_err(translate_persistence_error)?;

    let mut overdue: Vec<OverduePair> = Vec::new();
    let mut notifications_sent: usize = 0;

    for school in schools {
        let submitted: HashSet<ReportingPeriod> = persistence
            .submitted_months(school.school_id, now.year())
            .map_err(translate_persistence_error)?
            .into_iter()
            .map(|month| ReportingPeriod::new(month, now.year()).map_err(translate_domain_error))
            .collect::<Result<_, ApiError>>()?;

        let missing = missing_periods(&submitted, now);
        if missing.is_empty() {
            continue;
        }

        let recipients = persistence
            .head_teacher_accounts_for_school(school.school_id)
            .map_err(translate_persistence_error)?;

        for period in missing {
            for recipient in &recipients {
                persistence
                    .insert_notification(
                        recipient.account_id,
                        &format!(
                            "The monthly report for {} for period {period} is overdue",
                            school.name
                        ),
                    )
                    .map_err(translate_persistence_error)?;
                notifications_sent += 1;
            }

            overdue.push(OverduePair {
                school_id: school.school_id,
                school_name: school.name.clone(),
                period,
            });
        }
    }

    info!(
        "Overdue reminders for {open_period}: {} schools, {notifications_sent} notifications",
        overdue.len()
    );

    Ok(OverdueRemindersResponse {
        open_period,
        overdue,
        notifications_sent,
    })
}

/// Lists all schools, serving repeat reads from the injected cache.
///
/// # Errors
///
/// Returns an error if the actor may not list schools or the query
/// fails on a cache miss.
pub fn list_schools(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    cache: &mut TtlCache<Vec<SchoolDto>>,
    cache_now: Instant,
) -> Result<ListSchoolsResponse, ApiError> {
    authorize(Operation::ListSchools, actor)?;

    if let Some(schools) = cache.get(cache_now) {
        debug!("Schools overview served from cache");
        return Ok(ListSchoolsResponse {
            schools: schools.clone(),
        });
    }

    let schools: Vec<SchoolDto> = persistence
        .list_schools()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|s| SchoolDto {
            school_id: s.school_id,
            region_id: s.region_id,
            name: s.name,
        })
        .collect();

    cache.put(schools.clone(), cache_now);

    Ok(ListSchoolsResponse { schools })
}

/// Exports per-school statuses for the open period as CSV.
///
/// Regional Officers export their own region; Education Officials and
/// Admins export all schools.
///
/// # Errors
///
/// Returns an error if the actor may not export or a query fails.
pub fn export_statuses_csv(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<String, ApiError> {
    authorize(Operation::ExportStatuses, actor)?;

    let schools = match actor.role {
        Role::RegionalOfficer => {
            let region_id = actor.region_id.ok_or_else(|| ApiError::Unauthorized {
                operation: String::from(Operation::ExportStatuses.as_str()),
                reason: String::from("Regional Officer account has no region"),
            })?;
            persistence
                .list_schools_in_region(region_id)
                .map_err(translate_persistence_error)?
        }
        _ => persistence
            .list_schools()
            .map_err(translate_persistence_error)?,
    };

    let open_period = current_reporting_period(now);
    let rows = school_status_rows(persistence, &schools, open_period, now)?;

    render_statuses_csv(open_period, &rows)
}

// ============================================================================
// Accounts
// ============================================================================

/// Provisions a new account.
///
/// Head Teacher accounts require a school scope, Regional Officer
/// accounts a region scope. Referenced schools must exist.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the request fails
/// validation.
pub fn create_account(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateAccountRequest,
) -> Result<CreateAccountResponse, ApiError> {
    authorize(Operation::CreateAccount, actor)?;

    let role = Role::parse(&request.role).map_err(|_| ApiError::InvalidInput {
        field: String::from("role"),
        message: format!("Invalid role: {}", request.role),
    })?;

    if request.password.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("password"),
            message: String::from("Password must not be empty"),
        });
    }

    match role {
        Role::HeadTeacher => {
            let school_id = request.school_id.ok_or_else(|| ApiError::InvalidInput {
                field: String::from("school_id"),
                message: String::from("Head Teacher accounts require a school"),
            })?;
            load_school(persistence, school_id)?;
        }
        Role::RegionalOfficer => {
            request.region_id.ok_or_else(|| ApiError::InvalidInput {
                field: String::from("region_id"),
                message: String::from("Regional Officer accounts require a region"),
            })?;
        }
        Role::EducationOfficial | Role::Admin => {}
    }

    let account_id = persistence
        .create_account(
            &request.login_name,
            &request.display_name,
            &request.password,
            role.as_str(),
            request.school_id,
            request.region_id,
        )
        .map_err(translate_persistence_error)?;

    info!(
        "Account {account_id} created with role {} by {}",
        role, actor.login_name
    );

    Ok(CreateAccountResponse {
        account_id,
        login_name: request.login_name.to_uppercase(),
        role: String::from(role.as_str()),
    })
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Loads a school or fails with `ResourceNotFound`.
fn load_school(persistence: &mut Persistence, school_id: i64) -> Result<SchoolRecord, ApiError> {
    persistence
        .get_school(school_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("School"),
            message: format!("School {school_id} does not exist"),
        })
}

/// Loads a report, checks the actor's school scope, and verifies the
/// report is still a draft.
fn load_editable_report(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    operation: Operation,
    report_id: i64,
) -> Result<ReportRecord, ApiError> {
    let report = persistence
        .get_report_by_id(report_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Report"),
            message: format!("Report {report_id} does not exist"),
        })?;

    let school = load_school(persistence, report.school_id)?;
    check_school_scope(operation, actor, school.school_id, school.region_id)?;

    let status = ReportStatus::from_str(&report.status).map_err(translate_domain_error)?;
    status.validate_submit().map_err(translate_domain_error)?;

    Ok(report)
}

/// Computes the classified status string for one school and period.
fn period_status(
    persistence: &mut Persistence,
    school_id: i64,
    period: ReportingPeriod,
    now: OffsetDateTime,
) -> Result<String, ApiError> {
    let report = persistence
        .get_report_for_period(school_id, period.month(), period.year())
        .map_err(translate_persistence_error)?;

    let status = report
        .map(|r| ReportStatus::from_str(&r.status).map_err(translate_domain_error))
        .transpose()?;

    let due = due_date(now).map_err(translate_domain_error)?;
    Ok(String::from(classify(status, due, now).as_str()))
}

/// Classifies each school of a slice for one period, in input order
/// (the school queries already order by name).
fn school_status_rows(
    persistence: &mut Persistence,
    schools: &[SchoolRecord],
    period: ReportingPeriod,
    now: OffsetDateTime,
) -> Result<Vec<SchoolStatusRow>, ApiError> {
    let school_ids: Vec<i64> = schools.iter().map(|s| s.school_id).collect();
    let reports = persistence
        .list_reports_for_schools_period(&school_ids, period.month(), period.year())
        .map_err(translate_persistence_error)?;

    let status_of: HashMap<i64, String> = reports
        .into_iter()
        .map(|r| (r.school_id, r.status))
        .collect();

    let due = due_date(now).map_err(translate_domain_error)?;

    schools
        .iter()
        .map(|school| {
            let stored = status_of
                .get(&school.school_id)
                .map(|s| ReportStatus::from_str(s).map_err(translate_domain_error))
                .transpose()?;
            Ok(SchoolStatusRow {
                school_id: school.school_id,
                school_name: school.name.clone(),
                status: String::from(classify(stored, due, now).as_str()),
            })
        })
        .collect()
}

/// Validates an enrollment or attendance role label.
fn validate_section_role(role: &str) -> Result<(), ApiError> {
    match role {
        "student" | "teacher" => Ok(()),
        _ => Err(ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown section role: {role}"),
        }),
    }
}

/// Validates a finance kind label.
fn validate_finance_kind(kind: &str) -> Result<(), ApiError> {
    match kind {
        "income" | "expenditure" => Ok(()),
        _ => Err(ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Unknown finance kind: {kind}"),
        }),
    }
}
