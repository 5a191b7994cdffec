// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-based authorization.
//!
//! All role gating goes through one predicate, `is_allowed`, so the
//! full permission matrix is visible in a single match. Scope checks
//! (own school, own region) layer on top of the role check.

use crate::auth::{AuthenticatedActor, Role};
use crate::error::AuthError;

/// The operations subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create a draft report for a school and period.
    CreateReport,
    /// Update the data sections of a draft report.
    UpdateReportSections,
    /// Submit a draft report.
    SubmitReport,
    /// Soft-delete a draft report.
    DeleteReport,
    /// Read the single-school dashboard.
    SchoolDashboard,
    /// Read the per-region dashboard.
    RegionDashboard,
    /// Read chart series for a school and year.
    ChartSeries,
    /// Compute overdue reminders for the open period.
    OverdueReminders,
    /// List all schools.
    ListSchools,
    /// Export per-school statuses as CSV.
    ExportStatuses,
    /// Provision a new account.
    CreateAccount,
}

impl Operation {
    /// Returns the operation name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateReport => "create_report",
            Self::UpdateReportSections => "update_report_sections",
            Self::SubmitReport => "submit_report",
            Self::DeleteReport => "delete_report",
            Self::SchoolDashboard => "school_dashboard",
            Self::RegionDashboard => "region_dashboard",
            Self::ChartSeries => "chart_series",
            Self::OverdueReminders => "overdue_reminders",
            Self::ListSchools => "list_schools",
            Self::ExportStatuses => "export_statuses",
            Self::CreateAccount => "create_account",
        }
    }
}

/// The permission matrix: which role may perform which operation.
///
/// Admins carry Head-Teacher-equivalent write powers on any school in
/// addition to full read access.
#[must_use]
pub const fn is_allowed(operation: Operation, role: Role) -> bool {
    match operation {
        Operation::CreateReport
        | Operation::UpdateReportSections
        | Operation::SubmitReport
        | Operation::DeleteReport => matches!(role, Role::HeadTeacher | Role::Admin),
        Operation::SchoolDashboard | Operation::ChartSeries => true,
        Operation::RegionDashboard => matches!(
            role,
            Role::RegionalOfficer | Role::EducationOfficial | Role::Admin
        ),
        Operation::OverdueReminders => matches!(role, Role::EducationOfficial | Role::Admin),
        Operation::ListSchools | Operation::ExportStatuses => matches!(
            role,
            Role::RegionalOfficer | Role::EducationOfficial | Role::Admin
        ),
        Operation::CreateAccount => matches!(role, Role::Admin),
    }
}

/// Checks the permission matrix for an actor.
///
/// # Errors
///
/// Returns an error if the actor's role does not allow the operation.
pub fn authorize(operation: Operation, actor: &AuthenticatedActor) -> Result<(), AuthError> {
    if is_allowed(operation, actor.role) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized {
            operation: String::from(operation.as_str()),
            reason: format!("not permitted for role {}", actor.role),
        })
    }
}

/// Checks that an actor may act on a specific school.
///
/// Head Teachers act only on their own school. Regional Officers read
/// only schools in their region (the caller resolves the school's
/// region). Other roles pass.
///
/// # Arguments
///
/// * `operation` - The operation, for error messages
/// * `actor` - The authenticated actor
/// * `school_id` - The target school
/// * `school_region_id` - The target school's region
///
/// # Errors
///
/// Returns an error if the school is outside the actor's scope.
pub fn check_school_scope(
    operation: Operation,
    actor: &AuthenticatedActor,
    school_id: i64,
    school_region_id: i64,
) -> Result<(), AuthError> {
    match actor.role {
        Role::HeadTeacher => {
            if actor.school_id == Some(school_id) {
                Ok(())
            } else {
                Err(AuthError::Unauthorized {
                    operation: String::from(operation.as_str()),
                    reason: format!("school {school_id} is not this Head Teacher's school"),
                })
            }
        }
        Role::RegionalOfficer => {
            if actor.region_id == Some(school_region_id) {
                Ok(())
            } else {
                Err(AuthError::Unauthorized {
                    operation: String::from(operation.as_str()),
                    reason: format!("school {school_id} is outside this officer's region"),
                })
            }
        }
        Role::EducationOfficial | Role::Admin => Ok(()),
    }
}

/// Checks that an actor may read a specific region.
///
/// Regional Officers read only their own region; Education Officials
/// and Admins read any region.
///
/// # Errors
///
/// Returns an error if the region is outside the actor's scope.
pub fn check_region_scope(
    operation: Operation,
    actor: &AuthenticatedActor,
    region_id: i64,
) -> Result<(), AuthError> {
    match actor.role {
        Role::RegionalOfficer => {
            if actor.region_id == Some(region_id) {
                Ok(())
            } else {
                Err(AuthError::Unauthorized {
                    operation: String::from(operation.as_str()),
                    reason: format!("region {region_id} is not this officer's region"),
                })
            }
        }
        Role::EducationOfficial | Role::Admin => Ok(()),
        Role::HeadTeacher => Err(AuthError::Unauthorized {
            operation: String::from(operation.as_str()),
            reason: String::from("Head Teachers have no region-wide access"),
        }),
    }
}
