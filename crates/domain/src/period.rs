// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting period calculation.
//!
//! Head Teachers report retrospectively: during any calendar month, the
//! period open for submission is the month before, and the report is due
//! on the last day of the current month.
//!
//! ## Invariants
//!
//! - The current reporting period is always the previous calendar month
//! - The due date always falls within the same month as "now"
//! - Missing periods are scoped to the current calendar year only
//! - All wall-clock decisions use UTC
//!
//! ## Usage
//!
//! This logic is used by:
//! - Report creation (to resolve the open period)
//! - Dashboards (submission state per school)
//! - Overdue reminder computation

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use time::{Date, Month, OffsetDateTime};

/// A single calendar month for which a school may file one report.
///
/// Periods are equal iff month and year match, and are ordered
/// lexicographically by `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// The calendar year.
    year: i32,
    /// The calendar month (1-12).
    month: u8,
}

impl ReportingPeriod {
    /// Creates a new `ReportingPeriod`.
    ///
    /// # Arguments
    ///
    /// * `month` - The calendar month (must be between 1 and 12 inclusive)
    /// * `year` - The calendar year
    ///
    /// # Errors
    ///
    /// Returns an error if the month is not in the range 1-12.
    pub const fn new(month: u8, year: i32) -> Result<Self, DomainError> {
        if month >= 1 && month <= 12 {
            Ok(Self { year, month })
        } else {
            Err(DomainError::InvalidMonth(month))
        }
    }

    /// Returns the calendar month (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.month, self.year)
    }
}

/// Derives the reporting period currently open for submission.
///
/// The open period is always the calendar month before `now`. In January
/// the open period is December of the previous year.
///
/// # Arguments
///
/// * `now` - The current instant (UTC)
#[must_use]
pub fn current_reporting_period(now: OffsetDateTime) -> ReportingPeriod {
    let month = u8::from(now.month());
    if month == 1 {
        ReportingPeriod {
            year: now.year() - 1,
            month: 12,
        }
    } else {
        ReportingPeriod {
            year: now.year(),
            month: month - 1,
        }
    }
}

/// Derives the due date for the currently open reporting period.
///
/// Reports for last month are due at the end of this month, so the due
/// date is the last calendar day of `now`'s own month. Leap years are
/// handled by `time`'s calendar arithmetic.
///
/// # Arguments
///
/// * `now` - The current instant (UTC)
///
/// # Errors
///
/// Returns an error if the date cannot be constructed, which would
/// indicate a bug in the month-length computation.
pub fn due_date(now: OffsetDateTime) -> Result<Date, DomainError> {
    let month: Month = now.month();
    let last_day: u8 = month.length(now.year());
    Date::from_calendar_date(now.year(), month, last_day).map_err(|e| DomainError::InvalidDate {
        reason: format!("computing last day of {month} {}: {e}", now.year()),
    })
}

/// Computes the months of the current year with no submitted report.
///
/// The scope is January of `now`'s year through the month immediately
/// before the currently open reporting period. Months from prior years
/// are never reported as missing; when the open period is December of
/// the previous year the result is empty. Only **Submitted** reports
/// clear a month - drafts do not count.
///
/// # Arguments
///
/// * `submitted` - Periods for which a submitted report exists
/// * `now` - The current instant (UTC)
///
/// # Returns
///
/// The missing periods in ascending month order.
#[must_use]
pub fn missing_periods(
    submitted: &HashSet<ReportingPeriod>,
    now: OffsetDateTime,
) -> Vec<ReportingPeriod> {
    let open = current_reporting_period(now);

    // Open period in December of the prior year: nothing is expected
    // for the current year yet.
    if open.year() != now.year() {
        return Vec::new();
    }

    (1..open.month())
        .map(|month| ReportingPeriod {
            year: now.year(),
            month,
        })
        .filter(|period| !submitted.contains(period))
        .collect()
}
