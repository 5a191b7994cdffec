// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report lifecycle states and derived submission status.
//!
//! `ReportStatus` is the stored lifecycle state of a report. `SubmissionStatus`
//! is derived per school and period at read time and is never persisted.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// The stored lifecycle state of a report.
///
/// A report is created as `Draft` and transitions to `Submitted` exactly
/// once. `Submitted` is terminal: no code path reverts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReportStatus {
    /// Initial state after creation. Sections may be edited.
    #[default]
    Draft,
    /// The report has been filed. Read-only from here on.
    Submitted,
}

impl FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Submitted" => Ok(Self::Submitted),
            _ => Err(DomainError::InvalidReportStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ReportStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
        }
    }

    /// Returns whether the report may still be edited or deleted.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Validates that this report may transition to `Submitted`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReportNotDraft` if the report has already
    /// been submitted.
    pub fn validate_submit(&self) -> Result<(), DomainError> {
        match self {
            Self::Draft => Ok(()),
            Self::Submitted => Err(DomainError::ReportNotDraft {
                status: self.as_str().to_string(),
            }),
        }
    }
}

/// The derived status of a school for a reporting period.
///
/// Computed from the stored report row (if any) and the due date. Never
/// persisted; always recomputed at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// No report exists and the due date has not passed.
    NotSubmitted,
    /// A draft exists and the due date has not passed.
    Draft,
    /// The report was submitted. Submission after the due date is still
    /// `Submitted`, never retroactively overdue.
    Submitted,
    /// The due date has passed without a submitted report.
    Overdue,
}

impl SubmissionStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotSubmitted => "NotSubmitted",
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Overdue => "Overdue",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a school's status for a reporting period.
///
/// The stored status wins except for the not-submitted/overdue split,
/// which depends only on the wall-clock comparison against the due date.
/// The boundary is non-strict: a report is overdue only when `now` is
/// past the due day, not on it.
///
/// # Arguments
///
/// * `status` - The stored report status, or `None` when no non-deleted
///   report exists for the period
/// * `due` - The due date for the period
/// * `now` - The current instant (UTC)
#[must_use]
pub fn classify(status: Option<ReportStatus>, due: Date, now: OffsetDateTime) -> SubmissionStatus {
    let past_due = now.date() > due;
    match status {
        Some(ReportStatus::Submitted) => SubmissionStatus::Submitted,
        Some(ReportStatus::Draft) => {
            if past_due {
                SubmissionStatus::Overdue
            } else {
                SubmissionStatus::Draft
            }
        }
        None => {
            if past_due {
                SubmissionStatus::Overdue
            } else {
                SubmissionStatus::NotSubmitted
            }
        }
    }
}
